// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Result, return_error};
use tracing::{debug, instrument};

use crate::{
	Catalog,
	column::ColumnToCreate,
	error::CatalogError,
	id::{DirId, TableId, Version},
	md::{ComponentIterator, ViewMd},
	table::TableDef,
};

#[derive(Debug, Clone)]
pub struct ViewToCreate {
	pub dir: DirId,
	pub name: String,
	pub base: TableId,
	/// Base version a snapshot is pinned to; the base's current version when
	/// `None`. Live views always track the head.
	pub base_version: Option<Version>,
	pub is_snapshot: bool,
	/// Serialized filter over the base rows.
	pub predicate: Option<serde_json::Value>,
	pub iterator: Option<ComponentIterator>,
	pub columns: Vec<ColumnToCreate>,
	pub num_retained_versions: Option<u32>,
	pub comment: String,
}

impl ViewToCreate {
	pub fn new(dir: DirId, name: impl Into<String>, base: TableId) -> Self {
		Self {
			dir,
			name: name.into(),
			base,
			base_version: None,
			is_snapshot: false,
			predicate: None,
			iterator: None,
			columns: vec![],
			num_retained_versions: None,
			comment: String::new(),
		}
	}

	pub fn snapshot(mut self, base_version: Option<Version>) -> Self {
		self.is_snapshot = true;
		self.base_version = base_version;
		self
	}

	pub fn with_predicate(mut self, predicate: serde_json::Value) -> Self {
		self.predicate = Some(predicate);
		self
	}

	pub fn with_iterator(mut self, iterator: ComponentIterator) -> Self {
		self.iterator = Some(iterator);
		self
	}

	pub fn with_column(mut self, column: ColumnToCreate) -> Self {
		self.columns.push(column);
		self
	}
}

impl Catalog {
	#[instrument(name = "catalog::view::create", level = "debug", skip(self, to_create), fields(base = %to_create.base))]
	pub fn create_view(&self, to_create: ViewToCreate) -> Result<TableDef> {
		self.get_dir(to_create.dir)?;
		let base = self.get_table(to_create.base)?;
		let base_versions = self.resolve_base_versions(&base, to_create.is_snapshot, to_create.base_version)?;

		let id = TableId::generate();
		let (mut md, mut schema) = self.new_table_md(id, &to_create.name, to_create.num_retained_versions)?;
		schema.comment = to_create.comment;

		let (iterator_class_fqn, iterator_args) = match to_create.iterator {
			Some(iterator) => (Some(iterator.class_fqn), Some(iterator.args)),
			None => (None, None),
		};
		md.view_md = Some(ViewMd {
			is_snapshot: to_create.is_snapshot,
			base_versions,
			predicate: to_create.predicate,
			iterator_class_fqn,
			iterator_args,
		});

		let visible = self.visible_columns(&md, &schema)?;
		self.append_columns(id, &mut md, &mut schema, visible, to_create.columns)?;

		self.commit(id, Some(to_create.dir), &md, Some(&schema))?;
		debug!("created view {} ({}) over {}", md.name, id, base.id);

		Ok(TableDef {
			id,
			dir: Some(to_create.dir),
			md,
		})
	}

	/// The direct base followed by the base's own chain; every version
	/// resolved for a snapshot, none for a live view.
	fn resolve_base_versions(
		&self,
		base: &TableDef,
		is_snapshot: bool,
		base_version: Option<Version>,
	) -> Result<Vec<(TableId, Option<Version>)>> {
		let chain = base.md.view_md.as_ref().map(|view| view.base_versions.clone()).unwrap_or_default();

		if !is_snapshot {
			if base.md.is_snapshot() {
				return_error!(CatalogError::LiveViewOverSnapshot {
					base: base.id
				});
			}
			if let Some(version) = base_version {
				return_error!(CatalogError::LiveViewAtVersion {
					base: base.id,
					version,
				});
			}
			let mut result = vec![(base.id, None)];
			result.extend(chain);
			return Ok(result);
		}

		let version = base_version.unwrap_or(base.md.current_version);
		self.snapshot(base.id, Some(version))?;

		let mut result = vec![(base.id, Some(version))];
		for (table, version) in chain {
			let version = match version {
				Some(version) => version,
				None => self.get_table(table)?.md.current_version,
			};
			result.push((table, Some(version)));
		}
		Ok(result)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use tessera_type::ColumnType;

	use crate::{
		ColumnToCreate, ViewToCreate,
		md::ComponentIterator,
		test_utils::{create_test_table, ensure_test_dir, test_catalog},
	};

	#[test]
	fn test_live_view() {
		let catalog = test_catalog();
		let dir = ensure_test_dir(&catalog);
		let base = create_test_table(&catalog, "videos", &[("video", ColumnType::String)]);

		let view = catalog
			.create_view(
				ViewToCreate::new(dir.id, "frames", base.id)
					.with_predicate(json!({"op": "gt", "column": "duration", "value": 10}))
					.with_iterator(ComponentIterator {
						class_fqn: "tessera.iterators.FrameIterator".to_string(),
						args: json!({"fps": 1}),
					}),
			)
			.unwrap();

		let view_md = view.md.view_md.clone().unwrap();
		assert!(!view_md.is_snapshot);
		assert_eq!(view_md.base_versions, vec![(base.id, None)]);
		assert!(view_md.is_component_view());
		assert_eq!(catalog.get_table(view.id).unwrap(), view);
	}

	#[test]
	fn test_snapshot_resolves_chain() {
		let catalog = test_catalog();
		let dir = ensure_test_dir(&catalog);
		let base = create_test_table(&catalog, "videos", &[("video", ColumnType::String)]);
		catalog.insert_rows(base.id, 0, 5).unwrap();

		let live = catalog.create_view(ViewToCreate::new(dir.id, "clips", base.id)).unwrap();
		let snapshot = catalog.create_view(ViewToCreate::new(dir.id, "clips_v0", live.id).snapshot(None)).unwrap();

		let view_md = snapshot.md.view_md.unwrap();
		assert_eq!(view_md.base_versions, vec![(live.id, Some(0)), (base.id, Some(1))]);
	}

	#[test]
	fn test_snapshot_rules() {
		let catalog = test_catalog();
		let dir = ensure_test_dir(&catalog);
		let base = create_test_table(&catalog, "videos", &[("video", ColumnType::String)]);

		let err = catalog.create_view(ViewToCreate::new(dir.id, "s", base.id).snapshot(Some(3))).unwrap_err();
		assert_eq!(err.code, "CATALOG_005");

		let snapshot = catalog.create_view(ViewToCreate::new(dir.id, "s", base.id).snapshot(Some(0))).unwrap();
		let err = catalog.create_view(ViewToCreate::new(dir.id, "live", snapshot.id)).unwrap_err();
		assert_eq!(err.code, "CATALOG_015");

		let mut pinned = ViewToCreate::new(dir.id, "live", base.id);
		pinned.base_version = Some(0);
		assert_eq!(catalog.create_view(pinned).unwrap_err().code, "CATALOG_019");

		assert_eq!(catalog.insert_rows(snapshot.id, 0, 1).unwrap_err().code, "CATALOG_006");
		assert_eq!(
			catalog.add_column(snapshot.id, 0, ColumnToCreate::new("x", ColumnType::Int)).unwrap_err().code,
			"CATALOG_006"
		);
	}

	#[test]
	fn test_view_rows_are_derived() {
		let catalog = test_catalog();
		let dir = ensure_test_dir(&catalog);
		let base = create_test_table(&catalog, "videos", &[("video", ColumnType::String)]);
		let view = catalog.create_view(ViewToCreate::new(dir.id, "clips", base.id)).unwrap();

		assert_eq!(catalog.insert_rows(view.id, 0, 1).unwrap_err().code, "CATALOG_007");
		assert_eq!(catalog.delete_rows(view.id, 0, &[]).unwrap_err().code, "CATALOG_007");
		assert_eq!(catalog.update_rows(view.id, 0, &[]).unwrap(), 1);
	}

	#[test]
	fn test_view_column_names_collide_with_base() {
		let catalog = test_catalog();
		let dir = ensure_test_dir(&catalog);
		let base = create_test_table(&catalog, "videos", &[("video", ColumnType::String)]);
		let err = catalog
			.create_view(
				ViewToCreate::new(dir.id, "clips", base.id).with_column(ColumnToCreate::new("video", ColumnType::Int)),
			)
			.unwrap_err();
		assert_eq!(err.code, "CATALOG_004");
	}
}
