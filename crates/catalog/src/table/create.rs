// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use tessera_function::path::is_identifier;
use tessera_type::{Result, return_error};
use tracing::{debug, instrument};

use crate::{
	Catalog,
	column::ColumnToCreate,
	error::CatalogError,
	id::{DirId, TableId},
	md::{TableMd, TableSchemaVersionMd},
	table::TableDef,
};

#[derive(Debug, Clone)]
pub struct TableToCreate {
	pub dir: DirId,
	pub name: String,
	pub columns: Vec<ColumnToCreate>,
	/// Falls back to the catalog default.
	pub num_retained_versions: Option<u32>,
	pub comment: String,
}

impl TableToCreate {
	pub fn new(dir: DirId, name: impl Into<String>) -> Self {
		Self {
			dir,
			name: name.into(),
			columns: vec![],
			num_retained_versions: None,
			comment: String::new(),
		}
	}

	pub fn with_column(mut self, column: ColumnToCreate) -> Self {
		self.columns.push(column);
		self
	}

	pub fn with_num_retained_versions(mut self, n: u32) -> Self {
		self.num_retained_versions = Some(n);
		self
	}

	pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
		self.comment = comment.into();
		self
	}
}

impl Catalog {
	/// Creates a table at version 0 with schema version 0.
	#[instrument(name = "catalog::table::create", level = "debug", skip(self, to_create))]
	pub fn create_table(&self, to_create: TableToCreate) -> Result<TableDef> {
		self.get_dir(to_create.dir)?;
		let id = TableId::generate();
		let (mut md, mut schema) = self.new_table_md(id, &to_create.name, to_create.num_retained_versions)?;
		schema.comment = to_create.comment;

		self.append_columns(id, &mut md, &mut schema, vec![], to_create.columns)?;

		self.commit(id, Some(to_create.dir), &md, Some(&schema))?;
		debug!("created table {} ({}) with {} columns", md.name, id, schema.columns.len());

		Ok(TableDef {
			id,
			dir: Some(to_create.dir),
			md,
		})
	}

	/// Head and initial schema of a table or view without columns.
	pub(crate) fn new_table_md(
		&self,
		id: TableId,
		name: &str,
		num_retained_versions: Option<u32>,
	) -> Result<(TableMd, TableSchemaVersionMd)> {
		if !is_identifier(name) {
			return_error!(CatalogError::InvalidName {
				kind: "table",
				name: name.to_string(),
			});
		}

		let num_retained_versions = num_retained_versions.unwrap_or(self.config.default_num_retained_versions);
		if num_retained_versions == 0 {
			return_error!(CatalogError::InvalidRetention {
				table: id
			});
		}

		let md = TableMd {
			name: name.to_string(),
			current_version: 0,
			current_schema_version: 0,
			next_col_id: 0,
			next_row_id: 0,
			column_history: BTreeMap::new(),
			view_md: None,
		};
		let schema = TableSchemaVersionMd {
			schema_version: 0,
			preceding_schema_version: None,
			columns: BTreeMap::new(),
			num_retained_versions,
			comment: String::new(),
		};
		Ok((md, schema))
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::ColumnType;

	use crate::{
		ColumnId, ColumnToCreate, DirId, Key, TableToCreate,
		md::TableVersionMd,
		test_utils::{ensure_test_dir, test_catalog},
	};

	#[test]
	fn test_create_table() {
		let catalog = test_catalog();
		let dir = ensure_test_dir(&catalog);

		let table = catalog
			.create_table(
				TableToCreate::new(dir.id, "films")
					.with_column(ColumnToCreate::new("title", ColumnType::String).primary_key())
					.with_column(ColumnToCreate::new("year", ColumnType::Int)),
			)
			.unwrap();

		assert_eq!(table.md.current_version, 0);
		assert_eq!(table.md.current_schema_version, 0);
		assert_eq!(table.md.next_col_id, 2);
		assert_eq!(table.md.next_row_id, 0);
		assert_eq!(table.md.column_history[&ColumnId(1)].schema_version_add, 0);
		assert_eq!(catalog.get_table(table.id).unwrap(), table);

		let schema = catalog.get_schema_version(table.id, 0).unwrap();
		assert_eq!(schema.preceding_schema_version, None);
		assert_eq!(schema.num_retained_versions, 10);
		assert_eq!(schema.column_by_name("year").unwrap().1.pos, 1);

		let version: TableVersionMd = catalog
			.require_md(&Key::TableVersion {
				table: table.id,
				version: 0,
			})
			.unwrap();
		assert_eq!(version.schema_version, 0);
	}

	#[test]
	fn test_create_table_missing_dir() {
		let catalog = test_catalog();
		let err = catalog.create_table(TableToCreate::new(DirId::generate(), "films")).unwrap_err();
		assert_eq!(err.code, "CATALOG_001");
	}

	#[test]
	fn test_duplicate_column() {
		let catalog = test_catalog();
		let dir = ensure_test_dir(&catalog);
		let err = catalog
			.create_table(
				TableToCreate::new(dir.id, "films")
					.with_column(ColumnToCreate::new("title", ColumnType::String))
					.with_column(ColumnToCreate::new("title", ColumnType::Int)),
			)
			.unwrap_err();
		assert_eq!(err.code, "CATALOG_004");
	}

	#[test]
	fn test_zero_retention() {
		let catalog = test_catalog();
		let dir = ensure_test_dir(&catalog);
		let err = catalog.create_table(TableToCreate::new(dir.id, "films").with_num_retained_versions(0)).unwrap_err();
		assert_eq!(err.code, "CATALOG_013");
	}

	#[test]
	fn test_invalid_table_name() {
		let catalog = test_catalog();
		let dir = ensure_test_dir(&catalog);
		let err = catalog.create_table(TableToCreate::new(dir.id, "2fast")).unwrap_err();
		assert_eq!(err.code, "CATALOG_010");
	}
}
