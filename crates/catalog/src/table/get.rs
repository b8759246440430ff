// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Result, return_error};
use tracing::{instrument, warn};

use crate::{
	Catalog,
	error::CatalogError,
	id::{DirId, SchemaVersion, TableId, Version},
	key::Key,
	md::{TableMd, TableSchemaVersionMd, TableVersionMd, decode},
	table::{TableDef, TableSnapshot},
};

impl Catalog {
	#[instrument(name = "catalog::table::get", level = "trace", skip(self))]
	pub fn get_table(&self, table: TableId) -> Result<TableDef> {
		match self.read_md::<TableMd>(&Key::Table(table))? {
			Some((record, md)) => Ok(TableDef {
				id: table,
				dir: record.dir,
				md,
			}),
			None => return_error!(CatalogError::TableNotFound {
				table
			}),
		}
	}

	/// Every table and view whose head record decodes. Corrupt heads are
	/// skipped so that one damaged table does not hide the others.
	#[instrument(name = "catalog::table::list", level = "debug", skip(self))]
	pub fn list_tables(&self) -> Result<Vec<TableDef>> {
		let mut result = vec![];
		for (key, record) in self.store.range(Key::tables())? {
			let Key::Table(id) = &key else {
				continue;
			};
			match decode::<TableMd>(&key, &record.md) {
				Ok(md) => result.push(TableDef {
					id: *id,
					dir: record.dir,
					md,
				}),
				Err(err) => warn!("skipping table {}: {}", id, err.message),
			}
		}
		Ok(result)
	}

	#[instrument(name = "catalog::table::find", level = "trace", skip(self))]
	pub fn find_table(&self, dir: DirId, name: &str) -> Result<Option<TableDef>> {
		Ok(self.list_tables()?.into_iter().find(|table| table.dir == Some(dir) && table.md.name == name))
	}

	#[instrument(name = "catalog::table::get_schema_version", level = "trace", skip(self))]
	pub fn get_schema_version(&self, table: TableId, schema_version: SchemaVersion) -> Result<TableSchemaVersionMd> {
		self.require_md(&Key::TableSchemaVersion {
			table,
			schema_version,
		})
	}

	#[instrument(name = "catalog::table::get_version", level = "trace", skip(self))]
	pub fn get_version(&self, table: TableId, version: Version) -> Result<TableVersionMd> {
		match self.read_md::<TableVersionMd>(&Key::TableVersion {
			table,
			version,
		})? {
			Some((_, md)) => Ok(md),
			None => return_error!(CatalogError::VersionNotFound {
				table,
				version
			}),
		}
	}

	/// All data versions of `table`, oldest first.
	#[instrument(name = "catalog::table::list_versions", level = "debug", skip(self))]
	pub fn list_versions(&self, table: TableId) -> Result<Vec<TableVersionMd>> {
		self.store
			.range(Key::table_versions(table))?
			.into_iter()
			.map(|(key, record)| decode(&key, &record.md))
			.collect()
	}

	/// All schema versions of `table`, oldest first.
	#[instrument(name = "catalog::table::list_schema_versions", level = "debug", skip(self))]
	pub fn list_schema_versions(&self, table: TableId) -> Result<Vec<TableSchemaVersionMd>> {
		self.store
			.range(Key::table_schema_versions(table))?
			.into_iter()
			.map(|(key, record)| decode(&key, &record.md))
			.collect()
	}

	/// The table as of `version`, or as of its current version. Only retained
	/// versions are readable.
	#[instrument(name = "catalog::table::snapshot", level = "debug", skip(self))]
	pub fn snapshot(&self, table: TableId, version: Option<Version>) -> Result<TableSnapshot> {
		let def = self.get_table(table)?;
		let version = version.unwrap_or(def.md.current_version);

		if !self.retained_versions(table)?.iter().any(|v| v.version == version) {
			return_error!(CatalogError::VersionNotFound {
				table,
				version
			});
		}

		self.snapshot_at(&def, version)
	}

	/// Snapshot without the retention check; used to follow version pins.
	pub(crate) fn snapshot_at(&self, def: &TableDef, version: Version) -> Result<TableSnapshot> {
		if version > def.md.current_version {
			return_error!(CatalogError::VersionNotFound {
				table: def.id,
				version
			});
		}
		let version = self.get_version(def.id, version)?;
		let schema = self.get_schema_version(def.id, version.schema_version)?;
		Ok(TableSnapshot {
			table: def.id,
			name: def.md.name.clone(),
			version,
			schema,
		})
	}
}
