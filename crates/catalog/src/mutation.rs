// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Single-writer mutation of a table head.
//!
//! A mutation holds the table's writer lock, checks the caller's expected
//! version, advances the counters and appends the new version records before
//! it replaces the head. Readers resolve versions through the head, so until
//! the head is written none of the appended records are reachable.

use chrono::Utc;
use tessera_type::{Result, return_error};
use tracing::debug;

use crate::{
	Catalog,
	error::CatalogError,
	id::{DirId, TableId, Version},
	key::Key,
	md::{TableMd, TableSchemaVersionMd, TableVersionMd},
	table::TableDef,
};

impl Catalog {
	/// Runs `f` against a new schema version. `f` sees the head and schema
	/// with both counters already advanced, and the schema's predecessor set.
	pub(crate) fn schema_mutation<F, R>(&self, table: TableId, expected: Version, f: F) -> Result<(Version, R)>
	where
		F: FnOnce(&mut TableMd, &mut TableSchemaVersionMd) -> Result<R>,
	{
		let lock = self.table_lock(table);
		let _guard = lock.lock();

		let TableDef {
			dir,
			mut md,
			..
		} = self.begin_mutation(table, expected)?;
		let mut schema = self.get_schema_version(table, md.current_schema_version)?;

		md.current_version += 1;
		md.current_schema_version += 1;
		schema.preceding_schema_version = Some(schema.schema_version);
		schema.schema_version = md.current_schema_version;

		let result = f(&mut md, &mut schema)?;
		schema.compact_positions();

		self.commit(table, dir, &md, Some(&schema))?;
		debug!("table {} at version {} with schema version {}", table, md.current_version, schema.schema_version);
		Ok((md.current_version, result))
	}

	/// Runs `f` against a new data version; the schema version is unchanged.
	pub(crate) fn data_mutation<F, R>(&self, table: TableId, expected: Version, f: F) -> Result<(Version, R)>
	where
		F: FnOnce(&mut TableMd) -> Result<R>,
	{
		let lock = self.table_lock(table);
		let _guard = lock.lock();

		let TableDef {
			dir,
			mut md,
			..
		} = self.begin_mutation(table, expected)?;
		md.current_version += 1;

		let result = f(&mut md)?;

		self.commit(table, dir, &md, None)?;
		debug!("table {} at version {}", table, md.current_version);
		Ok((md.current_version, result))
	}

	fn begin_mutation(&self, table: TableId, expected: Version) -> Result<TableDef> {
		let def = self.get_table(table)?;
		if def.md.is_snapshot() {
			return_error!(CatalogError::ImmutableSnapshot {
				table
			});
		}
		if def.md.current_version != expected {
			return_error!(CatalogError::VersionConflict {
				table,
				expected,
				actual: def.md.current_version,
			});
		}
		Ok(def)
	}

	/// Appends the version records of `md`'s current version, then replaces
	/// the head.
	pub(crate) fn commit(
		&self,
		table: TableId,
		dir: Option<DirId>,
		md: &TableMd,
		schema: Option<&TableSchemaVersionMd>,
	) -> Result<()> {
		if let Some(schema) = schema {
			self.write_md(
				Key::TableSchemaVersion {
					table,
					schema_version: schema.schema_version,
				},
				schema,
				|record| record,
			)?;
		}

		let version = TableVersionMd {
			created_at: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
			version: md.current_version,
			schema_version: md.current_schema_version,
		};
		self.write_md(
			Key::TableVersion {
				table,
				version: version.version,
			},
			&version,
			|record| record,
		)?;

		self.write_md(Key::Table(table), md, |record| record.with_dir(dir))
	}
}
