// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Reachability of physical columns.
//!
//! A dropped column keeps its storage while any retained data version or
//! snapshot still reads a schema version that contains it.

use std::collections::{BTreeMap, BTreeSet};

use tessera_type::Result;
use tracing::{debug, instrument};

use crate::{
	Catalog,
	id::{ColumnId, SchemaVersion, TableId},
	md::{ColumnHistory, TableSchemaVersionMd, TableVersionMd},
};

/// Dropped columns whose storage no reachable schema version needs. A schema
/// version is reachable when a retained data version or a snapshot reference
/// uses it.
pub fn gc_eligible_columns(
	history: &BTreeMap<ColumnId, ColumnHistory>,
	schema_versions: &[TableSchemaVersionMd],
	retained: &[TableVersionMd],
	snapshot_refs: &[SchemaVersion],
) -> Vec<ColumnId> {
	let reachable: BTreeSet<SchemaVersion> =
		retained.iter().map(|v| v.schema_version).chain(snapshot_refs.iter().copied()).collect();
	let min_reachable = reachable.first().copied();

	let in_use: BTreeSet<ColumnId> = schema_versions
		.iter()
		.filter(|schema| reachable.contains(&schema.schema_version))
		.flat_map(|schema| schema.columns.keys().copied())
		.collect();

	history
		.values()
		.filter(|h| match (h.schema_version_drop, min_reachable) {
			(None, _) => false,
			(Some(_), None) => true,
			(Some(drop), Some(min)) => drop <= min,
		})
		.map(|h| h.col_id)
		.filter(|col_id| !in_use.contains(col_id))
		.collect()
}

impl Catalog {
	/// Columns of `table` whose storage can be reclaimed.
	#[instrument(name = "catalog::gc::candidates", level = "debug", skip(self))]
	pub fn gc_candidates(&self, table: TableId) -> Result<Vec<ColumnId>> {
		let def = self.get_table(table)?;
		let schema_versions = self.list_schema_versions(table)?;
		let retained = self.retained_versions(table)?;

		let mut snapshot_refs = vec![];
		for other in self.list_tables()? {
			let Some(view) = &other.md.view_md else {
				continue;
			};
			if !view.is_snapshot {
				continue;
			}
			for (base, version) in &view.base_versions {
				if *base != table {
					continue;
				}
				if let Some(version) = version {
					snapshot_refs.push(self.get_version(table, *version)?.schema_version);
				}
			}
		}

		let result = gc_eligible_columns(&def.md.column_history, &schema_versions, &retained, &snapshot_refs);
		debug!("table {} has {} collectable columns", table, result.len());
		Ok(result)
	}
}
