// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::Result;
use tracing::instrument;

use crate::{
	Catalog,
	id::{TableId, Version},
	md::ViewMd,
	table::TableSnapshot,
	view::EffectiveColumn,
};

impl Catalog {
	/// Columns readable through `table` at `version`: the columns of the
	/// root base first, down to the table's own columns.
	#[instrument(name = "catalog::view::effective_schema", level = "debug", skip(self))]
	pub fn effective_schema(&self, table: TableId, version: Option<Version>) -> Result<Vec<EffectiveColumn>> {
		let def = self.get_table(table)?;
		let snapshot = self.snapshot(table, version)?;

		let mut result = match &def.md.view_md {
			Some(view) => self.base_columns(view)?,
			None => vec![],
		};
		result.extend(own_columns(&snapshot));
		Ok(result)
	}

	/// Columns a view reads from its bases. Live entries resolve to the base's
	/// current version.
	pub(crate) fn base_columns(&self, view: &ViewMd) -> Result<Vec<EffectiveColumn>> {
		let mut result = vec![];
		for (table, version) in view.base_versions.iter().rev() {
			let def = self.get_table(*table)?;
			let snapshot = self.snapshot_at(&def, version.unwrap_or(def.md.current_version))?;
			result.extend(own_columns(&snapshot));
		}
		Ok(result)
	}
}

fn own_columns(snapshot: &TableSnapshot) -> Vec<EffectiveColumn> {
	snapshot
		.schema
		.ordered_columns()
		.into_iter()
		.map(|(col_id, column)| EffectiveColumn {
			table: snapshot.table,
			col_id,
			column: column.clone(),
		})
		.collect()
}
