// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::Result;
use tracing::instrument;

use crate::{
	Catalog,
	column::ColumnToCreate,
	id::{ColumnId, TableId, Version},
};

impl Catalog {
	/// Adds `column` under a fresh column id.
	#[instrument(name = "catalog::column::add", level = "debug", skip(self, column), fields(column = %column.name))]
	pub fn add_column(&self, table: TableId, expected: Version, column: ColumnToCreate) -> Result<(Version, ColumnId)> {
		let (version, mut ids) = self.schema_mutation(table, expected, |md, schema| {
			let visible = self.visible_columns(md, schema)?;
			self.append_columns(table, md, schema, visible, vec![column])
		})?;
		Ok((version, ids.remove(0)))
	}
}
