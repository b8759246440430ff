// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Result, return_error};
use tracing::instrument;

use crate::{
	Catalog,
	column::{ensure_unreferenced, find_column},
	error::CatalogError,
	id::{TableId, Version},
};

impl Catalog {
	/// Removes `column` from the schema. Its id is retired, and its storage
	/// stays until no retained version can reach it.
	#[instrument(name = "catalog::column::drop", level = "debug", skip(self))]
	pub fn drop_column(&self, table: TableId, expected: Version, column: &str) -> Result<Version> {
		let (version, _) = self.schema_mutation(table, expected, |md, schema| {
			let (col_id, definition) = find_column(table, schema, column)?;
			if definition.is_pk {
				return_error!(CatalogError::PrimaryKeyColumn {
					table,
					column: column.to_string(),
				});
			}
			ensure_unreferenced(table, schema, column)?;

			schema.columns.remove(&col_id);
			self.close_history(table, md, col_id)
		})?;
		Ok(version)
	}
}
