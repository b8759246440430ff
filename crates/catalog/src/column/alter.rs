// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_function::path::is_identifier;
use tessera_type::{ColumnType, Result, error::TypeError, return_error};
use tracing::instrument;

use crate::{
	Catalog,
	column::{ensure_unreferenced, find_column},
	error::CatalogError,
	id::{ColumnId, TableId, Version},
	md::{ColumnHistory, ComputedValue},
};

impl Catalog {
	#[instrument(name = "catalog::column::rename", level = "debug", skip(self))]
	pub fn rename_column(&self, table: TableId, expected: Version, from: &str, to: &str) -> Result<Version> {
		if !is_identifier(to) {
			return_error!(CatalogError::InvalidName {
				kind: "column",
				name: to.to_string(),
			});
		}

		let (version, _) = self.schema_mutation(table, expected, |md, schema| {
			let (col_id, _) = find_column(table, schema, from)?;
			if self.visible_columns(md, schema)?.iter().any(|(name, _)| name == to) {
				return_error!(CatalogError::ColumnAlreadyExists {
					table,
					column: to.to_string(),
				});
			}
			ensure_unreferenced(table, schema, from)?;

			if let Some(column) = schema.columns.get_mut(&col_id) {
				column.name = to.to_string();
			}
			Ok(())
		})?;
		Ok(version)
	}

	/// Changes the type of `column`. The values are converted into a new
	/// physical column, so the column gets a new id and the old one is
	/// retired.
	#[instrument(name = "catalog::column::alter_type", level = "debug", skip(self))]
	pub fn alter_column_type(
		&self,
		table: TableId,
		expected: Version,
		column: &str,
		col_type: ColumnType,
	) -> Result<(Version, ColumnId)> {
		if col_type.is_invalid() {
			return_error!(TypeError::InvalidType);
		}

		self.schema_mutation(table, expected, |md, schema| {
			let (old_id, mut definition) = find_column(table, schema, column)?;
			ensure_unreferenced(table, schema, column)?;

			definition.col_type.require_conversion_to(&col_type)?;
			if let Some(ComputedValue::Expr {
				expr,
			}) = &definition.value_expr
			{
				expr.col_type().require_conversion_to(&col_type)?;
			}
			if definition.is_indexed && !(col_type.is_image() || col_type == ColumnType::String) {
				return_error!(CatalogError::NotIndexable {
					column: column.to_string(),
					col_type,
				});
			}

			self.close_history(table, md, old_id)?;
			schema.columns.remove(&old_id);

			let new_id = md.allocate_col_id();
			definition.col_type = col_type;
			schema.columns.insert(new_id, definition);
			md.column_history.insert(
				new_id,
				ColumnHistory {
					col_id: new_id,
					schema_version_add: schema.schema_version,
					schema_version_drop: None,
				},
			);
			Ok(new_id)
		})
	}
}
