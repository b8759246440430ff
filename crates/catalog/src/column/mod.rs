// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{ColumnType, Result, return_error};

use crate::{
	Catalog,
	error::CatalogError,
	id::{ColumnId, TableId},
	md::{ColumnHistory, ComputedValue, SchemaColumn, TableMd, TableSchemaVersionMd},
};

mod add;
mod alter;
mod drop;
mod validate;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnToCreate {
	pub name: String,
	pub col_type: ColumnType,
	pub is_pk: bool,
	pub computed: Option<ComputedValue>,
	/// Storage of a computed column; `None` inherits the catalog default.
	pub stored: Option<bool>,
	pub is_indexed: bool,
}

impl ColumnToCreate {
	pub fn new(name: impl Into<String>, col_type: ColumnType) -> Self {
		Self {
			name: name.into(),
			col_type,
			is_pk: false,
			computed: None,
			stored: None,
			is_indexed: false,
		}
	}

	pub fn primary_key(mut self) -> Self {
		self.is_pk = true;
		self
	}

	pub fn computed(mut self, value: ComputedValue) -> Self {
		self.computed = Some(value);
		self
	}

	pub fn stored(mut self, stored: bool) -> Self {
		self.stored = Some(stored);
		self
	}

	pub fn indexed(mut self) -> Self {
		self.is_indexed = true;
		self
	}
}

/// A column name in scope of a table, with its type.
pub(crate) type VisibleColumn = (String, ColumnType);

impl Catalog {
	/// Adds `columns` at the end of `schema`, in order. Each column may
	/// reference the `visible` columns and the columns added before it.
	pub(crate) fn append_columns(
		&self,
		table: TableId,
		md: &mut TableMd,
		schema: &mut TableSchemaVersionMd,
		mut visible: Vec<VisibleColumn>,
		columns: Vec<ColumnToCreate>,
	) -> Result<Vec<ColumnId>> {
		let mut result = Vec::with_capacity(columns.len());
		for column in columns {
			if visible.iter().any(|(name, _)| *name == column.name) {
				return_error!(CatalogError::ColumnAlreadyExists {
					table,
					column: column.name,
				});
			}
			self.validate_column(&column, &visible)?;

			let col_id = md.allocate_col_id();
			visible.push((column.name.clone(), column.col_type.clone()));
			schema.columns.insert(
				col_id,
				SchemaColumn {
					pos: schema.columns.len(),
					name: column.name,
					col_type: column.col_type,
					is_pk: column.is_pk,
					value_expr: column.computed,
					stored: column.stored,
					is_indexed: column.is_indexed,
				},
			);
			md.column_history.insert(
				col_id,
				ColumnHistory {
					col_id,
					schema_version_add: schema.schema_version,
					schema_version_drop: None,
				},
			);
			result.push(col_id);
		}
		Ok(result)
	}

	/// Columns a value expression of `md` may reference: the base columns of
	/// a view, followed by the table's own.
	pub(crate) fn visible_columns(&self, md: &TableMd, schema: &TableSchemaVersionMd) -> Result<Vec<VisibleColumn>> {
		let mut result = vec![];
		if let Some(view) = &md.view_md {
			for column in self.base_columns(view)? {
				result.push((column.column.name, column.column.col_type));
			}
		}
		for (_, column) in schema.ordered_columns() {
			result.push((column.name.clone(), column.col_type.clone()));
		}
		Ok(result)
	}

	/// Closes the history entry of a column removed by the schema version
	/// `md` is at.
	pub(crate) fn close_history(&self, table: TableId, md: &mut TableMd, col_id: ColumnId) -> Result<()> {
		let schema_version = md.current_schema_version;
		match md.column_history.get_mut(&col_id) {
			Some(history) => {
				history.schema_version_drop = Some(schema_version);
				Ok(())
			}
			None => return_error!(CatalogError::MissingHistory {
				table,
				column: col_id,
				schema_version,
			}),
		}
	}
}

/// Fails if a computed column of `schema` other than `column` references it.
pub(crate) fn ensure_unreferenced(table: TableId, schema: &TableSchemaVersionMd, column: &str) -> Result<()> {
	if let Some(dependent) = schema.dependents_of(column).into_iter().find(|c| c.name != column) {
		return_error!(CatalogError::ColumnInUse {
			table,
			column: column.to_string(),
			dependent: dependent.name.clone(),
		});
	}
	Ok(())
}

/// Id and definition of the column `name`, failing if there is none.
pub(crate) fn find_column(table: TableId, schema: &TableSchemaVersionMd, name: &str) -> Result<(ColumnId, SchemaColumn)> {
	match schema.column_by_name(name) {
		Some((col_id, column)) => Ok((col_id, column.clone())),
		None => return_error!(CatalogError::ColumnNotFound {
			table,
			column: name.to_string(),
		}),
	}
}
