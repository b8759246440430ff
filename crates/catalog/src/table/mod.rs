// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	id::{ColumnId, DirId, TableId, Version},
	md::{SchemaColumn, TableMd, TableSchemaVersionMd, TableVersionMd},
};

mod create;
mod get;
mod retention;

pub use create::TableToCreate;

/// Head record of a table or view.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
	pub id: TableId,
	pub dir: Option<DirId>,
	pub md: TableMd,
}

impl TableDef {
	pub fn name(&self) -> &str {
		&self.md.name
	}

	pub fn current_version(&self) -> Version {
		self.md.current_version
	}
}

/// A table as of one data version.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot {
	pub table: TableId,
	pub name: String,
	pub version: TableVersionMd,
	pub schema: TableSchemaVersionMd,
}

impl TableSnapshot {
	pub fn column(&self, name: &str) -> Option<(ColumnId, &SchemaColumn)> {
		self.schema.column_by_name(name)
	}

	/// Column names ordered by position.
	pub fn column_names(&self) -> Vec<&str> {
		self.schema.ordered_columns().into_iter().map(|(_, column)| column.name.as_str()).collect()
	}
}
