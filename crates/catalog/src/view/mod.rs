// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Views derive their rows from a base table. A view keeps its own schema
//! history for view-local columns and reads the base columns through the
//! chain of base versions it references.

use crate::{
	id::{ColumnId, TableId},
	md::SchemaColumn,
};

mod create;
mod schema;

pub use create::ViewToCreate;

/// A column readable through a view, together with the table that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveColumn {
	pub table: TableId,
	pub col_id: ColumnId,
	pub column: SchemaColumn,
}
