// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tessera_function::Expr;
use tessera_type::ColumnType;

use crate::{
	id::{ColumnId, SchemaVersion},
	md::Validate,
};

/// Value expression of a computed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComputedValue {
	/// Typed expression, checked against the table's columns.
	Expr {
		expr: Expr,
	},
	/// Serialized tree owned by the expression evaluator; passed through
	/// unchecked.
	Opaque {
		tree: serde_json::Value,
	},
}

impl ComputedValue {
	pub fn column_refs(&self) -> Vec<&str> {
		match self {
			ComputedValue::Expr {
				expr,
			} => expr.column_refs(),
			ComputedValue::Opaque {
				..
			} => vec![],
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaColumn {
	pub pos: usize,
	pub name: String,
	pub col_type: ColumnType,
	#[serde(default)]
	pub is_pk: bool,
	#[serde(default)]
	pub value_expr: Option<ComputedValue>,
	/// `None` inherits the catalog default.
	#[serde(default)]
	pub stored: Option<bool>,
	#[serde(default)]
	pub is_indexed: bool,
}

impl SchemaColumn {
	pub fn is_computed(&self) -> bool {
		self.value_expr.is_some()
	}

	/// Whether the column has a physical storage column. Only computed columns
	/// can be virtual.
	pub fn is_stored(&self, computed_default: bool) -> bool {
		if !self.is_computed() {
			return true;
		}
		self.stored.unwrap_or(computed_default)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchemaVersionMd {
	pub schema_version: SchemaVersion,
	#[serde(default)]
	pub preceding_schema_version: Option<SchemaVersion>,
	#[serde(default)]
	pub columns: BTreeMap<ColumnId, SchemaColumn>,
	pub num_retained_versions: u32,
	#[serde(default)]
	pub comment: String,
}

impl TableSchemaVersionMd {
	pub fn column_by_name(&self, name: &str) -> Option<(ColumnId, &SchemaColumn)> {
		self.columns.iter().find(|(_, column)| column.name == name).map(|(id, column)| (*id, column))
	}

	/// Columns ordered by position.
	pub fn ordered_columns(&self) -> Vec<(ColumnId, &SchemaColumn)> {
		let mut result: Vec<_> = self.columns.iter().map(|(id, column)| (*id, column)).collect();
		result.sort_by_key(|(_, column)| column.pos);
		result
	}

	/// Computed columns whose value expression references `name`.
	pub fn dependents_of(&self, name: &str) -> Vec<&SchemaColumn> {
		self.columns
			.values()
			.filter(|column| column.value_expr.as_ref().is_some_and(|v| v.column_refs().contains(&name)))
			.collect()
	}

	/// Renumbers positions to be dense, keeping their relative order.
	pub(crate) fn compact_positions(&mut self) {
		let mut ids: Vec<ColumnId> = self.columns.keys().copied().collect();
		ids.sort_by_key(|id| self.columns[id].pos);
		for (pos, id) in ids.into_iter().enumerate() {
			if let Some(column) = self.columns.get_mut(&id) {
				column.pos = pos;
			}
		}
	}
}

impl Validate for TableSchemaVersionMd {
	fn validate(&self) -> Result<(), String> {
		if let Some(preceding) = self.preceding_schema_version {
			if preceding >= self.schema_version {
				return Err(format!(
					"schema version {} is preceded by the later version {}",
					self.schema_version, preceding
				));
			}
		}

		let mut names = HashSet::new();
		for (col_id, column) in &self.columns {
			if column.col_type.is_invalid() {
				return Err(format!("column {} has the invalid type", col_id));
			}
			if !names.insert(column.name.as_str()) {
				return Err(format!("duplicate column name `{}`", column.name));
			}
		}

		if self.num_retained_versions == 0 {
			return Err("the number of retained versions must be positive".to_string());
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::{id::TableId, key::Key, md::decode};

	fn key() -> Key {
		Key::TableSchemaVersion {
			table: TableId::generate(),
			schema_version: 1,
		}
	}

	#[test]
	fn test_decode_schema_version() {
		let raw = json!({
			"schema_version": 1,
			"preceding_schema_version": 0,
			"columns": {
				"0": {"pos": 0, "name": "a", "col_type": {"type": "int"}},
				"1": {"pos": 1, "name": "b", "col_type": {"type": "string"}, "is_pk": true, "extra": 1}
			},
			"num_retained_versions": 10
		});
		let md: TableSchemaVersionMd = decode(&key(), &raw).unwrap();
		assert_eq!(md.comment, "");
		assert_eq!(md.column_by_name("b").unwrap().0, ColumnId(1));
		assert!(md.columns[&ColumnId(1)].is_pk);
		assert_eq!(md.columns[&ColumnId(0)].stored, None);
	}

	#[test]
	fn test_invalid_column_type_is_corrupt() {
		let raw = json!({
			"schema_version": 0,
			"columns": {"0": {"pos": 0, "name": "a", "col_type": {"type": "invalid"}}},
			"num_retained_versions": 10
		});
		assert_eq!(decode::<TableSchemaVersionMd>(&key(), &raw).unwrap_err().code, "METADATA_002");

		let raw = json!({
			"schema_version": 0,
			"columns": {"0": {"pos": 0, "name": "a", "col_type": {"type": "tensor"}}},
			"num_retained_versions": 10
		});
		assert_eq!(decode::<TableSchemaVersionMd>(&key(), &raw).unwrap_err().code, "METADATA_001");
	}

	#[test]
	fn test_storage_tri_state() {
		let mut column = SchemaColumn {
			pos: 0,
			name: "c".to_string(),
			col_type: ColumnType::Int,
			is_pk: false,
			value_expr: None,
			stored: None,
			is_indexed: false,
		};
		assert!(column.is_stored(false));

		column.value_expr = Some(ComputedValue::Opaque {
			tree: json!({"op": "add"}),
		});
		assert!(column.is_stored(true));
		assert!(!column.is_stored(false));

		column.stored = Some(true);
		assert!(column.is_stored(false));
	}
}
