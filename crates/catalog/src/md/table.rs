// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
	id::{ColumnId, SchemaVersion, TableId, Version},
	md::Validate,
};

/// When a column was added and, once dropped, when it was dropped. One entry
/// per column across all schema versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHistory {
	pub col_id: ColumnId,
	pub schema_version_add: SchemaVersion,
	#[serde(default)]
	pub schema_version_drop: Option<SchemaVersion>,
}

impl ColumnHistory {
	pub fn is_dropped(&self) -> bool {
		self.schema_version_drop.is_some()
	}
}

/// Iterator that expands each base row into zero or more view rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentIterator {
	pub class_fqn: String,
	#[serde(default)]
	pub args: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewMd {
	pub is_snapshot: bool,
	/// Direct base first, followed by the base's own chain. Versions are
	/// concrete for snapshots and `None` for live views.
	#[serde(default)]
	pub base_versions: Vec<(TableId, Option<Version>)>,
	/// Serialized filter predicate; interpreted by the expression evaluator.
	#[serde(default)]
	pub predicate: Option<serde_json::Value>,
	#[serde(default)]
	pub iterator_class_fqn: Option<String>,
	#[serde(default)]
	pub iterator_args: Option<serde_json::Value>,
}

impl ViewMd {
	pub fn base(&self) -> Option<TableId> {
		self.base_versions.first().map(|(table, _)| *table)
	}

	pub fn is_component_view(&self) -> bool {
		self.iterator_class_fqn.is_some()
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMd {
	pub name: String,
	pub current_version: Version,
	pub current_schema_version: SchemaVersion,
	pub next_col_id: u32,
	pub next_row_id: u64,
	#[serde(default)]
	pub column_history: BTreeMap<ColumnId, ColumnHistory>,
	#[serde(default)]
	pub view_md: Option<ViewMd>,
}

impl TableMd {
	pub fn is_view(&self) -> bool {
		self.view_md.is_some()
	}

	pub fn is_snapshot(&self) -> bool {
		self.view_md.as_ref().is_some_and(|v| v.is_snapshot)
	}

	pub(crate) fn allocate_col_id(&mut self) -> ColumnId {
		let result = ColumnId(self.next_col_id);
		self.next_col_id += 1;
		result
	}
}

impl Validate for TableMd {
	fn validate(&self) -> Result<(), String> {
		if self.current_version < self.current_schema_version {
			return Err(format!(
				"current version {} precedes current schema version {}",
				self.current_version, self.current_schema_version
			));
		}

		for (col_id, history) in &self.column_history {
			if *col_id != history.col_id {
				return Err(format!("history of column {} is filed under {}", history.col_id, col_id));
			}
			if col_id.0 >= self.next_col_id {
				return Err(format!("column {} was never allocated", col_id));
			}
			if history.schema_version_add > self.current_schema_version {
				return Err(format!("column {} was added after the current schema version", col_id));
			}
			if let Some(drop) = history.schema_version_drop {
				if drop <= history.schema_version_add {
					return Err(format!("column {} was dropped before it was added", col_id));
				}
			}
		}

		if let Some(view) = &self.view_md {
			if view.base_versions.is_empty() {
				return Err("view has no base table".to_string());
			}
			let concrete = view.base_versions.iter().filter(|(_, version)| version.is_some()).count();
			if view.is_snapshot && concrete != view.base_versions.len() {
				return Err("snapshot references a live base version".to_string());
			}
			if !view.is_snapshot && concrete != 0 {
				return Err("live view references a fixed base version".to_string());
			}
		}

		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableVersionMd {
	/// Seconds since the Unix epoch.
	pub created_at: f64,
	pub version: Version,
	pub schema_version: SchemaVersion,
}

impl Validate for TableVersionMd {
	fn validate(&self) -> Result<(), String> {
		if self.schema_version > self.version {
			return Err(format!(
				"version {} is paired with the later schema version {}",
				self.version, self.schema_version
			));
		}
		Ok(())
	}
}
