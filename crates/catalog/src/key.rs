// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::RangeInclusive,
};

use crate::id::{DirId, FunctionId, MAX_VERSION, SchemaVersion, TableId, Version};

/// Primary key of a metadata record. Keys of one kind sort together, and
/// versioned keys of one table sort by version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
	SystemInfo,
	Dir(DirId),
	Table(TableId),
	TableVersion {
		table: TableId,
		version: Version,
	},
	TableSchemaVersion {
		table: TableId,
		schema_version: SchemaVersion,
	},
	Function(FunctionId),
}

impl Key {
	pub fn dirs() -> RangeInclusive<Key> {
		Key::Dir(DirId::min())..=Key::Dir(DirId::max())
	}

	pub fn tables() -> RangeInclusive<Key> {
		Key::Table(TableId::min())..=Key::Table(TableId::max())
	}

	pub fn table_versions(table: TableId) -> RangeInclusive<Key> {
		Key::TableVersion {
			table,
			version: 0,
		}..=Key::TableVersion {
			table,
			version: MAX_VERSION,
		}
	}

	pub fn table_schema_versions(table: TableId) -> RangeInclusive<Key> {
		Key::TableSchemaVersion {
			table,
			schema_version: 0,
		}..=Key::TableSchemaVersion {
			table,
			schema_version: MAX_VERSION,
		}
	}
}

impl Display for Key {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Key::SystemInfo => f.write_str("system_info"),
			Key::Dir(dir) => write!(f, "dir({})", dir),
			Key::Table(table) => write!(f, "table({})", table),
			Key::TableVersion {
				table,
				version,
			} => write!(f, "table_version({}, {})", table, version),
			Key::TableSchemaVersion {
				table,
				schema_version,
			} => write!(f, "table_schema_version({}, {})", table, schema_version),
			Key::Function(function) => write!(f, "function({})", function),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_versioned_keys_sort_by_version() {
		let table = TableId::generate();
		let a = Key::TableVersion {
			table,
			version: 2,
		};
		let b = Key::TableVersion {
			table,
			version: 10,
		};
		assert!(a < b);
		assert!(Key::table_versions(table).contains(&a));
		assert!(!Key::table_versions(table).contains(&Key::Table(table)));
		assert!(!Key::table_versions(TableId::generate()).contains(&a));
	}
}
