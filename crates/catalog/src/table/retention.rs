// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Result, return_error};
use tracing::instrument;

use crate::{
	Catalog,
	error::CatalogError,
	id::{TableId, Version},
	md::TableVersionMd,
};

impl Catalog {
	/// The data versions that remain readable: the most recent
	/// `num_retained_versions` of the current schema, the current version
	/// included.
	#[instrument(name = "catalog::table::retained_versions", level = "debug", skip(self))]
	pub fn retained_versions(&self, table: TableId) -> Result<Vec<TableVersionMd>> {
		let def = self.get_table(table)?;
		let schema = self.get_schema_version(table, def.md.current_schema_version)?;

		let mut versions = self.list_versions(table)?;
		versions.retain(|v| v.version <= def.md.current_version);
		let skip = versions.len().saturating_sub(schema.num_retained_versions as usize);
		Ok(versions.split_off(skip))
	}

	/// Sets how many data versions stay readable. Recorded as a schema
	/// change.
	#[instrument(name = "catalog::table::set_retention", level = "debug", skip(self))]
	pub fn set_retention(&self, table: TableId, expected: Version, num_retained_versions: u32) -> Result<Version> {
		if num_retained_versions == 0 {
			return_error!(CatalogError::InvalidRetention {
				table
			});
		}
		let (version, _) = self.schema_mutation(table, expected, |_, schema| {
			schema.num_retained_versions = num_retained_versions;
			Ok(())
		})?;
		Ok(version)
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::ColumnType;

	use crate::test_utils::{create_test_table, test_catalog};

	#[test]
	fn test_retention_window() {
		let catalog = test_catalog();
		let table = create_test_table(&catalog, "films", &[("title", ColumnType::String)]);

		let version = catalog.set_retention(table.id, 0, 2).unwrap();
		assert_eq!(version, 1);
		let (version, _) = catalog.insert_rows(table.id, 1, 1).unwrap();
		let (version, _) = catalog.insert_rows(table.id, version, 1).unwrap();
		assert_eq!(version, 3);

		let retained: Vec<_> = catalog.retained_versions(table.id).unwrap().iter().map(|v| v.version).collect();
		assert_eq!(retained, vec![2, 3]);
		assert_eq!(catalog.snapshot(table.id, Some(1)).unwrap_err().code, "CATALOG_005");
	}

	#[test]
	fn test_zero_retention() {
		let catalog = test_catalog();
		let table = create_test_table(&catalog, "films", &[("title", ColumnType::String)]);
		assert_eq!(catalog.set_retention(table.id, 0, 0).unwrap_err().code, "CATALOG_013");
	}
}
