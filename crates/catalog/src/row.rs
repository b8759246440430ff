// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Result, return_error};
use tracing::instrument;

use crate::{
	Catalog,
	error::CatalogError,
	id::{RowId, TableId, Version},
	md::TableMd,
};

impl Catalog {
	/// Allocates `count` row ids for inserted rows.
	#[instrument(name = "catalog::row::insert", level = "debug", skip(self))]
	pub fn insert_rows(&self, table: TableId, expected: Version, count: u64) -> Result<(Version, Vec<RowId>)> {
		self.data_mutation(table, expected, |md| {
			ensure_not_view(table, md)?;
			let first = md.next_row_id;
			let Some(next) = first.checked_add(count) else {
				return_error!(CatalogError::RowIdsExhausted {
					table,
					count
				});
			};
			md.next_row_id = next;
			Ok((first..next).map(RowId).collect())
		})
	}

	#[instrument(name = "catalog::row::update", level = "debug", skip(self, rows), fields(rows = rows.len()))]
	pub fn update_rows(&self, table: TableId, expected: Version, rows: &[RowId]) -> Result<Version> {
		let (version, _) = self.data_mutation(table, expected, |md| ensure_allocated(table, md, rows))?;
		Ok(version)
	}

	/// Deleted row ids stay allocated and are never handed out again.
	#[instrument(name = "catalog::row::delete", level = "debug", skip(self, rows), fields(rows = rows.len()))]
	pub fn delete_rows(&self, table: TableId, expected: Version, rows: &[RowId]) -> Result<Version> {
		let (version, _) = self.data_mutation(table, expected, |md| {
			ensure_not_view(table, md)?;
			ensure_allocated(table, md, rows)
		})?;
		Ok(version)
	}
}

fn ensure_not_view(table: TableId, md: &TableMd) -> Result<()> {
	if md.is_view() {
		return_error!(CatalogError::ViewRowMutation {
			table
		});
	}
	Ok(())
}

fn ensure_allocated(table: TableId, md: &TableMd, rows: &[RowId]) -> Result<()> {
	if let Some(row) = rows.iter().find(|row| row.0 >= md.next_row_id) {
		return_error!(CatalogError::RowNotAllocated {
			table,
			row: *row,
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use tessera_type::ColumnType;

	use crate::{
		RowId,
		key::Key,
		test_utils::{create_test_table, test_catalog},
	};

	#[test]
	fn test_row_ids_are_never_reused() {
		let catalog = test_catalog();
		let table = create_test_table(&catalog, "films", &[("title", ColumnType::String)]);

		let (version, rows) = catalog.insert_rows(table.id, 0, 2).unwrap();
		assert_eq!(rows, vec![RowId(0), RowId(1)]);

		let version = catalog.delete_rows(table.id, version, &rows).unwrap();
		let (version, rows) = catalog.insert_rows(table.id, version, 1).unwrap();
		assert_eq!(rows, vec![RowId(2)]);
		assert_eq!(version, 3);

		let md = catalog.get_table(table.id).unwrap().md;
		assert_eq!(md.current_schema_version, 0);
		assert_eq!(catalog.get_version(table.id, 3).unwrap().schema_version, 0);
	}

	#[test]
	fn test_unallocated_rows() {
		let catalog = test_catalog();
		let table = create_test_table(&catalog, "films", &[("title", ColumnType::String)]);
		catalog.insert_rows(table.id, 0, 1).unwrap();

		assert_eq!(catalog.update_rows(table.id, 1, &[RowId(1)]).unwrap_err().code, "CATALOG_016");
		assert_eq!(catalog.delete_rows(table.id, 1, &[RowId(5)]).unwrap_err().code, "CATALOG_016");
		assert_eq!(catalog.update_rows(table.id, 1, &[RowId(0)]).unwrap(), 2);
	}

	#[test]
	fn test_row_id_overflow() {
		let catalog = test_catalog();
		let table = create_test_table(&catalog, "films", &[("title", ColumnType::String)]);

		let mut def = catalog.get_table(table.id).unwrap();
		def.md.next_row_id = u64::MAX - 1;
		catalog.write_md(Key::Table(table.id), &def.md, |record| record.with_dir(def.dir)).unwrap();

		let err = catalog.insert_rows(table.id, 0, 2).unwrap_err();
		assert_eq!(err.code, "CATALOG_020");
		assert_eq!(catalog.get_table(table.id).unwrap().md.current_version, 0);

		let (_, rows) = catalog.insert_rows(table.id, 0, 1).unwrap();
		assert_eq!(rows, vec![RowId(u64::MAX - 1)]);
	}
}
