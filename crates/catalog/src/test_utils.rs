// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::ColumnType;

use crate::{Catalog, CatalogConfig, ColumnToCreate, DirDef, DirToCreate, MemoryStore, TableDef, TableToCreate};

pub fn test_catalog() -> Catalog {
	let result = Catalog::new(MemoryStore::new(), CatalogConfig::default());
	result.init().unwrap();
	result
}

pub fn ensure_test_dir(catalog: &Catalog) -> DirDef {
	if let Some(result) = catalog.find_dir(None, "test_dir").unwrap() {
		return result;
	}
	catalog
		.create_dir(DirToCreate {
			parent: None,
			name: "test_dir".to_string(),
		})
		.unwrap()
}

pub fn create_test_table(catalog: &Catalog, name: &str, columns: &[(&str, ColumnType)]) -> TableDef {
	let dir = ensure_test_dir(catalog);
	let mut to_create = TableToCreate::new(dir.id, name);
	for (column, col_type) in columns {
		to_create = to_create.with_column(ColumnToCreate::new(*column, col_type.clone()));
	}
	catalog.create_table(to_create).unwrap()
}
