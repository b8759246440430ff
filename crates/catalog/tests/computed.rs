// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tessera_catalog::{
	Catalog, CatalogConfig, ColumnToCreate, MemoryStore, TableToCreate,
	md::ComputedValue,
	test_utils::ensure_test_dir,
};
use tessera_function::{BindOptions, Expr, FunctionDescriptor, FunctionRef, FunctionRegistry, ParamSpec, callable};
use tessera_type::{ColumnType, ErrorKind, Value};
use uuid::Uuid;

fn catalog() -> Catalog {
	let registry: &'static FunctionRegistry = Box::leak(Box::new(FunctionRegistry::new()));
	let result = Catalog::with_registry(MemoryStore::new(), CatalogConfig::default(), registry);
	result.init().unwrap();
	result
}

fn add_one() -> FunctionDescriptor {
	FunctionDescriptor::new("add_one").with_module("udfs").with_param(ParamSpec::new("x", ColumnType::Int)).returns(ColumnType::Int)
}

fn increment() -> Arc<dyn tessera_function::Callable> {
	callable::scalar(|args| match &args[0] {
		Value::Int(x) => Ok(Value::Int(x + 1)),
		_ => Ok(Value::None),
	})
}

fn films(catalog: &Catalog) -> tessera_catalog::TableDef {
	let dir = ensure_test_dir(catalog);
	catalog
		.create_table(TableToCreate::new(dir.id, "films").with_column(ColumnToCreate::new("a", ColumnType::Int)))
		.unwrap()
}

#[test]
fn test_registered_function() {
	let catalog = catalog();
	let table = films(&catalog);
	let f = catalog.registry().bind(&add_one(), increment(), BindOptions::new()).unwrap();

	let expr = f.call_expr(vec![Expr::column("a", ColumnType::Int)]).unwrap();
	let (version, col_id) = catalog
		.add_column(table.id, 0, ColumnToCreate::new("b", ColumnType::Int).computed(ComputedValue::Expr {
			expr,
		}))
		.unwrap();

	let snapshot = catalog.snapshot(table.id, Some(version)).unwrap();
	let column = &snapshot.schema.columns[&col_id];
	assert!(column.is_computed());
	assert!(column.is_stored(catalog.config().computed_columns_stored_by_default));
}

#[test]
fn test_unresolved_function() {
	let catalog = catalog();
	let table = films(&catalog);

	let expr = Expr::Call {
		function: FunctionRef::Path("udfs.missing".to_string()),
		overload: 0,
		args: vec![Expr::column("a", ColumnType::Int)],
		return_type: ColumnType::Int,
	};
	let err = catalog
		.add_column(table.id, 0, ColumnToCreate::new("b", ColumnType::Int).computed(ComputedValue::Expr {
			expr,
		}))
		.unwrap_err();
	assert_eq!(err.code, "DEFINITION_022");
}

#[test]
fn test_call_must_match_signature() {
	let catalog = catalog();
	let table = films(&catalog);
	catalog.registry().bind(&add_one(), increment(), BindOptions::new()).unwrap();

	let call = |overload: usize, arg: Expr| Expr::Call {
		function: FunctionRef::Path("udfs.add_one".to_string()),
		overload,
		args: vec![arg],
		return_type: ColumnType::Int,
	};

	let computed = ComputedValue::Expr {
		expr: call(1, Expr::column("a", ColumnType::Int)),
	};
	let err = catalog.add_column(table.id, 0, ColumnToCreate::new("b", ColumnType::Int).computed(computed)).unwrap_err();
	assert_eq!(err.code, "TYPE_011");

	let computed = ComputedValue::Expr {
		expr: call(0, Expr::literal("one")),
	};
	let err = catalog.add_column(table.id, 0, ColumnToCreate::new("b", ColumnType::Int).computed(computed)).unwrap_err();
	assert_eq!(err.code, "TYPE_010");
	assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_stored_function_reference() {
	let catalog = catalog();
	let table = films(&catalog);

	let desc = FunctionDescriptor::new("add_one").with_param(ParamSpec::new("x", ColumnType::Int)).returns(ColumnType::Int);
	let f = catalog
		.registry()
		.bind(&desc, callable::with_body(increment(), "add_one"), BindOptions::new().stored())
		.unwrap();
	assert_eq!(f.path, None);

	let call = |id: Uuid| Expr::Call {
		function: FunctionRef::Id(id),
		overload: 0,
		args: vec![Expr::column("a", ColumnType::Int)],
		return_type: ColumnType::Int,
	};

	let computed = ComputedValue::Expr {
		expr: call(f.id),
	};
	let err = catalog
		.add_column(table.id, 0, ColumnToCreate::new("b", ColumnType::Int).computed(computed.clone()))
		.unwrap_err();
	assert_eq!(err.code, "CATALOG_014");

	catalog.store_function(None, &f).unwrap();
	catalog.add_column(table.id, 0, ColumnToCreate::new("b", ColumnType::Int).computed(computed)).unwrap();
}
