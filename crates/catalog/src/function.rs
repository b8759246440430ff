// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_function::{BoundFunction, CallableLoader};
use tessera_type::{Result, return_error};
use tracing::{debug, instrument, warn};

use crate::{
	Catalog,
	error::CatalogError,
	id::{DirId, FunctionId},
	key::Key,
	md::FunctionMd,
};

impl Catalog {
	/// Persists `function` by value under its id. Functions stored in a
	/// directory keep their name; anonymous ones are stored without.
	#[instrument(name = "catalog::function::store", level = "debug", skip(self, function), fields(function = %function.name))]
	pub fn store_function(&self, dir: Option<DirId>, function: &BoundFunction) -> Result<FunctionId> {
		if let Some(dir) = dir {
			self.get_dir(dir)?;
		}

		let (persisted, body) = function.to_persisted()?;
		let id = FunctionId(function.id);
		let md = FunctionMd {
			name: dir.map(|_| function.name.clone()),
			md: persisted,
		};
		let runtime_version = body.as_ref().map(|_| self.config.runtime_version.clone());

		self.write_md(Key::Function(id), &md, |mut record| {
			record.dir = dir;
			record.body = body;
			record.runtime_version = runtime_version;
			record
		})?;

		debug!("stored function {} as {}", function.name, id);
		Ok(id)
	}

	#[instrument(name = "catalog::function::load", level = "debug", skip(self, loader))]
	pub fn load_function(&self, function: FunctionId, loader: &dyn CallableLoader) -> Result<BoundFunction> {
		let Some((record, md)) = self.read_md::<FunctionMd>(&Key::Function(function))? else {
			return_error!(CatalogError::FunctionNotFound {
				function
			});
		};

		if let Some(captured) = &record.runtime_version {
			if *captured != self.config.runtime_version {
				warn!(
					"function {} was captured under runtime version {}, loading under {}",
					function, captured, self.config.runtime_version
				);
			}
		}

		BoundFunction::from_persisted(function.0, md.md, record.body.as_deref(), loader)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use tessera_function::{
		BindOptions, Callable, Expr, FunctionDescriptor, FunctionRegistry, ParamSpec, callable,
	};
	use tessera_type::{ColumnType, Result, Value};

	use crate::{
		FunctionId,
		test_utils::{ensure_test_dir, test_catalog},
	};

	fn double() -> Arc<dyn Callable> {
		callable::scalar(|args| match &args[0] {
			Value::Int(x) => Ok(Value::Int(x * 2)),
			_ => Ok(Value::None),
		})
	}

	fn loader(body: &[u8]) -> Result<Arc<dyn Callable>> {
		assert_eq!(body, b"double");
		Ok(double())
	}

	#[test]
	fn test_store_and_load_callable() {
		let catalog = test_catalog();
		let dir = ensure_test_dir(&catalog);
		let registry = FunctionRegistry::new();

		let desc = FunctionDescriptor::new("double").with_param(ParamSpec::new("x", ColumnType::Int)).returns(ColumnType::Int);
		let function = registry.bind(&desc, callable::with_body(double(), "double"), BindOptions::new().stored()).unwrap();

		let id = catalog.store_function(Some(dir.id), &function).unwrap();
		let loaded = catalog.load_function(id, &loader).unwrap();

		assert_eq!(loaded.id, function.id);
		assert_eq!(loaded.signatures, function.signatures);
		assert_eq!(loaded.exec(vec![Value::Int(4)]).unwrap(), Value::Int(8));
	}

	#[test]
	fn test_store_template() {
		let catalog = test_catalog();
		let registry = FunctionRegistry::new();

		let desc = FunctionDescriptor::new("negate").with_param(ParamSpec::new("x", ColumnType::Int)).returns(ColumnType::Int);
		let function = registry.bind_template(&desc, None, |args| args[0].clone()).unwrap();
		assert_eq!(function.path, None);

		let id = catalog.store_function(None, &function).unwrap();
		let loaded = catalog.load_function(id, &loader).unwrap();
		assert!(loaded.is_template());
		assert_eq!(loaded.call_expr(vec![Expr::literal(1i64)]).unwrap(), Expr::literal(1i64));
	}

	#[test]
	fn test_not_persistable() {
		let catalog = test_catalog();
		let registry = FunctionRegistry::new();
		let desc = FunctionDescriptor::new("double").with_param(ParamSpec::new("x", ColumnType::Int)).returns(ColumnType::Int);
		let function = registry.bind(&desc, double(), BindOptions::new().stored()).unwrap();

		assert_eq!(catalog.store_function(None, &function).unwrap_err().code, "DEFINITION_021");
	}

	#[test]
	fn test_load_missing() {
		let catalog = test_catalog();
		assert_eq!(catalog.load_function(FunctionId::generate(), &loader).unwrap_err().code, "CATALOG_014");
	}
}
