// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process-wide mapping from symbol paths to bound functions.

use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};
use once_cell::sync::Lazy;
use tessera_type::{ColumnType, Result, return_error};
use tracing::{debug, warn};

use crate::{
	bind::{BindOptions, make_function, make_template},
	callable::Callable,
	descriptor::FunctionDescriptor,
	error::FunctionError,
	expr::Expr,
	function::BoundFunction,
	path::validate_symbol_path,
};

static GLOBAL: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::new);

/// Registry of path-addressable functions. Registration of a path is
/// idempotent for compatible functions and a hard error otherwise; see
/// [`BoundFunction::is_compatible_with`].
#[derive(Debug, Default)]
pub struct FunctionRegistry {
	functions: DashMap<String, Arc<BoundFunction>>,
}

impl FunctionRegistry {
	pub fn new() -> Self {
		Self {
			functions: DashMap::new(),
		}
	}

	/// The registry shared by the whole process.
	pub fn global() -> &'static FunctionRegistry {
		&GLOBAL
	}

	/// Registers `function` under its path and returns the registered
	/// instance, which is the existing one if a compatible function was
	/// already registered.
	pub fn register(&self, function: Arc<BoundFunction>) -> Result<Arc<BoundFunction>> {
		let Some(path) = function.path.clone() else {
			return Ok(function);
		};
		validate_symbol_path(&path)?;

		match self.functions.entry(path) {
			Entry::Occupied(entry) => {
				let existing = entry.get();
				if Arc::ptr_eq(existing, &function) || existing.is_compatible_with(&function) {
					debug!("function {} already registered", entry.key());
					return Ok(existing.clone());
				}
				warn!("conflicting registration for function {}", entry.key());
				return_error!(FunctionError::RegistryConflict {
					path: entry.key().clone()
				})
			}
			Entry::Vacant(entry) => {
				debug!("registered function {}", entry.key());
				entry.insert(function.clone());
				Ok(function)
			}
		}
	}

	pub fn lookup(&self, path: &str) -> Option<Arc<BoundFunction>> {
		self.functions.get(path).map(|entry| entry.value().clone())
	}

	/// Like [`FunctionRegistry::lookup`], failing for unknown paths.
	pub fn resolve(&self, path: &str) -> Result<Arc<BoundFunction>> {
		match self.lookup(path) {
			Some(function) => Ok(function),
			None => return_error!(FunctionError::UnresolvedSymbol {
				path: path.to_string()
			}),
		}
	}

	pub fn paths(&self) -> Vec<String> {
		let mut result: Vec<String> = self.functions.iter().map(|entry| entry.key().clone()).collect();
		result.sort();
		result
	}

	pub fn len(&self) -> usize {
		self.functions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.functions.is_empty()
	}

	/// Validates and binds `callable` as described by `desc`. Functions with a
	/// symbol path are registered; others are returned unregistered and must
	/// be persisted by value.
	pub fn bind(
		&self,
		desc: &FunctionDescriptor,
		callable: Arc<dyn Callable>,
		options: BindOptions,
	) -> Result<Arc<BoundFunction>> {
		let function = Arc::new(make_function(desc, callable, options)?);
		self.register(function)
	}

	/// Binds an expression-template function; see [`BoundFunction::call_expr`]
	/// for how templates expand at call sites.
	pub fn bind_template<F>(
		&self,
		desc: &FunctionDescriptor,
		param_types: Option<&[ColumnType]>,
		build: F,
	) -> Result<Arc<BoundFunction>>
	where
		F: FnOnce(&[Expr]) -> Expr,
	{
		let function = Arc::new(make_template(desc, param_types, build)?);
		self.register(function)
	}
}

/// Binds into the global registry.
pub fn bind(
	desc: &FunctionDescriptor,
	callable: Arc<dyn Callable>,
	options: BindOptions,
) -> Result<Arc<BoundFunction>> {
	FunctionRegistry::global().bind(desc, callable, options)
}

/// Binds a template into the global registry.
pub fn bind_template<F>(desc: &FunctionDescriptor, param_types: Option<&[ColumnType]>, build: F) -> Result<Arc<BoundFunction>>
where
	F: FnOnce(&[Expr]) -> Expr,
{
	FunctionRegistry::global().bind_template(desc, param_types, build)
}

#[cfg(test)]
mod tests {
	use std::thread;

	use tessera_type::{ErrorKind, Value};

	use super::*;
	use crate::{callable, descriptor::ParamSpec};

	fn noop() -> Arc<dyn Callable> {
		callable::scalar(|_| Ok(Value::None))
	}

	fn add_one() -> FunctionDescriptor {
		FunctionDescriptor::new("add_one")
			.with_module("udfs.math")
			.with_param(ParamSpec::new("x", ColumnType::Int))
			.returns(ColumnType::Int)
	}

	#[test]
	fn test_bind_registers_path() {
		let registry = FunctionRegistry::new();
		let f = registry.bind(&add_one(), noop(), BindOptions::new()).unwrap();
		assert_eq!(f.path.as_deref(), Some("udfs.math.add_one"));
		assert!(Arc::ptr_eq(&registry.resolve("udfs.math.add_one").unwrap(), &f));
		assert_eq!(registry.paths(), vec!["udfs.math.add_one".to_string()]);
	}

	#[test]
	fn test_local_functions_are_not_registered() {
		let registry = FunctionRegistry::new();
		let desc = FunctionDescriptor {
			module: None,
			..add_one()
		};
		let f = registry.bind(&desc, noop(), BindOptions::new()).unwrap();
		assert_eq!(f.path, None);
		assert!(registry.is_empty());

		let f = registry.bind(&add_one(), noop(), BindOptions::new().stored()).unwrap();
		assert_eq!(f.path, None);
		assert!(registry.is_empty());
	}

	#[test]
	fn test_identical_registration_is_idempotent() {
		let registry = FunctionRegistry::new();
		let body = noop();
		let first = registry.bind(&add_one(), body.clone(), BindOptions::new()).unwrap();
		let second = registry.bind(&add_one(), body, BindOptions::new()).unwrap();
		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn test_different_body_conflicts() {
		let registry = FunctionRegistry::new();
		registry.bind(&add_one(), noop(), BindOptions::new()).unwrap();
		let err = registry.bind(&add_one(), noop(), BindOptions::new()).unwrap_err();
		assert_eq!(err.code, "REGISTRY_001");

		// equal stored bodies are the same function
		let registry = FunctionRegistry::new();
		registry.bind(&add_one(), callable::with_body(noop(), "noop"), BindOptions::new()).unwrap();
		registry.bind(&add_one(), callable::with_body(noop(), "noop"), BindOptions::new()).unwrap();
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn test_conflicting_registration_fails() {
		let registry = FunctionRegistry::new();
		registry.bind(&add_one(), noop(), BindOptions::new()).unwrap();

		let different = add_one().returns(ColumnType::Float);
		let err = registry.bind(&different, noop(), BindOptions::new()).unwrap_err();
		assert_eq!(err.code, "REGISTRY_001");
		assert_eq!(err.kind(), ErrorKind::RegistryConflict);

		// the original binding survives
		let f = registry.resolve("udfs.math.add_one").unwrap();
		assert_eq!(f.signatures[0].return_type, ColumnType::Int);
	}

	#[test]
	fn test_invalid_path() {
		let registry = FunctionRegistry::new();
		let desc = add_one().with_module("udfs..math");
		let err = registry.bind(&desc, noop(), BindOptions::new()).unwrap_err();
		assert_eq!(err.code, "DEFINITION_013");
	}

	#[test]
	fn test_unresolved_symbol() {
		let err = FunctionRegistry::new().resolve("udfs.missing").unwrap_err();
		assert_eq!(err.code, "DEFINITION_022");
	}

	#[test]
	fn test_concurrent_registration() {
		let registry = Arc::new(FunctionRegistry::new());
		let body = noop();
		let handles: Vec<_> = (0..8)
			.map(|_| {
				let registry = registry.clone();
				let body = body.clone();
				thread::spawn(move || registry.bind(&add_one(), body, BindOptions::new()).unwrap())
			})
			.collect();

		let results: Vec<Arc<BoundFunction>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
		assert!(results.iter().all(|f| Arc::ptr_eq(f, &results[0])));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn test_global_bind() {
		let desc = FunctionDescriptor::new("global_probe")
			.with_module("tests.registry")
			.with_param(ParamSpec::new("s", ColumnType::String))
			.returns(ColumnType::Int);
		let f = bind(&desc, noop(), BindOptions::new()).unwrap();
		assert!(Arc::ptr_eq(&FunctionRegistry::global().resolve("tests.registry.global_probe").unwrap(), &f));
	}
}
