// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Language-native description of a callable's parameters and return type.
//!
//! Host adapters (reflection over annotations, hand-written tables) populate a
//! [`FunctionDescriptor`]; the signature resolver never inspects the callable
//! itself.

use tessera_type::{ColumnType, Value};

use crate::path::is_identifier;

/// Declared type of a parameter or return value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
	Known(ColumnType),
	/// Type variable, bound by a type substitution.
	Var(String),
	/// No annotation; must be supplied through explicit overrides.
	Unspecified,
}

impl From<ColumnType> for TypeSpec {
	fn from(value: ColumnType) -> Self {
		TypeSpec::Known(value)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
	pub name: String,
	pub ty: TypeSpec,
	pub default: Option<Value>,
	pub batched: bool,
}

impl ParamSpec {
	pub fn new(name: impl Into<String>, ty: impl Into<TypeSpec>) -> Self {
		Self {
			name: name.into(),
			ty: ty.into(),
			default: None,
			batched: false,
		}
	}

	pub fn var(name: impl Into<String>, variable: impl Into<String>) -> Self {
		Self::new(name, TypeSpec::Var(variable.into()))
	}

	pub fn untyped(name: impl Into<String>) -> Self {
		Self::new(name, TypeSpec::Unspecified)
	}

	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.default = Some(default.into());
		self
	}

	/// The callable receives a sequence of values of the declared type.
	pub fn batched(mut self) -> Self {
		self.batched = true;
		self
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSpec {
	pub ty: TypeSpec,
	pub batched: bool,
}

impl Default for ReturnSpec {
	fn default() -> Self {
		Self {
			ty: TypeSpec::Unspecified,
			batched: false,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
	pub name: String,
	/// Declaring module; `None` for locally defined callables.
	pub module: Option<String>,
	pub qualname: String,
	pub params: Vec<ParamSpec>,
	pub returns: ReturnSpec,
}

impl FunctionDescriptor {
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			qualname: name.clone(),
			name,
			module: None,
			params: vec![],
			returns: ReturnSpec::default(),
		}
	}

	pub fn with_module(mut self, module: impl Into<String>) -> Self {
		self.module = Some(module.into());
		self
	}

	pub fn with_qualname(mut self, qualname: impl Into<String>) -> Self {
		self.qualname = qualname.into();
		self
	}

	pub fn with_param(mut self, param: ParamSpec) -> Self {
		self.params.push(param);
		self
	}

	pub fn returns(mut self, ty: impl Into<TypeSpec>) -> Self {
		self.returns = ReturnSpec {
			ty: ty.into(),
			batched: false,
		};
		self
	}

	pub fn returns_batch(mut self, ty: impl Into<TypeSpec>) -> Self {
		self.returns = ReturnSpec {
			ty: ty.into(),
			batched: true,
		};
		self
	}

	/// `module.qualname` for callables that live in a module under a plain
	/// identifier; `None` for local or anonymous callables.
	pub fn symbol_path(&self) -> Option<String> {
		let module = self.module.as_deref().filter(|m| !m.is_empty())?;
		if !is_identifier(&self.name) {
			return None;
		}
		Some(format!("{}.{}", module, self.qualname))
	}
}
