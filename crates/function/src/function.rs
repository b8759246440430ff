// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fmt, sync::Arc};

use tessera_type::{ColumnType, Conversion, Result, Value, error, return_error};
use uuid::Uuid;

use crate::{
	callable::Callable,
	error::FunctionError,
	expr::{Expr, FunctionRef},
	resource::ResourcePool,
	signature::Signature,
	template::ExprTemplate,
};

/// Executable form of a bound function, one entry per overload.
#[derive(Clone)]
pub enum Implementation {
	Callable(Vec<Arc<dyn Callable>>),
	Template(Vec<ExprTemplate>),
}

impl fmt::Debug for Implementation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Implementation::Callable(callables) => write!(f, "Callable({} overloads)", callables.len()),
			Implementation::Template(templates) => f.debug_tuple("Template").field(templates).finish(),
		}
	}
}

/// A callable paired with its validated signatures and registration
/// metadata.
#[derive(Debug, Clone)]
pub struct BoundFunction {
	pub id: Uuid,
	pub name: String,
	/// Symbol path under which the function is registered; `None` for
	/// functions that are persisted by value.
	pub path: Option<String>,
	pub signatures: Vec<Signature>,
	pub implementation: Implementation,
	pub batch_size: Option<usize>,
	pub is_method: bool,
	pub is_property: bool,
	pub resource_pool: Option<ResourcePool>,
}

impl BoundFunction {
	pub fn display_name(&self) -> &str {
		self.path.as_deref().unwrap_or("<anonymous>")
	}

	/// Name used in diagnostics: the path when there is one.
	pub fn qualified_name(&self) -> &str {
		self.path.as_deref().unwrap_or(&self.name)
	}

	pub fn help_str(&self) -> String {
		self.signatures
			.iter()
			.map(|signature| format!("{}{}", self.display_name(), signature))
			.collect::<Vec<_>>()
			.join("\n")
	}

	pub fn is_template(&self) -> bool {
		matches!(self.implementation, Implementation::Template(_))
	}

	pub fn function_ref(&self) -> FunctionRef {
		match &self.path {
			Some(path) => FunctionRef::Path(path.clone()),
			None => FunctionRef::Id(self.id),
		}
	}

	/// First overload, in declaration order, whose parameters accept
	/// `arg_types` after conversion.
	pub fn resolve_overload(&self, arg_types: &[ColumnType]) -> Result<(usize, Vec<Conversion>)> {
		for (idx, signature) in self.signatures.iter().enumerate() {
			if let Some(conversions) = signature.accepts(arg_types) {
				return Ok((idx, conversions));
			}
		}
		return_error!(FunctionError::NoMatchingOverload {
			function: self.qualified_name().to_string(),
			args: arg_types.to_vec(),
		})
	}

	/// Typed call site for `args`. Template functions expand in place.
	pub fn call_expr(&self, args: Vec<Expr>) -> Result<Expr> {
		let arg_types: Vec<ColumnType> = args.iter().map(Expr::col_type).collect();
		let (overload, _) = self.resolve_overload(&arg_types)?;

		match &self.implementation {
			Implementation::Template(templates) => Ok(templates[overload].instantiate(args)),
			Implementation::Callable(_) => Ok(Expr::Call {
				function: self.function_ref(),
				overload,
				args,
				return_type: self.signatures[overload].return_type.clone(),
			}),
		}
	}

	pub fn signature(&self, overload: usize) -> Result<&Signature> {
		match self.signatures.get(overload) {
			Some(signature) => Ok(signature),
			None => return_error!(FunctionError::UnknownOverload {
				function: self.qualified_name().to_string(),
				index: overload,
			}),
		}
	}

	fn callable(&self, overload: usize) -> Result<&Arc<dyn Callable>> {
		match &self.implementation {
			Implementation::Callable(callables) => callables.get(overload).ok_or_else(|| {
				error!(FunctionError::UnknownOverload {
					function: self.qualified_name().to_string(),
					index: overload,
				})
			}),
			Implementation::Template(_) => return_error!(FunctionError::NotCallable {
				function: self.qualified_name().to_string(),
			}),
		}
	}

	/// Converts `args` to the overload's parameter types and appends defaults
	/// for missing trailing arguments.
	fn prepare_args(&self, signature: &Signature, conversions: &[Conversion], args: Vec<Value>) -> Result<Vec<Value>> {
		let supplied = args.len();
		let mut result = Vec::with_capacity(signature.parameters.len());
		for (value, conversion) in args.into_iter().zip(conversions) {
			result.push(conversion.apply(value)?);
		}
		for param in signature.parameters.iter().skip(supplied) {
			result.push(param.default.clone().unwrap_or(Value::None));
		}
		Ok(result)
	}

	/// Resolves the overload for one row and converts its values.
	fn resolve_row(&self, args: Vec<Value>) -> Result<(usize, Vec<Value>)> {
		let arg_types: Vec<ColumnType> = args.iter().map(Value::column_type).collect();
		let (overload, conversions) = self.resolve_overload(&arg_types)?;
		let args = self.prepare_args(&self.signatures[overload], &conversions, args)?;
		Ok((overload, args))
	}

	/// Invokes the function on one row of argument values.
	pub fn exec(&self, args: Vec<Value>) -> Result<Value> {
		let (overload, args) = self.resolve_row(args)?;
		self.callable(overload)?.call(&args)
	}

	/// Invokes the function on many rows. Every row is resolved and converted
	/// on its own. Batched functions receive consecutive rows in chunks of at
	/// most `batch_size`; a chunk ends early where the overload or the value of
	/// a non-batched parameter changes.
	pub fn exec_batch(&self, rows: Vec<Vec<Value>>) -> Result<Vec<Value>> {
		let Some(batch_size) = self.batch_size else {
			return rows.into_iter().map(|row| self.exec(row)).collect();
		};

		let mut result = Vec::with_capacity(rows.len());
		let mut chunk: Option<BatchChunk> = None;

		for row in rows {
			let (overload, row) = self.resolve_row(row)?;
			let signature = &self.signatures[overload];

			if let Some(current) =
				chunk.as_mut().filter(|c| c.rows < batch_size && c.fits(overload, signature, &row))
			{
				current.push(signature, row);
			} else if let Some(full) = chunk.replace(BatchChunk::new(overload, row)) {
				result.extend(self.call_chunk(full)?);
			}
		}

		if let Some(last) = chunk {
			result.extend(self.call_chunk(last)?);
		}
		Ok(result)
	}

	fn call_chunk(&self, chunk: BatchChunk) -> Result<Vec<Value>> {
		let values = self.callable(chunk.overload)?.call_batch(&chunk.columns, chunk.rows)?;
		if values.len() != chunk.rows {
			return_error!(FunctionError::BatchResultLength {
				function: self.qualified_name().to_string(),
				expected: chunk.rows,
				actual: values.len(),
			});
		}
		Ok(values)
	}

	/// Two bindings of the same path are interchangeable when they expose the
	/// same call contract and the same bodies. Opaque callables are the same
	/// body when they are the same instance or carry equal stored bodies.
	pub fn is_compatible_with(&self, other: &BoundFunction) -> bool {
		let same_body = match (&self.implementation, &other.implementation) {
			(Implementation::Callable(a), Implementation::Callable(b)) => {
				a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same_callable(a, b))
			}
			(Implementation::Template(a), Implementation::Template(b)) => a == b,
			_ => false,
		};
		same_body
			&& self.signatures == other.signatures
			&& self.batch_size == other.batch_size
			&& self.is_method == other.is_method
			&& self.is_property == other.is_property
	}
}

fn same_callable(a: &Arc<dyn Callable>, b: &Arc<dyn Callable>) -> bool {
	if Arc::ptr_eq(a, b) {
		return true;
	}
	match (a.body(), b.body()) {
		(Some(a), Some(b)) => a == b,
		_ => false,
	}
}

/// Rows collected for one `call_batch`. Batched parameters hold one value per
/// row, the others hold the single value shared by all rows.
struct BatchChunk {
	overload: usize,
	columns: Vec<Vec<Value>>,
	rows: usize,
}

impl BatchChunk {
	fn new(overload: usize, row: Vec<Value>) -> Self {
		Self {
			overload,
			columns: row.into_iter().map(|value| vec![value]).collect(),
			rows: 1,
		}
	}

	fn fits(&self, overload: usize, signature: &Signature, row: &[Value]) -> bool {
		overload == self.overload
			&& signature
				.parameters
				.iter()
				.zip(&self.columns)
				.zip(row)
				.all(|((param, column), value)| param.is_batched || column.first() == Some(value))
	}

	fn push(&mut self, signature: &Signature, row: Vec<Value>) {
		for ((column, value), param) in self.columns.iter_mut().zip(row).zip(&signature.parameters) {
			if param.is_batched {
				column.push(value);
			}
		}
		self.rows += 1;
	}
}
