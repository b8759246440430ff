// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{HashMap, HashSet};

use tessera_type::{ColumnType, Result, return_error};

use crate::{
	descriptor::{FunctionDescriptor, TypeSpec},
	error::FunctionError,
	signature::{Parameter, Signature},
};

/// Binds type variables to concrete column types; one per overload.
pub type TypeSubstitution = HashMap<String, ColumnType>;

fn resolve_type(
	function: &str,
	position: &str,
	spec: &TypeSpec,
	substitution: Option<&TypeSubstitution>,
) -> Result<ColumnType> {
	match spec {
		TypeSpec::Known(ty) => Ok(ty.clone()),
		TypeSpec::Var(variable) => match substitution.and_then(|s| s.get(variable)) {
			Some(ty) => Ok(ty.clone()),
			None => return_error!(FunctionError::UnboundTypeVariable {
				function: function.to_string(),
				variable: variable.clone(),
			}),
		},
		TypeSpec::Unspecified => return_error!(FunctionError::UnspecifiedType {
			function: function.to_string(),
			parameter: position.to_string(),
		}),
	}
}

pub(crate) fn resolve_parameters(
	function: &str,
	desc: &FunctionDescriptor,
	param_types: Option<&[ColumnType]>,
	substitution: Option<&TypeSubstitution>,
) -> Result<Vec<Parameter>> {
	if let Some(types) = param_types {
		if types.len() != desc.params.len() {
			return_error!(FunctionError::ParameterTypesArity {
				function: function.to_string(),
				expected: desc.params.len(),
				actual: types.len(),
			});
		}
	}

	let mut seen = HashSet::new();
	let mut result = Vec::with_capacity(desc.params.len());

	for (idx, spec) in desc.params.iter().enumerate() {
		if !seen.insert(spec.name.as_str()) {
			return_error!(FunctionError::DuplicateParameter {
				function: function.to_string(),
				parameter: spec.name.clone(),
			});
		}

		let col_type = match param_types {
			Some(types) => types[idx].clone(),
			None => resolve_type(function, &spec.name, &spec.ty, substitution)?,
		};

		if col_type.is_invalid() {
			return_error!(FunctionError::InvalidParameterType {
				function: function.to_string(),
				parameter: spec.name.clone(),
			});
		}

		result.push(Parameter {
			name: spec.name.clone(),
			col_type,
			default: spec.default.clone(),
			is_batched: spec.batched,
		});
	}

	Ok(result)
}

impl Signature {
	/// Derives a signature from a descriptor. Explicit `param_types` and
	/// `return_type` take precedence over the declared types.
	pub fn create(
		function: &str,
		desc: &FunctionDescriptor,
		param_types: Option<&[ColumnType]>,
		return_type: Option<&ColumnType>,
		substitution: Option<&TypeSubstitution>,
	) -> Result<Signature> {
		let parameters = resolve_parameters(function, desc, param_types, substitution)?;

		let return_type = match return_type {
			Some(ty) => ty.clone(),
			None => resolve_type(function, "return", &desc.returns.ty, substitution)?,
		};

		Ok(Signature {
			parameters,
			return_type,
			is_batched: desc.returns.batched,
		})
	}

	/// Batching is all-or-nothing: a batch size requires a batched return and
	/// at least one batched parameter, and batched parameters require a batch
	/// size.
	pub fn validate_batching(&self, function: &str, batch_size: Option<usize>) -> Result<()> {
		match batch_size {
			Some(0) => return_error!(FunctionError::InvalidBatchSize {
				function: function.to_string()
			}),
			Some(_) if !self.is_batched => return_error!(FunctionError::BatchReturnNotBatched {
				function: function.to_string()
			}),
			Some(_) if !self.has_batched_parameters() => {
				return_error!(FunctionError::BatchWithoutBatchedParameter {
					function: function.to_string()
				})
			}
			None => {
				if let Some(param) = self.batched_parameters().next() {
					return_error!(FunctionError::BatchedParameterWithoutBatchSize {
						function: function.to_string(),
						parameter: param.name.clone(),
					});
				}
				Ok(())
			}
			Some(_) => Ok(()),
		}
	}
}
