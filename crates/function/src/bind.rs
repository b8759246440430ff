// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tessera_type::{ColumnType, Result, return_error};
use uuid::Uuid;

use crate::{
	callable::Callable,
	descriptor::FunctionDescriptor,
	error::FunctionError,
	expr::Expr,
	function::{BoundFunction, Implementation},
	resource::ResourcePool,
	signature::{Signature, TypeSubstitution, resolve_parameters},
	template::ExprTemplate,
};

/// Options accepted by [`bind`](crate::FunctionRegistry::bind).
#[derive(Clone, Default)]
pub struct BindOptions {
	pub batch_size: Option<usize>,
	/// Executes in place of the described callable, which then only supplies
	/// the signature shape.
	pub substitute: Option<Arc<dyn Callable>>,
	pub is_method: bool,
	pub is_property: bool,
	pub resource_pool: Option<ResourcePool>,
	/// One overload per substitution.
	pub type_substitutions: Option<Vec<TypeSubstitution>>,
	pub param_types: Option<Vec<ColumnType>>,
	pub return_type: Option<ColumnType>,
	pub function_name: Option<String>,
	/// Never derive a symbol path; the function is persisted by value.
	pub force_stored: bool,
}

impl BindOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = Some(batch_size);
		self
	}

	pub fn with_substitute(mut self, substitute: Arc<dyn Callable>) -> Self {
		self.substitute = Some(substitute);
		self
	}

	pub fn method(mut self) -> Self {
		self.is_method = true;
		self
	}

	pub fn property(mut self) -> Self {
		self.is_property = true;
		self
	}

	pub fn with_resource_pool(mut self, pool: ResourcePool) -> Self {
		self.resource_pool = Some(pool);
		self
	}

	pub fn with_type_substitutions(mut self, substitutions: Vec<TypeSubstitution>) -> Self {
		self.type_substitutions = Some(substitutions);
		self
	}

	pub fn with_param_types(mut self, param_types: Vec<ColumnType>) -> Self {
		self.param_types = Some(param_types);
		self
	}

	pub fn with_return_type(mut self, return_type: ColumnType) -> Self {
		self.return_type = Some(return_type);
		self
	}

	pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
		self.function_name = Some(name.into());
		self
	}

	pub fn stored(mut self) -> Self {
		self.force_stored = true;
		self
	}
}

/// Validates a declaration and builds the bound function. Registration is
/// left to the caller.
pub(crate) fn make_function(
	desc: &FunctionDescriptor,
	callable: Arc<dyn Callable>,
	options: BindOptions,
) -> Result<BoundFunction> {
	let path = if options.force_stored {
		None
	} else {
		desc.symbol_path()
	};
	let name = options.function_name.clone().unwrap_or_else(|| desc.name.clone());
	let errmsg_name = path.clone().unwrap_or_else(|| name.clone());

	let param_types = options.param_types.as_deref();
	let return_type = options.return_type.as_ref();

	let signatures = match &options.type_substitutions {
		None => {
			let signature = Signature::create(&errmsg_name, desc, param_types, return_type, None)?;
			signature.validate_batching(&errmsg_name, options.batch_size)?;

			if options.is_method && options.is_property {
				return_error!(FunctionError::MethodAndProperty {
					function: name
				});
			}
			if options.is_property && signature.parameters.len() != 1 {
				return_error!(FunctionError::PropertyArity {
					function: name,
					count: signature.parameters.len(),
				});
			}
			if (options.is_method || options.is_property) && path.is_none() {
				return_error!(FunctionError::MethodWithoutPath {
					function: name
				});
			}

			vec![signature]
		}
		Some(substitutions) => {
			if path.is_none() {
				return_error!(FunctionError::SubstitutionWithoutPath {
					function: errmsg_name
				});
			}
			if options.batch_size.is_some() {
				return_error!(FunctionError::SubstitutionWithBatching {
					function: errmsg_name
				});
			}
			if options.is_method || options.is_property {
				return_error!(FunctionError::SubstitutionWithMethod {
					function: errmsg_name
				});
			}
			if substitutions.is_empty() {
				return_error!(FunctionError::EmptySubstitutions {
					function: errmsg_name
				});
			}

			substitutions
				.iter()
				.map(|substitution| {
					Signature::create(&errmsg_name, desc, param_types, return_type, Some(substitution))
				})
				.collect::<Result<Vec<_>>>()?
		}
	};

	let callable = match options.substitute {
		None => callable,
		Some(substitute) => {
			if path.is_none() {
				return_error!(FunctionError::SubstituteWithoutPath {
					function: errmsg_name
				});
			}
			substitute
		}
	};

	Ok(BoundFunction {
		id: Uuid::new_v4(),
		name,
		path,
		implementation: Implementation::Callable(vec![callable; signatures.len()]),
		signatures,
		batch_size: options.batch_size,
		is_method: options.is_method,
		is_property: options.is_property,
		resource_pool: options.resource_pool,
	})
}

/// Builds an expression-template function by applying `build` to one
/// variable placeholder per parameter. The return type is inferred from the
/// resulting expression.
pub(crate) fn make_template<F>(
	desc: &FunctionDescriptor,
	param_types: Option<&[ColumnType]>,
	build: F,
) -> Result<BoundFunction>
where
	F: FnOnce(&[Expr]) -> Expr,
{
	let path = desc.symbol_path();
	let errmsg_name = path.clone().unwrap_or_else(|| desc.name.clone());

	let parameters = resolve_parameters(&errmsg_name, desc, param_types, None)?;
	if parameters.iter().any(|p| p.is_batched) {
		return_error!(FunctionError::BatchedTemplate {
			function: errmsg_name
		});
	}

	let variables: Vec<Expr> = parameters.iter().map(|p| Expr::variable(&p.name, p.col_type.clone())).collect();
	let expr = build(&variables);

	let return_type = expr.col_type();
	if return_type.is_invalid() {
		return_error!(FunctionError::UntypedTemplate {
			function: errmsg_name
		});
	}

	let signature = Signature::new(parameters, return_type);

	Ok(BoundFunction {
		id: Uuid::new_v4(),
		name: desc.name.clone(),
		path,
		signatures: vec![signature.clone()],
		implementation: Implementation::Template(vec![ExprTemplate {
			signature,
			expr,
		}]),
		batch_size: None,
		is_method: false,
		is_property: false,
		resource_pool: None,
	})
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use tessera_type::{ErrorKind, Value};

	use super::*;
	use crate::{callable, descriptor::ParamSpec, expr::FunctionRef};

	fn noop() -> Arc<dyn Callable> {
		callable::scalar(|_| Ok(Value::None))
	}

	fn add_one() -> FunctionDescriptor {
		FunctionDescriptor::new("add_one").with_param(ParamSpec::new("x", ColumnType::Int)).returns(ColumnType::Int)
	}

	fn identity() -> FunctionDescriptor {
		FunctionDescriptor::new("identity")
			.with_module("udfs")
			.with_param(ParamSpec::var("x", "T"))
			.returns(crate::descriptor::TypeSpec::Var("T".to_string()))
	}

	fn subst(ty: ColumnType) -> TypeSubstitution {
		HashMap::from([("T".to_string(), ty)])
	}

	#[test]
	fn test_scalar_function() {
		let f = make_function(&add_one(), noop(), BindOptions::new()).unwrap();
		assert_eq!(f.signatures.len(), 1);
		assert_eq!(f.signatures[0].parameters[0].col_type, ColumnType::Int);
		assert!(!f.signatures[0].parameters[0].is_batched);
		assert_eq!(f.signatures[0].return_type, ColumnType::Int);
		assert_eq!(f.path, None);
		assert_eq!(f.name, "add_one");
	}

	#[test]
	fn test_method_and_property_rules() {
		let desc = add_one().with_module("udfs");

		let err = make_function(&desc, noop(), BindOptions::new().method().property()).unwrap_err();
		assert_eq!(err.code, "DEFINITION_005");

		let two_params = desc.clone().with_param(ParamSpec::new("y", ColumnType::Int));
		let err = make_function(&two_params, noop(), BindOptions::new().property()).unwrap_err();
		assert_eq!(err.code, "DEFINITION_006");

		let err = make_function(&add_one(), noop(), BindOptions::new().method()).unwrap_err();
		assert_eq!(err.code, "DEFINITION_007");

		let err = make_function(&desc, noop(), BindOptions::new().method().stored()).unwrap_err();
		assert_eq!(err.code, "DEFINITION_007");

		let f = make_function(&desc, noop(), BindOptions::new().property()).unwrap();
		assert!(f.is_property);
	}

	#[test]
	fn test_batch_rules_surface_at_bind() {
		let desc = FunctionDescriptor::new("embed")
			.with_param(ParamSpec::new("text", ColumnType::String))
			.returns_batch(ColumnType::Float);
		let err = make_function(&desc, noop(), BindOptions::new().with_batch_size(8)).unwrap_err();
		assert_eq!(err.code, "DEFINITION_002");
		assert_eq!(err.kind(), ErrorKind::Definition);

		let desc = FunctionDescriptor::new("embed")
			.with_param(ParamSpec::new("text", ColumnType::String).batched())
			.returns_batch(ColumnType::Float);
		let err = make_function(&desc, noop(), BindOptions::new()).unwrap_err();
		assert_eq!(err.code, "DEFINITION_003");
	}

	#[test]
	fn test_type_substitutions_produce_overloads() {
		let options = BindOptions::new().with_type_substitutions(vec![subst(ColumnType::Int), subst(ColumnType::String)]);
		let f = make_function(&identity(), noop(), options).unwrap();
		assert_eq!(f.signatures.len(), 2);
		assert_eq!(f.signatures[0].return_type, ColumnType::Int);
		assert_eq!(f.signatures[1].return_type, ColumnType::String);
		assert_eq!(f.resolve_overload(&[ColumnType::String]).unwrap().0, 1);
		assert_eq!(f.path.as_deref(), Some("udfs.identity"));
	}

	#[test]
	fn test_type_substitution_rules() {
		let overloads = || vec![subst(ColumnType::Int)];

		let local = FunctionDescriptor { module: None, ..identity() };
		let err = make_function(&local, noop(), BindOptions::new().with_type_substitutions(overloads())).unwrap_err();
		assert_eq!(err.code, "DEFINITION_008");

		let options = BindOptions::new().with_type_substitutions(overloads()).with_batch_size(4);
		assert_eq!(make_function(&identity(), noop(), options).unwrap_err().code, "DEFINITION_009");

		let options = BindOptions::new().with_type_substitutions(overloads()).method();
		assert_eq!(make_function(&identity(), noop(), options).unwrap_err().code, "DEFINITION_010");

		let options = BindOptions::new().with_type_substitutions(vec![]);
		assert_eq!(make_function(&identity(), noop(), options).unwrap_err().code, "DEFINITION_011");
	}

	#[test]
	fn test_substitute_executes() {
		let original = callable::scalar(|_| Ok(Value::Int(0)));
		let substitute = callable::scalar(|_| Ok(Value::Int(1)));
		let desc = add_one().with_module("udfs");

		let f = make_function(&desc, original, BindOptions::new().with_substitute(substitute.clone())).unwrap();
		assert_eq!(f.exec(vec![Value::Int(5)]).unwrap(), Value::Int(1));

		let err = make_function(&add_one(), noop(), BindOptions::new().with_substitute(substitute)).unwrap_err();
		assert_eq!(err.code, "DEFINITION_012");
	}

	#[test]
	fn test_function_name_override() {
		let f = make_function(&add_one(), noop(), BindOptions::new().with_function_name("inc")).unwrap();
		assert_eq!(f.name, "inc");
	}

	#[test]
	fn test_template() {
		let desc = FunctionDescriptor::new("shout").with_param(ParamSpec::new("s", ColumnType::String));
		let f = make_template(&desc, None, |vars| Expr::Call {
			function: FunctionRef::Path("udfs.upper".to_string()),
			overload: 0,
			args: vars.to_vec(),
			return_type: ColumnType::String,
		})
		.unwrap();

		assert!(f.is_template());
		assert_eq!(f.signatures[0].return_type, ColumnType::String);

		let expr = f.call_expr(vec![Expr::column("title", ColumnType::String)]).unwrap();
		assert_eq!(expr.column_refs(), vec!["title"]);
		assert_eq!(f.exec(vec![Value::from("a")]).unwrap_err().code, "EXECUTION_002");
	}

	#[test]
	fn test_template_rules() {
		let desc = FunctionDescriptor::new("f").with_param(ParamSpec::new("s", ColumnType::String).batched());
		let err = make_template(&desc, None, |vars| vars[0].clone()).unwrap_err();
		assert_eq!(err.code, "DEFINITION_019");

		let desc = FunctionDescriptor::new("f").with_param(ParamSpec::new("s", ColumnType::String));
		let err = make_template(&desc, None, |_| Expr::literal(Value::None)).unwrap_err();
		assert_eq!(err.code, "DEFINITION_020");
	}
}
