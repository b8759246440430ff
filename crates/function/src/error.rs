// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{
	ColumnType,
	error::{Diagnostic, IntoDiagnostic},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FunctionError {
	#[error("{function}(): batch_size is specified; the return type must be batched")]
	BatchReturnNotBatched {
		function: String,
	},

	#[error("{function}(): batch_size is specified; at least one parameter must be batched")]
	BatchWithoutBatchedParameter {
		function: String,
	},

	#[error("{function}(): parameter `{parameter}` is batched, but no batch_size is given")]
	BatchedParameterWithoutBatchSize {
		function: String,
		parameter: String,
	},

	#[error("{function}(): batch_size must be positive")]
	InvalidBatchSize {
		function: String,
	},

	#[error("cannot declare `{function}` as both method and property")]
	MethodAndProperty {
		function: String,
	},

	#[error("a property expects exactly 1 parameter, but `{function}` has {count}")]
	PropertyArity {
		function: String,
		count: usize,
	},

	#[error("`{function}` has no symbol path and cannot be declared as method or property")]
	MethodWithoutPath {
		function: String,
	},

	#[error("{function}(): type substitutions require a function with a symbol path")]
	SubstitutionWithoutPath {
		function: String,
	},

	#[error("{function}(): type substitutions cannot be used with batched functions")]
	SubstitutionWithBatching {
		function: String,
	},

	#[error("{function}(): type substitutions cannot be used with methods or properties")]
	SubstitutionWithMethod {
		function: String,
	},

	#[error("{function}(): the list of type substitutions is empty")]
	EmptySubstitutions {
		function: String,
	},

	#[error("{function}(): a substitute implementation requires a function with a symbol path")]
	SubstituteWithoutPath {
		function: String,
	},

	#[error("invalid symbol path: `{path}`")]
	InvalidSymbolPath {
		path: String,
	},

	#[error("{function}(): no type given for `{parameter}`")]
	UnspecifiedType {
		function: String,
		parameter: String,
	},

	#[error("{function}(): type variable `{variable}` has no substitution")]
	UnboundTypeVariable {
		function: String,
		variable: String,
	},

	#[error("{function}(): expected {expected} explicit parameter types, got {actual}")]
	ParameterTypesArity {
		function: String,
		expected: usize,
		actual: usize,
	},

	#[error("{function}(): parameter `{parameter}` has the invalid type")]
	InvalidParameterType {
		function: String,
		parameter: String,
	},

	#[error("{function}(): duplicate parameter `{parameter}`")]
	DuplicateParameter {
		function: String,
		parameter: String,
	},

	#[error("{function}(): expression templates cannot have batched parameters")]
	BatchedTemplate {
		function: String,
	},

	#[error("{function}(): the template expression has no valid type")]
	UntypedTemplate {
		function: String,
	},

	#[error("`{function}` cannot be persisted: its callable has no stored body")]
	NotPersistable {
		function: String,
	},

	#[error("no function is registered under `{path}`")]
	UnresolvedSymbol {
		path: String,
	},

	#[error("no overload of {function} accepts ({})", display_types(args))]
	NoMatchingOverload {
		function: String,
		args: Vec<ColumnType>,
	},

	#[error("`{path}` is already bound to a different function")]
	RegistryConflict {
		path: String,
	},

	#[error("{function}(): overload {index} does not exist")]
	UnknownOverload {
		function: String,
		index: usize,
	},

	#[error("{function}(): expected {expected} batch results, got {actual}")]
	BatchResultLength {
		function: String,
		expected: usize,
		actual: usize,
	},

	#[error("{function}() is an expression template and is evaluated by the expression evaluator")]
	NotCallable {
		function: String,
	},

	#[error("malformed function record: {reason}")]
	MalformedRecord {
		reason: String,
	},
}

fn display_types(types: &[ColumnType]) -> String {
	types.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
}

impl IntoDiagnostic for FunctionError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			FunctionError::BatchReturnNotBatched {
				..
			} => Diagnostic::new("DEFINITION_001", message).with_help("declare the return type as a batch"),
			FunctionError::BatchWithoutBatchedParameter {
				..
			} => Diagnostic::new("DEFINITION_002", message).with_help("declare at least one parameter as a batch"),
			FunctionError::BatchedParameterWithoutBatchSize {
				..
			} => Diagnostic::new("DEFINITION_003", message).with_help("specify a batch_size"),
			FunctionError::InvalidBatchSize {
				..
			} => Diagnostic::new("DEFINITION_004", message),
			FunctionError::MethodAndProperty {
				..
			} => Diagnostic::new("DEFINITION_005", message).with_label("conflicting options"),
			FunctionError::PropertyArity {
				..
			} => Diagnostic::new("DEFINITION_006", message),
			FunctionError::MethodWithoutPath {
				..
			} => Diagnostic::new("DEFINITION_007", message)
				.with_note("stored functions cannot be declared as method or property"),
			FunctionError::SubstitutionWithoutPath {
				..
			} => Diagnostic::new("DEFINITION_008", message)
				.with_note("locally defined functions cannot use type substitutions"),
			FunctionError::SubstitutionWithBatching {
				..
			} => Diagnostic::new("DEFINITION_009", message),
			FunctionError::SubstitutionWithMethod {
				..
			} => Diagnostic::new("DEFINITION_010", message),
			FunctionError::EmptySubstitutions {
				..
			} => Diagnostic::new("DEFINITION_011", message).with_label("invalid overload set"),
			FunctionError::SubstituteWithoutPath {
				..
			} => Diagnostic::new("DEFINITION_012", message),
			FunctionError::InvalidSymbolPath {
				..
			} => Diagnostic::new("DEFINITION_013", message)
				.with_help("a symbol path is a dot-separated list of identifiers"),
			FunctionError::UnspecifiedType {
				..
			} => Diagnostic::new("DEFINITION_014", message)
				.with_help("annotate the parameter or pass explicit parameter types"),
			FunctionError::UnboundTypeVariable {
				..
			} => Diagnostic::new("DEFINITION_015", message),
			FunctionError::ParameterTypesArity {
				..
			} => Diagnostic::new("DEFINITION_016", message),
			FunctionError::InvalidParameterType {
				..
			} => Diagnostic::new("DEFINITION_017", message),
			FunctionError::DuplicateParameter {
				..
			} => Diagnostic::new("DEFINITION_018", message),
			FunctionError::BatchedTemplate {
				..
			} => Diagnostic::new("DEFINITION_019", message),
			FunctionError::UntypedTemplate {
				..
			} => Diagnostic::new("DEFINITION_020", message),
			FunctionError::NotPersistable {
				..
			} => Diagnostic::new("DEFINITION_021", message)
				.with_note("bodies of opaque callables are not relocatable across runtime versions"),
			FunctionError::UnresolvedSymbol {
				..
			} => Diagnostic::new("DEFINITION_022", message).with_label("unknown function"),
			FunctionError::NoMatchingOverload {
				..
			} => Diagnostic::new("TYPE_010", message).with_label("no matching signature"),
			FunctionError::UnknownOverload {
				..
			} => Diagnostic::new("TYPE_011", message),
			FunctionError::RegistryConflict {
				..
			} => Diagnostic::new("REGISTRY_001", message)
				.with_help("register the function under a different path"),
			FunctionError::BatchResultLength {
				..
			} => Diagnostic::new("EXECUTION_001", message),
			FunctionError::NotCallable {
				..
			} => Diagnostic::new("EXECUTION_002", message),
			FunctionError::MalformedRecord {
				..
			} => Diagnostic::new("METADATA_010", message),
		}
	}
}
