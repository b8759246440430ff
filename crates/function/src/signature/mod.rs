// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tessera_type::{ColumnType, Conversion, Value};

mod create;

pub use create::TypeSubstitution;
pub(crate) use create::resolve_parameters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
	pub name: String,
	pub col_type: ColumnType,
	#[serde(default)]
	pub default: Option<Value>,
	#[serde(default)]
	pub is_batched: bool,
}

impl Parameter {
	pub fn has_default(&self) -> bool {
		self.default.is_some()
	}
}

/// Typed call contract of one overload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
	pub parameters: Vec<Parameter>,
	pub return_type: ColumnType,
	#[serde(default)]
	pub is_batched: bool,
}

impl Signature {
	pub fn new(parameters: Vec<Parameter>, return_type: ColumnType) -> Self {
		Self {
			parameters,
			return_type,
			is_batched: false,
		}
	}

	pub fn parameter(&self, name: &str) -> Option<&Parameter> {
		self.parameters.iter().find(|p| p.name == name)
	}

	pub fn batched_parameters(&self) -> impl Iterator<Item = &Parameter> {
		self.parameters.iter().filter(|p| p.is_batched)
	}

	pub fn has_batched_parameters(&self) -> bool {
		self.parameters.iter().any(|p| p.is_batched)
	}

	pub fn required_parameters(&self) -> usize {
		self.parameters.iter().filter(|p| !p.has_default()).count()
	}

	/// Conversions that make `arg_types` fit this signature, one per argument;
	/// `None` if the arguments do not fit.
	///
	/// An `Invalid` argument type stands for an untyped null and fits every
	/// parameter.
	pub fn accepts(&self, arg_types: &[ColumnType]) -> Option<Vec<Conversion>> {
		if arg_types.len() > self.parameters.len() || arg_types.len() < self.required_parameters() {
			return None;
		}

		// a missing argument must have a default
		if self.parameters[arg_types.len()..].iter().any(|p| !p.has_default()) {
			return None;
		}

		arg_types
			.iter()
			.zip(&self.parameters)
			.map(|(arg, param)| {
				if arg.is_invalid() {
					Some(Conversion::NoOp)
				} else {
					arg.conversion_to(&param.col_type)
				}
			})
			.collect()
	}
}

impl Display for Signature {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("(")?;
		for (idx, param) in self.parameters.iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}
			if param.is_batched {
				write!(f, "{}: batch[{}]", param.name, param.col_type)?;
			} else {
				write!(f, "{}: {}", param.name, param.col_type)?;
			}
			if param.has_default() {
				f.write_str(" = ...")?;
			}
		}
		f.write_str(") -> ")?;
		if self.is_batched {
			write!(f, "batch[{}]", self.return_type)
		} else {
			write!(f, "{}", self.return_type)
		}
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::ImageMode;

	use super::*;

	fn param(name: &str, col_type: ColumnType) -> Parameter {
		Parameter {
			name: name.to_string(),
			col_type,
			default: None,
			is_batched: false,
		}
	}

	#[test]
	fn test_display() {
		let mut sig = Signature::new(
			vec![param("x", ColumnType::Int), param("y", ColumnType::String)],
			ColumnType::Float,
		);
		assert_eq!(sig.to_string(), "(x: int, y: string) -> float");

		sig.parameters[0].is_batched = true;
		sig.parameters[1].default = Some(Value::from("a"));
		sig.is_batched = true;
		assert_eq!(sig.to_string(), "(x: batch[int], y: string = ...) -> batch[float]");
	}

	#[test]
	fn test_accepts_exact_types() {
		let sig = Signature::new(vec![param("x", ColumnType::Int)], ColumnType::Int);
		assert_eq!(sig.accepts(&[ColumnType::Int]), Some(vec![Conversion::NoOp]));
		assert_eq!(sig.accepts(&[ColumnType::Float]), None);
		assert_eq!(sig.accepts(&[]), None);
		assert_eq!(sig.accepts(&[ColumnType::Int, ColumnType::Int]), None);
	}

	#[test]
	fn test_accepts_with_conversion() {
		let sig = Signature::new(vec![param("ts", ColumnType::Timestamp)], ColumnType::Int);
		assert_eq!(sig.accepts(&[ColumnType::String]), Some(vec![Conversion::ParseTimestamp]));

		let sig = Signature::new(
			vec![param("img", ColumnType::sized_image(16, 16, ImageMode::L))],
			ColumnType::Int,
		);
		let conversions = sig.accepts(&[ColumnType::sized_image(32, 32, ImageMode::Rgb)]).unwrap();
		assert!(!conversions[0].is_noop());
	}

	#[test]
	fn test_accepts_defaults_and_nulls() {
		let mut optional = param("n", ColumnType::Int);
		optional.default = Some(Value::Int(1));
		let sig = Signature::new(vec![param("s", ColumnType::String), optional], ColumnType::String);

		assert_eq!(sig.required_parameters(), 1);
		assert!(sig.accepts(&[ColumnType::String]).is_some());
		assert!(sig.accepts(&[ColumnType::String, ColumnType::Int]).is_some());
		assert!(sig.accepts(&[ColumnType::Invalid, ColumnType::Int]).is_some());
	}
}
