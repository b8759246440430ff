// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	error::{Diagnostic, IntoDiagnostic},
	value::r#type::{ColumnType, ImageMode, TypeTag},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
	#[error("column type {tag} requires parameters")]
	RequiresParameters {
		tag: TypeTag,
	},

	#[error("the invalid type is not a concrete column type")]
	InvalidType,

	#[error("no conversion from {from} to {to}")]
	NoConversion {
		from: ColumnType,
		to: ColumnType,
	},

	#[error("conversion expects {expected} values, got {actual}")]
	ValueMismatch {
		expected: TypeTag,
		actual: ColumnType,
	},

	#[error("malformed column type record: {reason}")]
	MalformedRecord {
		reason: String,
	},

	#[error("image buffer of {len} bytes does not match {width}x{height} {mode}")]
	ImageBufferMismatch {
		width: u32,
		height: u32,
		mode: ImageMode,
		len: usize,
	},

	#[error("array buffer of {len} bytes does not match shape {shape:?}")]
	ArrayBufferMismatch {
		shape: Vec<usize>,
		len: usize,
	},

	#[error("a {width}x{height} {mode} image does not fit in memory")]
	ImageTooLarge {
		width: u32,
		height: u32,
		mode: ImageMode,
	},

	#[error("an array of shape {shape:?} does not fit in memory")]
	ArrayTooLarge {
		shape: Vec<usize>,
	},
}

impl IntoDiagnostic for TypeError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			TypeError::RequiresParameters {
				tag,
			} => Diagnostic::new("TYPE_001", message)
				.with_label("parameterised type")
				.with_help(format!("declare the {} type explicitly with its dimensions", tag)),
			TypeError::InvalidType => Diagnostic::new("TYPE_002", message)
				.with_note("the invalid type only exists while a type is being inferred"),
			TypeError::NoConversion {
				..
			} => Diagnostic::new("TYPE_003", message)
				.with_label("incompatible types")
				.with_note("supported conversions: string -> timestamp, image -> image, identical types"),
			TypeError::ValueMismatch {
				..
			} => Diagnostic::new("TYPE_004", message).with_label("value has the wrong type"),
			TypeError::MalformedRecord {
				..
			} => Diagnostic::new("TYPE_005", message)
				.with_help("a column type record needs a `type` tag plus the fields of that variant"),
			TypeError::ImageBufferMismatch {
				..
			} => Diagnostic::new("TYPE_006", message).with_note("pixel buffers hold one byte per channel"),
			TypeError::ArrayBufferMismatch {
				..
			} => Diagnostic::new("TYPE_007", message),
			TypeError::ImageTooLarge {
				..
			} => Diagnostic::new("TYPE_008", message),
			TypeError::ArrayTooLarge {
				..
			} => Diagnostic::new("TYPE_009", message),
		}
	}
}
