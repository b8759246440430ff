// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	Result,
	error::TypeError,
	return_error,
	value::{Value, r#type::TypeTag},
};

pub mod image;
mod timestamp;

pub use image::{ImagePipeline, ImageStep};
pub use timestamp::parse_timestamp;

/// Outcome of resolving a conversion between two column types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
	/// Values are already compatible with the target type.
	NoOp,
	/// ISO-8601 string to timestamp; unparsable values become `None`.
	ParseTimestamp,
	/// Resize then recolor.
	Image(ImagePipeline),
}

impl Conversion {
	pub fn is_noop(&self) -> bool {
		matches!(self, Conversion::NoOp)
	}

	/// Converts a single value. `None` passes through unchanged.
	pub fn apply(&self, value: Value) -> Result<Value> {
		if value.is_none() {
			return Ok(Value::None);
		}

		match self {
			Conversion::NoOp => Ok(value),
			Conversion::ParseTimestamp => match value {
				Value::String(s) => Ok(parse_timestamp(&s).map(Value::Timestamp).unwrap_or(Value::None)),
				other => return_error!(TypeError::ValueMismatch {
					expected: TypeTag::String,
					actual: other.column_type(),
				}),
			},
			Conversion::Image(pipeline) => match value {
				Value::Image(image) => Ok(Value::Image(pipeline.apply(&image)?)),
				other => return_error!(TypeError::ValueMismatch {
					expected: TypeTag::Image,
					actual: other.column_type(),
				}),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;
	use crate::value::{image::Image, r#type::ImageMode};

	#[test]
	fn test_parse_timestamp_per_value() {
		let conversion = Conversion::ParseTimestamp;

		let parsed = conversion.apply(Value::String("2024-03-01T12:30:00".to_string())).unwrap();
		let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(12, 30, 0).unwrap();
		assert_eq!(parsed, Value::Timestamp(expected));

		// parse failures are per value, not per type
		let parsed = conversion.apply(Value::String("yesterday".to_string())).unwrap();
		assert_eq!(parsed, Value::None);
	}

	#[test]
	fn test_none_passes_through() {
		assert_eq!(Conversion::ParseTimestamp.apply(Value::None).unwrap(), Value::None);
		assert_eq!(Conversion::NoOp.apply(Value::None).unwrap(), Value::None);
	}

	#[test]
	fn test_mismatched_value_is_an_error() {
		let err = Conversion::ParseTimestamp.apply(Value::Int(3)).unwrap_err();
		assert_eq!(err.code, "TYPE_004");

		let pipeline = Conversion::Image(ImagePipeline {
			resize: Some((1, 1)),
			recolor: None,
		});
		let err = pipeline.apply(Value::Bool(true)).unwrap_err();
		assert_eq!(err.code, "TYPE_004");
	}

	#[test]
	fn test_image_pipeline_yields_target_type() {
		let image = Image::new(4, 2, ImageMode::Rgb, vec![200u8; 4 * 2 * 3]).unwrap();
		let source = Value::Image(image).column_type();
		let target = crate::value::r#type::ColumnType::sized_image(2, 2, ImageMode::L);

		let conversion = source.conversion_to(&target).unwrap();
		let converted = conversion.apply(Value::Image(Image::new(4, 2, ImageMode::Rgb, vec![200u8; 24]).unwrap()));
		assert_eq!(converted.unwrap().column_type(), target);
	}
}
