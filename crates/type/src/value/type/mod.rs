// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
	Result,
	error::TypeError,
	return_error,
	value::convert::{Conversion, image::image_conversion},
};

mod dtype;
mod image;
mod tag;

pub use dtype::DType;
pub use image::ImageMode;
pub use tag::TypeTag;

/// The type of a column. A closed set of variants; values are immutable and
/// compare structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnType {
	/// Sentinel used during inference, never persisted.
	Invalid,
	String,
	Int,
	Float,
	Bool,
	Timestamp,
	Image {
		#[serde(default)]
		width: Option<u32>,
		#[serde(default)]
		height: Option<u32>,
		#[serde(default)]
		mode: Option<ImageMode>,
	},
	Dict,
	Array {
		#[serde(default)]
		shape: Option<Vec<usize>>,
		#[serde(default)]
		dtype: DType,
	},
}

impl ColumnType {
	/// Canonical instance for tags that need no parameters.
	pub fn make(tag: TypeTag) -> Result<ColumnType> {
		match tag {
			TypeTag::String => Ok(ColumnType::String),
			TypeTag::Int => Ok(ColumnType::Int),
			TypeTag::Float => Ok(ColumnType::Float),
			TypeTag::Bool => Ok(ColumnType::Bool),
			TypeTag::Timestamp => Ok(ColumnType::Timestamp),
			TypeTag::Dict => Ok(ColumnType::Dict),
			TypeTag::Invalid => return_error!(TypeError::InvalidType),
			TypeTag::Image | TypeTag::Array => return_error!(TypeError::RequiresParameters {
				tag
			}),
		}
	}

	pub const fn image(width: Option<u32>, height: Option<u32>, mode: Option<ImageMode>) -> ColumnType {
		ColumnType::Image {
			width,
			height,
			mode,
		}
	}

	pub const fn sized_image(width: u32, height: u32, mode: ImageMode) -> ColumnType {
		ColumnType::image(Some(width), Some(height), Some(mode))
	}

	pub fn array(shape: Option<Vec<usize>>, dtype: DType) -> ColumnType {
		ColumnType::Array {
			shape,
			dtype,
		}
	}

	pub fn tag(&self) -> TypeTag {
		match self {
			ColumnType::Invalid => TypeTag::Invalid,
			ColumnType::String => TypeTag::String,
			ColumnType::Int => TypeTag::Int,
			ColumnType::Float => TypeTag::Float,
			ColumnType::Bool => TypeTag::Bool,
			ColumnType::Timestamp => TypeTag::Timestamp,
			ColumnType::Image {
				..
			} => TypeTag::Image,
			ColumnType::Dict => TypeTag::Dict,
			ColumnType::Array {
				..
			} => TypeTag::Array,
		}
	}

	pub fn is_invalid(&self) -> bool {
		matches!(self, ColumnType::Invalid)
	}

	pub fn is_scalar(&self) -> bool {
		matches!(
			self,
			ColumnType::String | ColumnType::Int | ColumnType::Float | ColumnType::Bool | ColumnType::Timestamp
		)
	}

	pub fn is_image(&self) -> bool {
		matches!(self, ColumnType::Image { .. })
	}

	/// Type of the physical storage column backing a column of this type.
	pub fn sql_type(&self) -> Option<&'static str> {
		match self {
			ColumnType::Invalid => None,
			ColumnType::String => Some("VARCHAR"),
			ColumnType::Int => Some("INTEGER"),
			ColumnType::Float => Some("FLOAT"),
			ColumnType::Bool => Some("BOOLEAN"),
			ColumnType::Timestamp => Some("INTEGER"),
			// images are stored by location
			ColumnType::Image {
				..
			} => Some("VARCHAR"),
			ColumnType::Dict => Some("VARCHAR"),
			ColumnType::Array {
				..
			} => Some("BLOB"),
		}
	}

	/// Self-describing record (`type` tag plus variant fields).
	pub fn to_record(&self) -> Result<serde_json::Value> {
		if self.is_invalid() {
			return_error!(TypeError::InvalidType);
		}
		Ok(serde_json::to_value(self)?)
	}

	pub fn from_record(record: &serde_json::Value) -> Result<ColumnType> {
		let result: ColumnType =
			serde_json::from_value(record.clone()).map_err(|err| {
				crate::error!(TypeError::MalformedRecord {
					reason: err.to_string()
				})
			})?;

		if result.is_invalid() {
			return_error!(TypeError::MalformedRecord {
				reason: "the invalid type cannot be persisted".to_string()
			});
		}
		Ok(result)
	}

	/// How values of this type become values of `target`; `None` if they
	/// cannot.
	pub fn conversion_to(&self, target: &ColumnType) -> Option<Conversion> {
		match (self, target) {
			(ColumnType::Invalid, _) | (_, ColumnType::Invalid) => None,
			(ColumnType::String, ColumnType::Timestamp) => Some(Conversion::ParseTimestamp),
			(
				ColumnType::Image {
					width,
					height,
					mode,
				},
				ColumnType::Image {
					width: target_width,
					height: target_height,
					mode: target_mode,
				},
			) => image_conversion((*width, *height, *mode), (*target_width, *target_height, *target_mode)),
			(
				ColumnType::Array {
					shape,
					dtype,
				},
				ColumnType::Array {
					shape: target_shape,
					dtype: target_dtype,
				},
			) => {
				let shape_ok = target_shape.is_none() || target_shape == shape;
				(dtype == target_dtype && shape_ok).then_some(Conversion::NoOp)
			}
			(source, target) if source == target => Some(Conversion::NoOp),
			_ => None,
		}
	}

	/// Like [`ColumnType::conversion_to`], failing with `TYPE_003`.
	pub fn require_conversion_to(&self, target: &ColumnType) -> Result<Conversion> {
		match self.conversion_to(target) {
			Some(conversion) => Ok(conversion),
			None => return_error!(TypeError::NoConversion {
				from: self.clone(),
				to: target.clone(),
			}),
		}
	}
}

impl Display for ColumnType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ColumnType::Image {
				width,
				height,
				mode,
			} => {
				f.write_str("image")?;
				match (width, height, mode) {
					(None, None, None) => Ok(()),
					(Some(w), Some(h), Some(m)) => write!(f, "({}x{}, {})", w, h, m),
					(Some(w), Some(h), None) => write!(f, "({}x{})", w, h),
					(_, _, Some(m)) => write!(f, "({})", m),
					_ => f.write_str("(?)"),
				}
			}
			ColumnType::Array {
				shape,
				dtype,
			} => match shape {
				Some(shape) => write!(f, "array({:?}, {})", shape, dtype),
				None => write!(f, "array({})", dtype),
			},
			other => Display::fmt(&other.tag(), f),
		}
	}
}
