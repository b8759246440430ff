// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod array;
pub mod convert;
pub mod image;
pub mod r#type;

use array::Array;
use image::Image;
use r#type::ColumnType;

/// A single runtime value of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
	None,
	String(String),
	Int(i64),
	Float(f64),
	Bool(bool),
	Timestamp(NaiveDateTime),
	Image(Image),
	Dict(serde_json::Value),
	Array(Array),
}

impl Value {
	pub fn is_none(&self) -> bool {
		matches!(self, Value::None)
	}

	/// Most specific column type describing this value; `Invalid` for `None`.
	pub fn column_type(&self) -> ColumnType {
		match self {
			Value::None => ColumnType::Invalid,
			Value::String(_) => ColumnType::String,
			Value::Int(_) => ColumnType::Int,
			Value::Float(_) => ColumnType::Float,
			Value::Bool(_) => ColumnType::Bool,
			Value::Timestamp(_) => ColumnType::Timestamp,
			Value::Image(image) => ColumnType::sized_image(image.width(), image.height(), image.mode()),
			Value::Dict(_) => ColumnType::Dict,
			Value::Array(array) => ColumnType::array(Some(array.shape().to_vec()), array.dtype()),
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}
