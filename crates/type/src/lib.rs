// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use value::{
	Value,
	array::Array,
	convert::{Conversion, ImagePipeline, ImageStep},
	image::Image,
	r#type::{ColumnType, DType, ImageMode, TypeTag},
};
