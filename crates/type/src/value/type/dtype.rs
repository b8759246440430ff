// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Element type of arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
	Bool,
	Int8,
	Int16,
	#[default]
	Int32,
	Int64,
	Uint8,
	Uint16,
	Uint32,
	Uint64,
	Float16,
	Float32,
	Float64,
}

impl DType {
	pub fn size_in_bytes(self) -> usize {
		match self {
			DType::Bool | DType::Int8 | DType::Uint8 => 1,
			DType::Int16 | DType::Uint16 | DType::Float16 => 2,
			DType::Int32 | DType::Uint32 | DType::Float32 => 4,
			DType::Int64 | DType::Uint64 | DType::Float64 => 8,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			DType::Bool => "bool",
			DType::Int8 => "int8",
			DType::Int16 => "int16",
			DType::Int32 => "int32",
			DType::Int64 => "int64",
			DType::Uint8 => "uint8",
			DType::Uint16 => "uint16",
			DType::Uint32 => "uint32",
			DType::Uint64 => "uint64",
			DType::Float16 => "float16",
			DType::Float32 => "float32",
			DType::Float64 => "float64",
		}
	}
}

impl Display for DType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
