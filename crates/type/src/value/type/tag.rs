// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
	Invalid = 0,
	String = 1,
	Int = 2,
	Float = 3,
	Bool = 4,
	Timestamp = 5,
	Image = 6,
	Dict = 7,
	Array = 8,
}

impl TypeTag {
	pub fn to_u8(self) -> u8 {
		self as u8
	}

	pub fn from_u8(value: u8) -> Option<TypeTag> {
		match value {
			0 => Some(TypeTag::Invalid),
			1 => Some(TypeTag::String),
			2 => Some(TypeTag::Int),
			3 => Some(TypeTag::Float),
			4 => Some(TypeTag::Bool),
			5 => Some(TypeTag::Timestamp),
			6 => Some(TypeTag::Image),
			7 => Some(TypeTag::Dict),
			8 => Some(TypeTag::Array),
			_ => None,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			TypeTag::Invalid => "invalid",
			TypeTag::String => "string",
			TypeTag::Int => "int",
			TypeTag::Float => "float",
			TypeTag::Bool => "bool",
			TypeTag::Timestamp => "timestamp",
			TypeTag::Image => "image",
			TypeTag::Dict => "dict",
			TypeTag::Array => "array",
		}
	}
}

impl Display for TypeTag {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
