// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Pixel mode of an image: 8-bit grayscale or 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMode {
	#[serde(rename = "L")]
	L,
	#[serde(rename = "RGB")]
	Rgb,
}

impl ImageMode {
	pub fn num_channels(self) -> usize {
		match self {
			ImageMode::L => 1,
			ImageMode::Rgb => 3,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			ImageMode::L => "L",
			ImageMode::Rgb => "RGB",
		}
	}
}

impl Display for ImageMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
