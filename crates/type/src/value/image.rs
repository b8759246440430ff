// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Result, error::TypeError, return_error, value::r#type::ImageMode};

/// Decoded image: row-major 8-bit pixels, `num_channels` bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
	width: u32,
	height: u32,
	mode: ImageMode,
	pixels: Arc<[u8]>,
}

impl Image {
	pub fn new(width: u32, height: u32, mode: ImageMode, pixels: impl Into<Arc<[u8]>>) -> Result<Self> {
		let pixels = pixels.into();
		if pixels.len() != Self::buffer_len(width, height, mode)? {
			return_error!(TypeError::ImageBufferMismatch {
				width,
				height,
				mode,
				len: pixels.len(),
			});
		}
		Ok(Self {
			width,
			height,
			mode,
			pixels,
		})
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn mode(&self) -> ImageMode {
		self.mode
	}

	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	fn buffer_len(width: u32, height: u32, mode: ImageMode) -> Result<usize> {
		match (width as usize).checked_mul(height as usize).and_then(|n| n.checked_mul(mode.num_channels())) {
			Some(len) => Ok(len),
			None => return_error!(TypeError::ImageTooLarge {
				width,
				height,
				mode,
			}),
		}
	}

	/// Nearest-neighbour resize.
	pub fn resize(&self, width: u32, height: u32) -> Result<Image> {
		let channels = self.mode.num_channels();
		let mut pixels = vec![0u8; Self::buffer_len(width, height, self.mode)?];

		if self.width > 0 && self.height > 0 {
			for y in 0..height as u64 {
				let sy = (y * self.height as u64 / height as u64) as usize;
				for x in 0..width as u64 {
					let sx = (x * self.width as u64 / width as u64) as usize;
					let src = (sy * self.width as usize + sx) * channels;
					let dst = (y as usize * width as usize + x as usize) * channels;
					pixels[dst..dst + channels].copy_from_slice(&self.pixels[src..src + channels]);
				}
			}
		}

		Ok(Image {
			width,
			height,
			mode: self.mode,
			pixels: pixels.into(),
		})
	}

	pub fn convert(&self, mode: ImageMode) -> Image {
		if mode == self.mode {
			return self.clone();
		}

		let pixels: Vec<u8> = match (self.mode, mode) {
			(ImageMode::L, ImageMode::Rgb) => self.pixels.iter().flat_map(|&l| [l, l, l]).collect(),
			(ImageMode::Rgb, ImageMode::L) => self
				.pixels
				.chunks_exact(3)
				.map(|rgb| {
					let luma = rgb[0] as u32 * 299 + rgb[1] as u32 * 587 + rgb[2] as u32 * 114;
					(luma / 1000) as u8
				})
				.collect(),
			_ => unreachable!("modes are equal"),
		};

		Image {
			width: self.width,
			height: self.height,
			mode,
			pixels: pixels.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_buffer_must_match_dimensions() {
		let err = Image::new(2, 2, ImageMode::Rgb, vec![0u8; 4]).unwrap_err();
		assert_eq!(err.code, "TYPE_006");
		assert!(Image::new(2, 2, ImageMode::L, vec![0u8; 4]).is_ok());
	}

	#[test]
	fn test_resize_nearest_neighbour() {
		let image = Image::new(2, 1, ImageMode::L, vec![10u8, 20]).unwrap();
		let resized = image.resize(4, 2).unwrap();
		assert_eq!(resized.width(), 4);
		assert_eq!(resized.height(), 2);
		assert_eq!(resized.pixels(), &[10, 10, 20, 20, 10, 10, 20, 20]);
	}

	#[test]
	fn test_resize_empty_source() {
		let image = Image::new(0, 0, ImageMode::Rgb, Vec::<u8>::new()).unwrap();
		let resized = image.resize(2, 2).unwrap();
		assert_eq!(resized.pixels().len(), 12);
	}

	#[test]
	fn test_oversized_dimensions() {
		let image = Image::new(1, 1, ImageMode::Rgb, vec![0u8; 3]).unwrap();
		assert_eq!(image.resize(u32::MAX, u32::MAX).unwrap_err().code, "TYPE_008");

		let err = Image::new(u32::MAX, u32::MAX, ImageMode::Rgb, vec![0u8; 3]).unwrap_err();
		assert_eq!(err.code, "TYPE_008");
	}

	#[test]
	fn test_recolor_round_trip() {
		let image = Image::new(1, 1, ImageMode::Rgb, vec![255u8, 0, 0]).unwrap();
		let gray = image.convert(ImageMode::L);
		assert_eq!(gray.pixels(), &[76]);

		let rgb = gray.convert(ImageMode::Rgb);
		assert_eq!(rgb.pixels(), &[76, 76, 76]);
	}
}
