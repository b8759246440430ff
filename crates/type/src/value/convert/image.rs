// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	Result,
	value::{convert::Conversion, image::Image, r#type::ImageMode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStep {
	Resize {
		width: u32,
		height: u32,
	},
	Recolor(ImageMode),
}

/// Image conversion: an optional resize followed by an optional recolor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePipeline {
	pub resize: Option<(u32, u32)>,
	pub recolor: Option<ImageMode>,
}

impl ImagePipeline {
	pub fn steps(&self) -> Vec<ImageStep> {
		let mut steps = Vec::with_capacity(2);
		if let Some((width, height)) = self.resize {
			steps.push(ImageStep::Resize {
				width,
				height,
			});
		}
		if let Some(mode) = self.recolor {
			steps.push(ImageStep::Recolor(mode));
		}
		steps
	}

	pub fn apply(&self, image: &Image) -> Result<Image> {
		let mut result = image.clone();
		for step in self.steps() {
			result = match step {
				ImageStep::Resize {
					width,
					height,
				} => result.resize(width, height)?,
				ImageStep::Recolor(mode) => result.convert(mode),
			};
		}
		Ok(result)
	}
}

type ImageParams = (Option<u32>, Option<u32>, Option<ImageMode>);

pub(crate) fn image_conversion(source: ImageParams, target: ImageParams) -> Option<Conversion> {
	let (width, height, mode) = source;
	let (target_width, target_height, target_mode) = target;

	// only both dimensions can be resized
	if target_width.is_none() != target_height.is_none() {
		return None;
	}

	let width_ok = target_width.is_none() || target_width == width;
	let height_ok = target_height.is_none() || target_height == height;
	let mode_ok = target_mode.is_none() || target_mode == mode;
	if width_ok && height_ok && mode_ok {
		return Some(Conversion::NoOp);
	}

	let resize = match (target_width, target_height) {
		(Some(w), Some(h)) if (Some(w), Some(h)) != (width, height) => Some((w, h)),
		_ => None,
	};
	let recolor = target_mode.filter(|m| Some(*m) != mode);

	Some(Conversion::Image(ImagePipeline {
		resize,
		recolor,
	}))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_only_recolor() {
		let conversion = image_conversion(
			(Some(10), Some(10), Some(ImageMode::L)),
			(Some(10), Some(10), Some(ImageMode::Rgb)),
		);
		assert_eq!(
			conversion,
			Some(Conversion::Image(ImagePipeline {
				resize: None,
				recolor: Some(ImageMode::Rgb),
			}))
		);
	}

	#[test]
	fn test_unknown_source_dimensions_are_resized() {
		let conversion = image_conversion((None, None, Some(ImageMode::L)), (Some(5), Some(5), None));
		assert_eq!(
			conversion,
			Some(Conversion::Image(ImagePipeline {
				resize: Some((5, 5)),
				recolor: None,
			}))
		);
	}

	#[test]
	fn test_steps_order() {
		let pipeline = ImagePipeline {
			resize: Some((2, 3)),
			recolor: Some(ImageMode::L),
		};
		assert_eq!(
			pipeline.steps(),
			vec![
				ImageStep::Resize {
					width: 2,
					height: 3
				},
				ImageStep::Recolor(ImageMode::L)
			]
		);
	}
}
