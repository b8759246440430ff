// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Result, error::TypeError, return_error, value::r#type::DType};

/// Dense n-dimensional array in little-endian element layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Array {
	shape: Vec<usize>,
	dtype: DType,
	data: Arc<[u8]>,
}

impl Array {
	pub fn new(shape: Vec<usize>, dtype: DType, data: impl Into<Arc<[u8]>>) -> Result<Self> {
		let data = data.into();
		let expected = shape
			.iter()
			.try_fold(dtype.size_in_bytes(), |acc, dim| acc.checked_mul(*dim));
		let Some(expected) = expected else {
			return_error!(TypeError::ArrayTooLarge {
				shape
			});
		};
		if data.len() != expected {
			return_error!(TypeError::ArrayBufferMismatch {
				shape,
				len: data.len(),
			});
		}
		Ok(Self {
			shape,
			dtype,
			data,
		})
	}

	pub fn shape(&self) -> &[usize] {
		&self.shape
	}

	pub fn dtype(&self) -> DType {
		self.dtype
	}

	pub fn data(&self) -> &[u8] {
		&self.data
	}
}
