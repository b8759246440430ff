// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::md::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirMd {
	pub name: String,
}

impl Validate for DirMd {
	fn validate(&self) -> Result<(), String> {
		Ok(())
	}
}
