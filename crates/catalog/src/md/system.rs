// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::md::Validate;

/// Version of the metadata layout written by this release.
pub const METADATA_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfoMd {
	pub schema_version: u32,
}

impl Validate for SystemInfoMd {
	fn validate(&self) -> Result<(), String> {
		if self.schema_version == 0 {
			return Err("schema version 0 does not exist".to_string());
		}
		Ok(())
	}
}
