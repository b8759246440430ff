// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tessera_function::{PersistedFunction, PersistedKind};

use crate::md::Validate;

/// Function persisted by value. The opaque body, if any, lives next to the
/// record rather than in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionMd {
	#[serde(default)]
	pub name: Option<String>,
	pub md: PersistedFunction,
}

impl Validate for FunctionMd {
	fn validate(&self) -> Result<(), String> {
		if self.md.signatures.is_empty() {
			return Err("function has no signatures".to_string());
		}
		if self.md.kind == PersistedKind::Template && self.md.templates.len() != self.md.signatures.len() {
			return Err(format!(
				"function has {} templates for {} signatures",
				self.md.templates.len(),
				self.md.signatures.len()
			));
		}
		Ok(())
	}
}
