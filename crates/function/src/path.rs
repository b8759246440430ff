// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Result, return_error};

use crate::error::FunctionError;

pub fn is_identifier(s: &str) -> bool {
	let mut chars = s.chars();
	match chars.next() {
		Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
		_ => false,
	}
}

/// A symbol path is a non-empty, dot-separated list of identifiers.
pub fn validate_symbol_path(path: &str) -> Result<()> {
	if path.split('.').all(is_identifier) {
		return Ok(());
	}
	return_error!(FunctionError::InvalidSymbolPath {
		path: path.to_string()
	})
}
