// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Deserialize;

/// Catalog-wide settings. Missing fields take their default when loaded from
/// JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
	/// Retention count of tables created without an explicit one.
	pub default_num_retained_versions: u32,
	/// Storage of computed columns that neither request nor refuse it.
	pub computed_columns_stored_by_default: bool,
	/// Recorded next to persisted function bodies.
	pub runtime_version: String,
}

impl Default for CatalogConfig {
	fn default() -> Self {
		Self {
			default_num_retained_versions: 10,
			computed_columns_stored_by_default: true,
			runtime_version: env!("CARGO_PKG_VERSION").to_string(),
		}
	}
}

impl CatalogConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_default_num_retained_versions(mut self, n: u32) -> Self {
		self.default_num_retained_versions = n;
		self
	}

	pub fn with_computed_columns_stored_by_default(mut self, stored: bool) -> Self {
		self.computed_columns_stored_by_default = stored;
		self
	}

	pub fn with_runtime_version(mut self, version: impl Into<String>) -> Self {
		self.runtime_version = version.into();
		self
	}
}
