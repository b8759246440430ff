// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::subsystem::TracingSubsystem;

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
	/// Multi-line, human oriented.
	Pretty,
	#[default]
	Compact,
	/// One JSON object per line.
	Json,
}

#[derive(Debug, Clone)]
pub struct TracingBuilder {
	filter: String,
	format: Format,
	with_target: bool,
	with_thread_names: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			filter: "info".to_string(),
			format: Format::default(),
			with_target: true,
			with_thread_names: false,
		}
	}

	/// Filter directive in `RUST_LOG` syntax, e.g. `info,tessera_catalog=debug`.
	pub fn with_filter(mut self, directive: impl Into<String>) -> Self {
		self.filter = directive.into();
		self
	}

	/// Takes the filter from `RUST_LOG` when it is set.
	pub fn with_env_filter(mut self) -> Self {
		if let Ok(directive) = std::env::var("RUST_LOG") {
			self.filter = directive;
		}
		self
	}

	pub fn with_format(mut self, format: Format) -> Self {
		self.format = format;
		self
	}

	pub fn with_target(mut self, enabled: bool) -> Self {
		self.with_target = enabled;
		self
	}

	pub fn with_thread_names(mut self, enabled: bool) -> Self {
		self.with_thread_names = enabled;
		self
	}

	pub fn build(self) -> TracingSubsystem {
		TracingSubsystem::new(self.filter, self.format, self.with_target, self.with_thread_names)
	}
}
