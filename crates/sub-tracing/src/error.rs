// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::error::{Diagnostic, IntoDiagnostic};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TracingError {
	#[error("invalid log filter `{directive}`: {reason}")]
	InvalidFilter {
		directive: String,
		reason: String,
	},

	#[error("a global tracing subscriber is already installed")]
	AlreadyInstalled,
}

impl IntoDiagnostic for TracingError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			TracingError::InvalidFilter {
				..
			} => Diagnostic::new("TRACING_001", message).with_help("use directives like `info` or `tessera_catalog=debug`"),
			TracingError::AlreadyInstalled => Diagnostic::new("TRACING_002", message)
				.with_note("install the subsystem once per process, or use it scoped with `with_default`"),
		}
	}
}
