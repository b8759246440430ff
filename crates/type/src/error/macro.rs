// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Turns anything implementing `IntoDiagnostic` into an `Error`.
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::error::Error($crate::error::IntoDiagnostic::into_diagnostic($diagnostic))
	};
}

#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error!($diagnostic))
	};
}

/// Builds an `INTERNAL_001` diagnostic from a format string.
#[macro_export]
macro_rules! internal {
	($($arg:tt)*) => {
		$crate::error::Diagnostic::new("INTERNAL_001", format!($($arg)*))
			.with_help("this is a bug, please report it")
	};
}
