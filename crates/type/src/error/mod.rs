// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::{Deref, DerefMut},
};

pub mod diagnostic;
mod r#macro;
mod r#type;

pub use diagnostic::{DefaultRenderer, Diagnostic, IntoDiagnostic};
pub use r#type::TypeError;

/// Error categories shared by every tessera crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Malformed function declaration; never retried.
	Definition,
	/// Missing conversion or failed overload resolution.
	Type,
	/// The expected prior version of a table no longer holds.
	VersionConflict,
	/// A symbol path is already bound to an incompatible function.
	RegistryConflict,
	/// A persisted record failed validation on load.
	CorruptMetadata,
	/// Missing or duplicate catalog entities.
	Catalog,
	Internal,
}

impl ErrorKind {
	pub fn from_code(code: &str) -> ErrorKind {
		match code.split_once('_').map(|(prefix, _)| prefix) {
			Some("DEFINITION") => ErrorKind::Definition,
			Some("TYPE") => ErrorKind::Type,
			Some("VERSION") => ErrorKind::VersionConflict,
			Some("REGISTRY") => ErrorKind::RegistryConflict,
			Some("METADATA") => ErrorKind::CorruptMetadata,
			Some("CATALOG") => ErrorKind::Catalog,
			_ => ErrorKind::Internal,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}

	pub fn kind(&self) -> ErrorKind {
		ErrorKind::from_code(&self.0.code)
	}
}

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Error {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&DefaultRenderer::render_string(&self.0))
	}
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		crate::error!(crate::internal!("json serialization failed: {}", err))
	}
}

pub type Result<T> = std::result::Result<T, Error>;
