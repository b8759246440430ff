// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
	pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			message: message.into(),
			label: None,
			help: None,
			notes: vec![],
			cause: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_help(mut self, help: impl Into<String>) -> Self {
		self.help = Some(help.into());
		self
	}

	pub fn with_note(mut self, note: impl Into<String>) -> Self {
		self.notes.push(note.into());
		self
	}

	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
	fn into_diagnostic(self) -> Diagnostic {
		self
	}
}

pub struct DefaultRenderer;

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		let mut out = String::new();
		Self::render(&mut out, diagnostic, 0);
		out
	}

	fn render(out: &mut String, diagnostic: &Diagnostic, depth: usize) {
		let indent = "  ".repeat(depth);
		out.push_str(&format!("{}[{}] {}\n", indent, diagnostic.code, diagnostic.message));
		if let Some(label) = &diagnostic.label {
			out.push_str(&format!("{}  = {}\n", indent, label));
		}
		if let Some(help) = &diagnostic.help {
			out.push_str(&format!("{}  help: {}\n", indent, help));
		}
		for note in &diagnostic.notes {
			out.push_str(&format!("{}  note: {}\n", indent, note));
		}
		if let Some(cause) = &diagnostic.cause {
			out.push_str(&format!("{}  caused by:\n", indent));
			Self::render(out, cause, depth + 1);
		}
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&DefaultRenderer::render_string(self))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_with_cause() {
		let diagnostic = Diagnostic::new("METADATA_001", "table record is corrupt")
			.with_help("restore the record from a backup")
			.with_cause(Diagnostic::new("TYPE_005", "malformed column type record"));

		let rendered = DefaultRenderer::render_string(&diagnostic);
		assert!(rendered.starts_with("[METADATA_001] table record is corrupt\n"));
		assert!(rendered.contains("help: restore the record from a backup"));
		assert!(rendered.contains("  [TYPE_005] malformed column type record"));
	}
}
