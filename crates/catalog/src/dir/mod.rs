// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{id::DirId, md::DirMd};

mod create;
mod get;

pub use create::DirToCreate;

/// A directory of the catalog tree; `parent` is `None` for top-level
/// directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirDef {
	pub id: DirId,
	pub parent: Option<DirId>,
	pub md: DirMd,
}

impl DirDef {
	pub fn name(&self) -> &str {
		&self.md.name
	}
}
