// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_function::path::is_identifier;
use tessera_type::{Result, return_error};
use tracing::{debug, instrument};

use crate::{
	Catalog,
	dir::DirDef,
	error::CatalogError,
	id::DirId,
	key::Key,
	md::DirMd,
};

#[derive(Debug, Clone)]
pub struct DirToCreate {
	pub parent: Option<DirId>,
	pub name: String,
}

impl Catalog {
	#[instrument(name = "catalog::dir::create", level = "debug", skip(self, to_create))]
	pub fn create_dir(&self, to_create: DirToCreate) -> Result<DirDef> {
		if !is_identifier(&to_create.name) {
			return_error!(CatalogError::InvalidName {
				kind: "directory",
				name: to_create.name,
			});
		}
		if let Some(parent) = to_create.parent {
			self.get_dir(parent)?;
		}

		let result = DirDef {
			id: DirId::generate(),
			parent: to_create.parent,
			md: DirMd {
				name: to_create.name,
			},
		};
		self.write_md(Key::Dir(result.id), &result.md, |record| record.with_dir(result.parent))?;

		debug!("created directory {} ({})", result.md.name, result.id);
		Ok(result)
	}
}
