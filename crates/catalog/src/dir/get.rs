// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use tessera_type::{Result, return_error};
use tracing::instrument;

use crate::{
	Catalog,
	dir::DirDef,
	error::CatalogError,
	id::DirId,
	key::Key,
	md::{DirMd, decode},
};

impl Catalog {
	#[instrument(name = "catalog::dir::get", level = "trace", skip(self))]
	pub fn get_dir(&self, dir: DirId) -> Result<DirDef> {
		match self.read_md::<DirMd>(&Key::Dir(dir))? {
			Some((record, md)) => Ok(DirDef {
				id: dir,
				parent: record.dir,
				md,
			}),
			None => return_error!(CatalogError::DirNotFound {
				dir
			}),
		}
	}

	#[instrument(name = "catalog::dir::find", level = "trace", skip(self))]
	pub fn find_dir(&self, parent: Option<DirId>, name: &str) -> Result<Option<DirDef>> {
		for (key, record) in self.store.range(Key::dirs())? {
			if record.dir != parent {
				continue;
			}
			let Key::Dir(id) = &key else {
				continue;
			};
			let id = *id;
			let md: DirMd = decode(&key, &record.md)?;
			if md.name == name {
				return Ok(Some(DirDef {
					id,
					parent,
					md,
				}));
			}
		}
		Ok(None)
	}

	/// Names from the top-level directory down to `dir`.
	#[instrument(name = "catalog::dir::path", level = "trace", skip(self))]
	pub fn dir_path(&self, dir: DirId) -> Result<Vec<String>> {
		let mut result = vec![];
		let mut visited = HashSet::new();
		let mut current = Some(dir);

		while let Some(id) = current {
			if !visited.insert(id) {
				return_error!(CatalogError::InvalidRecord {
					key: Key::Dir(dir),
					reason: format!("directory {} is its own ancestor", id),
				});
			}
			let def = self.get_dir(id)?;
			result.push(def.md.name);
			current = def.parent;
		}

		result.reverse();
		Ok(result)
	}
}
