// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Result, return_error};
use tracing::{debug, instrument};

use crate::{
	Catalog,
	error::CatalogError,
	key::Key,
	md::{METADATA_SCHEMA_VERSION, SystemInfoMd},
};

impl Catalog {
	/// Writes the system record of a fresh store, or checks that an existing
	/// store was written by a compatible release.
	#[instrument(name = "catalog::system::init", level = "debug", skip(self))]
	pub fn init(&self) -> Result<SystemInfoMd> {
		if let Some((_, info)) = self.read_md::<SystemInfoMd>(&Key::SystemInfo)? {
			if info.schema_version > METADATA_SCHEMA_VERSION {
				return_error!(CatalogError::UnsupportedSchemaVersion {
					stored: info.schema_version,
					supported: METADATA_SCHEMA_VERSION,
				});
			}
			return Ok(info);
		}

		let info = SystemInfoMd {
			schema_version: METADATA_SCHEMA_VERSION,
		};
		self.write_md(Key::SystemInfo, &info, |record| record)?;
		debug!("initialized metadata schema version {}", info.schema_version);
		Ok(info)
	}
}
