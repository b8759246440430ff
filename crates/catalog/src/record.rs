// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Serialize, de::DeserializeOwned};
use tessera_type::{Result, return_error};

use crate::{
	Catalog,
	error::CatalogError,
	key::Key,
	md::{Validate, decode, encode},
	store::Record,
};

impl Catalog {
	/// Decoded payload of the record at `key`, if there is one.
	pub(crate) fn read_md<T>(&self, key: &Key) -> Result<Option<(Record, T)>>
	where
		T: DeserializeOwned + Validate,
	{
		let Some(record) = self.store.get(key)? else {
			return Ok(None);
		};
		let md = decode(key, &record.md)?;
		Ok(Some((record, md)))
	}

	/// Like [`Catalog::read_md`], for records other records refer to.
	pub(crate) fn require_md<T>(&self, key: &Key) -> Result<T>
	where
		T: DeserializeOwned + Validate,
	{
		match self.read_md(key)? {
			Some((_, md)) => Ok(md),
			None => return_error!(CatalogError::MissingRecord {
				key: key.clone()
			}),
		}
	}

	pub(crate) fn write_md<T: Serialize>(&self, key: Key, md: &T, record: impl FnOnce(Record) -> Record) -> Result<()> {
		let record = record(Record::new(encode(md)?));
		self.store.put(key, record)
	}
}
