// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Structured payloads of the metadata records.
//!
//! Payloads are JSON. Decoding ignores unknown fields, and optional or
//! collection fields that are missing take their empty value. Required
//! scalars that are missing, and payloads that violate their invariants, make
//! the record corrupt.

use serde::{Serialize, de::DeserializeOwned};
use tessera_type::{Result, error, return_error};

use crate::{error::CatalogError, key::Key};

mod dir;
mod function;
mod schema;
mod system;
mod table;

pub use dir::DirMd;
pub use function::FunctionMd;
pub use schema::{ComputedValue, SchemaColumn, TableSchemaVersionMd};
pub use system::{METADATA_SCHEMA_VERSION, SystemInfoMd};
pub use table::{ColumnHistory, ComponentIterator, TableMd, TableVersionMd, ViewMd};

/// Invariants a decoded record must satisfy; returns the violation.
pub trait Validate {
	fn validate(&self) -> std::result::Result<(), String>;
}

pub(crate) fn decode<T>(key: &Key, md: &serde_json::Value) -> Result<T>
where
	T: DeserializeOwned + Validate,
{
	let result: T = serde_json::from_value(md.clone()).map_err(|err| {
		error!(CatalogError::Undecodable {
			key: key.clone(),
			reason: err.to_string(),
		})
	})?;

	if let Err(reason) = result.validate() {
		return_error!(CatalogError::InvalidRecord {
			key: key.clone(),
			reason,
		});
	}
	Ok(result)
}

pub(crate) fn encode<T: Serialize>(md: &T) -> Result<serde_json::Value> {
	Ok(serde_json::to_value(md)?)
}
