// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Durable storage of metadata records, provided by the host.

use std::ops::RangeInclusive;

use tessera_type::Result;

use crate::{id::DirId, key::Key};

mod memory;

pub use memory::MemoryStore;

/// One stored metadata row: the structured `md` payload plus the columns that
/// sit next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	/// Owning directory; the parent for directories.
	pub dir: Option<DirId>,
	pub md: serde_json::Value,
	/// Opaque payload, used for persisted function bodies.
	pub body: Option<Vec<u8>>,
	/// Runtime version the body was captured under.
	pub runtime_version: Option<String>,
}

impl Record {
	pub fn new(md: serde_json::Value) -> Self {
		Self {
			dir: None,
			md,
			body: None,
			runtime_version: None,
		}
	}

	pub fn with_dir(mut self, dir: Option<DirId>) -> Self {
		self.dir = dir;
		self
	}
}

/// Key-addressed record storage. Each `put` must be an atomic single-record
/// upsert.
pub trait MetadataStore: Send + Sync {
	fn get(&self, key: &Key) -> Result<Option<Record>>;

	fn put(&self, key: Key, record: Record) -> Result<()>;

	/// All records within `range`, in key order.
	fn range(&self, range: RangeInclusive<Key>) -> Result<Vec<(Key, Record)>>;
}
