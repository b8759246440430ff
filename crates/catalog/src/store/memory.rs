// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::RangeInclusive, sync::Arc};

use crossbeam_skiplist::SkipMap;
use tessera_type::Result;

use crate::{
	key::Key,
	store::{MetadataStore, Record},
};

/// In-memory metadata store.
#[derive(Clone, Default)]
pub struct MemoryStore(Arc<SkipMap<Key, Record>>);

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl MetadataStore for MemoryStore {
	fn get(&self, key: &Key) -> Result<Option<Record>> {
		Ok(self.0.get(key).map(|entry| entry.value().clone()))
	}

	fn put(&self, key: Key, record: Record) -> Result<()> {
		self.0.insert(key, record);
		Ok(())
	}

	fn range(&self, range: RangeInclusive<Key>) -> Result<Vec<(Key, Record)>> {
		Ok(self.0.range(range).map(|entry| (entry.key().clone(), entry.value().clone())).collect())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::id::TableId;

	#[test]
	fn test_put_get() {
		let store = MemoryStore::new();
		assert_eq!(store.get(&Key::SystemInfo).unwrap(), None);

		store.put(Key::SystemInfo, Record::new(json!({"schema_version": 1}))).unwrap();
		store.put(Key::SystemInfo, Record::new(json!({"schema_version": 2}))).unwrap();
		assert_eq!(store.get(&Key::SystemInfo).unwrap().unwrap().md, json!({"schema_version": 2}));
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn test_range_is_ordered_and_bounded() {
		let store = MemoryStore::new();
		let table = TableId::generate();
		for version in [3, 0, 2, 1] {
			store.put(
				Key::TableVersion {
					table,
					version,
				},
				Record::new(json!({"version": version})),
			)
			.unwrap();
		}
		store.put(Key::Table(table), Record::new(json!({}))).unwrap();

		let versions: Vec<_> = store
			.range(Key::table_versions(table))
			.unwrap()
			.into_iter()
			.map(|(_, record)| record.md["version"].as_u64().unwrap())
			.collect();
		assert_eq!(versions, vec![0, 1, 2, 3]);
	}
}
