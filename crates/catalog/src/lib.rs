// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Versioned metadata of directories, tables, views and stored functions.
//!
//! Every table advances through data versions and schema versions. Records of
//! past versions are append-only, so a reader pinned to a version never
//! observes a partial write. Mutations of one table are serialized; mutations
//! of different tables proceed independently.

use std::{ops::Deref, sync::Arc};

use dashmap::DashMap;
use parking_lot::Mutex;
use tessera_function::FunctionRegistry;

mod column;
pub mod config;
mod dir;
pub mod error;
mod function;
pub mod gc;
pub mod id;
pub mod key;
pub mod md;
mod mutation;
mod record;
mod row;
pub mod store;
mod system;
mod table;
pub mod test_utils;
mod view;

pub use column::ColumnToCreate;
pub use config::CatalogConfig;
pub use dir::{DirDef, DirToCreate};
pub use error::CatalogError;
pub use gc::gc_eligible_columns;
pub use id::{ColumnId, DirId, FunctionId, RowId, SchemaVersion, TableId, Version};
pub use key::Key;
pub use store::{MemoryStore, MetadataStore, Record};
pub use table::{TableDef, TableSnapshot, TableToCreate};
pub use view::{EffectiveColumn, ViewToCreate};

#[derive(Clone)]
pub struct Catalog(Arc<CatalogInner>);

pub struct CatalogInner {
	pub(crate) store: Arc<dyn MetadataStore>,
	pub(crate) config: CatalogConfig,
	pub(crate) registry: &'static FunctionRegistry,
	locks: DashMap<TableId, Arc<Mutex<()>>>,
}

impl Deref for Catalog {
	type Target = CatalogInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Catalog {
	/// Catalog over `store`, resolving function paths through the global
	/// registry. Call [`Catalog::init`] before use.
	pub fn new(store: impl MetadataStore + 'static, config: CatalogConfig) -> Self {
		Self(Arc::new(CatalogInner {
			store: Arc::new(store),
			config,
			registry: FunctionRegistry::global(),
			locks: DashMap::new(),
		}))
	}

	/// Like [`Catalog::new`], resolving function paths through `registry`.
	pub fn with_registry(
		store: impl MetadataStore + 'static,
		config: CatalogConfig,
		registry: &'static FunctionRegistry,
	) -> Self {
		Self(Arc::new(CatalogInner {
			store: Arc::new(store),
			config,
			registry,
			locks: DashMap::new(),
		}))
	}

	pub fn config(&self) -> &CatalogConfig {
		&self.config
	}

	pub fn registry(&self) -> &'static FunctionRegistry {
		self.registry
	}

	/// Writer lock of one table.
	pub(crate) fn table_lock(&self, table: TableId) -> Arc<Mutex<()>> {
		self.locks.entry(table).or_default().clone()
	}
}
