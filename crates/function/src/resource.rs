// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, fmt, sync::Arc};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::function::BoundFunction;

/// Deferred lookup of the resource pool a function executes in. Resolution
/// must be a pure lookup; it may run repeatedly and concurrently.
#[derive(Clone)]
pub struct ResourcePool(Arc<dyn Fn() -> Option<String> + Send + Sync>);

impl ResourcePool {
	pub fn new<F>(lookup: F) -> Self
	where
		F: Fn() -> Option<String> + Send + Sync + 'static,
	{
		Self(Arc::new(lookup))
	}

	pub fn named(name: impl Into<String>) -> Self {
		let name = name.into();
		Self::new(move || Some(name.clone()))
	}

	pub fn resolve(&self) -> Option<String> {
		(self.0)()
	}
}

impl fmt::Debug for ResourcePool {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("ResourcePool(..)")
	}
}

/// Per-execution cache of resolved resource pools.
#[derive(Debug, Default)]
pub struct CallContext {
	pools: Mutex<HashMap<Uuid, Option<String>>>,
}

impl CallContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Resolves the function's pool on first use; later calls hit the cache.
	pub fn resource_pool(&self, function: &BoundFunction) -> Option<String> {
		let pool = function.resource_pool.as_ref()?;
		let mut pools = self.pools.lock();
		pools.entry(function.id).or_insert_with(|| pool.resolve()).clone()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	#[test]
	fn test_named_pool() {
		assert_eq!(ResourcePool::named("gpu").resolve(), Some("gpu".to_string()));
	}

	#[test]
	fn test_lookup_is_deferred() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let pool = ResourcePool::new(move || {
			counter.fetch_add(1, Ordering::SeqCst);
			Some("inference".to_string())
		});
		assert_eq!(calls.load(Ordering::SeqCst), 0);
		assert_eq!(pool.resolve().as_deref(), Some("inference"));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}
}
