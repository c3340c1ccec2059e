// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock backend implementation for testing.
//!
//! This module provides [`MockBackend`], an in-memory backend whose caches
//! record every operation, so tests can assert not just on cache contents
//! but on whether a resolved handle touched a real backend at all.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Cache, CacheBackend, CacheKey, CacheValue};

/// Recorded cache operation with the cache it was performed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOp {
    /// A lookup was performed on the named cache.
    Get {
        /// The cache that was probed.
        cache: String,
        /// The key that was looked up.
        key: CacheKey,
    },
    /// A value was stored in the named cache.
    Put {
        /// The cache that was written.
        cache: String,
        /// The key that was written.
        key: CacheKey,
    },
    /// An entry was evicted from the named cache.
    Evict {
        /// The cache that was written.
        cache: String,
        /// The key that was evicted.
        key: CacheKey,
    },
    /// The named cache was cleared.
    Clear {
        /// The cache that was cleared.
        cache: String,
    },
}

/// One recording cache inside a [`MockBackend`].
///
/// Stores values in a map and appends every operation to the backend-wide
/// operation log.
#[derive(Clone)]
pub struct MockCache {
    name: String,
    data: Arc<Mutex<HashMap<CacheKey, CacheValue>>>,
    operations: Arc<Mutex<Vec<CacheOp>>>,
}

impl MockCache {
    fn new(name: String, operations: Arc<Mutex<Vec<CacheOp>>>) -> Self {
        Self {
            name,
            data: Arc::new(Mutex::new(HashMap::new())),
            operations,
        }
    }

    /// Returns the number of entries currently stored.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns `true` if an entry is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &CacheKey) -> bool {
        self.data.lock().contains_key(key)
    }

    fn record(&self, op: CacheOp) {
        self.operations.lock().push(op);
    }
}

impl Cache for MockCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.record(CacheOp::Get {
            cache: self.name.clone(),
            key: key.clone(),
        });
        self.data.lock().get(key).cloned()
    }

    fn put(&self, key: &CacheKey, value: CacheValue) {
        self.record(CacheOp::Put {
            cache: self.name.clone(),
            key: key.clone(),
        });
        self.data.lock().insert(key.clone(), value);
    }

    fn evict(&self, key: &CacheKey) {
        self.record(CacheOp::Evict {
            cache: self.name.clone(),
            key: key.clone(),
        });
        self.data.lock().remove(key);
    }

    fn clear(&self) {
        self.record(CacheOp::Clear {
            cache: self.name.clone(),
        });
        self.data.lock().clear();
    }
}

impl std::fmt::Debug for MockCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCache")
            .field("name", &self.name)
            .field("entries", &self.data.lock().len())
            .finish()
    }
}

/// A backend managing a fixed set of recording caches.
///
/// # Examples
///
/// ```
/// use rebind_backend::testing::{CacheOp, MockBackend};
/// use rebind_backend::{Cache, CacheBackend, CacheKey, CacheValue};
///
/// let backend = MockBackend::with_caches(["mathCache"]);
/// let cache = backend.cache("mathCache").expect("managed cache");
///
/// cache.put(&CacheKey::from("sum[2,3]"), CacheValue::new(5));
/// assert_eq!(
///     backend.operations(),
///     vec![CacheOp::Put {
///         cache: "mathCache".to_string(),
///         key: CacheKey::from("sum[2,3]"),
///     }],
/// );
/// ```
#[derive(Clone)]
pub struct MockBackend {
    caches: Vec<Arc<MockCache>>,
    operations: Arc<Mutex<Vec<CacheOp>>>,
}

impl MockBackend {
    /// Creates a backend managing one recording cache per given name.
    #[must_use]
    pub fn with_caches<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let operations = Arc::new(Mutex::new(Vec::new()));
        let caches = names
            .into_iter()
            .map(|name| Arc::new(MockCache::new(name.into(), Arc::clone(&operations))))
            .collect();
        Self { caches, operations }
    }

    /// Returns the recording cache registered under `name`.
    #[must_use]
    pub fn mock_cache(&self, name: &str) -> Option<Arc<MockCache>> {
        self.caches.iter().find(|cache| cache.name == name).map(Arc::clone)
    }

    /// Returns a clone of all operations recorded across this backend's caches.
    #[must_use]
    pub fn operations(&self) -> Vec<CacheOp> {
        self.operations.lock().clone()
    }

    /// Clears the recorded operation log.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }
}

impl CacheBackend for MockBackend {
    fn cache(&self, name: &str) -> Option<Arc<dyn Cache>> {
        self.mock_cache(name).map(|cache| cache as Arc<dyn Cache>)
    }

    fn cache_names(&self) -> Vec<String> {
        self.caches.iter().map(|cache| cache.name.clone()).collect()
    }
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("caches", &self.cache_names())
            .finish()
    }
}
