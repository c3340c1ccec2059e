// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The moka-backed backend and cache handle implementations.

use std::fmt;
use std::sync::Arc;

use rebind_backend::{Cache, CacheBackend, CacheKey, CacheValue};

use crate::builder::{CacheSettings, InMemoryBackendBuilder};

/// A process-local cache backend managing a fixed set of named caches.
///
/// Each named cache is an independent moka sync cache with its own capacity
/// and time-to-live. The set of caches is fixed at build time; probing an
/// undeclared name returns `None`, which is how the resolution layer
/// discovers that this backend does not serve a given cache.
///
/// # Examples
///
/// ```
/// use rebind_backend::CacheBackend;
/// use rebind_memory::InMemoryBackend;
///
/// let backend = InMemoryBackend::builder().cache("mathCache").build();
///
/// assert!(backend.cache("mathCache").is_some());
/// assert!(backend.cache("listCache").is_none());
/// ```
pub struct InMemoryBackend {
    caches: Vec<Arc<MemoryCache>>,
}

impl InMemoryBackend {
    /// Creates a backend builder.
    #[must_use]
    pub fn builder() -> InMemoryBackendBuilder {
        InMemoryBackendBuilder::new()
    }

    pub(crate) fn from_builder(builder: InMemoryBackendBuilder) -> Self {
        let caches = builder
            .caches
            .into_iter()
            .map(|(name, settings)| Arc::new(MemoryCache::new(name, &settings)))
            .collect();
        Self { caches }
    }
}

impl CacheBackend for InMemoryBackend {
    fn cache(&self, name: &str) -> Option<Arc<dyn Cache>> {
        self.caches
            .iter()
            .find(|cache| cache.name == name)
            .map(|cache| Arc::clone(cache) as Arc<dyn Cache>)
    }

    fn cache_names(&self) -> Vec<String> {
        self.caches.iter().map(|cache| cache.name.clone()).collect()
    }
}

impl fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("caches", &self.cache_names())
            .finish()
    }
}

/// One named moka-backed cache.
#[derive(Debug)]
struct MemoryCache {
    name: String,
    store: moka::sync::Cache<CacheKey, CacheValue>,
}

impl MemoryCache {
    fn new(name: String, settings: &CacheSettings) -> Self {
        let mut builder = moka::sync::Cache::builder();
        if let Some(capacity) = settings.max_capacity {
            builder = builder.max_capacity(capacity);
        }
        if let Some(ttl) = settings.time_to_live {
            builder = builder.time_to_live(ttl);
        }
        Self {
            name,
            store: builder.build(),
        }
    }
}

impl Cache for MemoryCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.store.get(key)
    }

    fn put(&self, key: &CacheKey, value: CacheValue) {
        self.store.insert(key.clone(), value);
    }

    fn evict(&self, key: &CacheKey) {
        self.store.invalidate(key);
    }

    fn clear(&self) {
        self.store.invalidate_all();
    }
}
