// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The registry of live cache-backend instances.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rebind_backend::CacheBackend;
use tracing::{debug, info};

/// Indexes registered backend handles by name.
///
/// Backends register once when they become available at bootstrap and are
/// never removed. Like the definition registry, writes take a short
/// exclusive section and every read is shared, so per-call probing never
/// blocks other readers.
///
/// # Examples
///
/// ```
/// use rebind::BackendRegistry;
/// use rebind_memory::InMemoryBackend;
/// use std::sync::Arc;
///
/// let registry = BackendRegistry::new();
/// registry.register(
///     "memory",
///     Arc::new(InMemoryBackend::builder().cache("mathCache").build()),
/// );
///
/// assert!(registry.find_by_name("memory").is_some());
/// assert_eq!(registry.find_all_by_cache_name("mathCache").len(), 1);
/// ```
#[derive(Default)]
pub struct BackendRegistry {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    by_name: HashMap<String, Arc<dyn CacheBackend>>,
    ordered: Vec<(String, Arc<dyn CacheBackend>)>,
}

impl BackendRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a backend under `name`.
    ///
    /// Idempotent: the first registration for a name wins and later ones
    /// are silently ignored.
    pub fn register(&self, name: impl Into<String>, backend: Arc<dyn CacheBackend>) {
        let name = name.into();
        let mut inner = self.inner.write();
        if inner.by_name.contains_key(&name) {
            debug!(backend = %name, "cache backend already registered, keeping the first");
            return;
        }

        info!(backend = %name, "registering cache backend");
        inner.ordered.push((name.clone(), Arc::clone(&backend)));
        inner.by_name.insert(name, backend);
    }

    /// Returns the backend registered under `name`, or `None`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Arc<dyn CacheBackend>> {
        self.inner.read().by_name.get(name).map(Arc::clone)
    }

    /// Returns every backend currently exposing a cache named `cache_name`,
    /// in registration order, determined by probing each backend.
    #[must_use]
    pub fn find_all_by_cache_name(&self, cache_name: &str) -> Vec<Arc<dyn CacheBackend>> {
        let inner = self.inner.read();
        let matching: Vec<Arc<dyn CacheBackend>> = inner
            .ordered
            .iter()
            .filter(|(_, backend)| backend.cache(cache_name).is_some())
            .map(|(_, backend)| Arc::clone(backend))
            .collect();

        debug!(cache = cache_name, count = matching.len(), "probed backends for cache name");
        matching
    }

    /// The names of all registered backends, in registration order.
    #[must_use]
    pub fn backend_names(&self) -> Vec<String> {
        self.inner.read().ordered.iter().map(|(name, _)| name.clone()).collect()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.backend_names())
            .finish()
    }
}
