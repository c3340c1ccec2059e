// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The trait for registered cache-backend instances.

use std::sync::Arc;

use crate::Cache;

/// A live cache-backend instance.
///
/// A backend manages zero or more named caches (an in-memory store, a
/// distributed store, a composite over both). Backends are registered under
/// a name at bootstrap and probed by the resolution layer on every
/// intercepted call, so [`cache`](CacheBackend::cache) should be a cheap
/// lookup rather than a connection attempt.
pub trait CacheBackend: Send + Sync {
    /// Returns the cache managed under `name`, or `None` if this backend
    /// does not manage a cache by that name.
    fn cache(&self, name: &str) -> Option<Arc<dyn Cache>>;

    /// The names of the caches this backend currently manages.
    ///
    /// Used for diagnostics only; resolution always goes through
    /// [`cache`](CacheBackend::cache).
    fn cache_names(&self) -> Vec<String>;
}
