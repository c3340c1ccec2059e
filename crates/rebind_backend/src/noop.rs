// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{Cache, CacheKey, CacheValue};

/// A cache handle that never stores anything.
///
/// `get` always reports a miss and `put` silently discards the value, so the
/// underlying computation always executes and nothing is persisted or served
/// stale. The resolver hands these out when a bound condition evaluator
/// rejects an invocation, one per declared cache name, which disables
/// caching for that call without the interception layer having to
/// special-case anything.
///
/// # Examples
///
/// ```
/// use rebind_backend::{Cache, CacheKey, CacheValue, NoOpCache};
///
/// let cache = NoOpCache::new("mathCache");
/// let key = CacheKey::from("sum[2,3]");
///
/// cache.put(&key, CacheValue::new(5));
/// assert!(cache.get(&key).is_none());
/// ```
#[derive(Debug)]
pub struct NoOpCache {
    name: String,
}

impl NoOpCache {
    /// Creates a no-op stand-in for the cache named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Cache for NoOpCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, _key: &CacheKey) -> Option<CacheValue> {
        None
    }

    fn put(&self, _key: &CacheKey, _value: CacheValue) {}

    fn evict(&self, _key: &CacheKey) {}

    fn clear(&self) {}
}
