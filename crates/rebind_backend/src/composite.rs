// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use crate::{Cache, CacheBackend};

/// A backend that delegates to an ordered list of other backends.
///
/// `cache(name)` asks each delegate in order and returns the first hit,
/// which lets an operator present several physical backends (say, a local
/// heap store in front of a distributed one) as a single named backend that
/// definitions can pin to.
///
/// # Examples
///
/// ```
/// use rebind_backend::{Cache, CacheBackend, CompositeBackend, NoOpCache};
/// use std::sync::Arc;
///
/// struct Single(&'static str);
///
/// impl CacheBackend for Single {
///     fn cache(&self, name: &str) -> Option<Arc<dyn Cache>> {
///         (name == self.0).then(|| Arc::new(NoOpCache::new(name)) as Arc<dyn Cache>)
///     }
///
///     fn cache_names(&self) -> Vec<String> {
///         vec![self.0.to_string()]
///     }
/// }
///
/// let composite = CompositeBackend::new(vec![
///     Arc::new(Single("mathCache")),
///     Arc::new(Single("listCache")),
/// ]);
///
/// // "listCache" comes from the first delegate that manages it.
/// assert!(composite.cache("listCache").is_some());
/// assert_eq!(composite.cache_names(), vec!["mathCache", "listCache"]);
/// ```
#[derive(Clone)]
pub struct CompositeBackend {
    delegates: Vec<Arc<dyn CacheBackend>>,
}

impl CompositeBackend {
    /// Creates a composite over the given delegates, probed in order.
    #[must_use]
    pub fn new(delegates: Vec<Arc<dyn CacheBackend>>) -> Self {
        Self { delegates }
    }
}

impl CacheBackend for CompositeBackend {
    fn cache(&self, name: &str) -> Option<Arc<dyn Cache>> {
        self.delegates.iter().find_map(|delegate| delegate.cache(name))
    }

    fn cache_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for delegate in &self.delegates {
            for name in delegate.cache_names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl std::fmt::Debug for CompositeBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeBackend")
            .field("delegates", &self.delegates.len())
            .finish()
    }
}
