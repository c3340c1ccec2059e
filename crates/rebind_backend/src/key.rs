// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::sync::Arc;

/// An opaque cache lookup key.
///
/// Keys are produced by a key generator (the default positional generator or
/// a named implementation) and handed to cache backends verbatim. The
/// resolution layer places no constraint on their shape beyond being usable
/// as a lookup key, so the representation is a cheaply clonable string.
///
/// # Examples
///
/// ```
/// use rebind_backend::CacheKey;
///
/// let key = CacheKey::from("sum[2,3]");
/// assert_eq!(key.as_str(), "sum[2,3]");
/// assert_eq!(key, CacheKey::from("sum[2,3]".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(Arc<str>);

impl CacheKey {
    /// Creates a key from anything that converts into a shared string.
    #[must_use]
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CacheKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for CacheKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let key = CacheKey::from("listCache::getList[4]");
        let copy = key.clone();
        assert_eq!(key, copy);
        assert_eq!(copy.to_string(), "listCache::getList[4]");
    }

    #[test]
    fn distinct_contents_differ() {
        assert_ne!(CacheKey::from("sum[2,3]"), CacheKey::from("sum[3,2]"));
    }
}
