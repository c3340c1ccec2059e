// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The handle trait for one named cache.

use std::fmt::Debug;

use crate::{CacheKey, CacheValue};

/// A live handle to one named cache inside a backend.
///
/// The resolution layer returns a set of these for every intercepted call;
/// the interception layer then reads through and writes through all of them.
/// Operations are synchronous and infallible at this boundary: a backend
/// that can fail internally decides for itself whether to surface that as a
/// miss or to panic its own maintenance path, because the intercepted call
/// must proceed either way.
pub trait Cache: Send + Sync + Debug {
    /// The logical cache name this handle serves.
    fn name(&self) -> &str;

    /// Looks up a value, returning `None` on a miss.
    fn get(&self, key: &CacheKey) -> Option<CacheValue>;

    /// Stores a value under the given key.
    fn put(&self, key: &CacheKey, value: CacheValue);

    /// Removes the entry for the given key, if present.
    fn evict(&self, key: &CacheKey);

    /// Removes all entries.
    fn clear(&self);
}
