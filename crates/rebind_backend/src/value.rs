// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased cached value.
///
/// The resolution layer never inspects cached values; it only moves them
/// between the intercepted call and the backends. `CacheValue` erases the
/// concrete type behind a shared pointer so a single handle type can serve
/// every cacheable method, and clones are pointer copies.
///
/// Serialization is the backend's concern: an in-process backend stores the
/// erased value as-is, while a distributed backend is free to require
/// serializable payloads at its own boundary.
///
/// # Examples
///
/// ```
/// use rebind_backend::CacheValue;
///
/// let value = CacheValue::new(5_i32);
/// assert_eq!(value.downcast_ref::<i32>(), Some(&5));
/// assert!(value.downcast_ref::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct CacheValue(Arc<dyn Any + Send + Sync>);

impl CacheValue {
    /// Wraps a value.
    #[must_use]
    pub fn new<V>(value: V) -> Self
    where
        V: Any + Send + Sync,
    {
        Self(Arc::new(value))
    }

    /// Returns a reference to the value if it is a `V`.
    #[must_use]
    pub fn downcast_ref<V>(&self) -> Option<&V>
    where
        V: Any + Send + Sync,
    {
        self.0.downcast_ref::<V>()
    }

    /// Returns a shared pointer to the value if it is a `V`.
    #[must_use]
    pub fn downcast<V>(&self) -> Option<Arc<V>>
    where
        V: Any + Send + Sync,
    {
        Arc::clone(&self.0).downcast::<V>().ok()
    }
}

impl fmt::Debug for CacheValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CacheValue").finish_non_exhaustive()
    }
}
