// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for configuring an in-memory backend and its caches.
//!
//! The builder abstracts the underlying moka configuration, providing a
//! stable API surface without exposing moka's types.

use std::time::Duration;

use crate::backend::InMemoryBackend;

/// Per-cache storage settings.
///
/// The defaults create an unbounded cache with no time-based expiration.
///
/// # Examples
///
/// ```
/// use rebind_memory::CacheSettings;
/// use std::time::Duration;
///
/// let settings = CacheSettings::new()
///     .max_capacity(10_000)
///     .time_to_live(Duration::from_secs(300));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CacheSettings {
    pub(crate) max_capacity: Option<u64>,
    pub(crate) time_to_live: Option<Duration>,
}

impl CacheSettings {
    /// Creates the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of entries.
    ///
    /// Once the capacity is reached, entries are evicted to make room using
    /// moka's `TinyLFU` policy. Unset means unbounded.
    #[must_use]
    pub fn max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Sets the time-to-live for all entries.
    ///
    /// Entries expire this long after insertion regardless of access
    /// patterns. Expired entries are removed lazily by moka.
    #[must_use]
    pub fn time_to_live(mut self, duration: Duration) -> Self {
        self.time_to_live = Some(duration);
        self
    }
}

/// Builder for [`InMemoryBackend`].
///
/// Declare each named cache the backend should manage; the set is fixed at
/// build time, matching the bootstrap-once lifecycle of backend
/// registration.
///
/// # Examples
///
/// ```
/// use rebind_memory::{CacheSettings, InMemoryBackend};
///
/// let backend = InMemoryBackend::builder()
///     .cache("mathCache")
///     .cache_with("listCache", CacheSettings::new().max_capacity(10))
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackendBuilder {
    pub(crate) caches: Vec<(String, CacheSettings)>,
}

impl InMemoryBackendBuilder {
    /// Creates a builder with no caches declared.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a cache with default settings.
    #[must_use]
    pub fn cache(self, name: impl Into<String>) -> Self {
        self.cache_with(name, CacheSettings::default())
    }

    /// Declares a cache with explicit settings.
    ///
    /// Declaring the same name twice keeps the first declaration.
    #[must_use]
    pub fn cache_with(mut self, name: impl Into<String>, settings: CacheSettings) -> Self {
        let name = name.into();
        if !self.caches.iter().any(|(existing, _)| *existing == name) {
            self.caches.push((name, settings));
        }
        self
    }

    /// Builds the backend.
    #[must_use]
    pub fn build(self) -> InMemoryBackend {
        InMemoryBackend::from_builder(self)
    }
}
