// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-memory cache backend backed by moka.
//!
//! This crate provides [`InMemoryBackend`], a process-local backend managing
//! a fixed set of named caches on top of moka's concurrent sync cache. Each
//! cache gets its own capacity and time-to-live via [`CacheSettings`], and
//! the builder API keeps moka out of the public surface.
//!
//! # Quick Start
//!
//! ```
//! use rebind_backend::{Cache, CacheBackend, CacheKey, CacheValue};
//! use rebind_memory::{CacheSettings, InMemoryBackend};
//! use std::time::Duration;
//!
//! let backend = InMemoryBackend::builder()
//!     .cache("mathCache")
//!     .cache_with(
//!         "listCache",
//!         CacheSettings::new().max_capacity(10).time_to_live(Duration::from_secs(20)),
//!     )
//!     .build();
//!
//! let cache = backend.cache("mathCache").expect("managed cache");
//! cache.put(&CacheKey::from("sum[2,3]"), CacheValue::new(5_i32));
//! assert!(cache.get(&CacheKey::from("sum[2,3]")).is_some());
//! ```

pub mod backend;
pub mod builder;

#[doc(inline)]
pub use backend::InMemoryBackend;
#[doc(inline)]
pub use builder::{CacheSettings, InMemoryBackendBuilder};
