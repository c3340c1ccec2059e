// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Backend-facing contracts for the `rebind` cache-binding resolution layer.
//!
//! This crate defines the interfaces the resolution core needs from cache
//! backends, and nothing about their storage internals:
//!
//! - [`Cache`]: a live handle to one named cache (`get`/`put`/`evict`/`clear`)
//! - [`CacheBackend`]: a registered backend instance exposing zero or more
//!   named caches
//! - [`CacheKey`] and [`CacheValue`]: the opaque key and type-erased value
//!   that flow through a handle
//! - [`NoOpCache`]: a handle that always misses and discards writes, used to
//!   disable caching for a single call without special-casing callers
//! - [`CompositeBackend`]: a backend that delegates to an ordered list of
//!   other backends
//!
//! # Implementing a Backend
//!
//! Implement [`Cache`] for your storage handle and [`CacheBackend`] for the
//! instance that manages them:
//!
//! ```
//! use rebind_backend::{Cache, CacheBackend, CacheKey, CacheValue};
//! use std::collections::HashMap;
//! use std::sync::{Arc, RwLock};
//!
//! #[derive(Debug)]
//! struct MapCache {
//!     name: String,
//!     data: RwLock<HashMap<CacheKey, CacheValue>>,
//! }
//!
//! impl Cache for MapCache {
//!     fn name(&self) -> &str {
//!         &self.name
//!     }
//!
//!     fn get(&self, key: &CacheKey) -> Option<CacheValue> {
//!         self.data.read().ok()?.get(key).cloned()
//!     }
//!
//!     fn put(&self, key: &CacheKey, value: CacheValue) {
//!         if let Ok(mut data) = self.data.write() {
//!             data.insert(key.clone(), value);
//!         }
//!     }
//!
//!     fn evict(&self, key: &CacheKey) {
//!         if let Ok(mut data) = self.data.write() {
//!             data.remove(key);
//!         }
//!     }
//!
//!     fn clear(&self) {
//!         if let Ok(mut data) = self.data.write() {
//!             data.clear();
//!         }
//!     }
//! }
//! ```
//!
//! Backends are registered once at bootstrap and probed on every intercepted
//! call, so `cache(name)` should be a cheap lookup.

pub mod backend;
pub mod cache;
mod composite;
pub mod error;
mod key;
mod noop;
#[cfg(any(feature = "test-util", test))]
pub mod testing;
mod value;

#[doc(inline)]
pub use backend::CacheBackend;
#[doc(inline)]
pub use cache::Cache;
#[doc(inline)]
pub use composite::CompositeBackend;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use key::CacheKey;
#[doc(inline)]
pub use noop::NoOpCache;
#[doc(inline)]
pub use value::CacheValue;
