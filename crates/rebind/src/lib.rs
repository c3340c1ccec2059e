// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Dynamic cache-binding resolution for intercepted method calls.
//!
//! This crate sits between a method-interception layer and one or more
//! cache backends. Given a live invocation (receiver type, method name,
//! argument values), it decides which named caches on which backends apply,
//! what key to use, and whether caching should be bypassed for this call,
//! all driven by externally registered metadata instead of per-call-site
//! code:
//!
//! - [`CacheItemDefinition`]: the metadata binding one cacheable method to
//!   cache names, an optional pinned backend, and optional named key
//!   generator and condition evaluator
//! - [`DefinitionRegistry`]: signature-indexed storage with exact lookup
//!   plus boxing-tolerant fallback matching
//! - [`BackendRegistry`]: named backend handles, probe-able by cache name
//! - [`CacheResolver`]: turns a matched definition into live cache handles,
//!   honoring condition bypass and backend pinning
//! - [`DynamicKeyGenerator`]: dispatches key generation to the definition's
//!   designated generator, with a positional default
//! - [`CacheBindings`]: the bootstrap aggregate owning the registries, with
//!   an eager validation pass
//!
//! # Example
//!
//! ```
//! use rebind::{
//!     ArgType, CacheBindings, CacheItemDefinition, InvocationContext, KeyGenerator, MachineType,
//! };
//! use rebind_memory::InMemoryBackend;
//! use std::sync::Arc;
//!
//! struct MathService;
//!
//! let bindings = CacheBindings::new();
//!
//! bindings.backends().register(
//!     "memory",
//!     Arc::new(InMemoryBackend::builder().cache("mathCache").build()),
//! );
//! bindings.definitions().register(
//!     CacheItemDefinition::builder::<MathService>("sum")
//!         .argument_types([ArgType::Boxed(MachineType::I32), ArgType::Boxed(MachineType::I32)])
//!         .cache_name("mathCache")
//!         .build()?,
//! );
//! bindings.validate()?;
//!
//! // Per intercepted call:
//! let context = InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg(3_i32);
//! let caches = bindings.resolver().resolve_caches(&context)?;
//! let key = bindings.key_generator().generate(&context)?;
//!
//! assert_eq!(caches.len(), 1);
//! assert_eq!(key.as_str(), "sum[2,3]");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Degraded outcomes
//!
//! Lookup misses are never errors. No matching definition falls back to the
//! call site's own declared cache names; no exposing backend resolves to an
//! empty handle set and the call simply runs uncached; a rejecting
//! condition evaluator yields [`NoOpCache`] handles that always miss and
//! discard writes. Failures raised by externally supplied evaluators and
//! generators, by contrast, propagate to the caller unmodified.

pub mod backends;
mod bindings;
mod components;
mod condition;
pub mod context;
pub mod definition;
mod error;
pub mod keygen;
pub mod registry;
mod resolver;
pub mod types;

#[doc(inline)]
pub use backends::BackendRegistry;
#[doc(inline)]
pub use bindings::CacheBindings;
#[doc(inline)]
pub use components::ComponentRegistry;
#[doc(inline)]
pub use condition::ConditionEvaluator;
#[doc(inline)]
pub use context::InvocationContext;
#[doc(inline)]
pub use definition::{CacheItemDefinition, CacheItemDefinitionBuilder};
#[doc(inline)]
pub use error::ConfigError;
#[doc(inline)]
pub use keygen::{DynamicKeyGenerator, KeyGenerator, PositionalKeyGenerator};
#[doc(inline)]
pub use rebind_backend::{Cache, CacheBackend, CacheKey, CacheValue, CompositeBackend, Error, NoOpCache, Result};
#[doc(inline)]
pub use registry::DefinitionRegistry;
#[doc(inline)]
pub use resolver::CacheResolver;
#[doc(inline)]
pub use types::{ArgType, ArgValue, MachineType, TypeKey};
