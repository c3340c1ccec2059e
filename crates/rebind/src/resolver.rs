// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Resolution of live cache handles for an intercepted call.

use std::fmt;
use std::ptr;
use std::sync::Arc;

use rebind_backend::{Cache, Error, NoOpCache, Result};
use tracing::{debug, warn};

use crate::backends::BackendRegistry;
use crate::components::ComponentRegistry;
use crate::context::InvocationContext;
use crate::definition::CacheItemDefinition;
use crate::registry::DefinitionRegistry;

/// Resolves which cache handles an intercepted call should read and write
/// through.
///
/// For each invocation the resolver matches a
/// [`CacheItemDefinition`](crate::CacheItemDefinition), applies the bound
/// condition evaluator if any, and then locates live handles: from the
/// pinned backend when the definition names one, otherwise fanned out
/// across every backend exposing the declared cache names. A single logical
/// cache name may be backed by several physical backends (a migration
/// period, tiered caching); the fan-out lets the interception layer
/// read-through and write-through all of them.
///
/// Misses degrade instead of failing: no matching definition falls back to
/// the call site's own declared cache names, and an empty result simply
/// skips caching for that call.
///
/// # Examples
///
/// ```
/// use rebind::{CacheBindings, CacheItemDefinition, InvocationContext};
/// use rebind_memory::InMemoryBackend;
/// use std::sync::Arc;
///
/// struct MathService;
///
/// let bindings = CacheBindings::new();
/// bindings.backends().register(
///     "memory",
///     Arc::new(InMemoryBackend::builder().cache("mathCache").build()),
/// );
/// bindings.definitions().register(
///     CacheItemDefinition::builder::<MathService>("sum")
///         .cache_name("mathCache")
///         .build()?,
/// );
///
/// let resolver = bindings.resolver();
/// let caches = resolver.resolve_caches(&InvocationContext::new::<MathService>("sum"))?;
/// assert_eq!(caches.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct CacheResolver {
    definitions: Arc<DefinitionRegistry>,
    backends: Arc<BackendRegistry>,
    components: Arc<ComponentRegistry>,
}

impl CacheResolver {
    /// Creates a resolver over the given registries.
    #[must_use]
    pub fn new(
        definitions: Arc<DefinitionRegistry>,
        backends: Arc<BackendRegistry>,
        components: Arc<ComponentRegistry>,
    ) -> Self {
        Self {
            definitions,
            backends,
            components,
        }
    }

    /// Resolves the ordered set of cache handles for one invocation.
    ///
    /// The result may be empty, which skips caching for the call entirely,
    /// a correctness-preserving outcome. When a bound condition evaluator
    /// rejects the invocation the result is one [`NoOpCache`] per declared
    /// cache name, so reads always miss and writes are discarded.
    ///
    /// # Errors
    ///
    /// Fails when a designated condition evaluator is not registered, or
    /// when the evaluator itself fails; evaluator failures propagate
    /// unmodified.
    pub fn resolve_caches(&self, context: &InvocationContext) -> Result<Vec<Arc<dyn Cache>>> {
        let Some(definition) = self.definitions.find_by_context(context) else {
            warn!(context = %context, "no cache item definition found");
            return Ok(self.collect_from_all_backends(context.declared_cache_names()));
        };

        if let Some(name) = definition.condition() {
            let evaluator = self.components.condition_evaluator(name).ok_or_else(|| {
                Error::from_message(format!("condition evaluator '{name}' is not registered"))
            })?;

            if !evaluator.evaluate(context)? {
                warn!(context = %context, condition = name, "condition rejected caching for this call");
                return Ok(no_op_caches(&definition));
            }
        }

        let mut caches: Vec<Arc<dyn Cache>> = Vec::new();

        if let Some(backend_name) = definition.backend() {
            debug!(backend = backend_name, "resolving caches from the pinned backend");
            if let Some(backend) = self.backends.find_by_name(backend_name) {
                for cache_name in definition.cache_names() {
                    if let Some(cache) = backend.cache(cache_name) {
                        push_unique(&mut caches, cache);
                    }
                }
            }
        }

        if caches.is_empty() {
            caches = self.collect_from_all_backends(definition.cache_names());
        }

        debug!(count = caches.len(), "resolved cache handles");
        Ok(caches)
    }

    /// Unions the handles for each cache name across every backend exposing
    /// it, preserving discovery order.
    fn collect_from_all_backends(&self, cache_names: &[String]) -> Vec<Arc<dyn Cache>> {
        let mut caches: Vec<Arc<dyn Cache>> = Vec::new();
        for cache_name in cache_names {
            for backend in self.backends.find_all_by_cache_name(cache_name) {
                if let Some(cache) = backend.cache(cache_name) {
                    push_unique(&mut caches, cache);
                }
            }
        }
        caches
    }
}

fn no_op_caches(definition: &CacheItemDefinition) -> Vec<Arc<dyn Cache>> {
    definition
        .cache_names()
        .iter()
        .map(|name| Arc::new(NoOpCache::new(name.clone())) as Arc<dyn Cache>)
        .collect()
}

fn push_unique(caches: &mut Vec<Arc<dyn Cache>>, candidate: Arc<dyn Cache>) {
    let already_present = caches
        .iter()
        .any(|cache| ptr::addr_eq(Arc::as_ptr(cache), Arc::as_ptr(&candidate)));
    if !already_present {
        caches.push(candidate);
    }
}

impl fmt::Debug for CacheResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheResolver")
            .field("definitions", &self.definitions.len())
            .field("backends", &self.backends.backend_names())
            .finish_non_exhaustive()
    }
}
