// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The definition registry and its signature-matching algorithm.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::context::InvocationContext;
use crate::definition::{CacheItemDefinition, DefinitionKey};
use crate::types::ArgType;

/// Indexes [`CacheItemDefinition`]s and answers "which definition governs
/// this invocation?".
///
/// Registration happens during a bootstrap phase; lookups happen on every
/// intercepted call from arbitrarily many threads. Entries are published as
/// immutable `Arc` values under a read-write lock whose write section is
/// only taken while inserting, so readers never observe a partially built
/// definition and reads stay shared.
///
/// # Matching
///
/// [`find_by_context`](DefinitionRegistry::find_by_context) first tries an
/// exact match on the derived argument types. Failing that it scans the
/// definitions in registration order for one with the same target, method,
/// and arity whose declared types are compatible modulo boxing. The first
/// same-shape candidate decides: if it is incompatible, the lookup reports
/// no match rather than trying alternates, because picking a different
/// overload's definition silently would be worse than not caching.
///
/// # Examples
///
/// ```
/// use rebind::{CacheItemDefinition, DefinitionRegistry, InvocationContext};
///
/// struct MathService;
///
/// let registry = DefinitionRegistry::new();
/// registry.register(
///     CacheItemDefinition::builder::<MathService>("sum")
///         .cache_name("mathCache")
///         .build()?,
/// );
///
/// let context = InvocationContext::new::<MathService>("sum");
/// assert!(registry.find_by_context(&context).is_some());
/// # Ok::<(), rebind::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    by_key: HashMap<DefinitionKey, Arc<CacheItemDefinition>>,
    ordered: Vec<Arc<CacheItemDefinition>>,
}

impl DefinitionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition under its (target, method, argument types) key.
    ///
    /// Registration is idempotent: if a definition already exists for the
    /// exact key, the call is a silent no-op and the first-registered
    /// content stays. Repeated bootstrap passes are therefore harmless.
    pub fn register(&self, definition: CacheItemDefinition) {
        let key = definition.definition_key();
        let mut inner = self.inner.write();
        if inner.by_key.contains_key(&key) {
            debug!(definition = %definition, "definition already registered, keeping the first");
            return;
        }

        info!(definition = %definition, "registering cache item definition");
        let definition = Arc::new(definition);
        inner.ordered.push(Arc::clone(&definition));
        inner.by_key.insert(key, definition);
    }

    /// Finds the definition governing the given invocation, if any.
    ///
    /// Argument types are derived from the live values' runtime identities,
    /// so machine-typed arguments arrive in their boxed form even when the
    /// definition was authored against the bare form; the scan step
    /// reconciles the two. A registry with no matching entry returns `None`,
    /// never an error.
    #[must_use]
    pub fn find_by_context(&self, context: &InvocationContext) -> Option<Arc<CacheItemDefinition>> {
        let derived = context.arg_types();
        let inner = self.inner.read();

        let exact = DefinitionKey::new(context.target(), context.method(), Some(derived.clone()));
        if let Some(definition) = inner.by_key.get(&exact) {
            debug!(definition = %definition, "exact signature match");
            return Some(Arc::clone(definition));
        }

        // A zero-argument call also matches a definition registered without
        // an argument-type list.
        if derived.is_empty() {
            let unconstrained = DefinitionKey::new(context.target(), context.method(), None);
            if let Some(definition) = inner.by_key.get(&unconstrained) {
                debug!(definition = %definition, "unconstrained signature match");
                return Some(Arc::clone(definition));
            }
        }

        debug!(context = %context, "no exact match, scanning for a boxing-compatible signature");
        for definition in &inner.ordered {
            let Some(declared) = definition.argument_types() else {
                continue;
            };
            let same_shape = definition.target() == context.target()
                && definition.method() == context.method()
                && declared.len() == derived.len();
            if !same_shape {
                continue;
            }

            if !compatible_signature(&derived, declared) {
                // The first same-shape candidate decides; trying alternates
                // could silently pick a wrong overload.
                debug!(definition = %definition, "same-shape candidate is incompatible, not caching");
                return None;
            }

            debug!(definition = %definition, "boxing-compatible signature match");
            return Some(Arc::clone(definition));
        }

        None
    }

    /// Returns all registered definitions in registration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<Arc<CacheItemDefinition>> {
        self.inner.read().ordered.clone()
    }

    /// The number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().ordered.len()
    }

    /// Whether the registry holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn compatible_signature(derived: &[ArgType], declared: &[ArgType]) -> bool {
    derived
        .iter()
        .zip(declared)
        .all(|(derived_type, declared_type)| derived_type.compatible_with(declared_type))
}
