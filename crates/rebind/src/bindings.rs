// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The bootstrap aggregate owning the three registries.

use std::sync::Arc;

use tracing::{debug, info};

use crate::backends::BackendRegistry;
use crate::components::ComponentRegistry;
use crate::error::{ComponentKind, ConfigError};
use crate::keygen::DynamicKeyGenerator;
use crate::registry::DefinitionRegistry;
use crate::resolver::CacheResolver;

/// Owns the definition, backend, and component registries and wires the
/// resolver and key generator to them.
///
/// There is no ambient global state: whichever component performs
/// interception constructs one `CacheBindings` at startup, registers
/// definitions, backends, and named capabilities into it, validates, and
/// keeps the handles it needs. The registries are shared `Arc`s, so the
/// [`resolver`](CacheBindings::resolver) and
/// [`key_generator`](CacheBindings::key_generator) it hands out stay
/// consistent with later (idempotent) registrations.
///
/// # Examples
///
/// ```
/// use rebind::{
///     ArgType, CacheBindings, CacheItemDefinition, InvocationContext, KeyGenerator, MachineType,
/// };
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
///         .argument_types([ArgType::Boxed(MachineType::I32), ArgType::Boxed(MachineType::I32)])
///         .cache_name("mathCache")
///         .backend("memory")
///         .build()?,
/// );
/// bindings.validate()?;
///
/// let context = InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg(3_i32);
/// let caches = bindings.resolver().resolve_caches(&context)?;
/// let key = bindings.key_generator().generate(&context)?;
///
/// assert_eq!(caches.len(), 1);
/// assert_eq!(key.as_str(), "sum[2,3]");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct CacheBindings {
    definitions: Arc<DefinitionRegistry>,
    backends: Arc<BackendRegistry>,
    components: Arc<ComponentRegistry>,
}

impl CacheBindings {
    /// Creates an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The definition registry.
    #[must_use]
    pub fn definitions(&self) -> &Arc<DefinitionRegistry> {
        &self.definitions
    }

    /// The backend registry.
    #[must_use]
    pub fn backends(&self) -> &Arc<BackendRegistry> {
        &self.backends
    }

    /// The named-capability registry.
    #[must_use]
    pub fn components(&self) -> &Arc<ComponentRegistry> {
        &self.components
    }

    /// Creates a resolver over these bindings.
    #[must_use]
    pub fn resolver(&self) -> CacheResolver {
        CacheResolver::new(
            Arc::clone(&self.definitions),
            Arc::clone(&self.backends),
            Arc::clone(&self.components),
        )
    }

    /// Creates a dispatching key generator over these bindings.
    #[must_use]
    pub fn key_generator(&self) -> DynamicKeyGenerator {
        DynamicKeyGenerator::new(Arc::clone(&self.definitions), Arc::clone(&self.components))
    }

    /// Confirms that every name referenced by a registered definition
    /// resolves to a registered implementation.
    ///
    /// Run this once after bootstrap, before the first intercepted call, so
    /// misconfiguration surfaces at startup rather than mid-traffic.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first definition whose backend,
    /// key generator, or condition evaluator is not registered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for definition in self.definitions.definitions() {
            if let Some(name) = definition.backend() {
                if self.backends.find_by_name(name).is_none() {
                    return Err(ConfigError::unresolved(&definition, ComponentKind::Backend, name));
                }
            }
            if let Some(name) = definition.key_generator() {
                if self.components.key_generator(name).is_none() {
                    return Err(ConfigError::unresolved(&definition, ComponentKind::KeyGenerator, name));
                }
            }
            if let Some(name) = definition.condition() {
                if self.components.condition_evaluator(name).is_none() {
                    return Err(ConfigError::unresolved(
                        &definition,
                        ComponentKind::ConditionEvaluator,
                        name,
                    ));
                }
            }
            debug!(definition = %definition, "validated cache item definition");
        }

        info!(count = self.definitions.len(), "validated cache item definitions");
        Ok(())
    }
}
