// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Cache key generation: the positional default and the dynamic dispatcher.

use std::fmt;
use std::sync::Arc;

use rebind_backend::{CacheKey, Error, Result};
use tracing::debug;

use crate::components::ComponentRegistry;
use crate::context::InvocationContext;
use crate::registry::DefinitionRegistry;

/// Produces the cache key for an invocation.
///
/// Implementations are registered by name in the
/// [`ComponentRegistry`](crate::ComponentRegistry) and designated by a
/// definition's `key_generator` binding. The key's shape is unconstrained
/// beyond being usable as a lookup key by the target backends.
///
/// Any matching closure works as a generator:
///
/// ```
/// use rebind::{ComponentRegistry, InvocationContext};
/// use rebind_backend::CacheKey;
///
/// let components = ComponentRegistry::new();
/// components.register_key_generator("mathKeys", |context: &InvocationContext| {
///     let joined = context.args().iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
///     Ok(CacheKey::from(format!("MathCache::{}[{joined}]", context.method())))
/// });
/// ```
pub trait KeyGenerator: Send + Sync {
    /// Generates the key for the given invocation.
    ///
    /// # Errors
    ///
    /// Implementation failures propagate to the intercepted call unmodified.
    fn generate(&self, context: &InvocationContext) -> Result<CacheKey>;
}

impl<F> KeyGenerator for F
where
    F: Fn(&InvocationContext) -> Result<CacheKey> + Send + Sync,
{
    fn generate(&self, context: &InvocationContext) -> Result<CacheKey> {
        self(context)
    }
}

/// The default key generator: method name plus comma-joined arguments.
///
/// The key is a positional composite, so it is deterministic for equal
/// arguments and sensitive to argument order: `sum(2, 3)` keys as
/// `sum[2,3]` and `sum(3, 2)` as `sum[3,2]`.
///
/// # Examples
///
/// ```
/// use rebind::{InvocationContext, KeyGenerator, PositionalKeyGenerator};
///
/// struct MathService;
///
/// let context = InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg(3_i32);
/// let key = PositionalKeyGenerator.generate(&context)?;
/// assert_eq!(key.as_str(), "sum[2,3]");
/// # Ok::<(), rebind_backend::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionalKeyGenerator;

impl KeyGenerator for PositionalKeyGenerator {
    fn generate(&self, context: &InvocationContext) -> Result<CacheKey> {
        let mut key = String::with_capacity(context.method().len() + 16);
        key.push_str(context.method());
        key.push('[');
        for (index, arg) in context.args().iter().enumerate() {
            if index > 0 {
                key.push(',');
            }
            key.push_str(&arg.to_string());
        }
        key.push(']');
        Ok(CacheKey::from(key))
    }
}

/// Dispatches key generation to whichever generator the matched definition
/// designates.
///
/// The dispatcher re-resolves the definition for every call through the
/// same [`DefinitionRegistry`] lookup the resolver uses, so key generation
/// has no dependency on the resolver's result. With no matching definition,
/// or a definition that names no generator, it falls back to
/// [`PositionalKeyGenerator`].
pub struct DynamicKeyGenerator {
    definitions: Arc<DefinitionRegistry>,
    components: Arc<ComponentRegistry>,
    default: PositionalKeyGenerator,
}

impl DynamicKeyGenerator {
    /// Creates a dispatcher over the given registries.
    #[must_use]
    pub fn new(definitions: Arc<DefinitionRegistry>, components: Arc<ComponentRegistry>) -> Self {
        Self {
            definitions,
            components,
            default: PositionalKeyGenerator,
        }
    }
}

impl KeyGenerator for DynamicKeyGenerator {
    fn generate(&self, context: &InvocationContext) -> Result<CacheKey> {
        let Some(definition) = self.definitions.find_by_context(context) else {
            debug!(context = %context, "no definition matched, using the positional key");
            return self.default.generate(context);
        };

        let Some(name) = definition.key_generator() else {
            debug!(definition = %definition, "definition names no key generator, using the positional key");
            return self.default.generate(context);
        };

        let generator = self
            .components
            .key_generator(name)
            .ok_or_else(|| Error::from_message(format!("key generator '{name}' is not registered")))?;
        generator.generate(context)
    }
}

impl fmt::Debug for DynamicKeyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicKeyGenerator")
            .field("definitions", &self.definitions.len())
            .finish_non_exhaustive()
    }
}
