// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The by-name registry for externally supplied capabilities.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::condition::ConditionEvaluator;
use crate::keygen::KeyGenerator;

/// Maps names to externally supplied [`KeyGenerator`] and
/// [`ConditionEvaluator`] implementations.
///
/// Definitions reference these capabilities by name only; the names are
/// opaque lookup tokens. Register every implementation at bootstrap and run
/// [`CacheBindings::validate`](crate::CacheBindings::validate) so dangling
/// references fail startup instead of the first intercepted call.
///
/// # Examples
///
/// ```
/// use rebind::{ComponentRegistry, InvocationContext};
/// use rebind_backend::CacheKey;
///
/// let components = ComponentRegistry::new();
/// components.register_key_generator("mathKeys", |context: &InvocationContext| {
///     Ok(CacheKey::from(context.method().to_string()))
/// });
/// components.register_condition_evaluator("always", |_: &InvocationContext| Ok(true));
///
/// assert!(components.key_generator("mathKeys").is_some());
/// assert!(components.condition_evaluator("never").is_none());
/// ```
#[derive(Default)]
pub struct ComponentRegistry {
    key_generators: RwLock<HashMap<String, Arc<dyn KeyGenerator>>>,
    condition_evaluators: RwLock<HashMap<String, Arc<dyn ConditionEvaluator>>>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key generator under `name`. First registration wins.
    pub fn register_key_generator(&self, name: impl Into<String>, generator: impl KeyGenerator + 'static) {
        let name = name.into();
        let mut generators = self.key_generators.write();
        if generators.contains_key(&name) {
            debug!(key_generator = %name, "key generator already registered, keeping the first");
            return;
        }

        info!(key_generator = %name, "registering key generator");
        generators.insert(name, Arc::new(generator));
    }

    /// Returns the key generator registered under `name`, or `None`.
    #[must_use]
    pub fn key_generator(&self, name: &str) -> Option<Arc<dyn KeyGenerator>> {
        self.key_generators.read().get(name).map(Arc::clone)
    }

    /// Registers a condition evaluator under `name`. First registration wins.
    pub fn register_condition_evaluator(
        &self,
        name: impl Into<String>,
        evaluator: impl ConditionEvaluator + 'static,
    ) {
        let name = name.into();
        let mut evaluators = self.condition_evaluators.write();
        if evaluators.contains_key(&name) {
            debug!(condition_evaluator = %name, "condition evaluator already registered, keeping the first");
            return;
        }

        info!(condition_evaluator = %name, "registering condition evaluator");
        evaluators.insert(name, Arc::new(evaluator));
    }

    /// Returns the condition evaluator registered under `name`, or `None`.
    #[must_use]
    pub fn condition_evaluator(&self, name: &str) -> Option<Arc<dyn ConditionEvaluator>> {
        self.condition_evaluators.read().get(name).map(Arc::clone)
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("key_generators", &self.key_generators.read().len())
            .field("condition_evaluators", &self.condition_evaluators.read().len())
            .finish()
    }
}
