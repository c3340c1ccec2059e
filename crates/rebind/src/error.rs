// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Configuration errors raised at bootstrap time.

use std::fmt;

use crate::definition::CacheItemDefinition;

/// The kind of named collaborator a definition can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ComponentKind {
    Backend,
    KeyGenerator,
    ConditionEvaluator,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Backend => "backend",
            Self::KeyGenerator => "key generator",
            Self::ConditionEvaluator => "condition evaluator",
        })
    }
}

/// A cache-binding misconfiguration detected before first use.
///
/// Raised when a definition cannot be built (an empty cache-name set, a
/// blank method name) or when the validation pass finds a reference to a
/// backend, key generator, or condition evaluator that is not registered.
/// Configuration errors are meant to stop startup; they are never produced
/// on the per-call resolution path.
///
/// # Example
///
/// ```
/// use rebind::{CacheBindings, CacheItemDefinition};
///
/// struct MathService;
///
/// let bindings = CacheBindings::new();
/// bindings.definitions().register(
///     CacheItemDefinition::builder::<MathService>("sum")
///         .cache_name("mathCache")
///         .backend("memory")
///         .build()?,
/// );
///
/// // "memory" was never registered as a backend.
/// let error = bindings.validate().expect_err("unresolved backend");
/// assert!(error.to_string().contains("memory"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[ohno::error]
#[display("{detail}")]
pub struct ConfigError {
    detail: String,
}

impl ConfigError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::new(detail.into())
    }

    pub(crate) fn unresolved(
        definition: &CacheItemDefinition,
        kind: ComponentKind,
        name: &str,
    ) -> Self {
        Self::new(format!("definition {definition} references unknown {kind} '{name}'"))
    }
}
