// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Cache item definitions: the metadata bound to one cacheable operation.

use std::fmt;

use crate::error::ConfigError;
use crate::types::{ArgType, TypeKey};

/// Immutable metadata binding one cacheable method to its caches.
///
/// A definition names the declaring type and method, optionally constrains
/// the argument types, and lists the logical caches the method's results go
/// to. It may pin a specific backend, designate a named key generator, and
/// designate a named condition evaluator; each of those is optional and the
/// resolution layer falls back to search-all-backends, the positional key,
/// and always-cache respectively.
///
/// Definitions are created during bootstrap, registered into a
/// [`DefinitionRegistry`](crate::DefinitionRegistry), and live unchanged for
/// the process lifetime.
///
/// # Examples
///
/// ```
/// use rebind::{ArgType, CacheItemDefinition, MachineType};
///
/// struct MathService;
///
/// let definition = CacheItemDefinition::builder::<MathService>("sum")
///     .argument_types([ArgType::Boxed(MachineType::I32), ArgType::Boxed(MachineType::I32)])
///     .cache_name("mathCache")
///     .key_generator("mathKeys")
///     .build()?;
///
/// assert_eq!(definition.method(), "sum");
/// assert_eq!(definition.cache_names(), ["mathCache"]);
/// # Ok::<(), rebind::ConfigError>(())
/// ```
#[derive(Clone, Debug)]
pub struct CacheItemDefinition {
    target: TypeKey,
    method: String,
    argument_types: Option<Vec<ArgType>>,
    cache_names: Vec<String>,
    backend: Option<String>,
    key_generator: Option<String>,
    condition: Option<String>,
}

impl CacheItemDefinition {
    /// Starts building a definition for a method on type `T`.
    #[must_use]
    pub fn builder<T: ?Sized + 'static>(method: impl Into<String>) -> CacheItemDefinitionBuilder {
        Self::builder_for(TypeKey::of::<T>(), method)
    }

    /// Starts building a definition for a method on the type identified by
    /// `target`.
    #[must_use]
    pub fn builder_for(target: TypeKey, method: impl Into<String>) -> CacheItemDefinitionBuilder {
        CacheItemDefinitionBuilder {
            target,
            method: method.into(),
            argument_types: None,
            cache_names: Vec::new(),
            backend: None,
            key_generator: None,
            condition: None,
        }
    }

    /// The declaring type of the cacheable method.
    #[must_use]
    pub fn target(&self) -> TypeKey {
        self.target
    }

    /// The cacheable method's name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The declared argument types, or `None` when unconstrained.
    #[must_use]
    pub fn argument_types(&self) -> Option<&[ArgType]> {
        self.argument_types.as_deref()
    }

    /// The logical cache names, deduplicated, in declaration order.
    #[must_use]
    pub fn cache_names(&self) -> &[String] {
        &self.cache_names
    }

    /// The pinned backend name, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&str> {
        self.backend.as_deref()
    }

    /// The designated key generator name, if any.
    #[must_use]
    pub fn key_generator(&self) -> Option<&str> {
        self.key_generator.as_deref()
    }

    /// The designated condition evaluator name, if any.
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub(crate) fn definition_key(&self) -> DefinitionKey {
        DefinitionKey {
            target: self.target,
            method: self.method.clone(),
            argument_types: self.argument_types.clone(),
        }
    }
}

impl fmt::Display for CacheItemDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.target, self.method)?;
        match &self.argument_types {
            None => f.write_str("..")?,
            Some(types) => {
                for (index, arg_type) in types.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg_type}")?;
                }
            }
        }
        write!(f, ") -> [{}]", self.cache_names.join(","))?;
        if let Some(backend) = &self.backend {
            write!(f, " backend={backend}")?;
        }
        if let Some(key_generator) = &self.key_generator {
            write!(f, " key_generator={key_generator}")?;
        }
        if let Some(condition) = &self.condition {
            write!(f, " condition={condition}")?;
        }
        Ok(())
    }
}

/// Exact-match and deduplication key for registered definitions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct DefinitionKey {
    target: TypeKey,
    method: String,
    argument_types: Option<Vec<ArgType>>,
}

impl DefinitionKey {
    pub(crate) fn new(target: TypeKey, method: &str, argument_types: Option<Vec<ArgType>>) -> Self {
        Self {
            target,
            method: method.to_string(),
            argument_types,
        }
    }
}

/// Builder for [`CacheItemDefinition`].
///
/// Obtained from [`CacheItemDefinition::builder`]. At least one cache name
/// is required; everything else is optional.
#[derive(Debug)]
pub struct CacheItemDefinitionBuilder {
    target: TypeKey,
    method: String,
    argument_types: Option<Vec<ArgType>>,
    cache_names: Vec<String>,
    backend: Option<String>,
    key_generator: Option<String>,
    condition: Option<String>,
}

impl CacheItemDefinitionBuilder {
    /// Constrains the definition to the given declared argument types.
    ///
    /// Without this, the definition is unconstrained and matches only
    /// zero-argument invocations.
    #[must_use]
    pub fn argument_types(mut self, types: impl IntoIterator<Item = ArgType>) -> Self {
        self.argument_types = Some(types.into_iter().collect());
        self
    }

    /// Adds one logical cache name.
    #[must_use]
    pub fn cache_name(mut self, name: impl Into<String>) -> Self {
        self.cache_names.push(name.into());
        self
    }

    /// Adds several logical cache names.
    #[must_use]
    pub fn cache_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cache_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Pins resolution to the backend registered under `name`.
    #[must_use]
    pub fn backend(mut self, name: impl Into<String>) -> Self {
        self.backend = Some(name.into());
        self
    }

    /// Designates the key generator registered under `name`.
    #[must_use]
    pub fn key_generator(mut self, name: impl Into<String>) -> Self {
        self.key_generator = Some(name.into());
        self
    }

    /// Designates the condition evaluator registered under `name`.
    #[must_use]
    pub fn condition(mut self, name: impl Into<String>) -> Self {
        self.condition = Some(name.into());
        self
    }

    /// Builds the definition.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the method name is blank or no cache
    /// name was supplied.
    pub fn build(self) -> Result<CacheItemDefinition, ConfigError> {
        if self.method.trim().is_empty() {
            return Err(ConfigError::invalid("cache item definition requires a method name"));
        }

        let mut cache_names: Vec<String> = Vec::with_capacity(self.cache_names.len());
        for name in self.cache_names {
            if !cache_names.contains(&name) {
                cache_names.push(name);
            }
        }
        if cache_names.is_empty() {
            return Err(ConfigError::invalid(format!(
                "cache item definition for {}::{} requires at least one cache name",
                self.target, self.method
            )));
        }

        Ok(CacheItemDefinition {
            target: self.target,
            method: self.method,
            argument_types: self.argument_types,
            cache_names,
            backend: self.backend,
            key_generator: self.key_generator,
            condition: self.condition,
        })
    }
}
