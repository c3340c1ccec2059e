// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The per-call invocation context captured by the interception layer.

use std::fmt;
use std::sync::Arc;

use crate::types::{ArgType, ArgValue, TypeKey};

/// One intercepted call: receiver type, method name, and live arguments.
///
/// Contexts are ephemeral; the interception layer builds one per call and
/// hands it to the resolver and the key generator. Argument types are not
/// carried explicitly; they are derived from each value's own runtime
/// identity via [`arg_types`](InvocationContext::arg_types).
///
/// A context may additionally carry the cache names declared directly at the
/// call site (the interception layer's own metadata). Those names are used
/// only as a fallback when no cache item definition matches the call.
///
/// # Examples
///
/// ```
/// use rebind::InvocationContext;
///
/// struct MathService;
///
/// let context = InvocationContext::new::<MathService>("sum")
///     .with_arg(2_i32)
///     .with_arg(3_i32);
///
/// assert_eq!(context.method(), "sum");
/// assert_eq!(context.args().len(), 2);
/// ```
pub struct InvocationContext {
    target: TypeKey,
    method: String,
    args: Vec<Arc<dyn ArgValue>>,
    declared_cache_names: Vec<String>,
}

impl InvocationContext {
    /// Creates a context for a call on a receiver of type `T`.
    #[must_use]
    pub fn new<T: ?Sized + 'static>(method: impl Into<String>) -> Self {
        Self::for_target(TypeKey::of::<T>(), method)
    }

    /// Creates a context for a call on a receiver identified by `target`.
    #[must_use]
    pub fn for_target(target: TypeKey, method: impl Into<String>) -> Self {
        Self {
            target,
            method: method.into(),
            args: Vec::new(),
            declared_cache_names: Vec::new(),
        }
    }

    /// Appends a live argument value.
    #[must_use]
    pub fn with_arg(mut self, arg: impl ArgValue + 'static) -> Self {
        self.args.push(Arc::new(arg));
        self
    }

    /// Attaches the cache names declared at the call site itself.
    #[must_use]
    pub fn with_declared_cache_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_cache_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// The receiver's runtime type.
    #[must_use]
    pub fn target(&self) -> TypeKey {
        self.target
    }

    /// The intercepted method's name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The live argument values, in call order.
    #[must_use]
    pub fn args(&self) -> &[Arc<dyn ArgValue>] {
        &self.args
    }

    /// Derives the runtime type of each argument, in call order.
    #[must_use]
    pub fn arg_types(&self) -> Vec<ArgType> {
        self.args.iter().map(|arg| arg.runtime_type()).collect()
    }

    /// Cache names declared at the call site, if the interception layer
    /// exposes any.
    #[must_use]
    pub fn declared_cache_names(&self) -> &[String] {
        &self.declared_cache_names
    }
}

impl fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("target", &self.target)
            .field("method", &self.method)
            .field("args", &self.args.iter().map(ToString::to_string).collect::<Vec<_>>())
            .field("declared_cache_names", &self.declared_cache_names)
            .finish()
    }
}

impl fmt::Display for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.target, self.method)?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg.runtime_type())?;
        }
        f.write_str(")")
    }
}
