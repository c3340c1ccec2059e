// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The per-invocation caching predicate contract.

use rebind_backend::Result;

use crate::context::InvocationContext;

/// Decides per invocation whether caching should proceed.
///
/// Implementations are supplied externally, registered by name in the
/// [`ComponentRegistry`](crate::ComponentRegistry), and designated by a
/// definition's `condition` binding. Evaluation must be synchronous and
/// side-effect-free with respect to caching correctness; reading external
/// state such as request-scoped attributes is fine.
///
/// Returning `Ok(false)` makes the resolver hand out no-op cache handles
/// for the call. Returning an `Err` propagates to the caller unmodified:
/// the resolution layer does not judge whether an evaluator failure is safe
/// to ignore.
///
/// Any matching closure works as an evaluator:
///
/// ```
/// use rebind::{ComponentRegistry, InvocationContext};
///
/// let components = ComponentRegistry::new();
/// components.register_condition_evaluator("smallArgsOnly", |context: &InvocationContext| {
///     Ok(context.args().len() <= 2)
/// });
/// ```
pub trait ConditionEvaluator: Send + Sync {
    /// Returns whether this invocation should be cached.
    ///
    /// # Errors
    ///
    /// Implementation failures propagate to the intercepted call unmodified.
    fn evaluate(&self, context: &InvocationContext) -> Result<bool>;
}

impl<F> ConditionEvaluator for F
where
    F: Fn(&InvocationContext) -> Result<bool> + Send + Sync,
{
    fn evaluate(&self, context: &InvocationContext) -> Result<bool> {
        self(context)
    }
}
