// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types shared across the resolution layer.

/// An error from a resolution or capability invocation.
///
/// This is an opaque error type that can wrap any failure raised by an
/// externally supplied collaborator (a key generator, a condition evaluator,
/// a backend probe). Use [`std::error::Error::source()`] to reach the
/// underlying cause.
///
/// # Example
///
/// ```
/// use rebind_backend::Error;
///
/// let error = Error::from_message("evaluator rejected the request context");
/// ```
#[ohno::error]
pub struct Error {}

impl Error {
    /// Creates a new error from any type that can be converted to an error.
    ///
    /// External key-generator and condition-evaluator implementations use
    /// this to surface their own failures; the resolution layer propagates
    /// them unmodified.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebind_backend::Error;
    ///
    /// let error = Error::from_message("backing store unavailable");
    /// ```
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;
