//! Error types for utilbelt.
//!
//! Nothing in this crate fails on nullish or oddly shaped input: such input
//! degrades to an empty result or [`Value::Undefined`]. The two remaining
//! failure channels are a user callback failing, and a request to build an
//! array whose length cannot exist.

use crate::value::Value;

/// Represents the errors that can surface from utilbelt operations.
///
/// # Examples
///
/// ```rust
/// use utilbelt::{Error, Value};
///
/// let error = Error::thrown("boom");
/// assert_eq!(format!("{error}"), "callback failed: \"boom\"");
///
/// let error = Error::InvalidArrayLength(f64::INFINITY);
/// assert_eq!(format!("{error}"), "invalid array length: Infinity");
/// ```
#[derive(Debug, Clone)]
pub enum Error {
    /// A caller-supplied callback failed with the given payload.
    ///
    /// Traversals propagate it unchanged: no wrapping, no retry.
    Thrown(Value),
    /// An array of the given length cannot be built.
    InvalidArrayLength(f64),
}

impl Error {
    /// Creates an [`Error::Thrown`] from anything convertible into a [`Value`].
    pub fn thrown(payload: impl Into<Value>) -> Self {
        Self::Thrown(payload.into())
    }

    /// Returns the payload of a failed callback, if this is one.
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        match self {
            Self::Thrown(payload) => Some(payload),
            Self::InvalidArrayLength(_) => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Thrown(payload) => write!(formatter, "callback failed: {payload}"),
            Self::InvalidArrayLength(length) => write!(
                formatter,
                "invalid array length: {}",
                crate::value::number_to_string(*length)
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A specialised `Result` for utilbelt operations.
pub type Result<T> = std::result::Result<T, Error>;
