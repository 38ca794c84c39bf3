//! Property accessors.
//!
//! [`property`] turns a key or a path of keys into a [`Property`], a getter
//! that never fails: a nullish receiver (or a nullish value part way along a
//! path) yields `Undefined`, while a found falsy value (`false`, `null`, `0`,
//! `""`) is returned as-is.
//!
//! # Examples
//!
//! ```rust
//! use utilbelt::iteratee::{property, PropertyPath};
//! use utilbelt::{object, Value};
//!
//! let record = object! { "a" => object! { "b" => Value::Null } };
//!
//! assert_eq!(property(PropertyPath::path(["a", "b"])).get(&record), Value::Null);
//! assert!(property(PropertyPath::path(["a", "b", "c"])).get(&record).is_undefined());
//! assert!(property("a").get(&Value::Null).is_undefined());
//! ```

use smallvec::SmallVec;

use crate::value::{PropertyKey, Value};

/// A single key, or an ordered path of keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyPath {
    /// One key read directly from the receiver.
    Key(PropertyKey),
    /// Keys read left to right, each from the previous result.
    Path(SmallVec<[PropertyKey; 4]>),
}

impl PropertyPath {
    /// Creates a single-key path.
    pub fn key(key: impl Into<PropertyKey>) -> Self {
        Self::Key(key.into())
    }

    /// Creates a multi-step path. An empty path reads nothing.
    pub fn path<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PropertyKey>,
    {
        Self::Path(keys.into_iter().map(Into::into).collect())
    }

    /// Interprets a value as a path: arrays become multi-step paths (each
    /// element converted to a key), anything else a single key.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        value.as_elements().map_or_else(
            || Self::Key(value.to_property_key()),
            |elements| Self::Path(elements.iter().map(Value::to_property_key).collect()),
        )
    }

    /// The keys of this path, in order.
    #[must_use]
    pub fn keys(&self) -> &[PropertyKey] {
        match self {
            Self::Key(key) => std::slice::from_ref(key),
            Self::Path(keys) => keys,
        }
    }
}

impl From<&str> for PropertyPath {
    fn from(key: &str) -> Self {
        Self::key(key)
    }
}

impl From<String> for PropertyPath {
    fn from(key: String) -> Self {
        Self::key(key)
    }
}

impl From<usize> for PropertyPath {
    fn from(index: usize) -> Self {
        Self::key(index)
    }
}

impl From<PropertyKey> for PropertyPath {
    fn from(key: PropertyKey) -> Self {
        Self::Key(key)
    }
}

impl From<&Value> for PropertyPath {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

impl<const N: usize> From<[&str; N]> for PropertyPath {
    fn from(keys: [&str; N]) -> Self {
        Self::path(keys)
    }
}

impl From<Vec<PropertyKey>> for PropertyPath {
    fn from(keys: Vec<PropertyKey>) -> Self {
        Self::path(keys)
    }
}

/// A getter built from a [`PropertyPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    path: PropertyPath,
}

impl Property {
    /// Reads the path from `object`.
    #[must_use]
    pub fn get(&self, object: &Value) -> Value {
        match &self.path {
            PropertyPath::Key(key) => read_key(object, key),
            PropertyPath::Path(keys) => deep_get(object, keys),
        }
    }

    /// The path this getter reads.
    #[must_use]
    pub const fn path(&self) -> &PropertyPath {
        &self.path
    }
}

/// Builds a getter for a key or a path.
pub fn property(path: impl Into<PropertyPath>) -> Property {
    Property { path: path.into() }
}

/// Builds a getter for a single key.
pub fn shallow_property(key: impl Into<PropertyKey>) -> Property {
    Property {
        path: PropertyPath::key(key),
    }
}

fn read_key(object: &Value, key: &PropertyKey) -> Value {
    if object.is_nullish() {
        Value::Undefined
    } else {
        object.get(key)
    }
}

/// Walks `path` from `object`, returning `Undefined` as soon as a nullish
/// value is reached before a step, and for an empty path.
#[must_use]
pub fn deep_get(object: &Value, path: &[PropertyKey]) -> Value {
    if path.is_empty() {
        return Value::Undefined;
    }
    let mut current = object.clone();
    for key in path {
        if current.is_nullish() {
            return Value::Undefined;
        }
        current = current.get(key);
    }
    current
}
