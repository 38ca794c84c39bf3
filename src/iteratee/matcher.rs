//! Partial-match predicates.
//!
//! The attribute set is always read from the *own enumerable* properties of
//! the spec, while the tested object is checked with a membership test that
//! also sees inherited properties.

use std::sync::Arc;

use crate::shape::keys;
use crate::value::{ClassTag, Function, Object, PropertyKey, Value};

/// Tests whether `object` carries every own enumerable attribute of `attrs`.
///
/// Non-object `attrs` (including nullish) are the empty attribute set and
/// match anything. A nullish `object` matches only the empty set. Otherwise
/// each attribute must be present on `object` (own or inherited) with a
/// strictly equal value.
///
/// # Examples
///
/// ```rust
/// use utilbelt::iteratee::is_match;
/// use utilbelt::{object, Value};
///
/// let moe = object! { "name" => "Moe Howard", "hair" => true };
/// assert!(is_match(&moe, &object! { "hair" => true }));
/// assert!(!is_match(&moe, &object! { "hair" => false }));
/// assert!(is_match(&Value::Null, &object! {}));
/// assert!(is_match(&moe, &Value::from(5)));
/// ```
#[must_use]
pub fn is_match(object: &Value, attrs: &Value) -> bool {
    let attributes: Vec<(PropertyKey, Value)> = keys(attrs)
        .into_iter()
        .map(|key| {
            let value = attrs.get(&key);
            (key, value)
        })
        .collect();
    matches_attributes(object, &attributes)
}

fn matches_attributes(object: &Value, attributes: &[(PropertyKey, Value)]) -> bool {
    if object.is_nullish() {
        return attributes.is_empty();
    }
    attributes.iter().all(|(key, expected)| {
        expected.strict_equals(&object.get(key)) && object.has_in(key)
    })
}

/// A predicate holding a snapshot of a partial-match spec.
///
/// The snapshot is a shallow copy of the spec's own enumerable properties
/// taken at construction, so mutating the spec afterwards has no effect.
#[derive(Debug, Clone)]
pub struct Matcher {
    attributes: Arc<[(PropertyKey, Value)]>,
}

impl Matcher {
    /// Snapshots `attrs`.
    ///
    /// Objects contribute their own enumerable properties and strings their
    /// characters by index; every other value is the empty spec.
    #[must_use]
    pub fn new(attrs: &Value) -> Self {
        let attributes: Vec<(PropertyKey, Value)> = match attrs {
            Value::Object(object) => object.own_entries(),
            Value::String(text) => text
                .chars()
                .enumerate()
                .map(|(index, character)| (PropertyKey::from(index), Value::from(character)))
                .collect(),
            _ => Vec::new(),
        };
        Self {
            attributes: attributes.into(),
        }
    }

    /// Tests `object` against the snapshot.
    #[must_use]
    pub fn matches(&self, object: &Value) -> bool {
        matches_attributes(object, &self.attributes)
    }

    /// The snapshot, as a fresh plain object.
    #[must_use]
    pub fn attributes(&self) -> Value {
        let object = Object::new();
        for (key, value) in self.attributes.iter() {
            object.set(key, value.clone());
        }
        Value::Object(object)
    }

    /// Wraps this matcher in a [`Function`] returning a boolean for its first
    /// argument.
    #[must_use]
    pub fn into_function(self) -> Function {
        Function::unary(move |value| Ok(Value::Bool(self.matches(value))))
    }
}

/// Builds a [`Matcher`] from a snapshot of `attrs`.
///
/// # Examples
///
/// ```rust
/// use utilbelt::iteratee::{is_match, matcher};
/// use utilbelt::object;
///
/// let spec = object! { "b" => 1 };
/// let predicate = matcher(&spec);
/// spec.as_object().unwrap().set("b", 2);
///
/// assert!(predicate.matches(&object! { "b" => 1 }));
/// assert!(!is_match(&object! { "b" => 1 }, &spec));
/// ```
#[must_use]
pub fn matcher(attrs: &Value) -> Matcher {
    Matcher::new(attrs)
}

/// Returns `true` for objects that are read as a match spec: anything but an
/// array.
pub(crate) fn is_match_spec(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.class_tag() != ClassTag::Array)
}
