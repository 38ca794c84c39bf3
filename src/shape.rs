//! Shape predicates and key enumeration.
//!
//! Every function here is total: it accepts any [`Value`] and never fails.

use rustc_hash::FxHashSet;

use crate::iteratee::PropertyPath;
use crate::value::{ClassTag, PropertyKey, Value};

/// The largest length an array-like may report (`2^53 - 1`).
pub const MAX_ARRAY_INDEX: f64 = 9_007_199_254_740_991.0;

/// Reads `length`, or `Undefined` for nullish values.
#[must_use]
pub fn get_length(value: &Value) -> Value {
    if value.is_nullish() {
        Value::Undefined
    } else {
        value.get("length")
    }
}

/// Returns `true` if `value` reports a numeric `length` in
/// `[0, MAX_ARRAY_INDEX]`.
///
/// # Examples
///
/// ```rust
/// use utilbelt::shape::is_array_like;
/// use utilbelt::{array, object, Value};
///
/// assert!(is_array_like(&array![1, 2]));
/// assert!(is_array_like(&Value::from("abc")));
/// assert!(is_array_like(&object! { "length" => 0 }));
/// assert!(!is_array_like(&object! { "length" => -1 }));
/// assert!(!is_array_like(&Value::Null));
/// ```
#[must_use]
pub fn is_array_like(value: &Value) -> bool {
    length_of(value).is_some()
}

/// The `length` of an array-like value.
pub(crate) fn length_of(value: &Value) -> Option<f64> {
    get_length(value)
        .as_number()
        .filter(|length| (0.0..=MAX_ARRAY_INDEX).contains(length))
}

/// Returns `true` for functions and every other object.
#[must_use]
pub const fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

fn has_class(value: &Value, tag: ClassTag) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.class_tag() == tag)
}

/// Returns `true` for function objects.
#[must_use]
pub fn is_function(value: &Value) -> bool {
    has_class(value, ClassTag::Function)
}

/// Returns `true` for string primitives and boxed strings.
#[must_use]
pub fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_)) || has_class(value, ClassTag::String)
}

/// Returns `true` for number primitives (including `NaN` and the infinities)
/// and boxed numbers.
#[must_use]
pub fn is_number(value: &Value) -> bool {
    matches!(value, Value::Number(_)) || has_class(value, ClassTag::Number)
}

/// Returns `true` for argument-list objects.
#[must_use]
pub fn is_arguments(value: &Value) -> bool {
    has_class(value, ClassTag::Arguments)
}

/// Returns `true` for arrays (not for other array-likes).
#[must_use]
pub fn is_array(value: &Value) -> bool {
    has_class(value, ClassTag::Array)
}

/// Returns `true` for `Undefined` only.
#[must_use]
pub const fn is_undefined(value: &Value) -> bool {
    value.is_undefined()
}

/// Own-property test for a key or a path.
///
/// Along a path each step must be an own property of the current value;
/// a nullish value part way along, or an empty path, gives `false`.
///
/// # Examples
///
/// ```rust
/// use utilbelt::shape::has_property;
/// use utilbelt::value::Object;
/// use utilbelt::{object, Value};
///
/// let record = object! { "a" => object! { "b" => 1 } };
/// assert!(has_property(&record, "a"));
/// assert!(has_property(&record, ["a", "b"]));
/// assert!(!has_property(&record, ["a", "c"]));
///
/// let parent = Object::new();
/// parent.set("inherited", true);
/// let child = Value::from(Object::with_prototype(&parent));
/// assert!(!has_property(&child, "inherited"));
/// ```
pub fn has_property(object: &Value, path: impl Into<PropertyPath>) -> bool {
    match path.into() {
        PropertyPath::Key(key) => !object.is_nullish() && object.has_own(&key),
        PropertyPath::Path(keys) => {
            let mut current = object.clone();
            for key in &keys {
                if current.is_nullish() || !current.has_own(key) {
                    return false;
                }
                current = current.get(key);
            }
            !keys.is_empty()
        }
    }
}

/// Own enumerable keys; empty for anything that is not an object.
#[must_use]
pub fn keys(value: &Value) -> Vec<PropertyKey> {
    value
        .as_object()
        .map(crate::value::Object::own_keys)
        .unwrap_or_default()
}

/// Own and inherited enumerable keys: own keys first, then each prototype's
/// keys that were not seen yet.
#[must_use]
pub fn all_keys(value: &Value) -> Vec<PropertyKey> {
    let mut collected: Vec<PropertyKey> = Vec::new();
    let mut seen: FxHashSet<PropertyKey> = FxHashSet::default();
    let mut cursor = value.as_object().cloned();
    while let Some(object) = cursor {
        for key in object.own_keys() {
            if seen.insert(key.clone()) {
                collected.push(key);
            }
        }
        cursor = object.prototype();
    }
    collected
}

/// The values of the own enumerable properties, in key order.
#[must_use]
pub fn values(value: &Value) -> Vec<Value> {
    keys(value).iter().map(|key| value.get(key)).collect()
}

/// `(key, value)` pairs of the own enumerable properties, in key order.
#[must_use]
pub fn to_pairs(value: &Value) -> Vec<(PropertyKey, Value)> {
    keys(value)
        .into_iter()
        .map(|key| {
            let entry = value.get(&key);
            (key, entry)
        })
        .collect()
}
