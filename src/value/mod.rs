//! The dynamic value model.
//!
//! The helpers in this crate operate on loosely shaped data: array-likes,
//! key/value mappings, boxed primitives, objects with inherited properties.
//! [`Value`] makes those shapes explicit:
//!
//! - primitives ([`Value::Undefined`], [`Value::Null`], [`Value::Bool`],
//!   [`Value::Number`], [`Value::String`]) are immutable and compared by
//!   content;
//! - [`Value::Object`] is a shared handle to an [`Object`] and is compared by
//!   identity under [`Value::strict_equals`].
//!
//! `PartialEq` on `Value` is deep structural equality, which is what tests
//! and assertions usually want. Use [`Value::strict_equals`] for identity
//! semantics.
//!
//! # Examples
//!
//! ```rust
//! use utilbelt::{array, object, Value};
//!
//! let stooge = object! { "name" => "moe", "age" => 40 };
//! assert_eq!(stooge.get("name"), Value::from("moe"));
//! assert!(stooge.get("missing").is_undefined());
//!
//! let list = array![1, 2, 3];
//! assert_eq!(list.get("length"), Value::from(3));
//! assert!(list.strict_equals(&list.clone()));
//! assert!(!list.strict_equals(&array![1, 2, 3]));
//! assert_eq!(list, array![1, 2, 3]);
//! ```

mod function;
mod key;
mod macros;
mod object;
#[cfg(feature = "serde")]
mod serialization;

use std::fmt;
use std::sync::Arc;

pub use function::{Function, Invocation};
pub use key::{MAX_ARRAY_LENGTH, PropertyKey};
pub use object::{ClassTag, MAX_DENSE_LENGTH, Object, Primitive};

/// A dynamically shaped value.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Undefined,
    /// The explicit empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// An immutable string.
    String(Arc<str>),
    /// A shared object: plain, array, arguments, function or boxed primitive.
    Object(Object),
}

impl Value {
    /// Creates an array value.
    pub fn array(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Object(Object::array(elements.into_iter().collect()))
    }

    /// Creates an empty plain object value.
    #[must_use]
    pub fn object() -> Self {
        Self::Object(Object::new())
    }

    /// Creates an argument-list value.
    pub fn arguments(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Object(Object::arguments(elements.into_iter().collect()))
    }

    /// Wraps a primitive in an object. Nullish values and objects are returned
    /// unchanged.
    #[must_use]
    pub fn boxed(self) -> Self {
        match self {
            Self::Bool(flag) => Self::Object(Object::boxed(Primitive::Bool(flag))),
            Self::Number(number) => Self::Object(Object::boxed(Primitive::Number(number))),
            Self::String(text) => Self::Object(Object::boxed(Primitive::String(text))),
            other => other,
        }
    }

    /// Returns `true` for `Undefined`.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` for `Undefined` and `Null`.
    #[must_use]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Truthiness: `false` for undefined, null, `false`, `0`, `NaN` and the
    /// empty string; `true` otherwise.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::String(text) => !text.is_empty(),
            Self::Object(_) => true,
        }
    }

    /// Returns the number, if this is a number primitive.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean primitive.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string primitive.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the object handle, if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns a function handle, if this is a function object.
    #[must_use]
    pub fn as_function(&self) -> Option<Function> {
        self.as_object()
            .and_then(|object| Function::from_object(object.clone()))
    }

    /// Returns the elements of an array or argument list.
    #[must_use]
    pub fn as_elements(&self) -> Option<Vec<Self>> {
        self.as_object().and_then(Object::elements)
    }

    /// Interprets a number as an array length: integral and in
    /// `[0, MAX_ARRAY_LENGTH]`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn as_array_length(&self) -> Option<usize> {
        let number = self.as_number()?;
        if number.fract() != 0.0 || number < 0.0 || number > MAX_ARRAY_LENGTH as f64 {
            return None;
        }
        Some(number as usize)
    }

    /// Reads property `key` the way `value[key]` does.
    ///
    /// Nullish values and non-string primitives have no properties and yield
    /// `Undefined`. A string primitive exposes `length` and one-character
    /// strings at each index (counted in Unicode scalar values).
    pub fn get(&self, key: impl Into<PropertyKey>) -> Self {
        let key = key.into();
        match self {
            Self::Object(object) => object.get(key),
            Self::String(text) => string_property(text, &key).unwrap_or_default(),
            _ => Self::Undefined,
        }
    }

    /// The text of a string primitive or boxed string.
    pub(crate) fn string_contents(&self) -> Option<Arc<str>> {
        match self {
            Self::String(text) => Some(Arc::clone(text)),
            Self::Object(object) => match object.primitive() {
                Some(Primitive::String(text)) => Some(text),
                _ => None,
            },
            _ => None,
        }
    }

    /// Reads the element at `index` of an array-like value.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Self {
        match self {
            Self::Object(object) => object
                .element(index)
                .unwrap_or_else(|| object.get(index)),
            Self::String(text) => text.chars().nth(index).map(Self::from).unwrap_or_default(),
            _ => Self::Undefined,
        }
    }

    /// Membership the way `key in Object(value)` sees it: own or inherited.
    pub fn has_in(&self, key: impl Into<PropertyKey>) -> bool {
        let key = key.into();
        match self {
            Self::Object(object) => object.has(key),
            Self::String(text) => string_property(text, &key).is_some(),
            _ => false,
        }
    }

    /// Own-property test: inherited properties do not count.
    pub fn has_own(&self, key: impl Into<PropertyKey>) -> bool {
        let key = key.into();
        match self {
            Self::Object(object) => object.has_own(key),
            Self::String(text) => string_property(text, &key).is_some(),
            _ => false,
        }
    }

    /// Strict equality (`===`): primitives by content with IEEE number
    /// comparison (`NaN` is unequal to itself, `0` equals `-0`), objects by
    /// identity.
    #[must_use]
    pub fn strict_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            #[allow(clippy::float_cmp)]
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => left.ptr_eq(right),
            _ => false,
        }
    }

    /// Converts this value into a property key, the way a computed member
    /// access would: numbers become their decimal form, `null` becomes
    /// `"null"`.
    #[must_use]
    pub fn to_property_key(&self) -> PropertyKey {
        match self {
            Self::String(text) => PropertyKey::from(Arc::clone(text)),
            other => PropertyKey::from(other.to_plain_string()),
        }
    }

    fn to_plain_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_owned(),
            Self::Null => "null".to_owned(),
            Self::Bool(flag) => flag.to_string(),
            Self::Number(number) => number_to_string(*number),
            Self::String(text) => text.to_string(),
            Self::Object(object) => match (object.primitive(), object.elements()) {
                (Some(primitive), _) => Self::from(primitive).to_plain_string(),
                (None, Some(elements)) => elements
                    .iter()
                    .map(|element| {
                        if element.is_nullish() {
                            String::new()
                        } else {
                            element.to_plain_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(","),
                (None, None) if object.is_callable() => "function".to_owned(),
                (None, None) => "[object Object]".to_owned(),
            },
        }
    }
}

fn string_property(text: &str, key: &PropertyKey) -> Option<Value> {
    if key.is_length() {
        return Some(Value::from(text.chars().count()));
    }
    key.as_index()
        .and_then(|index| text.chars().nth(index))
        .map(Value::from)
}

/// Formats a number the way it reads as a property key or in output:
/// integral values without a fractional part, `NaN`, `Infinity`, and `0` for
/// both zeros.
#[must_use]
pub fn number_to_string(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_owned()
    } else if number.is_infinite() {
        if number > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if number == 0.0 {
        "0".to_owned()
    } else {
        format!("{number}")
    }
}

impl From<Primitive> for Value {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Bool(flag) => Self::Bool(flag),
            Primitive::Number(number) => Self::Number(number),
            Primitive::String(text) => Self::String(text),
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(number: usize) -> Self {
        Self::Number(number as f64)
    }
}

impl From<char> for Value {
    fn from(character: char) -> Self {
        Self::String(Arc::from(character.to_string()))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<Arc<str>> for Value {
    fn from(text: Arc<str>) -> Self {
        Self::String(text)
    }
}

impl From<&PropertyKey> for Value {
    fn from(key: &PropertyKey) -> Self {
        Self::from(key.as_str())
    }
}

impl From<PropertyKey> for Value {
    fn from(key: PropertyKey) -> Self {
        Self::from(&key)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Vec<Self>> for Value {
    fn from(elements: Vec<Self>) -> Self {
        Self::Object(Object::array(elements))
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterator: I) -> Self {
        Self::array(iterator)
    }
}

impl PartialEq for Value {
    /// Deep structural equality.
    ///
    /// Numbers compare by value except that `NaN` equals `NaN`. Objects are
    /// equal when they are the same object, or when they share a class and
    /// have equal elements and equal own enumerable properties. Functions
    /// are only equal to themselves. Prototypes are not compared. Cyclic
    /// structures are not supported.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => {
                #[allow(clippy::float_cmp)]
                let same = left == right;
                same || (left.is_nan() && right.is_nan())
            }
            (Self::Object(left), Self::Object(right)) => {
                if left.ptr_eq(right) {
                    return true;
                }
                if left.is_callable() || right.is_callable() {
                    return false;
                }
                left.class_tag() == right.class_tag()
                    && left.primitive() == right.primitive()
                    && left.own_entries() == right.own_entries()
            }
            _ => self.strict_equals(other),
        }
    }
}

const DISPLAY_DEPTH: usize = 16;

fn write_value(value: &Value, formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    match value {
        Value::Undefined => formatter.write_str("undefined"),
        Value::Null => formatter.write_str("null"),
        Value::Bool(flag) => write!(formatter, "{flag}"),
        Value::Number(number) => formatter.write_str(&number_to_string(*number)),
        Value::String(text) => write!(formatter, "{text:?}"),
        Value::Object(object) => {
            if depth >= DISPLAY_DEPTH {
                return formatter.write_str("[...]");
            }
            match object.class_tag() {
                ClassTag::Function => formatter.write_str("[Function]"),
                ClassTag::Boolean | ClassTag::Number | ClassTag::String => {
                    let primitive = object.primitive().map(Value::from).unwrap_or_default();
                    formatter.write_str("[")?;
                    write_value(&primitive, formatter, depth + 1)?;
                    formatter.write_str("]")
                }
                ClassTag::Array | ClassTag::Arguments => {
                    formatter.write_str("[")?;
                    for (position, element) in
                        object.elements().unwrap_or_default().iter().enumerate()
                    {
                        if position > 0 {
                            formatter.write_str(", ")?;
                        }
                        write_value(element, formatter, depth + 1)?;
                    }
                    formatter.write_str("]")
                }
                ClassTag::Object => {
                    formatter.write_str("{")?;
                    for (position, (key, element)) in object.own_entries().iter().enumerate() {
                        if position > 0 {
                            formatter.write_str(",")?;
                        }
                        write!(formatter, " {key}: ")?;
                        write_value(element, formatter, depth + 1)?;
                    }
                    formatter.write_str(" }")
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(self, formatter, 0)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(self, formatter, 0)
    }
}

static_assertions::assert_impl_all!(Value: Send, Sync, Clone);
static_assertions::assert_impl_all!(Object: Send, Sync, Clone);
static_assertions::assert_impl_all!(Function: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{array, object};
    use rstest::rstest;

    #[rstest]
    #[case(Value::Undefined, false)]
    #[case(Value::Null, false)]
    #[case(Value::Bool(false), false)]
    #[case(Value::from(0), false)]
    #[case(Value::Number(-0.0), false)]
    #[case(Value::Number(f64::NAN), false)]
    #[case(Value::from(""), false)]
    #[case(Value::from(" "), true)]
    #[case(Value::from(1), true)]
    #[case(Value::object(), true)]
    #[case(Value::from(false).boxed(), true)]
    fn test_truthiness(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    fn test_strict_equals_numbers() {
        assert!(!Value::Number(f64::NAN).strict_equals(&Value::Number(f64::NAN)));
        assert!(Value::Number(0.0).strict_equals(&Value::Number(-0.0)));
        assert!(!Value::from(1).strict_equals(&Value::from("1")));
    }

    #[rstest]
    fn test_strict_equals_objects_by_identity() {
        let first = object! { "a" => 1 };
        let second = object! { "a" => 1 };
        assert!(first.strict_equals(&first.clone()));
        assert!(!first.strict_equals(&second));
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_deep_equality_distinguishes_classes() {
        assert_ne!(array![], Value::object());
        assert_ne!(array![1], Value::arguments(vec![Value::from(1)]));
        assert_eq!(array![array![1], Value::Null], array![array![1], Value::Null]);
    }

    #[rstest]
    #[case(Value::from(1), "1")]
    #[case(Value::Number(1.5), "1.5")]
    #[case(Value::Number(-0.0), "0")]
    #[case(Value::Null, "null")]
    #[case(Value::Undefined, "undefined")]
    #[case(Value::from(true), "true")]
    #[case(Value::from("x"), "x")]
    #[case(array![1, 2], "1,2")]
    fn test_to_property_key(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_property_key().as_str(), expected);
    }

    #[rstest]
    fn test_string_properties() {
        let text = Value::from("a💗b");
        assert_eq!(text.get("length"), Value::from(3));
        assert_eq!(text.get_index(1), Value::from("💗"));
        assert!(text.has_in("2"));
        assert!(!text.has_in("3"));
        assert!(text.get("foo").is_undefined());
    }

    #[rstest]
    fn test_primitives_have_no_properties() {
        assert!(Value::from(5).get("constructor").is_undefined());
        assert!(!Value::from(5).has_in("x"));
        assert!(Value::Null.get("length").is_undefined());
    }

    #[rstest]
    fn test_display() {
        let value = object! { "a" => array![1, "two", Value::Null] };
        assert_eq!(value.to_string(), "{ a: [1, \"two\", null] }");
        assert_eq!(Value::object().to_string(), "{ }");
    }

    #[rstest]
    #[case(Value::from(3), Some(3))]
    #[case(Value::Number(1.5), None)]
    #[case(Value::from(-1), None)]
    #[case(Value::from("3"), None)]
    fn test_as_array_length(#[case] value: Value, #[case] expected: Option<usize>) {
        assert_eq!(value.as_array_length(), expected);
    }
}
