//! Small function combinators, in plain and [`Function`] form.
//!
//! The plain forms are ordinary Rust functions. The `*_function` forms wrap
//! the same behavior in a [`Function`] so it can be handed to a traversal as
//! an iteratee.

use crate::value::{Function, Value};

/// Returns its argument.
///
/// # Examples
///
/// ```rust
/// use utilbelt::combinator::identity;
/// use utilbelt::Value;
///
/// assert_eq!(identity(Value::from(1)), Value::from(1));
/// ```
#[inline]
#[must_use]
pub const fn identity<T>(value: T) -> T {
    value
}

/// Returns a closure that always yields a clone of `value`.
///
/// # Examples
///
/// ```rust
/// use utilbelt::combinator::constant;
///
/// let always_five = constant(5);
/// assert_eq!(always_five(), 5);
/// assert_eq!(always_five(), 5);
/// ```
pub fn constant<T: Clone>(value: T) -> impl Fn() -> T {
    move || value.clone()
}

/// Does nothing and returns `Undefined`.
#[inline]
#[must_use]
pub const fn noop() -> Value {
    Value::Undefined
}

/// `key in object`: own or inherited keys both count.
///
/// The leading `value` argument makes this usable directly as a
/// `(value, key, collection)` iteratee.
#[must_use]
pub fn key_in_obj(_value: &Value, key: &Value, object: &Value) -> bool {
    object.has_in(key.to_property_key())
}

/// [`identity`] as a [`Function`].
#[must_use]
pub fn identity_function() -> Function {
    Function::unary(|value| Ok(value.clone()))
}

/// [`constant`] as a [`Function`] ignoring all of its arguments.
///
/// # Examples
///
/// ```rust
/// use utilbelt::combinator::constant_function;
/// use utilbelt::traversal::map;
/// use utilbelt::{array, Value};
///
/// let zeros = map(&array![1, 2, 3], constant_function(0), None).unwrap();
/// assert_eq!(zeros, vec![Value::from(0); 3]);
/// ```
#[must_use]
pub fn constant_function(value: impl Into<Value>) -> Function {
    let value = value.into();
    Function::new(move |_| Ok(value.clone()))
}

/// [`key_in_obj`] as a [`Function`] of `(value, key, object)`.
///
/// # Examples
///
/// ```rust
/// use utilbelt::combinator::key_in_obj_function;
/// use utilbelt::traversal::filter;
/// use utilbelt::{object, Value};
///
/// let record = object! { "a" => 1, "b" => 2 };
/// let present = filter(&record, key_in_obj_function(), None).unwrap();
/// assert_eq!(present, vec![Value::from(1), Value::from(2)]);
/// ```
#[must_use]
pub fn key_in_obj_function() -> Function {
    Function::ternary(|value, key, object| Ok(Value::Bool(key_in_obj(value, key, object))))
}
