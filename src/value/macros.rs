//! The `array!` and `object!` construction macros.

/// Builds an array [`Value`](crate::Value) from a list of expressions.
///
/// Each element goes through `Value::from`, so numbers, strings, booleans and
/// nested values can be mixed freely.
///
/// # Syntax
///
/// - `array![]` - An empty array
/// - `array![a, b, c]` - An array of three elements
///
/// # Examples
///
/// ```
/// use utilbelt::{array, Value};
///
/// let nested = array![1, "two", array![3.0, true], Value::Null];
/// assert_eq!(nested.get("length"), Value::from(4));
/// assert_eq!(nested.get_index(1), Value::from("two"));
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::Value::array(::std::vec::Vec::new())
    };

    ($($element:expr),+ $(,)?) => {
        $crate::Value::array(::std::vec![$($crate::Value::from($element)),+])
    };
}

/// Builds a plain object [`Value`](crate::Value) from `key => value` pairs.
///
/// Keys may be anything convertible into a
/// [`PropertyKey`](crate::value::PropertyKey); values go through
/// `Value::from`. Properties are inserted in the order written.
///
/// # Examples
///
/// ```
/// use utilbelt::{array, object, Value};
///
/// let stooge = object! { "name" => "moe", "tags" => array!["a", "b"] };
/// assert_eq!(stooge.get("name"), Value::from("moe"));
///
/// let empty = object! {};
/// assert!(empty.as_object().unwrap().own_keys().is_empty());
/// ```
#[macro_export]
macro_rules! object {
    () => {
        $crate::Value::object()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let object = $crate::value::Object::new();
        $(object.set($key, $crate::Value::from($value));)+
        $crate::Value::Object(object)
    }};
}
