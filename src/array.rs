//! Array utilities that do not go through an iteratee.
//!
//! All of these return freshly allocated sequences and never modify their
//! input.

use crate::error::{Error, Result};
use crate::shape::{length_of, values};
use crate::value::{MAX_ARRAY_LENGTH, Value};

/// The elements of an array-like, by index. `None` for anything else.
fn array_like_elements(value: &Value) -> Option<Vec<Value>> {
    if let Some(elements) = value.as_elements() {
        return Some(elements);
    }
    if let Some(text) = value.string_contents() {
        return Some(text.chars().map(Value::from).collect());
    }
    let length = length_of(value)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = length.ceil() as usize;
    Some((0..count).map(|index| value.get_index(index)).collect())
}

/// Flattens nested arrays and argument lists into one sequence.
///
/// With `shallow` only one level is removed. Other elements (including other
/// array-likes such as strings) pass through unchanged. Nullish and
/// non-array-like input give an empty sequence.
///
/// The walk uses an explicit stack, so nesting depth is bounded by memory
/// rather than by the call stack.
///
/// # Examples
///
/// ```rust
/// use utilbelt::array::flatten;
/// use utilbelt::{array, Value};
///
/// let nested = array![1, array![2, array![3, array![4]]]];
/// assert_eq!(
///     flatten(&nested, false),
///     vec![Value::from(1), Value::from(2), Value::from(3), Value::from(4)]
/// );
/// assert_eq!(
///     flatten(&nested, true),
///     vec![Value::from(1), Value::from(2), array![3, array![4]]]
/// );
/// ```
#[must_use]
pub fn flatten(input: &Value, shallow: bool) -> Vec<Value> {
    let Some(top) = array_like_elements(input) else {
        return Vec::new();
    };
    let mut output = Vec::with_capacity(top.len());

    if shallow {
        for element in top {
            match element.as_elements() {
                Some(inner) => output.extend(inner),
                None => output.push(element),
            }
        }
        return output;
    }

    let mut stack = vec![top.into_iter()];
    while let Some(frame) = stack.last_mut() {
        let Some(element) = frame.next() else {
            stack.pop();
            continue;
        };
        match element.as_elements() {
            Some(inner) => stack.push(inner.into_iter()),
            None => output.push(element),
        }
    }
    output
}

/// Generates an arithmetic progression.
///
/// With `stop` absent, `start` is the stop and the sequence starts at `0`.
/// An absent, zero or `NaN` `step` becomes `1`, or `-1` when `stop` is below
/// `start`. The length is `max(ceil((stop - start) / step), 0)`. The first
/// element is `start` itself, so a `-0.0` start stays negative zero.
///
/// # Errors
///
/// Returns [`Error::InvalidArrayLength`] when the length is `NaN`, infinite,
/// larger than [`MAX_ARRAY_LENGTH`], or cannot be allocated.
///
/// # Examples
///
/// ```rust
/// use utilbelt::array::range;
///
/// assert_eq!(range(4.0, None, None).unwrap(), vec![0.0, 1.0, 2.0, 3.0]);
/// assert_eq!(range(0.0, Some(30.0), Some(5.0)).unwrap(), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0]);
/// assert_eq!(range(3.0, Some(10.0), Some(15.0)).unwrap(), vec![3.0]);
/// assert_eq!(range(0.0, Some(-10.0), Some(-1.0)).unwrap().len(), 10);
/// assert!(range(0.0, Some(f64::INFINITY), None).is_err());
/// ```
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn range(start: f64, stop: Option<f64>, step: Option<f64>) -> Result<Vec<f64>> {
    let (mut current, stop) = match stop {
        Some(stop) => (start, stop),
        None => (0.0, if start.is_nan() { 0.0 } else { start }),
    };
    let step = match step {
        Some(step) if step != 0.0 && !step.is_nan() => step,
        _ if stop < current => -1.0,
        _ => 1.0,
    };

    let raw_length = ((stop - current) / step).ceil();
    let length = if raw_length.is_nan() { raw_length } else { raw_length.max(0.0) };
    if !length.is_finite() || length > MAX_ARRAY_LENGTH as f64 {
        return Err(Error::InvalidArrayLength(length));
    }

    let length = length as usize;
    let mut sequence = allocate_sequence(length)?;
    for _ in 0..length {
        sequence.push(current);
        current += step;
    }
    Ok(sequence)
}

fn allocate_sequence(length: usize) -> Result<Vec<f64>> {
    let mut sequence = Vec::new();
    #[allow(clippy::cast_precision_loss)]
    let requested = length as f64;
    sequence
        .try_reserve_exact(length)
        .map_err(|_| Error::InvalidArrayLength(requested))?;
    Ok(sequence)
}

/// The one-argument form of [`range`]: `0..stop` in steps of one.
///
/// # Errors
///
/// See [`range`].
pub fn range_to(stop: f64) -> Result<Vec<f64>> {
    range(stop, None, None)
}

fn length_or_zero(array: &Value) -> f64 {
    length_of(array).unwrap_or(0.0)
}

/// All but the last `n` elements (default one).
///
/// `guard` forces the default, for use as a traversal callback where the
/// second argument is an index rather than a count. Nullish and
/// non-array-like input give an empty sequence.
///
/// # Examples
///
/// ```rust
/// use utilbelt::array::initial;
/// use utilbelt::{array, Value};
///
/// let list = array![1, 2, 3, 4, 5];
/// assert_eq!(initial(&list, None, false).len(), 4);
/// assert_eq!(initial(&list, Some(2.0), false), vec![Value::from(1), Value::from(2), Value::from(3)]);
/// assert_eq!(initial(&list, Some(2.0), true).len(), 4);
/// assert!(initial(&list, Some(6.0), false).is_empty());
/// ```
#[must_use]
pub fn initial(array: &Value, n: Option<f64>, guard: bool) -> Vec<Value> {
    let length = length_or_zero(array);
    let dropped = match n {
        Some(n) if !guard => n,
        _ => 1.0,
    };
    let end = (length - dropped).max(0.0).min(length);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let end = end.trunc() as usize;
    let mut elements = array_like_elements(array).unwrap_or_default();
    elements.truncate(end);
    elements
}

/// The first element, or the first `n` elements.
///
/// With `n` absent (or `guard` set) the first element is returned as-is,
/// `Undefined` for an empty or nullish array. With `n` present the result is
/// a new array: empty for `n <= 0` or an empty input, the whole input when
/// `n` exceeds its length.
///
/// # Examples
///
/// ```rust
/// use utilbelt::array::first;
/// use utilbelt::{array, Value};
///
/// let list = array![1, 2, 3];
/// assert_eq!(first(&list, None, false), Value::from(1));
/// assert_eq!(first(&list, Some(2.0), false), array![1, 2]);
/// assert_eq!(first(&list, Some(0.0), false), array![]);
/// assert!(first(&Value::Null, None, false).is_undefined());
/// assert_eq!(first(&Value::Null, Some(5.0), false), array![]);
/// ```
#[must_use]
pub fn first(array: &Value, n: Option<f64>, guard: bool) -> Value {
    let length = length_or_zero(array);
    if array.is_nullish() || length < 1.0 {
        return if n.is_some() {
            Value::array(Vec::new())
        } else {
            Value::Undefined
        };
    }
    match n {
        Some(n) if !guard => Value::array(initial(array, Some(length - n), false)),
        _ => array.get_index(0),
    }
}

/// Copies anything iterable into a new sequence.
///
/// - falsy values → empty;
/// - arrays → a shallow copy;
/// - strings (primitive or boxed) → one element per code point;
/// - other array-likes → their elements by index;
/// - anything else → its own enumerable values.
///
/// # Examples
///
/// ```rust
/// use utilbelt::array::to_array;
/// use utilbelt::{object, Value};
///
/// assert_eq!(to_array(&Value::from("a💗b")).len(), 3);
/// assert_eq!(to_array(&object! { "one" => 1, "two" => 2 }), vec![Value::from(1), Value::from(2)]);
/// assert!(to_array(&Value::from("")).is_empty());
/// ```
#[must_use]
pub fn to_array(value: &Value) -> Vec<Value> {
    if !value.is_truthy() {
        return Vec::new();
    }
    array_like_elements(value).unwrap_or_else(|| values(value))
}
