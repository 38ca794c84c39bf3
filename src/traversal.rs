//! Traversal primitives.
//!
//! Each traversal normalizes its iteratee once (see [`crate::iteratee`]) and
//! then makes a single linear pass. Array-likes are visited by index
//! `0..length`, the callback receiving the index as a number; everything
//! else is visited by own enumerable key, the callback receiving the key as
//! a string.
//!
//! The length or key list is read once when the pass starts. Element values
//! are read when visited, and no lock is held while a callback runs, so a
//! callback may mutate the collection it is walking.
//!
//! A nullish collection is empty for every traversal; [`for_each`] still
//! hands it back unchanged.
//!
//! # Examples
//!
//! ```rust
//! use utilbelt::traversal::{filter, find_index, map};
//! use utilbelt::{array, object, Function, Value};
//!
//! let double = Function::unary(|value| Ok(Value::from(value.as_number().unwrap_or(0.0) * 2.0)));
//! assert_eq!(
//!     map(&array![1, 2, 3], double, None).unwrap(),
//!     vec![Value::from(2), Value::from(4), Value::from(6)]
//! );
//!
//! let people = array![object! { "name" => "moe" }, object! { "name" => "curly" }];
//! assert_eq!(
//!     map(&people, "name", None).unwrap(),
//!     vec![Value::from("moe"), Value::from("curly")]
//! );
//!
//! let records = array![object! { "a" => 0 }, object! { "a" => 1 }];
//! assert_eq!(find_index(&records, object! { "a" => 1 }, None).unwrap(), Some(1));
//! ```

use crate::error::Result;
use crate::iteratee::{Arity, Callback, Iteratee, IterateeFactory, installed_factory, resolve};
use crate::shape::{keys, length_of};
use crate::value::{PropertyKey, Value};

/// Runs traversals with a fixed iteratee strategy.
///
/// [`Traverser::new`] always uses the built-in strategy,
/// [`Traverser::with_factory`] a given one, and [`Traverser::global`] whatever
/// is installed process-wide at the time of the call. The free functions of
/// this module use [`Traverser::global`].
///
/// # Examples
///
/// ```rust
/// use utilbelt::iteratee::{iteratee, Callback, Iteratee, IterateeFactory};
/// use utilbelt::traversal::Traverser;
/// use utilbelt::{array, Value};
///
/// // Strings name a property to read, except "*" which keeps everything.
/// let factory = IterateeFactory::new(|spec, context| {
///     let keep_all = matches!(&spec, Iteratee::Path(path) if path.keys()[0].as_str() == "*");
///     if keep_all {
///         Callback::custom(|_| Ok(Value::Bool(true)))
///     } else {
///         iteratee(spec, context)
///     }
/// });
///
/// let traverser = Traverser::with_factory(factory);
/// let kept = traverser.filter(&array![0, 1, 2], "*", None).unwrap();
/// assert_eq!(kept.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Traverser {
    factory: Option<IterateeFactory>,
}

impl Traverser {
    /// A traverser using the built-in strategy, ignoring any global override.
    #[must_use]
    pub const fn new() -> Self {
        Self { factory: None }
    }

    /// A traverser using `factory` to normalize iteratees.
    #[must_use]
    pub const fn with_factory(factory: IterateeFactory) -> Self {
        Self {
            factory: Some(factory),
        }
    }

    /// A traverser using the process-wide strategy as it is right now.
    #[must_use]
    pub fn global() -> Self {
        Self {
            factory: installed_factory(),
        }
    }

    /// Normalizes `iteratee` with this traverser's strategy, for the
    /// three-argument traversal shape.
    #[must_use]
    pub fn callback(&self, iteratee: Iteratee, context: Option<&Value>) -> Callback {
        resolve(self.factory.as_ref(), iteratee, context, Arity::Three)
    }

    /// Calls the iteratee once per element and returns the collection itself.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first error of the callback.
    pub fn for_each(
        &self,
        collection: &Value,
        iteratee: impl Into<Iteratee>,
        context: Option<&Value>,
    ) -> Result<Value> {
        let callback = self.callback(iteratee.into(), context);
        each(collection, &callback, |_, _| {})?;
        Ok(collection.clone())
    }

    /// Collects the iteratee's result for each element, in visiting order.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first error of the callback.
    pub fn map(
        &self,
        collection: &Value,
        iteratee: impl Into<Iteratee>,
        context: Option<&Value>,
    ) -> Result<Vec<Value>> {
        let callback = self.callback(iteratee.into(), context);
        let mut results = Vec::new();
        each(collection, &callback, |_, result| results.push(result))?;
        Ok(results)
    }

    /// Collects the elements for which the predicate is truthy.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first error of the predicate.
    pub fn filter(
        &self,
        collection: &Value,
        predicate: impl Into<Iteratee>,
        context: Option<&Value>,
    ) -> Result<Vec<Value>> {
        let callback = self.callback(predicate.into(), context);
        let mut results = Vec::new();
        each(collection, &callback, |value, verdict| {
            if verdict.is_truthy() {
                results.push(value);
            }
        })?;
        Ok(results)
    }

    /// The first index of an array-like whose predicate result is truthy.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first error of the predicate.
    pub fn find_index(
        &self,
        array: &Value,
        predicate: impl Into<Iteratee>,
        context: Option<&Value>,
    ) -> Result<Option<usize>> {
        let callback = self.callback(predicate.into(), context);
        if let Some(text) = array.string_contents() {
            for (index, character) in text.chars().enumerate() {
                let value = Value::from(character);
                if callback.invoke(&value, &Value::from(index), array)?.is_truthy() {
                    return Ok(Some(index));
                }
            }
            return Ok(None);
        }
        let Some(length) = length_of(array) else {
            return Ok(None);
        };
        for index in 0..index_count(length) {
            let value = array.get_index(index);
            if callback.invoke(&value, &Value::from(index), array)?.is_truthy() {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// The first own enumerable key whose predicate result is truthy.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first error of the predicate.
    pub fn find_key(
        &self,
        object: &Value,
        predicate: impl Into<Iteratee>,
        context: Option<&Value>,
    ) -> Result<Option<PropertyKey>> {
        let callback = self.callback(predicate.into(), context);
        for key in keys(object) {
            let value = object.get(&key);
            if callback.invoke(&value, &Value::from(&key), object)?.is_truthy() {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    /// The first element whose predicate result is truthy: by index for
    /// array-likes, by key otherwise.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first error of the predicate.
    pub fn find(
        &self,
        collection: &Value,
        predicate: impl Into<Iteratee>,
        context: Option<&Value>,
    ) -> Result<Option<Value>> {
        if length_of(collection).is_some() {
            let index = self.find_index(collection, predicate, context)?;
            Ok(index.map(|index| collection.get_index(index)))
        } else {
            let key = self.find_key(collection, predicate, context)?;
            Ok(key.map(|key| collection.get(key)))
        }
    }
}

/// Number of indices `i` with `i < length`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn index_count(length: f64) -> usize {
    length.ceil() as usize
}

/// The single pass shared by `for_each`, `map` and `filter`: calls
/// `callback` for each element and hands `(element, result)` to `sink`.
fn each<F>(collection: &Value, callback: &Callback, mut sink: F) -> Result<()>
where
    F: FnMut(Value, Value),
{
    if let Some(text) = collection.string_contents() {
        for (index, character) in text.chars().enumerate() {
            let value = Value::from(character);
            let result = callback.invoke(&value, &Value::from(index), collection)?;
            sink(value, result);
        }
    } else if let Some(length) = length_of(collection) {
        for index in 0..index_count(length) {
            let value = collection.get_index(index);
            let result = callback.invoke(&value, &Value::from(index), collection)?;
            sink(value, result);
        }
    } else {
        for key in keys(collection) {
            let value = collection.get(&key);
            let result = callback.invoke(&value, &Value::from(key), collection)?;
            sink(value, result);
        }
    }
    Ok(())
}

/// Calls the iteratee once per element and returns the collection itself.
///
/// A nullish collection is returned as-is without any call.
///
/// # Errors
///
/// Stops at, and returns, the first error of the callback.
///
/// # Examples
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use utilbelt::traversal::for_each;
/// use utilbelt::{array, Function, Value};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let record = {
///     let seen = Arc::clone(&seen);
///     Function::ternary(move |value, index, _| {
///         seen.lock().unwrap().push((value.clone(), index.clone()));
///         Ok(Value::Undefined)
///     })
/// };
///
/// let list = array!["a", "b"];
/// let returned = for_each(&list, record, None).unwrap();
/// assert!(returned.strict_equals(&list));
/// assert_eq!(seen.lock().unwrap().len(), 2);
///
/// assert!(for_each(&Value::Null, Value::Null, None).unwrap().strict_equals(&Value::Null));
/// ```
pub fn for_each(
    collection: &Value,
    iteratee: impl Into<Iteratee>,
    context: Option<&Value>,
) -> Result<Value> {
    Traverser::global().for_each(collection, iteratee, context)
}

/// Collects the iteratee's result for each element, in visiting order.
///
/// # Errors
///
/// Stops at, and returns, the first error of the callback.
pub fn map(
    collection: &Value,
    iteratee: impl Into<Iteratee>,
    context: Option<&Value>,
) -> Result<Vec<Value>> {
    Traverser::global().map(collection, iteratee, context)
}

/// Collects the elements for which the predicate is truthy.
///
/// # Errors
///
/// Stops at, and returns, the first error of the predicate.
pub fn filter(
    collection: &Value,
    predicate: impl Into<Iteratee>,
    context: Option<&Value>,
) -> Result<Vec<Value>> {
    Traverser::global().filter(collection, predicate, context)
}

/// The first index of an array-like whose predicate result is truthy.
///
/// # Errors
///
/// Stops at, and returns, the first error of the predicate.
pub fn find_index(
    array: &Value,
    predicate: impl Into<Iteratee>,
    context: Option<&Value>,
) -> Result<Option<usize>> {
    Traverser::global().find_index(array, predicate, context)
}

/// The first own enumerable key whose predicate result is truthy.
///
/// # Errors
///
/// Stops at, and returns, the first error of the predicate.
pub fn find_key(
    object: &Value,
    predicate: impl Into<Iteratee>,
    context: Option<&Value>,
) -> Result<Option<PropertyKey>> {
    Traverser::global().find_key(object, predicate, context)
}

/// The first element whose predicate result is truthy.
///
/// # Errors
///
/// Stops at, and returns, the first error of the predicate.
pub fn find(
    collection: &Value,
    predicate: impl Into<Iteratee>,
    context: Option<&Value>,
) -> Result<Option<Value>> {
    Traverser::global().find(collection, predicate, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::{Function, Object};
    use crate::{array, object};
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<(Value, Value)>>>, Function) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let function = {
            let seen = Arc::clone(&seen);
            Function::ternary(move |value, key, _| {
                seen.lock().unwrap().push((value.clone(), key.clone()));
                Ok(Value::Undefined)
            })
        };
        (seen, function)
    }

    #[rstest]
    fn test_for_each_visits_indices_in_order() {
        let (seen, function) = recorder();
        let list = array![1, 2, 3];
        let returned = Traverser::new().for_each(&list, function, None).unwrap();
        assert!(returned.strict_equals(&list));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (Value::from(1), Value::from(0)),
                (Value::from(2), Value::from(1)),
                (Value::from(3), Value::from(2)),
            ]
        );
    }

    #[rstest]
    fn test_for_each_visits_keys_as_strings() {
        let (seen, function) = recorder();
        Traverser::new()
            .for_each(&object! { "one" => 1, "two" => 2 }, function, None)
            .unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (Value::from(1), Value::from("one")),
                (Value::from(2), Value::from("two")),
            ]
        );
    }

    #[rstest]
    fn test_for_each_binds_context() {
        let context = object! { "multiplier" => 5 };
        let results = Arc::new(Mutex::new(Vec::new()));
        let function = {
            let results = Arc::clone(&results);
            Function::new(move |call| {
                let factor = call.this().get("multiplier").as_number().unwrap_or(0.0);
                let value = call.argument(0).as_number().unwrap_or(0.0);
                results.lock().unwrap().push(value * factor);
                Ok(Value::Undefined)
            })
        };
        Traverser::new()
            .for_each(&array![1, 2, 3], function, Some(&context))
            .unwrap();
        assert_eq!(*results.lock().unwrap(), vec![5.0, 10.0, 15.0]);
    }

    #[rstest]
    fn test_length_is_read_once() {
        let list = Object::array(vec![Value::from(1), Value::from(2)]);
        let target = list.clone();
        let visits = Arc::new(Mutex::new(0));
        let function = {
            let visits = Arc::clone(&visits);
            Function::unary(move |_| {
                target.push(Value::from(0));
                *visits.lock().unwrap() += 1;
                Ok(Value::Undefined)
            })
        };
        Traverser::new()
            .for_each(&Value::from(list), function, None)
            .unwrap();
        assert_eq!(*visits.lock().unwrap(), 2);
    }

    #[rstest]
    fn test_fractional_length_rounds_up() {
        let array_like = object! { "length" => 1.5, "0" => "a", "1" => "b" };
        let mapped = Traverser::new().map(&array_like, Value::Undefined, None).unwrap();
        assert_eq!(mapped, vec![Value::from("a"), Value::from("b")]);
    }

    #[rstest]
    #[case(Value::Null)]
    #[case(Value::Undefined)]
    #[case(Value::from(5))]
    fn test_empty_collections(#[case] collection: Value) {
        let traverser = Traverser::new();
        assert!(traverser.map(&collection, Value::Null, None).unwrap().is_empty());
        assert!(traverser.filter(&collection, Value::Null, None).unwrap().is_empty());
        assert_eq!(traverser.find(&collection, Value::Null, None).unwrap(), None);
        assert_eq!(traverser.find_index(&collection, Value::Null, None).unwrap(), None);
        assert_eq!(traverser.find_key(&collection, Value::Null, None).unwrap(), None);
    }

    #[rstest]
    fn test_map_with_path() {
        let people = array![
            object! { "a" => object! { "b" => 1 } },
            object! { "a" => object! { "b" => 2 } },
        ];
        assert_eq!(
            Traverser::new().map(&people, ["a", "b"], None).unwrap(),
            vec![Value::from(1), Value::from(2)]
        );
    }

    #[rstest]
    fn test_map_over_string() {
        let upper = Function::unary(|value| {
            Ok(Value::from(value.as_str().unwrap_or_default().to_uppercase()))
        });
        assert_eq!(
            Traverser::new().map(&Value::from("ab"), upper, None).unwrap(),
            vec![Value::from("A"), Value::from("B")]
        );
    }

    #[rstest]
    fn test_filter_with_match_spec() {
        let list = array![
            object! { "a" => 1, "b" => 2 },
            object! { "a" => 2, "b" => 2 },
            object! { "a" => 1, "b" => 3 },
        ];
        let kept = Traverser::new().filter(&list, object! { "a" => 1 }, None).unwrap();
        assert_eq!(kept.len(), 2);
        assert!(kept[0].strict_equals(&list.get_index(0)));
        assert!(kept[1].strict_equals(&list.get_index(2)));
    }

    #[rstest]
    fn test_filter_identity_drops_falsy() {
        let kept = Traverser::new()
            .filter(&array![0, 1, "", "x", Value::Null, false, true], Value::Undefined, None)
            .unwrap();
        assert_eq!(kept, vec![Value::from(1), Value::from("x"), Value::from(true)]);
    }

    #[rstest]
    fn test_find_index() {
        let list = array![1, 2, 3, 4];
        let even = Function::unary(|value| {
            Ok(Value::Bool(value.as_number().is_some_and(|number| number % 2.0 == 0.0)))
        });
        assert_eq!(Traverser::new().find_index(&list, even, None).unwrap(), Some(1));
        let never = Function::unary(|_| Ok(Value::Bool(false)));
        assert_eq!(Traverser::new().find_index(&list, never, None).unwrap(), None);
    }

    #[rstest]
    fn test_find_key() {
        let record = object! { "a" => object! { "a" => 1 }, "b" => object! { "a" => 2 } };
        let key = Traverser::new()
            .find_key(&record, object! { "a" => 2 }, None)
            .unwrap();
        assert_eq!(key, Some(PropertyKey::from("b")));
    }

    #[rstest]
    fn test_find_dispatches_on_shape() {
        let list = array![1, 2, 3];
        let big = Function::unary(|value| Ok(Value::Bool(value.as_number().unwrap_or(0.0) > 1.0)));
        assert_eq!(Traverser::new().find(&list, big.clone(), None).unwrap(), Some(Value::from(2)));

        let record = object! { "x" => 1, "y" => 5 };
        assert_eq!(Traverser::new().find(&record, big, None).unwrap(), Some(Value::from(5)));
    }

    #[rstest]
    fn test_errors_stop_the_pass() {
        let calls = Arc::new(Mutex::new(0));
        let failing = {
            let calls = Arc::clone(&calls);
            Function::unary(move |value| {
                *calls.lock().unwrap() += 1;
                if value.as_number() == Some(2.0) {
                    Err(Error::thrown("stop"))
                } else {
                    Ok(Value::Undefined)
                }
            })
        };
        let error = Traverser::new().map(&array![1, 2, 3], failing, None).unwrap_err();
        assert_eq!(error.payload(), Some(&Value::from("stop")));
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[rstest]
    fn test_with_factory_overrides_strategy() {
        let factory = IterateeFactory::new(|_, _| Callback::custom(|_| Ok(Value::from("x"))));
        let mapped = Traverser::with_factory(factory)
            .map(&array![1, 2], "anything", None)
            .unwrap();
        assert_eq!(mapped, vec![Value::from("x"), Value::from("x")]);
    }

    #[rstest]
    fn test_string_traversal_passes_characters_and_indices() {
        let (seen, function) = recorder();
        Traverser::new()
            .for_each(&Value::from("a💗").boxed(), function, None)
            .unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (Value::from("a"), Value::from(0)),
                (Value::from("💗"), Value::from(1)),
            ]
        );
    }

    #[rstest]
    fn test_long_string_traversal() {
        let text = Value::from("ab".repeat(100_000));
        let traverser = Traverser::new();
        assert_eq!(traverser.map(&text, Value::Undefined, None).unwrap().len(), 200_000);
        let is_b = Function::unary(|value| Ok(Value::Bool(value.as_str() == Some("b"))));
        assert_eq!(traverser.filter(&text, &is_b, None).unwrap().len(), 100_000);
        assert_eq!(traverser.find_index(&text, &is_b, None).unwrap(), Some(1));
        assert_eq!(traverser.find(&text, is_b, None).unwrap(), Some(Value::from("b")));
    }

    #[rstest]
    fn test_large_mapping_traversal() {
        let object = Object::new();
        for index in 0..50_000 {
            object.set(format!("key{index}"), index);
        }
        let mapping = Value::from(object);
        let mapped = Traverser::new().map(&mapping, Value::Undefined, None).unwrap();
        assert_eq!(mapped.len(), 50_000);
        assert_eq!(mapped[49_999], Value::from(49_999));
        assert_eq!(
            Traverser::new()
                .find_key(&mapping, object! { }, None)
                .unwrap(),
            Some(PropertyKey::from("key0"))
        );
    }
}
