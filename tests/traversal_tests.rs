//! Integration tests for the traversal functions.
//!
//! These go through the free functions, which consult the process-wide
//! iteratee strategy. No test in this binary installs one.

use std::sync::{Arc, Mutex};

use rstest::rstest;
use utilbelt::iteratee::Matcher;
use utilbelt::prelude::*;

fn double() -> Function {
    Function::unary(|value| Ok(Value::from(value.as_number().unwrap_or(0.0) * 2.0)))
}

fn stooges() -> Value {
    array![
        object! { "name" => "moe", "age" => 40 },
        object! { "name" => "larry", "age" => 50 },
        object! { "name" => "curly", "age" => 60 },
    ]
}

// =============================================================================
// for_each
// =============================================================================

#[rstest]
fn test_for_each_returns_same_collection() {
    let list = array![1, 2, 3];
    let returned = for_each(&list, noop_function(), None).unwrap();
    assert!(returned.strict_equals(&list));
}

#[rstest]
#[case(Value::Null)]
#[case(Value::Undefined)]
fn test_for_each_nullish(#[case] collection: Value) {
    let calls = Arc::new(Mutex::new(0));
    let counter = {
        let calls = Arc::clone(&calls);
        Function::unary(move |_| {
            *calls.lock().unwrap() += 1;
            Ok(Value::Undefined)
        })
    };
    let returned = for_each(&collection, counter, None).unwrap();
    assert!(returned.strict_equals(&collection));
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[rstest]
fn test_for_each_collection_argument_is_the_input() {
    let list = array![1, 2];
    let all_same = Arc::new(Mutex::new(true));
    let check = {
        let all_same = Arc::clone(&all_same);
        let expected = list.clone();
        Function::ternary(move |_, _, collection| {
            if !collection.strict_equals(&expected) {
                *all_same.lock().unwrap() = false;
            }
            Ok(Value::Undefined)
        })
    };
    for_each(&list, check, None).unwrap();
    assert!(*all_same.lock().unwrap());
}

fn noop_function() -> Function {
    Function::new(|_| Ok(noop()))
}

// =============================================================================
// map
// =============================================================================

#[rstest]
fn test_map_doubles() {
    assert_eq!(
        map(&array![1, 2, 3], double(), None).unwrap(),
        vec![Value::from(2), Value::from(4), Value::from(6)]
    );
}

#[rstest]
fn test_map_with_context() {
    let context = object! { "multiplier" => 3 };
    let times = Function::new(|call| {
        let factor = call.this().get("multiplier").as_number().unwrap_or(0.0);
        Ok(Value::from(call.argument(0).as_number().unwrap_or(0.0) * factor))
    });
    assert_eq!(
        map(&array![1, 2, 3], times, Some(&context)).unwrap(),
        vec![Value::from(3), Value::from(6), Value::from(9)]
    );
}

#[rstest]
fn test_map_over_object_values() {
    assert_eq!(
        map(&object! { "one" => 1, "two" => 2, "three" => 3 }, double(), None).unwrap(),
        vec![Value::from(2), Value::from(4), Value::from(6)]
    );
}

#[rstest]
fn test_map_pluck() {
    assert_eq!(
        map(&stooges(), "name", None).unwrap(),
        vec![Value::from("moe"), Value::from("larry"), Value::from("curly")]
    );
}

#[rstest]
fn test_map_identity_copies() {
    let list = array![1, 2];
    let copy = map(&list, Value::Undefined, None).unwrap();
    assert_eq!(copy, vec![Value::from(1), Value::from(2)]);
}

#[rstest]
fn test_map_keys_are_strings_for_objects() {
    let keys = map(
        &object! { "a" => 1, "b" => 2 },
        Function::ternary(|_, key, _| Ok(key.clone())),
        None,
    )
    .unwrap();
    assert_eq!(keys, vec![Value::from("a"), Value::from("b")]);
}

#[rstest]
fn test_map_indices_are_numbers_for_arrays() {
    let indices = map(
        &array!["a", "b"],
        Function::ternary(|_, index, _| Ok(index.clone())),
        None,
    )
    .unwrap();
    assert_eq!(indices, vec![Value::from(0), Value::from(1)]);
}

#[rstest]
fn test_map_arguments_object() {
    let arguments = Value::arguments(vec![Value::from(1), Value::from(2)]);
    assert_eq!(
        map(&arguments, double(), None).unwrap(),
        vec![Value::from(2), Value::from(4)]
    );
}

// =============================================================================
// filter
// =============================================================================

#[rstest]
fn test_filter_even() {
    let even = Function::unary(|value| {
        Ok(Value::Bool(value.as_number().is_some_and(|number| number % 2.0 == 0.0)))
    });
    assert_eq!(
        filter(&array![1, 2, 3, 4, 5, 6], even, None).unwrap(),
        vec![Value::from(2), Value::from(4), Value::from(6)]
    );
}

#[rstest]
fn test_filter_with_property() {
    let list = array![object! { "a" => 1 }, object! { "a" => 0 }, object! { "b" => 1 }];
    assert_eq!(filter(&list, "a", None).unwrap().len(), 1);
}

#[rstest]
fn test_filter_with_prebuilt_matcher() {
    let matcher = Matcher::new(&object! { "age" => 50 });
    let found = filter(&stooges(), matcher, None).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("name"), Value::from("larry"));
}

// =============================================================================
// find / find_index / find_key
// =============================================================================

#[rstest]
fn test_find_index_with_match_spec() {
    let records = array![object! { "a" => 0 }, object! { "a" => 1 }];
    assert_eq!(find_index(&records, object! { "a" => 1 }, None).unwrap(), Some(1));
    assert_eq!(find_index(&records, object! { "a" => 2 }, None).unwrap(), None);
}

#[rstest]
fn test_find_index_on_object_is_none() {
    assert_eq!(find_index(&object! { "a" => 1 }, Value::Undefined, None).unwrap(), None);
}

#[rstest]
fn test_find_key() {
    let record = object! { "a" => 1, "b" => 2, "c" => 3 };
    let greater = Function::unary(|value| Ok(Value::Bool(value.as_number().unwrap_or(0.0) > 1.0)));
    assert_eq!(
        find_key(&record, greater, None).unwrap(),
        Some(PropertyKey::from("b"))
    );
}

#[rstest]
fn test_find_key_passes_key_and_object() {
    let record = object! { "a" => 1, "b" => 2 };
    let by_key = Function::ternary(|_, key, object| {
        Ok(Value::Bool(key.as_str() == Some("b") && object.has_own("a")))
    });
    assert_eq!(find_key(&record, by_key, None).unwrap(), Some(PropertyKey::from("b")));
}

#[rstest]
fn test_find_with_match_spec() {
    let found = find(&stooges(), object! { "age" => 60 }, None).unwrap();
    assert_eq!(found.map(|stooge| stooge.get("name")), Some(Value::from("curly")));
}

#[rstest]
fn test_find_returns_first_match() {
    let list = array![1, 2, 3, 4];
    let greater = Function::unary(|value| Ok(Value::Bool(value.as_number().unwrap_or(0.0) > 2.0)));
    assert_eq!(find(&list, greater, None).unwrap(), Some(Value::from(3)));
}

#[rstest]
fn test_find_on_object_values() {
    let record = object! { "a" => object! { "x" => 1 }, "b" => object! { "x" => 2 } };
    let found = find(&record, object! { "x" => 2 }, None).unwrap();
    assert!(found.is_some_and(|value| value.strict_equals(&record.get("b"))));
}

#[rstest]
fn test_find_distinguishes_undefined_element_from_absence() {
    let list = array![Value::Undefined, 1];
    let is_undefined = Function::unary(|value| Ok(Value::Bool(value.is_undefined())));
    assert_eq!(find(&list, is_undefined, None).unwrap(), Some(Value::Undefined));
}

// =============================================================================
// Errors
// =============================================================================

#[rstest]
fn test_errors_propagate_unchanged() {
    let payload = object! { "code" => 7 };
    let failing = {
        let payload = payload.clone();
        Function::unary(move |_| Err(Error::Thrown(payload.clone())))
    };
    let error = filter(&array![1], failing, None).unwrap_err();
    assert!(error.payload().is_some_and(|thrown| thrown.strict_equals(&payload)));
}
