//! Tests for the process-wide iteratee factory.
//!
//! Installing a factory affects every free traversal in the process, so the
//! tests of this binary run one at a time through `GLOBAL_FACTORY_LOCK` and
//! restore the built-in strategy when they finish.

use std::sync::{Mutex, MutexGuard};

use rstest::rstest;
use utilbelt::prelude::*;

static GLOBAL_FACTORY_LOCK: Mutex<()> = Mutex::new(());

/// Holds the lock and resets the global factory on drop.
struct FactoryGuard {
    _lock: MutexGuard<'static, ()>,
}

impl FactoryGuard {
    fn acquire() -> Self {
        let lock = GLOBAL_FACTORY_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        reset_iteratee_factory();
        Self { _lock: lock }
    }
}

impl Drop for FactoryGuard {
    fn drop(&mut self) {
        reset_iteratee_factory();
    }
}

/// Strings starting with `#` select an element by index; everything else
/// goes to the built-in strategy.
fn hash_index_factory() -> IterateeFactory {
    IterateeFactory::new(|spec, context| {
        let index = match &spec {
            Iteratee::Path(PropertyPath::Key(key)) => key
                .as_str()
                .strip_prefix('#')
                .and_then(|digits| digits.parse::<usize>().ok()),
            _ => None,
        };
        match index {
            Some(index) => Callback::custom(move |arguments| {
                Ok(arguments
                    .first()
                    .map(|value| value.get_index(index))
                    .unwrap_or_default())
            }),
            None => iteratee(spec, context),
        }
    })
}

#[rstest]
fn test_default_strategy_without_factory() {
    let _guard = FactoryGuard::acquire();
    assert!(!has_custom_iteratee_factory());
    let rows = array![array!["a", "b"], array!["c", "d"]];
    assert_eq!(
        map(&rows, "#1", None).unwrap(),
        vec![Value::Undefined, Value::Undefined]
    );
}

#[rstest]
fn test_installed_factory_is_used_by_every_traversal() {
    let _guard = FactoryGuard::acquire();
    set_iteratee_factory(hash_index_factory());
    assert!(has_custom_iteratee_factory());

    let rows = array![array!["a", ""], array!["c", "d"]];
    assert_eq!(map(&rows, "#1", None).unwrap(), vec![Value::from(""), Value::from("d")]);
    assert_eq!(filter(&rows, "#1", None).unwrap().len(), 1);
    assert_eq!(find_index(&rows, "#1", None).unwrap(), Some(1));
    assert_eq!(find(&rows, "#0", None).unwrap(), Some(array!["a", ""]));
}

#[rstest]
fn test_factory_delegates_to_builtin() {
    let _guard = FactoryGuard::acquire();
    set_iteratee_factory(hash_index_factory());

    let people = array![object! { "name" => "moe" }];
    assert_eq!(map(&people, "name", None).unwrap(), vec![Value::from("moe")]);
    assert_eq!(
        filter(&people, object! { "name" => "moe" }, None).unwrap().len(),
        1
    );
}

#[rstest]
fn test_cb_routes_through_factory() {
    let _guard = FactoryGuard::acquire();
    set_iteratee_factory(hash_index_factory());
    let callback = cb("#0", None, Arity::Three);
    assert_eq!(
        callback.invoke(&array!["x"], &Value::from(0), &Value::Null).unwrap(),
        Value::from("x")
    );
}

#[rstest]
fn test_reset_restores_builtin() {
    let _guard = FactoryGuard::acquire();
    set_iteratee_factory(IterateeFactory::new(|_, _| {
        Callback::custom(|_| Ok(Value::from("custom")))
    }));
    assert_eq!(map(&array![1], Value::Undefined, None).unwrap(), vec![Value::from("custom")]);

    reset_iteratee_factory();
    assert!(!has_custom_iteratee_factory());
    assert_eq!(map(&array![1], Value::Undefined, None).unwrap(), vec![Value::from(1)]);
}

#[rstest]
fn test_explicit_traverser_ignores_global_factory() {
    let _guard = FactoryGuard::acquire();
    set_iteratee_factory(IterateeFactory::new(|_, _| {
        Callback::custom(|_| Ok(Value::from("custom")))
    }));
    let traverser = Traverser::new();
    assert_eq!(
        traverser.map(&array![1], Value::Undefined, None).unwrap(),
        vec![Value::from(1)]
    );
}

#[rstest]
fn test_global_traverser_snapshots_factory() {
    let _guard = FactoryGuard::acquire();
    set_iteratee_factory(IterateeFactory::new(|_, _| {
        Callback::custom(|_| Ok(Value::from("custom")))
    }));
    let traverser = Traverser::global();
    reset_iteratee_factory();
    assert_eq!(
        traverser.map(&array![1], Value::Undefined, None).unwrap(),
        vec![Value::from("custom")]
    );
}
