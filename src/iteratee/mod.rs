//! Iteratee normalization.
//!
//! Every traversal accepts the same four kinds of "what to do per element"
//! specifier, modelled by [`Iteratee`]:
//!
//! - [`Iteratee::Identity`]: nothing given, elements pass through;
//! - [`Iteratee::Function`]: a function of `(value, key, collection)`;
//! - [`Iteratee::Path`]: a key or path, read from each element;
//! - [`Iteratee::Match`]: a partial-match spec, tested against each element.
//!
//! [`cb`] translates a specifier into a [`Callback`] once per call, so the
//! traversals themselves never look at what the caller passed.
//!
//! # Examples
//!
//! ```rust
//! use utilbelt::iteratee::{cb, Arity, Iteratee};
//! use utilbelt::{object, Value};
//!
//! let moe = object! { "name" => "moe", "hair" => true };
//!
//! let by_name = cb("name", None, Arity::Three);
//! assert_eq!(by_name.invoke(&moe, &Value::from(0), &Value::Null).unwrap(), Value::from("moe"));
//!
//! let bald = cb(Iteratee::from(object! { "hair" => false }), None, Arity::Three);
//! assert_eq!(bald.invoke(&moe, &Value::from(0), &Value::Null).unwrap(), Value::Bool(false));
//! ```

mod callback;
mod factory;
mod matcher;
mod property;

pub use callback::{Arity, Callback, optimize_cb};
pub use factory::{
    IterateeFactory, has_custom_iteratee_factory, reset_iteratee_factory, set_iteratee_factory,
};
pub use matcher::{Matcher, is_match, matcher};
pub use property::{Property, PropertyPath, deep_get, property, shallow_property};

pub(crate) use factory::installed_factory;

use crate::value::{Function, PropertyKey, Value};

/// A caller's description of what to do with each element.
#[derive(Debug, Clone)]
pub enum Iteratee {
    /// Pass each element through unchanged.
    Identity,
    /// Call a function.
    Function(Function),
    /// Read a key or a path from each element.
    Path(PropertyPath),
    /// Test each element against the own enumerable properties of a spec.
    Match(Value),
}

impl Iteratee {
    /// Creates a function iteratee from a closure of `(value, key, collection)`.
    pub fn from_fn<F>(body: F) -> Self
    where
        F: Fn(&Value, &Value, &Value) -> crate::Result<Value> + Send + Sync + 'static,
    {
        Self::Function(Function::ternary(body))
    }
}

impl From<Value> for Iteratee {
    /// Classifies a raw value: nullish → identity, function → function,
    /// non-array object → match spec, anything else → key or path.
    fn from(value: Value) -> Self {
        if value.is_nullish() {
            return Self::Identity;
        }
        if let Some(function) = value.as_function() {
            return Self::Function(function);
        }
        if matcher::is_match_spec(&value) {
            return Self::Match(value);
        }
        Self::Path(PropertyPath::from_value(&value))
    }
}

impl From<&Value> for Iteratee {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<Function> for Iteratee {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<&Function> for Iteratee {
    fn from(function: &Function) -> Self {
        Self::Function(function.clone())
    }
}

impl From<&str> for Iteratee {
    fn from(key: &str) -> Self {
        Self::Path(PropertyPath::key(key))
    }
}

impl From<PropertyKey> for Iteratee {
    fn from(key: PropertyKey) -> Self {
        Self::Path(PropertyPath::Key(key))
    }
}

impl From<PropertyPath> for Iteratee {
    fn from(path: PropertyPath) -> Self {
        Self::Path(path)
    }
}

impl<const N: usize> From<[&str; N]> for Iteratee {
    fn from(keys: [&str; N]) -> Self {
        Self::Path(PropertyPath::path(keys))
    }
}

impl From<Matcher> for Iteratee {
    fn from(matcher: Matcher) -> Self {
        Self::Function(matcher.into_function())
    }
}

impl From<Property> for Iteratee {
    fn from(property: Property) -> Self {
        Self::Function(Callback::Property(property).into_function())
    }
}

impl From<Callback> for Iteratee {
    fn from(callback: Callback) -> Self {
        Self::Function(callback.into_function())
    }
}

impl<T: Into<Self>> From<Option<T>> for Iteratee {
    fn from(iteratee: Option<T>) -> Self {
        iteratee.map_or(Self::Identity, Into::into)
    }
}

/// The built-in translation from specifier to callback.
#[must_use]
pub fn base_iteratee(iteratee: Iteratee, context: Option<&Value>, arity: Arity) -> Callback {
    match iteratee {
        Iteratee::Identity => Callback::Identity,
        Iteratee::Function(function) => optimize_cb(function, context, arity),
        Iteratee::Match(attrs) => Callback::Matcher(matcher(&attrs)),
        Iteratee::Path(path) => Callback::Property(property(path)),
    }
}

/// The default iteratee strategy: [`base_iteratee`] forwarding every
/// argument to bound functions.
///
/// This is what a custom [`IterateeFactory`] usually delegates to for the
/// cases it does not handle itself.
pub fn iteratee(iteratee: impl Into<Iteratee>, context: Option<&Value>) -> Callback {
    base_iteratee(iteratee.into(), context, Arity::Variadic)
}

/// Normalizes an iteratee through the current process-wide strategy.
///
/// With no custom factory installed this is [`base_iteratee`] with the given
/// arity; otherwise the installed factory decides (and `arity` is not
/// consulted).
pub fn cb(iteratee: impl Into<Iteratee>, context: Option<&Value>, arity: Arity) -> Callback {
    resolve(installed_factory().as_ref(), iteratee.into(), context, arity)
}

pub(crate) fn resolve(
    factory: Option<&IterateeFactory>,
    iteratee: Iteratee,
    context: Option<&Value>,
    arity: Arity,
) -> Callback {
    match factory {
        None => base_iteratee(iteratee, context, arity),
        Some(factory) => {
            tracing::trace!(?iteratee, "resolving iteratee through a custom factory");
            factory.build(iteratee, context)
        }
    }
}
