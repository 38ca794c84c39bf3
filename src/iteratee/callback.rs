//! The normalized callback every traversal drives.

use std::fmt;
use std::sync::Arc;

use super::matcher::Matcher;
use super::property::Property;
use crate::error::Result;
use crate::value::{Function, Value};

/// How many positional arguments a bound callback forwards.
///
/// The two-argument shape is never needed by a traversal and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Arity {
    /// `(value)`
    One,
    /// `(value, index_or_key, collection)`
    #[default]
    Three,
    /// `(accumulator, value, index_or_key, collection)`
    Four,
    /// Every argument, as passed.
    Variadic,
}

impl Arity {
    const fn count(self) -> Option<usize> {
        match self {
            Self::One => Some(1),
            Self::Three => Some(3),
            Self::Four => Some(4),
            Self::Variadic => None,
        }
    }
}

type CustomFn = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// A normalized callback.
///
/// Whatever the caller specified (a function, a key or path, a match spec, or
/// nothing), traversals only ever see this type and only ever call
/// [`Callback::call`] or [`Callback::invoke`].
#[derive(Clone)]
pub enum Callback {
    /// Returns its first argument.
    Identity,
    /// A function called with no receiver.
    Function(Function),
    /// A function called with a fixed receiver and a fixed argument count.
    Bound {
        /// The function to call.
        function: Function,
        /// The receiver bound as `this`.
        receiver: Value,
        /// How many positional arguments are forwarded.
        arity: Arity,
    },
    /// Reads a property of its first argument.
    Property(Property),
    /// Tests its first argument against a match spec.
    Matcher(Matcher),
    /// A callback produced by a custom iteratee factory.
    Custom(CustomFn),
}

impl Callback {
    /// Creates a [`Callback::Custom`] from a closure over the raw arguments.
    pub fn custom<F>(body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(body))
    }

    /// Calls the callback with raw positional arguments.
    ///
    /// # Errors
    ///
    /// Returns the error of a failing user function, unchanged. The built-in
    /// identity, property and matcher callbacks never fail.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        match self {
            Self::Identity => Ok(first(arguments)),
            Self::Function(function) => function.call(&Value::Undefined, arguments),
            Self::Bound {
                function,
                receiver,
                arity,
            } => match arity.count() {
                None => function.call(receiver, arguments),
                Some(count) if arguments.len() == count => function.call(receiver, arguments),
                Some(count) => {
                    let mut forwarded: Vec<Value> = arguments.iter().take(count).cloned().collect();
                    forwarded.resize(count, Value::Undefined);
                    function.call(receiver, &forwarded)
                }
            },
            Self::Property(property) => Ok(property.get(&first(arguments))),
            Self::Matcher(matcher) => Ok(Value::Bool(matcher.matches(&first(arguments)))),
            Self::Custom(body) => body(arguments),
        }
    }

    /// Calls the callback in the traversal shape `(value, key, collection)`.
    ///
    /// # Errors
    ///
    /// See [`Callback::call`].
    pub fn invoke(&self, value: &Value, key: &Value, collection: &Value) -> Result<Value> {
        match self {
            Self::Identity => Ok(value.clone()),
            Self::Property(property) => Ok(property.get(value)),
            Self::Matcher(matcher) => Ok(Value::Bool(matcher.matches(value))),
            _ => self.call(&[value.clone(), key.clone(), collection.clone()]),
        }
    }

    /// Wraps this callback in a [`Function`] so it can be stored in a value
    /// or handed back as an iteratee.
    #[must_use]
    pub fn into_function(self) -> Function {
        match self {
            Self::Function(function) => function,
            other => Function::new(move |call| other.call(call.arguments())),
        }
    }
}

fn first(arguments: &[Value]) -> Value {
    arguments.first().cloned().unwrap_or_default()
}

impl fmt::Debug for Callback {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => formatter.write_str("Identity"),
            Self::Function(_) => formatter.write_str("Function"),
            Self::Bound {
                receiver, arity, ..
            } => formatter
                .debug_struct("Bound")
                .field("receiver", receiver)
                .field("arity", arity)
                .finish_non_exhaustive(),
            Self::Property(property) => formatter.debug_tuple("Property").field(property).finish(),
            Self::Matcher(matcher) => formatter.debug_tuple("Matcher").field(matcher).finish(),
            Self::Custom(_) => formatter.write_str("Custom"),
        }
    }
}

/// Binds `context` as the receiver of `function`.
///
/// Without a context (absent or `Undefined`) the function is returned as-is,
/// with no wrapper. With one, the result forwards exactly `arity` positional
/// arguments, padding missing ones with `Undefined`.
///
/// # Examples
///
/// ```rust
/// use utilbelt::iteratee::{optimize_cb, Arity, Callback};
/// use utilbelt::{object, Function, Value};
///
/// let scale = Function::new(|call| {
///     let factor = call.this().get("factor").as_number().unwrap_or(1.0);
///     Ok(Value::from(call.argument(0).as_number().unwrap_or(0.0) * factor))
/// });
///
/// let unbound = optimize_cb(scale.clone(), None, Arity::Three);
/// assert!(matches!(unbound, Callback::Function(_)));
///
/// let context = object! { "factor" => 3 };
/// let bound = optimize_cb(scale, Some(&context), Arity::Three);
/// assert_eq!(bound.call(&[Value::from(2)]).unwrap(), Value::from(6));
/// ```
#[must_use]
pub fn optimize_cb(function: Function, context: Option<&Value>, arity: Arity) -> Callback {
    match context {
        None | Some(Value::Undefined) => Callback::Function(function),
        Some(receiver) => Callback::Bound {
            function,
            receiver: receiver.clone(),
            arity,
        },
    }
}

static_assertions::assert_impl_all!(Callback: Send, Sync, Clone);
