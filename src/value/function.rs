//! Native callable objects.

use std::fmt;
use std::sync::Arc;

use super::object::{Class, Object};
use super::Value;
use crate::error::Result;

/// The body of a native function.
pub(crate) type NativeFn = Arc<dyn Fn(Invocation<'_>) -> Result<Value> + Send + Sync>;

/// The receiver and positional arguments of a single call.
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    this: &'a Value,
    arguments: &'a [Value],
}

impl<'a> Invocation<'a> {
    /// Creates an invocation.
    #[must_use]
    pub const fn new(this: &'a Value, arguments: &'a [Value]) -> Self {
        Self { this, arguments }
    }

    /// The receiver bound for this call ([`Value::Undefined`] when unbound).
    #[must_use]
    pub const fn this(&self) -> &'a Value {
        self.this
    }

    /// All positional arguments, exactly as passed.
    #[must_use]
    pub const fn arguments(&self) -> &'a [Value] {
        self.arguments
    }

    /// The positional argument at `index`, or [`Value::Undefined`] if absent.
    #[must_use]
    pub fn argument(&self, index: usize) -> Value {
        self.arguments.get(index).cloned().unwrap_or_default()
    }
}

/// A handle to a function object.
///
/// A `Function` is an [`Object`] whose class is callable. Like any object it
/// can carry its own properties, and it is compared by identity.
///
/// # Examples
///
/// ```rust
/// use utilbelt::{Function, Value};
///
/// let double = Function::unary(|value| Ok(Value::from(value.as_number().unwrap_or(0.0) * 2.0)));
/// let result = double.call(&Value::Undefined, &[Value::from(21)]).unwrap();
/// assert_eq!(result, Value::from(42));
/// ```
#[derive(Clone)]
pub struct Function {
    object: Object,
}

impl Function {
    /// Creates a function from a closure receiving the full [`Invocation`].
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(Invocation<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            object: Object::from_class(Class::Function(Arc::new(body))),
        }
    }

    /// Creates a function that only looks at its first argument.
    pub fn unary<F>(body: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(move |call| body(&call.argument(0)))
    }

    /// Creates a function of `(value, key, collection)`, the shape every
    /// traversal passes to its callback.
    pub fn ternary<F>(body: F) -> Self
    where
        F: Fn(&Value, &Value, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(move |call| body(&call.argument(0), &call.argument(1), &call.argument(2)))
    }

    /// Wraps an object, if it is callable.
    #[must_use]
    pub fn from_object(object: Object) -> Option<Self> {
        object.is_callable().then_some(Self { object })
    }

    /// Calls the function with `this` bound as its receiver.
    ///
    /// # Errors
    ///
    /// Returns whatever error the function body returns, unchanged.
    pub fn call(&self, this: &Value, arguments: &[Value]) -> Result<Value> {
        let body = self.object.native();
        match body {
            Some(body) => body(Invocation::new(this, arguments)),
            None => Ok(Value::Undefined),
        }
    }

    /// The underlying object.
    #[must_use]
    pub const fn as_object(&self) -> &Object {
        &self.object
    }

    /// Returns `true` if both handles refer to the same function object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.object.ptr_eq(&other.object)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("[Function]")
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Object(function.object)
    }
}
