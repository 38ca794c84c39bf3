//! Iteratee factories and the process-wide override slot.
//!
//! An [`IterateeFactory`] replaces the built-in translation from
//! [`Iteratee`] to [`Callback`]. It can be passed explicitly (see
//! [`Traverser::with_factory`](crate::traversal::Traverser::with_factory)),
//! or installed once for the whole process with [`set_iteratee_factory`].
//!
//! The global slot is meant to be set at process start. Changing it while
//! traversals are running on other threads is not supported: each traversal
//! reads the slot once, so a concurrent change may or may not be observed.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use super::{Callback, Iteratee};
use crate::value::Value;

type FactoryFn = dyn Fn(Iteratee, Option<&Value>) -> Callback + Send + Sync;

/// A strategy turning an [`Iteratee`] and an optional context into a
/// [`Callback`].
///
/// # Examples
///
/// ```rust
/// use utilbelt::iteratee::{Callback, Iteratee, IterateeFactory};
/// use utilbelt::Value;
///
/// // Treat every iteratee as "always true".
/// let factory = IterateeFactory::new(|_, _| Callback::custom(|_| Ok(Value::Bool(true))));
/// let callback = factory.build(Iteratee::Identity, None);
/// assert_eq!(callback.call(&[Value::from(0)]).unwrap(), Value::Bool(true));
/// ```
#[derive(Clone)]
pub struct IterateeFactory(Arc<FactoryFn>);

impl IterateeFactory {
    /// Creates a factory from a closure.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(Iteratee, Option<&Value>) -> Callback + Send + Sync + 'static,
    {
        Self(Arc::new(factory))
    }

    /// Builds a callback.
    #[must_use]
    pub fn build(&self, iteratee: Iteratee, context: Option<&Value>) -> Callback {
        (self.0)(iteratee, context)
    }
}

impl fmt::Debug for IterateeFactory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("IterateeFactory")
    }
}

static CUSTOMIZED: AtomicBool = AtomicBool::new(false);
static INSTALLED: RwLock<Option<IterateeFactory>> = parking_lot::const_rwlock(None);

/// Installs `factory` as the process-wide iteratee strategy.
///
/// Every free traversal function and [`cb`](super::cb) will route through it
/// until [`reset_iteratee_factory`] is called.
pub fn set_iteratee_factory(factory: IterateeFactory) {
    *INSTALLED.write() = Some(factory);
    CUSTOMIZED.store(true, Ordering::Release);
    tracing::debug!("custom iteratee factory installed");
}

/// Restores the built-in iteratee strategy.
pub fn reset_iteratee_factory() {
    CUSTOMIZED.store(false, Ordering::Release);
    *INSTALLED.write() = None;
    tracing::debug!("iteratee factory reset to the built-in strategy");
}

/// Returns `true` while a custom factory is installed.
pub fn has_custom_iteratee_factory() -> bool {
    CUSTOMIZED.load(Ordering::Acquire)
}

/// Returns the installed factory, if any. The common case (nothing
/// installed) does not touch the lock.
pub(crate) fn installed_factory() -> Option<IterateeFactory> {
    if has_custom_iteratee_factory() {
        INSTALLED.read().clone()
    } else {
        None
    }
}

static_assertions::assert_impl_all!(IterateeFactory: Send, Sync, Clone);
