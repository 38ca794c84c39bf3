//! # utilbelt
//!
//! Collection helpers over loosely shaped data.
//!
//! ## Overview
//!
//! The crate works on a dynamic [`Value`]: primitives, plain objects with
//! ordered keys and optional prototypes, arrays, argument lists, boxed
//! primitives and native functions. On top of it:
//!
//! - **Iteratees**: one normalization step turning "nothing", a function, a
//!   key or path, or a partial-match spec into a [`Callback`](iteratee::Callback)
//! - **Traversals**: `for_each`, `map`, `filter`, `find`, `find_index`, `find_key`
//! - **Shape predicates**: array-likeness, class tests, key enumeration
//! - **Array utilities**: `flatten`, `range`, `first`, `initial`, `to_array`
//! - **Combinators**: `identity`, `constant`, `noop`, `key_in_obj`
//!
//! Nullish or oddly shaped input never fails: it degrades to an empty result
//! or [`Value::Undefined`]. Callback failures propagate as [`Error::Thrown`].
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Value`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use utilbelt::prelude::*;
//!
//! let stooges = array![
//!     object! { "name" => "moe", "age" => 40 },
//!     object! { "name" => "larry", "age" => 50 },
//!     object! { "name" => "curly", "age" => 60 },
//! ];
//!
//! let names = map(&stooges, "name", None).unwrap();
//! assert_eq!(names, vec![Value::from("moe"), Value::from("larry"), Value::from("curly")]);
//!
//! let fifty = find(&stooges, object! { "age" => 50 }, None).unwrap();
//! assert_eq!(fifty.map(|stooge| stooge.get("name")), Some(Value::from("larry")));
//!
//! assert_eq!(flatten(&array![1, array![2, array![3]]], false).len(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the value model, the macros and every helper function.
///
/// # Usage
///
/// ```rust
/// use utilbelt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::array::*;
    pub use crate::combinator::*;
    pub use crate::error::{Error, Result};
    pub use crate::iteratee::*;
    pub use crate::shape::*;
    pub use crate::traversal::*;
    pub use crate::value::{
        ClassTag, Function, Invocation, MAX_ARRAY_LENGTH, MAX_DENSE_LENGTH, Object, Primitive,
        PropertyKey, Value,
    };
    pub use crate::{array, object};
}

pub mod array;
pub mod combinator;
pub mod error;
pub mod iteratee;
pub mod shape;
pub mod traversal;
pub mod value;

pub use error::{Error, Result};
pub use value::{Function, Value};
