//! `bg-registry`: the callable registry behaviour graphs bind against.
//!
//! Graph nodes refer to host logic by name.  The registry maps those names to
//! closures over a host type `H` (the agent object), in three families:
//!
//! | Family     | Signature                                      | Used by                    |
//! |------------|------------------------------------------------|----------------------------|
//! | action     | `Fn(&mut H[, T]) -> Result<(), CallError>`     | Action nodes               |
//! | predicate  | `Fn(&mut H[, T]) -> Result<bool, CallError>`   | Condition, Loop, guards    |
//! | scalar     | `Fn(&mut H[, T]) -> Result<f64, CallError>`    | Utility curves             |
//!
//! `T` is one of `bool`, `i64`, `f64`, `String` (type-specialized) or
//! [`Object<T>`] (generic downcast path).
//!
//! Names are resolved once, when a graph is compiled, into [`Bound`] values
//! that carry the closure and its argument.  Invoking a bound callable never
//! panics: host panics are caught and reported as [`CallError::Panicked`].
//!
//! ```rust
//! use bg_registry::{CallableRegistry, CallError};
//!
//! struct Guard { alert: bool, steps: u32 }
//!
//! let mut registry = CallableRegistry::<Guard>::new();
//! registry
//!     .action0("patrol", |g| { g.steps += 1; Ok(()) })
//!     .predicate0("alert", |g| Ok(g.alert))
//!     .action1("walk", |g, n: i64| {
//!         g.steps += u32::try_from(n).map_err(|e| CallError::failed(e.to_string()))?;
//!         Ok(())
//!     });
//!
//! let walk = registry.bind_action("walk", Some(&3_i64.into())).unwrap();
//! let mut guard = Guard { alert: false, steps: 0 };
//! walk.invoke(&mut guard).unwrap();
//! assert_eq!(guard.steps, 3);
//! ```

pub mod callable;
pub mod error;
pub mod param;
pub mod registry;

#[cfg(test)]
mod tests;

pub use callable::{Arity, Bound, BoundAction, BoundPredicate, BoundScalar, Callable};
pub use error::{CallError, Family, RegistryError, RegistryResult};
pub use param::{Object, Param};
pub use registry::CallableRegistry;
