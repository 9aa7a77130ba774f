//! `bg-graph`: the graph description a behaviour core is compiled from.
//!
//! Editing and persisting graphs happens elsewhere; this crate only defines
//! the immutable in-memory form handed to the runtime, a builder for
//! assembling it in code, and the structural checks that reject malformed
//! graphs before compilation.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`descriptor`] | `GraphDescriptor`, `NodeDescriptor`, `TransitionDescriptor`, …  |
//! | [`curve`]      | `ResponseCurve`: utility response shaping                       |
//! | [`builder`]    | `GraphBuilder`, `TransitionSpec`                                |
//! | [`validate`]   | `validate(&GraphDescriptor)`                                    |
//! | [`error`]      | `GraphError`, `GraphResult<T>`                                  |

pub mod builder;
pub mod curve;
pub mod descriptor;
pub mod error;
pub mod validate;

#[cfg(test)]
mod tests;

pub use builder::{GraphBuilder, TransitionSpec};
pub use curve::ResponseCurve;
pub use descriptor::{
    CallSpec, CurveDescriptor, GraphDescriptor, GroupTag, GuardSpec, NodeDescriptor, NodeKey,
    NodeKind, TransitionDescriptor,
};
pub use error::{GraphError, GraphResult};
pub use validate::validate;
