//! `bg-core`: foundational types for the `rust_bg` behaviour-graph runtime.
//!
//! This crate is a dependency of every other `bg-*` crate.  It has no `bg-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `ComponentId`, `TransitionId`, `GraphId`, `AgentHandle`    |
//! | [`time`]   | `Tick`, `AgentClock`                                       |
//! | [`rng`]    | `AgentRng` (per-agent, deterministic)                      |
//! | [`arg`]    | `Arg`, `ArgKind`: bound argument of a one-parameter call  |
//! | [`config`] | `EngineConfig`                                             |
//! | [`error`]  | `BgError`, `BgResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Arg`, and config.   |

pub mod arg;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arg::{Arg, ArgKind};
pub use config::EngineConfig;
pub use error::{BgError, BgResult};
pub use ids::{AgentHandle, ComponentId, GraphId, TransitionId};
pub use rng::AgentRng;
pub use time::{AgentClock, Tick};
