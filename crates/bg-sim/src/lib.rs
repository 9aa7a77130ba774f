//! `bg-sim`: population tick driver for the rust_bg runtime.
//!
//! The runtime itself never spawns threads; this crate is the host-side
//! driver that owns many agents and ticks them together.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Tick   : every core advances by config.tick_duration against its
//!               own host (parallel with the `parallel` feature).
//!   ② Report : for each agent in ascending order:
//!                 observer.on_agent_tick(agent, &report)
//!   ③ Observe: on_tick_end(tick, moved); on_snapshot every N ticks.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the tick phase on Rayon's thread pool.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bg_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), Arc::new(registry))
//!     .spawn_many(&graph, (0..1_000).map(|_| Npc::default()))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;

/// Bound every host type must meet.  With the `parallel` feature hosts are
/// ticked on worker threads and must be `Send`.
#[cfg(feature = "parallel")]
pub trait Host: Send + 'static {}
#[cfg(feature = "parallel")]
impl<T: Send + 'static> Host for T {}

/// Bound every host type must meet.  With the `parallel` feature hosts are
/// ticked on worker threads and must be `Send`.
#[cfg(not(feature = "parallel"))]
pub trait Host: 'static {}
#[cfg(not(feature = "parallel"))]
impl<T: 'static> Host for T {}
