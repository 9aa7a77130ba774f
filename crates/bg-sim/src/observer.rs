//! Simulation observer trait for progress reporting and data collection.

use bg_core::{AgentHandle, Tick};
use bg_runtime::{BehaviourCore, TickReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Agent callbacks arrive in ascending agent
/// order whether or not the tick ran in parallel.
///
/// # Example: transition counter
///
/// ```rust,ignore
/// struct MoveCounter { moves: usize }
///
/// impl<H> SimObserver<H> for MoveCounter {
///     fn on_tick_end(&mut self, _tick: Tick, moved: usize) {
///         self.moves += moved;
///     }
/// }
/// ```
pub trait SimObserver<H> {
    /// Called at the very start of each tick, before any core runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per agent with the report of its core's tick.
    fn on_agent_tick(&mut self, _agent: AgentHandle, _report: &TickReport) {}

    /// Called at the end of each tick.
    ///
    /// `moved` is the number of agents whose active component changed.
    fn on_tick_end(&mut self, _tick: Tick, _moved: usize) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks) with read-only access to every core and host, indexed by agent.
    fn on_snapshot(&mut self, _tick: Tick, _cores: &[BehaviourCore<H>], _hosts: &[H]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl<H> SimObserver<H> for NoopObserver {}
