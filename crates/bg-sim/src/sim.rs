//! The `Sim` struct and its tick loop.

use bg_core::{AgentHandle, Tick};
use bg_graph::GraphDescriptor;
use bg_runtime::{BehaviourCore, CorePool, RuntimeResult, TickReport};
use tracing::{debug, info, warn};

use crate::{Host, SimConfig, SimError, SimObserver, SimResult};

/// A population of agents, each with its own host object and behaviour core.
///
/// Per tick:
///
/// 1. **Tick phase** (optionally parallel with the `parallel` feature): every
///    core advances by `config.tick_duration` against its own host.  Cores
///    share compiled graphs but no mutable state, so this phase has no
///    cross-agent effects.
/// 2. **Report phase** (sequential, ascending agent order): reports are
///    handed to the observer, so observers see the same sequence whether or
///    not the tick phase ran in parallel.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<H> {
    /// Run configuration.
    pub config: SimConfig,

    /// The next tick to run.
    pub current_tick: Tick,

    pub(crate) pool:  CorePool<H>,
    pub(crate) cores: Vec<BehaviourCore<H>>,
    pub(crate) hosts: Vec<H>,

    #[cfg(feature = "parallel")]
    pub(crate) threads: Option<rayon::ThreadPool>,
}

impl<H: Host> Sim<H> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// A core error (only possible for a core unbound through
    /// [`core_mut`](Self::core_mut)) stops the run after the failing tick
    /// completes: every other agent is ticked and observed, `on_tick_end`
    /// fires, `current_tick` advances, and the first error is returned.
    pub fn run<O: SimObserver<H>>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.current_tick);
        info!(ticks = self.current_tick.0, agents = self.cores.len(), "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver<H>>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    pub fn agent_count(&self) -> usize {
        self.cores.len()
    }

    pub fn host(&self, agent: AgentHandle) -> Option<&H> {
        self.hosts.get(agent.index())
    }

    pub fn host_mut(&mut self, agent: AgentHandle) -> Option<&mut H> {
        self.hosts.get_mut(agent.index())
    }

    pub fn hosts(&self) -> &[H] {
        &self.hosts
    }

    pub fn core(&self, agent: AgentHandle) -> Option<&BehaviourCore<H>> {
        self.cores.get(agent.index())
    }

    pub fn core_mut(&mut self, agent: AgentHandle) -> Option<&mut BehaviourCore<H>> {
        self.cores.get_mut(agent.index())
    }

    pub fn cores(&self) -> &[BehaviourCore<H>] {
        &self.cores
    }

    /// Send `agent` back to its graph's entry on its next tick.
    pub fn reset_agent(&mut self, agent: AgentHandle) -> SimResult<()> {
        self.core_mut(agent)
            .ok_or(SimError::UnknownAgent(agent))?
            .reset_to_entry();
        Ok(())
    }

    /// Switch `agent` to a different graph.  The graph is compiled through
    /// the shared cache; the agent's runtime state starts over.
    pub fn swap_graph(&mut self, agent: AgentHandle, desc: &GraphDescriptor) -> SimResult<()> {
        if agent.index() >= self.cores.len() {
            return Err(SimError::UnknownAgent(agent));
        }
        let graph = self.pool.compile(desc)?;
        self.cores[agent.index()].bind(graph);
        debug!(%agent, graph = %desc.id, "behaviour swapped");
        Ok(())
    }

    /// Number of graph compilations performed for this population.
    pub fn compile_count(&self) -> usize {
        self.pool.compile_count()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver<H>>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.current_tick;
        observer.on_tick_start(now);

        let reports = self.tick_cores();
        let mut moved = 0;
        let mut first_err = None;
        for (i, report) in reports.into_iter().enumerate() {
            let agent = AgentHandle(i as u32);
            match report {
                Ok(report) => {
                    moved += usize::from(report.moved());
                    observer.on_agent_tick(agent, &report);
                }
                Err(err) => {
                    warn!(%agent, tick = %now, %err, "agent tick failed");
                    first_err.get_or_insert(err);
                }
            }
        }

        observer.on_tick_end(now, moved);
        if self.config.is_snapshot(now) {
            observer.on_snapshot(now, &self.cores, &self.hosts);
        }
        self.current_tick = now + 1;
        match first_err {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Tick every core once.  Reports come back in agent order.
    fn tick_cores(&mut self) -> Vec<RuntimeResult<TickReport>> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let delta = self.config.tick_duration;
        let cores = &mut self.cores;
        let hosts = &mut self.hosts;

        #[cfg(not(feature = "parallel"))]
        {
            cores
                .iter_mut()
                .zip(hosts.iter_mut())
                .map(|(core, host)| core.tick(host, delta))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let mut run = || -> Vec<RuntimeResult<TickReport>> {
                cores
                    .par_iter_mut()
                    .zip(hosts.par_iter_mut())
                    .map(|(core, host)| core.tick(host, delta))
                    .collect()
            };
            match &self.threads {
                Some(pool) => pool.install(run),
                None => run(),
            }
        }
    }
}
