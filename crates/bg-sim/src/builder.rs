//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use bg_core::AgentHandle;
use bg_graph::GraphDescriptor;
use bg_registry::CallableRegistry;
use bg_runtime::CorePool;
use tracing::debug;

use crate::{Host, Sim, SimConfig, SimResult};

/// Fluent builder for [`Sim<H>`].
///
/// Agents get handles `0, 1, 2, …` in spawn order.  Each distinct graph id
/// is compiled once at [`build`](Self::build) time and shared by every agent
/// running it.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, Arc::new(registry))
///     .spawn(&patrol, Guard::at(0))
///     .spawn_many(&wander, (0..100).map(Villager::new))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<H> {
    config:   SimConfig,
    registry: Arc<CallableRegistry<H>>,
    graphs:   Vec<GraphDescriptor>,
    spawns:   Vec<(usize, H)>,
}

impl<H: Host> SimBuilder<H> {
    pub fn new(config: SimConfig, registry: Arc<CallableRegistry<H>>) -> Self {
        Self { config, registry, graphs: Vec::new(), spawns: Vec::new() }
    }

    /// Add one agent running `desc` against `host`.
    pub fn spawn(mut self, desc: &GraphDescriptor, host: H) -> Self {
        let slot = self.graph_slot(desc);
        self.spawns.push((slot, host));
        self
    }

    /// Add one agent per host, all running `desc`.
    pub fn spawn_many(mut self, desc: &GraphDescriptor, hosts: impl IntoIterator<Item = H>) -> Self {
        let slot = self.graph_slot(desc);
        self.spawns.extend(hosts.into_iter().map(|h| (slot, h)));
        self
    }

    /// Number of agents spawned so far.
    pub fn agent_count(&self) -> usize {
        self.spawns.len()
    }

    fn graph_slot(&mut self, desc: &GraphDescriptor) -> usize {
        match self.graphs.iter().position(|g| g.id == desc.id) {
            Some(i) => i,
            None => {
                self.graphs.push(desc.clone());
                self.graphs.len() - 1
            }
        }
    }

    /// Validate the configuration, compile every graph, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<H>> {
        self.config.validate()?;

        let mut pool = CorePool::new(self.registry, self.config.engine.clone())?;
        let mut cores = Vec::with_capacity(self.spawns.len());
        let mut hosts = Vec::with_capacity(self.spawns.len());
        for (i, (slot, host)) in self.spawns.into_iter().enumerate() {
            cores.push(pool.instantiate(&self.graphs[slot], AgentHandle(i as u32))?);
            hosts.push(host);
        }

        #[cfg(feature = "parallel")]
        let threads = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| crate::SimError::Config(e.to_string()))?,
            ),
            None => None,
        };

        debug!(agents = cores.len(), graphs = pool.compile_count(), "simulation built");

        Ok(Sim {
            config: self.config,
            current_tick: bg_core::Tick::ZERO,
            pool,
            cores,
            hosts,
            #[cfg(feature = "parallel")]
            threads,
        })
    }
}
