//! `CorePool`: compile once per graph, one core per agent.
//!
//! # Contract
//!
//! - `get_core(desc, agent)` returns the same core for the same
//!   `(desc.id, agent)` pair until that pair is released or its graph is
//!   invalidated.
//! - A graph id is compiled at most once while cached, no matter how many
//!   agents request it.  Descriptors are identified by `id` alone: a second,
//!   different descriptor reusing a cached id gets the cached compilation.
//! - Malformed graphs fail synchronously and nothing is cached for them.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use bg_core::{AgentHandle, EngineConfig, GraphId};
use bg_graph::GraphDescriptor;
use bg_registry::CallableRegistry;
use tracing::debug;

use crate::{BehaviourCore, CompiledGraph, RuntimeResult, compile};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

/// Compiled graphs keyed by id.
struct GraphCache<H> {
    graphs:   Map<GraphId, Arc<CompiledGraph<H>>>,
    compiles: usize,
}

impl<H: 'static> GraphCache<H> {
    fn get_or_compile(
        &mut self,
        desc:     &GraphDescriptor,
        registry: &CallableRegistry<H>,
    ) -> RuntimeResult<Arc<CompiledGraph<H>>> {
        if let Some(graph) = self.graphs.get(&desc.id) {
            return Ok(Arc::clone(graph));
        }
        let graph = Arc::new(compile(desc, registry)?);
        self.compiles += 1;
        self.graphs.insert(desc.id, Arc::clone(&graph));
        Ok(graph)
    }
}

/// Registry/factory of per-agent cores.
pub struct CorePool<H> {
    registry: Arc<CallableRegistry<H>>,
    config:   EngineConfig,
    cache:    GraphCache<H>,
    cores:    Map<(GraphId, AgentHandle), BehaviourCore<H>>,
}

impl<H: 'static> CorePool<H> {
    pub fn new(registry: Arc<CallableRegistry<H>>, config: EngineConfig) -> RuntimeResult<Self> {
        config.validate()?;
        Ok(Self {
            registry,
            config,
            cache: GraphCache { graphs: Map::default(), compiles: 0 },
            cores: Map::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<CallableRegistry<H>> {
        &self.registry
    }

    /// The core for `agent` running `desc`, created on first request.
    pub fn get_core(
        &mut self,
        desc:  &GraphDescriptor,
        agent: AgentHandle,
    ) -> RuntimeResult<&mut BehaviourCore<H>> {
        match self.cores.entry((desc.id, agent)) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => {
                let graph = self.cache.get_or_compile(desc, &self.registry)?;
                debug!(graph = %desc.id, %agent, "core created");
                Ok(v.insert(BehaviourCore::new(graph, agent, self.config.clone())))
            }
        }
    }

    /// The shared compiled form of `desc`, compiling it if needed.
    pub fn compile(&mut self, desc: &GraphDescriptor) -> RuntimeResult<Arc<CompiledGraph<H>>> {
        self.cache.get_or_compile(desc, &self.registry)
    }

    /// A fresh core the pool does not retain.  Shares the cached compiled
    /// graph like any pooled core.
    pub fn instantiate(
        &mut self,
        desc:  &GraphDescriptor,
        agent: AgentHandle,
    ) -> RuntimeResult<BehaviourCore<H>> {
        let graph = self.compile(desc)?;
        Ok(BehaviourCore::new(graph, agent, self.config.clone()))
    }

    /// The retained core for `(graph, agent)`, if any.
    pub fn core(&self, graph: GraphId, agent: AgentHandle) -> Option<&BehaviourCore<H>> {
        self.cores.get(&(graph, agent))
    }

    pub fn core_mut(&mut self, graph: GraphId, agent: AgentHandle) -> Option<&mut BehaviourCore<H>> {
        self.cores.get_mut(&(graph, agent))
    }

    /// Forget a compiled graph and every retained core running it.  The
    /// next request recompiles.  Returns how many cores were dropped.
    pub fn invalidate_graph(&mut self, graph: GraphId) -> usize {
        self.cache.graphs.remove(&graph);
        let before = self.cores.len();
        self.cores.retain(|(g, _), _| *g != graph);
        let dropped = before - self.cores.len();
        debug!(%graph, dropped, "graph invalidated");
        dropped
    }

    /// Drop every retained core of `agent`, e.g. on agent destruction.
    pub fn release_agent(&mut self, agent: AgentHandle) -> usize {
        let before = self.cores.len();
        self.cores.retain(|(_, a), _| *a != agent);
        before - self.cores.len()
    }

    /// Number of compilations performed so far.
    pub fn compile_count(&self) -> usize {
        self.cache.compiles
    }

    /// Number of retained cores.
    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }
}
