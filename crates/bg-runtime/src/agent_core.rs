//! `BehaviourCore`: one agent's ticking instance of a compiled graph.

use std::sync::Arc;

use bg_core::{AgentClock, AgentHandle, ComponentId, EngineConfig, TransitionId};
use tracing::debug;

use crate::execute::Step;
use crate::state::CoreState;
use crate::{CompiledGraph, ComponentView, RuntimeError, RuntimeResult, Status, TickReport};

/// A compiled graph plus the private runtime state of one agent.
///
/// Exactly one component is active at any time while a graph is bound;
/// a fresh or reset core is active at the entry.  The graph is shared with
/// every other core compiled from the same descriptor; everything that
/// changes while ticking (active pointer, statuses, cooldown expiries,
/// clock, RNG) belongs to this core alone.
///
/// # Tick
///
/// ```text
/// tick(host, delta):
///   ① advance the agent clock by `delta`
///   ② update the active component
///   ③ if its firings moved control, enter the destination and update it
///      too (up to `max_hops_per_tick` times, never re-entering a
///      component already updated this tick)
/// ```
pub struct BehaviourCore<H> {
    agent:  AgentHandle,
    config: EngineConfig,
    graph:  Option<Arc<CompiledGraph<H>>>,
    state:  CoreState,
}

impl<H> BehaviourCore<H> {
    /// A core bound to `graph`, active at its entry.
    pub fn new(graph: Arc<CompiledGraph<H>>, agent: AgentHandle, config: EngineConfig) -> Self {
        let state = CoreState::new(&graph, agent, config.seed);
        Self { agent, config, graph: Some(graph), state }
    }

    /// A core with no graph.  Ticking it fails with
    /// [`RuntimeError::NotCompiled`] until [`bind`](Self::bind) is called.
    pub fn unbound(agent: AgentHandle, config: EngineConfig) -> Self {
        let state = CoreState::empty(agent, config.seed);
        Self { agent, config, graph: None, state }
    }

    /// Swap in a different graph.  All runtime state starts over.
    pub fn bind(&mut self, graph: Arc<CompiledGraph<H>>) {
        self.state = CoreState::new(&graph, self.agent, self.config.seed);
        self.graph = Some(graph);
    }

    /// Drop the bound graph.
    pub fn unbind(&mut self) {
        self.graph = None;
        self.state = CoreState::empty(self.agent, self.config.seed);
    }

    pub fn is_bound(&self) -> bool {
        self.graph.is_some()
    }

    pub fn graph(&self) -> Option<&Arc<CompiledGraph<H>>> {
        self.graph.as_ref()
    }

    pub fn agent(&self) -> AgentHandle {
        self.agent
    }

    pub fn clock(&self) -> &AgentClock {
        &self.state.clock
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Advance agent time by `delta` and run one tick against `host`.
    ///
    /// Host callable failures never fail the tick; they show up as
    /// component statuses.  Errors are returned only when no graph is bound
    /// or `delta` is not a finite, non-negative number, and in both cases
    /// nothing changes.
    pub fn tick(&mut self, host: &mut H, delta: f64) -> RuntimeResult<TickReport> {
        let graph = self
            .graph
            .clone()
            .ok_or(RuntimeError::NotCompiled { agent: self.agent })?;
        self.state.clock.advance(delta)?;

        let agent = self.agent;
        let max_hops = self.config.max_hops_per_tick;
        let started_at = self.state.active;
        let mut updated = Vec::with_capacity(2);
        let mut fired = Vec::new();

        let mut step = Step {
            graph:  &graph,
            host,
            state:  &mut self.state,
            fired:  &mut fired,
            record: self.config.record_firings,
        };

        let mut current = started_at;
        let mut hops = 0;
        loop {
            updated.push(current);
            let Some(next) = step.update(current) else { break };
            if next == current {
                break;
            }
            step.state.active = next;
            debug!(%agent, from = %current, to = %next, "active component changed");
            if hops >= max_hops || updated.contains(&next) {
                break;
            }
            hops += 1;
            current = next;
        }

        Ok(TickReport {
            tick: self.state.clock.current_tick,
            time: self.state.clock.now(),
            started_at,
            ended_at: self.state.active,
            updated,
            fired,
        })
    }

    /// Move control back to the entry.  Takes effect on the next tick; the
    /// previously active component is not notified.  Cooldowns, statuses,
    /// and the clock are kept.
    pub fn reset_to_entry(&mut self) {
        if let Some(graph) = &self.graph {
            debug!(agent = %self.agent, from = %self.state.active, "reset to entry");
            self.state.active = graph.entry();
        }
    }

    // ── Observation ───────────────────────────────────────────────────────

    /// The active component, or `None` when no graph is bound.
    pub fn active(&self) -> Option<ComponentId> {
        self.graph.as_ref().map(|_| self.state.active)
    }

    pub fn is_active(&self, id: ComponentId) -> bool {
        self.graph.is_some() && self.state.active == id
    }

    pub fn status(&self, id: ComponentId) -> Option<Status> {
        self.state.statuses.get(id.index()).copied()
    }

    pub fn active_component(&self) -> Option<ComponentView<'_>> {
        self.active().and_then(|id| self.component(id).ok())
    }

    pub fn component(&self, id: ComponentId) -> RuntimeResult<ComponentView<'_>> {
        let graph = self
            .graph
            .as_ref()
            .ok_or(RuntimeError::NotCompiled { agent: self.agent })?;
        let component = graph
            .get_component(id)
            .ok_or(RuntimeError::UnknownComponent(id))?;
        Ok(ComponentView {
            id,
            label:  &component.label,
            kind:   component.kind.as_str(),
            status: self.state.statuses[id.index()],
            active: self.state.active == id,
        })
    }

    /// Views of every component, in id order.
    pub fn components(&self) -> Vec<ComponentView<'_>> {
        let Some(graph) = &self.graph else { return Vec::new() };
        graph
            .component_ids()
            .filter_map(|id| self.component(id).ok())
            .collect()
    }

    /// Agent time left before `transition` may fire again; `0` when ready.
    pub fn cooldown_remaining(&self, transition: TransitionId) -> Option<f64> {
        let until = *self.state.cooldown_until.get(transition.index())?;
        Some((until - self.state.clock.now()).max(0.0))
    }
}
