//! Per-agent mutable state of a core.
//!
//! Kept apart from the shared [`CompiledGraph`] so the graph can sit behind
//! an `Arc` while each core mutates only its own copy of this struct.

use bg_core::{AgentClock, AgentHandle, AgentRng, ComponentId, TransitionId};

use crate::{CompiledGraph, Status};

pub(crate) struct CoreState {
    pub active:         ComponentId,
    pub statuses:       Vec<Status>,
    /// Agent time at which each transition becomes eligible again.
    pub cooldown_until: Vec<f64>,
    pub clock:          AgentClock,
    pub rng:            AgentRng,
}

impl CoreState {
    pub fn new<H>(graph: &CompiledGraph<H>, agent: AgentHandle, seed: u64) -> Self {
        Self {
            active:         graph.entry(),
            statuses:       vec![Status::Normal; graph.component_count()],
            cooldown_until: vec![f64::NEG_INFINITY; graph.transition_count()],
            clock:          AgentClock::new(),
            rng:            AgentRng::new(seed, agent),
        }
    }

    /// State of a core with nothing bound.
    pub fn empty(agent: AgentHandle, seed: u64) -> Self {
        Self {
            active:         ComponentId::INVALID,
            statuses:       Vec::new(),
            cooldown_until: Vec::new(),
            clock:          AgentClock::new(),
            rng:            AgentRng::new(seed, agent),
        }
    }

    #[inline]
    pub fn cooling(&self, t: TransitionId, now: f64) -> bool {
        now < self.cooldown_until[t.index()]
    }
}
