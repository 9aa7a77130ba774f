//! Deterministic per-agent RNG.
//!
//! # Determinism strategy
//!
//! Each core gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_handle * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive handles uniformly across the seed space.
//! Cores never share RNG state, so probability rolls of one agent never
//! depend on how often another agent was ticked.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentHandle;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-agent deterministic RNG.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent handle.
    pub fn new(global_seed: u64, agent: AgentHandle) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw in `[0, 100)`.
    #[inline]
    pub fn percent(&mut self) -> f64 {
        self.0.gen_range(0.0..100.0)
    }

    /// Uniform draw in `[min, max]`.  Returns `min` without consuming
    /// randomness when the range is degenerate.
    #[inline]
    pub fn uniform_inclusive(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.0.gen_range(min..=max)
    }
}
