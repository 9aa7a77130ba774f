//! Agent time model.
//!
//! # Design
//!
//! Every core keeps its own `AgentClock`.  The host advances it by an
//! arbitrary `delta` (in whatever unit the host uses, typically seconds) on
//! each tick, and cooldowns are measured against the accumulated
//! `elapsed` value.  Pacing therefore depends on how much agent time has
//! passed, never on how many ticks were executed.
//!
//! `Tick` counts update calls and exists for reporting only.

use std::fmt;

use crate::{BgError, BgResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Number of completed `tick` calls on one core.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── AgentClock ────────────────────────────────────────────────────────────────

/// Per-agent elapsed time and tick counter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentClock {
    /// Agent time accumulated across all ticks.
    pub elapsed: f64,
    /// Ticks executed so far.
    pub current_tick: Tick,
}

impl AgentClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` units of agent time and count one tick.
    ///
    /// Rejects negative, NaN, and infinite deltas; the clock is left
    /// unchanged in that case.
    pub fn advance(&mut self, delta: f64) -> BgResult<()> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(BgError::InvalidDelta(delta));
        }
        self.elapsed += delta;
        self.current_tick = self.current_tick + 1;
        Ok(())
    }

    /// Current agent time.
    #[inline]
    pub fn now(&self) -> f64 {
        self.elapsed
    }
}

impl fmt::Display for AgentClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t={:.3})", self.current_tick, self.elapsed)
    }
}
