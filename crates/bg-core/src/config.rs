//! Engine-wide configuration shared by every core created from one pool.

use crate::{BgError, BgResult};

/// Runtime knobs for compiled cores.
///
/// Typically embedded in the application's own configuration and handed to
/// `CorePool::new`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Master RNG seed.  Each core's RNG is derived from this and its agent
    /// handle, so the same seed always reproduces the same rolls.
    pub seed: u64,

    /// How many times control may move on to a freshly entered component and
    /// update it within a single tick.  `0` disables same-tick chaining:
    /// the destination of a firing first runs on the next tick.
    pub max_hops_per_tick: u32,

    /// Record every fired transition in the `TickReport`.  Off saves an
    /// allocation per tick for populations that do not inspect reports.
    pub record_firings: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed:              0,
            max_hops_per_tick: 1,
            record_firings:    true,
        }
    }
}

impl EngineConfig {
    /// Upper bound on `max_hops_per_tick`.  A tick never re-enters a
    /// component, so more hops than components is meaningless.
    pub const MAX_HOPS: u32 = 1024;

    pub fn validate(&self) -> BgResult<()> {
        if self.max_hops_per_tick > Self::MAX_HOPS {
            return Err(BgError::Config(format!(
                "max_hops_per_tick {} exceeds limit {}",
                self.max_hops_per_tick,
                Self::MAX_HOPS
            )));
        }
        Ok(())
    }
}
