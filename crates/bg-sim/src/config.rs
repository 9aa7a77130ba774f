//! Population run configuration.

use bg_core::{EngineConfig, Tick};

use crate::{SimError, SimResult};

/// Settings for one [`Sim`](crate::Sim) run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Total ticks to run.
    pub total_ticks: u64,

    /// Agent time added to every core's clock per tick.
    pub tick_duration: f64,

    /// Worker thread count passed to Rayon.  `None` uses the global pool.
    /// Ignored without the `parallel` feature.
    pub num_threads: Option<usize>,

    /// Call `SimObserver::on_snapshot` every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// Settings shared by every core.
    pub engine: EngineConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:             100,
            tick_duration:           1.0,
            num_threads:             None,
            snapshot_interval_ticks: 0,
            engine:                  EngineConfig::default(),
        }
    }
}

impl SimConfig {
    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Whether `tick` is a snapshot tick.
    #[inline]
    pub fn is_snapshot(&self, tick: Tick) -> bool {
        self.snapshot_interval_ticks > 0 && tick.0.is_multiple_of(self.snapshot_interval_ticks)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.tick_duration.is_finite() || self.tick_duration < 0.0 {
            return Err(SimError::Config(format!(
                "tick_duration must be finite and non-negative, got {}",
                self.tick_duration
            )));
        }
        if self.num_threads == Some(0) {
            return Err(SimError::Config("num_threads must be at least 1".into()));
        }
        self.engine
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))
    }
}
