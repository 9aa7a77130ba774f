//! What happened during one tick.

use bg_core::{ComponentId, Tick, TransitionId};

/// One transition firing.
#[derive(Clone, Debug, PartialEq)]
pub struct Firing {
    pub transition: TransitionId,
    pub from:       ComponentId,
    pub to:         ComponentId,
    /// The destination ran once and control stayed with `from`.
    pub captured:   bool,
}

/// Summary returned by `BehaviourCore::tick`.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// The tick just completed (1 for the first tick).
    pub tick:       Tick,
    /// Agent time after this tick's advance.
    pub time:       f64,
    /// Active component when the tick began.
    pub started_at: ComponentId,
    /// Active component when the tick ended.
    pub ended_at:   ComponentId,
    /// Components whose update ran, in order.  Captured destinations are
    /// not listed; they appear in `fired`.
    pub updated:    Vec<ComponentId>,
    /// Firings in order.  Empty when `EngineConfig::record_firings` is off.
    pub fired:      Vec<Firing>,
}

impl TickReport {
    /// Whether the active pointer ended somewhere other than where it started.
    #[inline]
    pub fn moved(&self) -> bool {
        self.started_at != self.ended_at
    }
}
