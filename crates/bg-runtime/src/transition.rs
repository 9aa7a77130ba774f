//! Compiled transitions.

use bg_core::{ComponentId, TransitionId};
use bg_graph::GroupTag;
use bg_registry::{BoundPredicate, RegistryError};

/// A resolved callable, or the reason it could not be resolved.
pub type Binding<B> = Result<B, RegistryError>;

/// Closed range `[min, max]` a value is drawn from uniformly.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Optional predicate a transition additionally requires.
pub struct Guard<H> {
    pub test:    Binding<BoundPredicate<H>>,
    pub reverse: bool,
}

/// A directed, probabilistic, cooldown-gated edge.
///
/// Topology is immutable after compilation; the only state that changes
/// while ticking is the cooldown expiry, which lives in the owning core.
pub struct Transition<H> {
    pub id:              TransitionId,
    pub from:            ComponentId,
    pub to:              ComponentId,
    pub group:           GroupTag,
    /// Percent.
    pub probability:     Span,
    /// Agent time.
    pub cooldown:        Span,
    pub terminate:       bool,
    pub capture_control: bool,
    pub guard:           Option<Guard<H>>,
}
