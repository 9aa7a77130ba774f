//! Compiled components.
//!
//! A component owns its outgoing transition groups as lists of
//! [`TransitionId`]s into the graph's transition arena, in declaration
//! order.  Destinations are [`ComponentId`] handles, so cyclic graphs need
//! no shared ownership.

use bg_core::TransitionId;
use bg_graph::ResponseCurve;
use bg_registry::{BoundAction, BoundPredicate, BoundScalar};

use crate::Binding;

/// One scored option of a utility component.
pub struct Curve<H> {
    pub name:     String,
    pub score:    Binding<BoundScalar<H>>,
    pub response: ResponseCurve,
    pub clamp:    Option<(f64, f64)>,
    pub group:    Vec<TransitionId>,
}

pub enum ComponentKind<H> {
    Entry {
        out: Vec<TransitionId>,
    },
    Action {
        call: Binding<BoundAction<H>>,
        out:  Vec<TransitionId>,
    },
    Condition {
        test:     Binding<BoundPredicate<H>>,
        reverse:  bool,
        if_true:  Vec<TransitionId>,
        if_false: Vec<TransitionId>,
    },
    Loop {
        test:        Binding<BoundPredicate<H>>,
        reverse:     bool,
        while_group: Vec<TransitionId>,
        end_group:   Vec<TransitionId>,
    },
    Utility {
        curves: Vec<Curve<H>>,
    },
}

impl<H> ComponentKind<H> {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Entry { .. }     => "entry",
            ComponentKind::Action { .. }    => "action",
            ComponentKind::Condition { .. } => "condition",
            ComponentKind::Loop { .. }      => "loop",
            ComponentKind::Utility { .. }   => "utility",
        }
    }
}

/// What a component's own execution produced, deciding which group is
/// evaluated next.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Entry and Action: their single group.
    Pass,
    /// Condition and Loop, after `reverse`.
    Branch(bool),
    /// Utility: index of the winning curve, `None` when no curve scored.
    Winner(Option<usize>),
}

/// A node of the compiled graph.
pub struct Component<H> {
    /// Author-assigned id.  May collide with other components' labels.
    pub label: String,
    pub kind:  ComponentKind<H>,
}

impl<H> Component<H> {
    /// The transition group selected by `outcome`.  Empty when the outcome
    /// does not match this kind.
    pub fn group(&self, outcome: Outcome) -> &[TransitionId] {
        match (&self.kind, outcome) {
            (ComponentKind::Entry { out }, Outcome::Pass)
            | (ComponentKind::Action { out, .. }, Outcome::Pass) => out,
            (ComponentKind::Condition { if_true, .. }, Outcome::Branch(true)) => if_true,
            (ComponentKind::Condition { if_false, .. }, Outcome::Branch(false)) => if_false,
            (ComponentKind::Loop { while_group, .. }, Outcome::Branch(true)) => while_group,
            (ComponentKind::Loop { end_group, .. }, Outcome::Branch(false)) => end_group,
            (ComponentKind::Utility { curves }, Outcome::Winner(Some(i))) => {
                curves.get(i).map(|c| c.group.as_slice()).unwrap_or(&[])
            }
            _ => &[],
        }
    }

    /// Every outgoing transition, in group order.
    pub fn outgoing(&self) -> Vec<TransitionId> {
        match &self.kind {
            ComponentKind::Entry { out } | ComponentKind::Action { out, .. } => out.clone(),
            ComponentKind::Condition { if_true, if_false, .. } => {
                if_true.iter().chain(if_false).copied().collect()
            }
            ComponentKind::Loop { while_group, end_group, .. } => {
                while_group.iter().chain(end_group).copied().collect()
            }
            ComponentKind::Utility { curves } => {
                curves.iter().flat_map(|c| c.group.iter().copied()).collect()
            }
        }
    }
}
