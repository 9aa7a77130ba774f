//! Fluent construction of a [`GraphDescriptor`].
//!
//! # Usage
//!
//! ```rust
//! use bg_core::GraphId;
//! use bg_graph::{CallSpec, GraphBuilder, TransitionSpec};
//!
//! let mut b = GraphBuilder::new(GraphId(1), "sentry");
//! let entry = b.entry();
//! let look  = b.condition("enemy?", CallSpec::new("sees_enemy"), false);
//! let fight = b.action("fight", CallSpec::new("attack"));
//! let idle  = b.action("idle", CallSpec::new("idle"));
//!
//! b.connect(entry, look, TransitionSpec::new());
//! b.on_true(look, fight, TransitionSpec::new());
//! b.on_false(look, idle, TransitionSpec::new().cooldown(1.0, 2.0));
//! b.connect(fight, look, TransitionSpec::new());
//! b.connect(idle, look, TransitionSpec::new());
//!
//! let graph = b.build().unwrap();
//! assert_eq!(graph.nodes.len(), 4);
//! assert_eq!(graph.transitions.len(), 5);
//! ```

use bg_core::GraphId;

use crate::{
    CallSpec, CurveDescriptor, GraphDescriptor, GraphResult, GroupTag, GuardSpec, NodeDescriptor,
    NodeKey, NodeKind, TransitionDescriptor, validate,
};

// ── TransitionSpec ────────────────────────────────────────────────────────────

/// Transition parameters, independent of endpoints.
///
/// Defaults: always fires (`probability = (100, 100)`), no cooldown,
/// `terminate = true`, no capture, no guard.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionSpec {
    probability:     (f64, f64),
    cooldown:        (f64, f64),
    terminate:       bool,
    capture_control: bool,
    guard:           Option<GuardSpec>,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            probability:     (100.0, 100.0),
            cooldown:        (0.0, 0.0),
            terminate:       true,
            capture_control: false,
            guard:           None,
        }
    }
}

impl TransitionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percent range the per-evaluation threshold is drawn from.
    pub fn probability(mut self, min: f64, max: f64) -> Self {
        self.probability = (min, max);
        self
    }

    /// Fixed percent chance.
    pub fn chance(self, percent: f64) -> Self {
        self.probability(percent, percent)
    }

    pub fn cooldown(mut self, min: f64, max: f64) -> Self {
        self.cooldown = (min, max);
        self
    }

    pub fn terminate(mut self, terminate: bool) -> Self {
        self.terminate = terminate;
        self
    }

    pub fn capture_control(mut self) -> Self {
        self.capture_control = true;
        self
    }

    pub fn guard(mut self, call: CallSpec, reverse: bool) -> Self {
        self.guard = Some(GuardSpec { call, reverse });
        self
    }

    fn into_descriptor(self, from: NodeKey, group: GroupTag, to: NodeKey) -> TransitionDescriptor {
        TransitionDescriptor {
            from,
            to,
            group,
            probability:     self.probability,
            cooldown:        self.cooldown,
            terminate:       self.terminate,
            capture_control: self.capture_control,
            guard:           self.guard,
        }
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Incrementally assembles nodes and transitions, assigning sequential
/// [`NodeKey`]s.  [`build`](Self::build) validates the result.
pub struct GraphBuilder {
    id:          GraphId,
    name:        String,
    nodes:       Vec<NodeDescriptor>,
    transitions: Vec<TransitionDescriptor>,
}

impl GraphBuilder {
    pub fn new(id: GraphId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            nodes: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Add a node of any kind.
    pub fn node(&mut self, label: impl Into<String>, kind: NodeKind) -> NodeKey {
        let key = NodeKey(self.nodes.len() as u32);
        self.nodes.push(NodeDescriptor { key, label: label.into(), kind });
        key
    }

    pub fn entry(&mut self) -> NodeKey {
        self.node("entry", NodeKind::Entry)
    }

    pub fn action(&mut self, label: impl Into<String>, call: CallSpec) -> NodeKey {
        self.node(label, NodeKind::Action(call))
    }

    pub fn condition(&mut self, label: impl Into<String>, call: CallSpec, reverse: bool) -> NodeKey {
        self.node(label, NodeKind::Condition { call, reverse })
    }

    pub fn looping(&mut self, label: impl Into<String>, call: CallSpec, reverse: bool) -> NodeKey {
        self.node(label, NodeKind::Loop { call, reverse })
    }

    pub fn utility(&mut self, label: impl Into<String>, curves: Vec<CurveDescriptor>) -> NodeKey {
        self.node(label, NodeKind::Utility { curves })
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Add a transition in an explicit group.
    pub fn transition(&mut self, from: NodeKey, group: GroupTag, to: NodeKey, spec: TransitionSpec) -> &mut Self {
        self.transitions.push(spec.into_descriptor(from, group, to));
        self
    }

    /// Ungrouped transition out of an Entry or Action node.
    pub fn connect(&mut self, from: NodeKey, to: NodeKey, spec: TransitionSpec) -> &mut Self {
        self.transition(from, GroupTag::Out, to, spec)
    }

    pub fn on_true(&mut self, condition: NodeKey, to: NodeKey, spec: TransitionSpec) -> &mut Self {
        self.transition(condition, GroupTag::IfTrue, to, spec)
    }

    pub fn on_false(&mut self, condition: NodeKey, to: NodeKey, spec: TransitionSpec) -> &mut Self {
        self.transition(condition, GroupTag::IfFalse, to, spec)
    }

    pub fn on_while(&mut self, looping: NodeKey, to: NodeKey, spec: TransitionSpec) -> &mut Self {
        self.transition(looping, GroupTag::While, to, spec)
    }

    pub fn on_end(&mut self, looping: NodeKey, to: NodeKey, spec: TransitionSpec) -> &mut Self {
        self.transition(looping, GroupTag::End, to, spec)
    }

    pub fn on_curve(&mut self, utility: NodeKey, curve: u16, to: NodeKey, spec: TransitionSpec) -> &mut Self {
        self.transition(utility, GroupTag::Curve(curve), to, spec)
    }

    // ── Finish ────────────────────────────────────────────────────────────

    /// The descriptor as built, without validation.
    pub fn finish(self) -> GraphDescriptor {
        GraphDescriptor {
            id:          self.id,
            name:        self.name,
            nodes:       self.nodes,
            transitions: self.transitions,
        }
    }

    /// Validate and return the descriptor.
    pub fn build(self) -> GraphResult<GraphDescriptor> {
        let graph = self.finish();
        validate(&graph)?;
        Ok(graph)
    }
}
