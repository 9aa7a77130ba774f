//! Descriptor types.
//!
//! A descriptor is plain data: node and transition lists in declaration
//! order.  Transition order matters: within one group, transitions are
//! evaluated in the order they appear in [`GraphDescriptor::transitions`].

use std::fmt;

use bg_core::{Arg, GraphId};

use crate::ResponseCurve;

/// Author-side key of a node, unique within one descriptor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeKey(pub u32);

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A callable reference: registry name plus optional argument.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallSpec {
    pub name: String,
    pub arg:  Option<Arg>,
}

impl CallSpec {
    /// Zero-argument call.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), arg: None }
    }

    /// One-argument call.
    pub fn with_arg(name: impl Into<String>, arg: impl Into<Arg>) -> Self {
        Self { name: name.into(), arg: Some(arg.into()) }
    }
}

/// Optional predicate gating a transition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardSpec {
    pub call:    CallSpec,
    pub reverse: bool,
}

/// One curve of a utility node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveDescriptor {
    pub name:     String,
    pub call:     CallSpec,
    /// Shaping applied to the raw scalar before comparison.
    pub response: ResponseCurve,
    /// Optional `[lo, hi]` clamp applied after `response`.
    pub clamp:    Option<(f64, f64)>,
}

impl CurveDescriptor {
    pub fn new(name: impl Into<String>, call: CallSpec) -> Self {
        Self {
            name: name.into(),
            call,
            response: ResponseCurve::Identity,
            clamp: None,
        }
    }

    pub fn response(mut self, response: ResponseCurve) -> Self {
        self.response = response;
        self
    }

    pub fn clamp(mut self, lo: f64, hi: f64) -> Self {
        self.clamp = Some((lo, hi));
        self
    }
}

/// What a node does when it is updated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Entry,
    Action(CallSpec),
    Condition { call: CallSpec, reverse: bool },
    Loop { call: CallSpec, reverse: bool },
    Utility { curves: Vec<CurveDescriptor> },
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Entry            => "entry",
            NodeKind::Action(_)        => "action",
            NodeKind::Condition { .. } => "condition",
            NodeKind::Loop { .. }      => "loop",
            NodeKind::Utility { .. }   => "utility",
        }
    }

    /// Whether a transition tagged `group` may leave a node of this kind.
    pub fn accepts(&self, group: GroupTag) -> bool {
        match (self, group) {
            (NodeKind::Entry | NodeKind::Action(_), GroupTag::Out) => true,
            (NodeKind::Condition { .. }, GroupTag::IfTrue | GroupTag::IfFalse) => true,
            (NodeKind::Loop { .. }, GroupTag::While | GroupTag::End) => true,
            (NodeKind::Utility { curves }, GroupTag::Curve(i)) => usize::from(i) < curves.len(),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeDescriptor {
    pub key:   NodeKey,
    /// Author-assigned id.  Not required to be unique.
    pub label: String,
    pub kind:  NodeKind,
}

/// The outgoing group of its origin node a transition belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupTag {
    /// The single ungrouped list of Entry and Action nodes.
    Out,
    IfTrue,
    IfFalse,
    While,
    End,
    /// Group of the utility curve at this declaration index.
    Curve(u16),
}

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupTag::Out      => f.write_str("out"),
            GroupTag::IfTrue   => f.write_str("if-true"),
            GroupTag::IfFalse  => f.write_str("if-false"),
            GroupTag::While    => f.write_str("while"),
            GroupTag::End      => f.write_str("end"),
            GroupTag::Curve(i) => write!(f, "curve[{i}]"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionDescriptor {
    pub from:            NodeKey,
    pub to:              NodeKey,
    pub group:           GroupTag,
    /// Percent bounds `(min, max)` in `[0, 100]`.
    pub probability:     (f64, f64),
    /// Agent-time bounds `(min, max)`.
    pub cooldown:        (f64, f64),
    pub terminate:       bool,
    pub capture_control: bool,
    pub guard:           Option<GuardSpec>,
}

/// A complete, immutable graph description.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphDescriptor {
    pub id:          GraphId,
    pub name:        String,
    pub nodes:       Vec<NodeDescriptor>,
    pub transitions: Vec<TransitionDescriptor>,
}

impl GraphDescriptor {
    pub fn node(&self, key: NodeKey) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|n| n.key == key)
    }

    /// The entry node, if exactly one exists.
    pub fn entry(&self) -> Option<&NodeDescriptor> {
        let mut entries = self.nodes.iter().filter(|n| matches!(n.kind, NodeKind::Entry));
        match (entries.next(), entries.next()) {
            (Some(e), None) => Some(e),
            _ => None,
        }
    }
}
