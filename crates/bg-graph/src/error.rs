use thiserror::Error;

use crate::{GroupTag, NodeKey};

/// A structural defect that makes a graph impossible to compile.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("graph has no entry node")]
    NoEntry,

    #[error("graph has {0} entry nodes, expected exactly one")]
    MultipleEntries(usize),

    #[error("node key {0} is declared more than once")]
    DuplicateNode(NodeKey),

    #[error("transition #{transition} references unknown node {node}")]
    UnknownNode { transition: usize, node: NodeKey },

    #[error("transition #{transition} uses group {group} which a {kind} node does not have")]
    IllegalGroup { transition: usize, group: GroupTag, kind: &'static str },

    #[error("transition #{transition} has invalid probability range [{min}, {max}]")]
    Probability { transition: usize, min: f64, max: f64 },

    #[error("transition #{transition} has invalid cooldown range [{min}, {max}]")]
    Cooldown { transition: usize, min: f64, max: f64 },

    #[error("curve `{curve}` of node {node} is invalid: {reason}")]
    Curve { node: NodeKey, curve: String, reason: String },
}

pub type GraphResult<T> = Result<T, GraphError>;
