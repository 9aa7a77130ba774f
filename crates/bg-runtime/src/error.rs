use bg_core::{AgentHandle, BgError, ComponentId};
use bg_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// The graph is malformed; no core is produced.
    #[error("malformed graph: {0}")]
    Graph(#[from] GraphError),

    /// `tick` on a core with no compiled graph bound.
    #[error("core for {agent} has no compiled graph bound")]
    NotCompiled { agent: AgentHandle },

    #[error("component {0} does not exist in this graph")]
    UnknownComponent(ComponentId),

    #[error(transparent)]
    Core(#[from] BgError),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
