use bg_core::AgentHandle;
use bg_runtime::RuntimeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("no agent {0} in this simulation")]
    UnknownAgent(AgentHandle),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type SimResult<T> = Result<T, SimError>;
