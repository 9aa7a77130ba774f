use std::fmt;

use bg_core::ArgKind;
use thiserror::Error;

/// Callable family, used in binding diagnostics.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Family {
    Action,
    Predicate,
    Scalar,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Family::Action    => "action",
            Family::Predicate => "predicate",
            Family::Scalar    => "scalar",
        })
    }
}

/// Failure raised while invoking a host callable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CallError {
    #[error("{0}")]
    Failed(String),

    #[error("callable requires an argument but none was bound")]
    MissingArgument,

    #[error("expected a {expected} argument, got {got}")]
    ArgumentKind { expected: ArgKind, got: ArgKind },

    #[error("object argument is not a `{0}`")]
    ObjectType(&'static str),

    #[error("callable panicked: {0}")]
    Panicked(String),
}

impl CallError {
    /// Host-side failure with a message.
    pub fn failed(msg: impl Into<String>) -> Self {
        CallError::Failed(msg.into())
    }
}

/// Failure to bind a callable name at compile time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error("no {family} named `{name}` is registered")]
    Unresolved { family: Family, name: String },

    #[error("`{name}` takes {expected} argument(s) but {got} were bound")]
    ArityMismatch { name: String, expected: usize, got: usize },

    #[error("`{name}` expects a {expected} argument, got {got}")]
    ArgumentKind { name: String, expected: ArgKind, got: ArgKind },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
