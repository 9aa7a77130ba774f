//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `BgError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The base error type for `bg-core` and a common variant for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BgError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid time step {0}: must be finite and non-negative")]
    InvalidDelta(f64),
}

/// Shorthand result type for `bg-core`.
pub type BgResult<T> = Result<T, BgError>;
