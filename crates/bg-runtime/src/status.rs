//! Observable per-component state.

use std::fmt;

use bg_core::ComponentId;

/// Health of a component's last execution.  Purely observational: a
/// component in `Error` keeps taking part in evaluation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Status {
    #[default]
    Normal,
    /// Executed, but a guard on one of its transitions could not be evaluated.
    Warning,
    /// Its own callable was unresolved, failed, or panicked.
    Error,
}

impl Status {
    /// The more severe of the two.
    #[inline]
    pub fn escalate(self, other: Status) -> Status {
        self.max(other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Normal  => "normal",
            Status::Warning => "warning",
            Status::Error   => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of one component, for debugging overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentView<'a> {
    pub id:     ComponentId,
    pub label:  &'a str,
    pub kind:   &'static str,
    pub status: Status,
    pub active: bool,
}
