//! Argument values bound to one-parameter callables.
//!
//! A graph node names a callable and, for one-parameter callables, the value
//! to pass.  The four scalar kinds have type-specialized call paths in the
//! registry; anything else travels as an `Object` and is downcast by the
//! callable itself.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The kind of an [`Arg`], used for arity/type checks at bind time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArgKind {
    Bool,
    Int,
    Float,
    Str,
    Object,
}

impl ArgKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArgKind::Bool   => "bool",
            ArgKind::Int    => "int",
            ArgKind::Float  => "float",
            ArgKind::Str    => "string",
            ArgKind::Object => "object",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bound argument value.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arg {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Generic slow path.  Not serializable.
    #[cfg_attr(feature = "serde", serde(skip))]
    Object(Arc<dyn Any + Send + Sync>),
}

impl Arg {
    /// Wrap an arbitrary value for the generic object path.
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Arg::Object(Arc::new(value))
    }

    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Bool(_)   => ArgKind::Bool,
            Arg::Int(_)    => ArgKind::Int,
            Arg::Float(_)  => ArgKind::Float,
            Arg::Str(_)    => ArgKind::Str,
            Arg::Object(_) => ArgKind::Object,
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Bool(v)   => write!(f, "Bool({v})"),
            Arg::Int(v)    => write!(f, "Int({v})"),
            Arg::Float(v)  => write!(f, "Float({v})"),
            Arg::Str(v)    => write!(f, "Str({v:?})"),
            Arg::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl PartialEq for Arg {
    /// Objects compare by pointer identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arg::Bool(a), Arg::Bool(b))     => a == b,
            (Arg::Int(a), Arg::Int(b))       => a == b,
            (Arg::Float(a), Arg::Float(b))   => a == b,
            (Arg::Str(a), Arg::Str(b))       => a == b,
            (Arg::Object(a), Arg::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_owned())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}
