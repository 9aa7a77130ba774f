//! Conversion from a bound [`Arg`] to a typed callable parameter.

use std::any::{Any, type_name};
use std::sync::Arc;

use bg_core::{Arg, ArgKind};

use crate::CallError;

/// A type a one-parameter callable can accept.
///
/// Implemented for the four specialized kinds and for [`Object<T>`].
pub trait Param: Sized + 'static {
    const KIND: ArgKind;

    fn from_arg(arg: &Arg) -> Result<Self, CallError>;
}

fn kind_error(expected: ArgKind, arg: &Arg) -> CallError {
    CallError::ArgumentKind { expected, got: arg.kind() }
}

impl Param for bool {
    const KIND: ArgKind = ArgKind::Bool;

    fn from_arg(arg: &Arg) -> Result<Self, CallError> {
        match arg {
            Arg::Bool(v) => Ok(*v),
            other => Err(kind_error(Self::KIND, other)),
        }
    }
}

impl Param for i64 {
    const KIND: ArgKind = ArgKind::Int;

    fn from_arg(arg: &Arg) -> Result<Self, CallError> {
        match arg {
            Arg::Int(v) => Ok(*v),
            other => Err(kind_error(Self::KIND, other)),
        }
    }
}

impl Param for f64 {
    const KIND: ArgKind = ArgKind::Float;

    fn from_arg(arg: &Arg) -> Result<Self, CallError> {
        match arg {
            Arg::Float(v) => Ok(*v),
            other => Err(kind_error(Self::KIND, other)),
        }
    }
}

impl Param for String {
    const KIND: ArgKind = ArgKind::Str;

    fn from_arg(arg: &Arg) -> Result<Self, CallError> {
        match arg {
            Arg::Str(v) => Ok(v.clone()),
            other => Err(kind_error(Self::KIND, other)),
        }
    }
}

/// Parameter received through the generic object path.
///
/// The argument is downcast on every call, which is slower than the
/// specialized kinds but accepts any `Send + Sync` value.
#[derive(Debug)]
pub struct Object<T>(pub Arc<T>);

impl<T: Any + Send + Sync> Param for Object<T> {
    const KIND: ArgKind = ArgKind::Object;

    fn from_arg(arg: &Arg) -> Result<Self, CallError> {
        match arg {
            Arg::Object(v) => Arc::clone(v)
                .downcast::<T>()
                .map(Object)
                .map_err(|_| CallError::ObjectType(type_name::<T>())),
            other => Err(kind_error(Self::KIND, other)),
        }
    }
}

impl<T> std::ops::Deref for Object<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}
