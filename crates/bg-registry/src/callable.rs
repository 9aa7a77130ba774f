//! Type-erased callables and their bound (name + argument) form.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use bg_core::{Arg, ArgKind};

use crate::CallError;

type ErasedFn<H, R> = dyn Fn(&mut H, Option<&Arg>) -> Result<R, CallError> + Send + Sync;

/// How many parameters a callable takes, and of which kind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Arity {
    Zero,
    One(ArgKind),
}

impl Arity {
    #[inline]
    pub fn count(self) -> usize {
        match self {
            Arity::Zero   => 0,
            Arity::One(_) => 1,
        }
    }
}

/// A registered callable returning `R`, erased over its parameter type.
pub struct Callable<H, R> {
    arity: Arity,
    f:     Arc<ErasedFn<H, R>>,
}

impl<H, R> Clone for Callable<H, R> {
    fn clone(&self) -> Self {
        Self { arity: self.arity, f: Arc::clone(&self.f) }
    }
}

impl<H, R> Callable<H, R> {
    pub(crate) fn new<F>(arity: Arity, f: F) -> Self
    where
        F: Fn(&mut H, Option<&Arg>) -> Result<R, CallError> + Send + Sync + 'static,
    {
        Self { arity, f: Arc::new(f) }
    }

    #[inline]
    pub fn arity(&self) -> Arity {
        self.arity
    }
}

impl<H, R> fmt::Debug for Callable<H, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable").field("arity", &self.arity).finish_non_exhaustive()
    }
}

// ── Bound ─────────────────────────────────────────────────────────────────────

/// A resolved callable together with the argument it is invoked with.
///
/// Produced by `CallableRegistry::bind_*` when a graph is compiled; stored on
/// the compiled component and invoked directly on every execution.
pub struct Bound<H, R> {
    name:     Arc<str>,
    callable: Callable<H, R>,
    arg:      Option<Arg>,
}

pub type BoundAction<H> = Bound<H, ()>;
pub type BoundPredicate<H> = Bound<H, bool>;
pub type BoundScalar<H> = Bound<H, f64>;

impl<H, R> Clone for Bound<H, R> {
    fn clone(&self) -> Self {
        Self {
            name:     Arc::clone(&self.name),
            callable: self.callable.clone(),
            arg:      self.arg.clone(),
        }
    }
}

impl<H, R> Bound<H, R> {
    pub(crate) fn new(name: &str, callable: Callable<H, R>, arg: Option<Arg>) -> Self {
        Self { name: Arc::from(name), callable, arg }
    }

    /// The registry name this callable was bound from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg(&self) -> Option<&Arg> {
        self.arg.as_ref()
    }

    /// Call into the host.  Panics raised by the host closure are caught
    /// and returned as [`CallError::Panicked`].
    pub fn invoke(&self, host: &mut H) -> Result<R, CallError> {
        let f = &self.callable.f;
        let arg = self.arg.as_ref();
        match catch_unwind(AssertUnwindSafe(|| f(host, arg))) {
            Ok(result) => result,
            Err(payload) => Err(CallError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

impl<H, R> fmt::Debug for Bound<H, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bound")
            .field("name", &self.name)
            .field("arity", &self.callable.arity)
            .field("arg", &self.arg)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
