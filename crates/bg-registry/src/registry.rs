//! The name → callable lookup table.

use std::collections::HashMap;

use bg_core::Arg;

use crate::{
    Arity, Bound, BoundAction, BoundPredicate, BoundScalar, CallError, Callable, Family, Param,
    RegistryError, RegistryResult,
};

/// Named host callables, grouped by family.
///
/// Registering a second callable of the same family under an existing name
/// replaces the first.  The registry is only read after graphs start
/// compiling; share it behind an `Arc`.
pub struct CallableRegistry<H> {
    actions:    HashMap<String, Callable<H, ()>>,
    predicates: HashMap<String, Callable<H, bool>>,
    scalars:    HashMap<String, Callable<H, f64>>,
}

impl<H> Default for CallableRegistry<H> {
    fn default() -> Self {
        Self {
            actions:    HashMap::new(),
            predicates: HashMap::new(),
            scalars:    HashMap::new(),
        }
    }
}

/// Wrap a one-parameter closure so it receives its typed argument.
fn unary<H, R, T, F>(f: F) -> Callable<H, R>
where
    H: 'static,
    R: 'static,
    T: Param,
    F: Fn(&mut H, T) -> Result<R, CallError> + Send + Sync + 'static,
{
    Callable::new(Arity::One(T::KIND), move |host: &mut H, arg: Option<&Arg>| {
        let arg = arg.ok_or(CallError::MissingArgument)?;
        f(host, T::from_arg(arg)?)
    })
}

fn nullary<H, R, F>(f: F) -> Callable<H, R>
where
    H: 'static,
    R: 'static,
    F: Fn(&mut H) -> Result<R, CallError> + Send + Sync + 'static,
{
    Callable::new(Arity::Zero, move |host: &mut H, _arg: Option<&Arg>| f(host))
}

impl<H: 'static> CallableRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──────────────────────────────────────────────────────

    pub fn action0<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut H) -> Result<(), CallError> + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), nullary(f));
        self
    }

    pub fn action1<T: Param, F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut H, T) -> Result<(), CallError> + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), unary(f));
        self
    }

    pub fn predicate0<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut H) -> Result<bool, CallError> + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), nullary(f));
        self
    }

    pub fn predicate1<T: Param, F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut H, T) -> Result<bool, CallError> + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), unary(f));
        self
    }

    pub fn scalar0<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut H) -> Result<f64, CallError> + Send + Sync + 'static,
    {
        self.scalars.insert(name.into(), nullary(f));
        self
    }

    pub fn scalar1<T: Param, F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut H, T) -> Result<f64, CallError> + Send + Sync + 'static,
    {
        self.scalars.insert(name.into(), unary(f));
        self
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn resolve_action(&self, name: &str) -> Option<&Callable<H, ()>> {
        self.actions.get(name)
    }

    pub fn resolve_predicate(&self, name: &str) -> Option<&Callable<H, bool>> {
        self.predicates.get(name)
    }

    pub fn resolve_scalar(&self, name: &str) -> Option<&Callable<H, f64>> {
        self.scalars.get(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len() + self.predicates.len() + self.scalars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Binding ───────────────────────────────────────────────────────────

    pub fn bind_action(&self, name: &str, arg: Option<&Arg>) -> RegistryResult<BoundAction<H>> {
        bind(Family::Action, name, self.resolve_action(name), arg)
    }

    pub fn bind_predicate(&self, name: &str, arg: Option<&Arg>) -> RegistryResult<BoundPredicate<H>> {
        bind(Family::Predicate, name, self.resolve_predicate(name), arg)
    }

    pub fn bind_scalar(&self, name: &str, arg: Option<&Arg>) -> RegistryResult<BoundScalar<H>> {
        bind(Family::Scalar, name, self.resolve_scalar(name), arg)
    }
}

/// Check arity and argument kind, then pair the callable with its argument.
fn bind<H, R>(
    family:   Family,
    name:     &str,
    callable: Option<&Callable<H, R>>,
    arg:      Option<&Arg>,
) -> RegistryResult<Bound<H, R>> {
    let callable = callable.ok_or_else(|| RegistryError::Unresolved {
        family,
        name: name.to_owned(),
    })?;

    match (callable.arity(), arg) {
        (Arity::Zero, None) => {}
        (Arity::One(expected), Some(a)) => {
            if a.kind() != expected {
                return Err(RegistryError::ArgumentKind {
                    name: name.to_owned(),
                    expected,
                    got: a.kind(),
                });
            }
        }
        (arity, _) => {
            return Err(RegistryError::ArityMismatch {
                name:     name.to_owned(),
                expected: arity.count(),
                got:      usize::from(arg.is_some()),
            });
        }
    }

    Ok(Bound::new(name, callable.clone(), arg.cloned()))
}
