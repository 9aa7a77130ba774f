//! Unit tests for bg-registry.

use bg_core::{Arg, ArgKind};

use crate::{CallError, CallableRegistry, Family, Object, RegistryError};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Host {
    calls:  Vec<String>,
    health: f64,
    armed:  bool,
}

fn registry() -> CallableRegistry<Host> {
    let mut r = CallableRegistry::new();
    r.action0("idle", |h: &mut Host| {
        h.calls.push("idle".into());
        Ok(())
    })
    .action1("say", |h: &mut Host, line: String| {
        h.calls.push(line);
        Ok(())
    })
    .action0("explode", |_h: &mut Host| -> Result<(), CallError> { panic!("boom") })
    .action0("refuse", |_h: &mut Host| Err(CallError::failed("out of ammo")))
    .predicate0("armed", |h: &mut Host| Ok(h.armed))
    .predicate1("above", |h: &mut Host, t: f64| Ok(h.health > t))
    .scalar0("health", |h: &mut Host| Ok(h.health))
    .scalar1("scaled", |h: &mut Host, k: i64| Ok(h.health * k as f64));
    r
}

// ── Resolution ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resolve_tests {
    use super::*;

    #[test]
    fn resolves_by_family() {
        let r = registry();
        assert!(r.resolve_action("idle").is_some());
        assert!(r.resolve_predicate("idle").is_none());
        assert!(r.resolve_scalar("health").is_some());
        assert_eq!(r.len(), 8);
    }

    #[test]
    fn last_registration_wins() {
        let mut r = registry();
        r.scalar0("health", |_h: &mut Host| Ok(-1.0));
        let bound = r.bind_scalar("health", None).unwrap();
        let mut host = Host { health: 50.0, ..Default::default() };
        assert_eq!(bound.invoke(&mut host), Ok(-1.0));
    }
}

// ── Binding ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bind_tests {
    use super::*;

    #[test]
    fn unresolved_name() {
        let err = registry().bind_action("fly", None).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Unresolved { family: Family::Action, name: "fly".into() }
        );
        assert_eq!(err.to_string(), "no action named `fly` is registered");
    }

    #[test]
    fn missing_argument_is_arity_mismatch() {
        let err = registry().bind_action("say", None).unwrap_err();
        assert!(matches!(err, RegistryError::ArityMismatch { expected: 1, got: 0, .. }));
    }

    #[test]
    fn extra_argument_is_arity_mismatch() {
        let err = registry().bind_predicate("armed", Some(&Arg::Bool(true))).unwrap_err();
        assert!(matches!(err, RegistryError::ArityMismatch { expected: 0, got: 1, .. }));
    }

    #[test]
    fn wrong_argument_kind() {
        let err = registry().bind_predicate("above", Some(&Arg::Int(3))).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ArgumentKind {
                name:     "above".into(),
                expected: ArgKind::Float,
                got:      ArgKind::Int,
            }
        );
    }

    #[test]
    fn bound_keeps_name_and_arg() {
        let bound = registry().bind_action("say", Some(&"halt".into())).unwrap();
        assert_eq!(bound.name(), "say");
        assert_eq!(bound.arg(), Some(&Arg::Str("halt".into())));
    }
}

// ── Invocation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod invoke_tests {
    use super::*;

    #[test]
    fn typed_arguments_reach_the_host() {
        let r = registry();
        let mut host = Host { health: 10.0, ..Default::default() };

        r.bind_action("say", Some(&"halt".into())).unwrap().invoke(&mut host).unwrap();
        assert_eq!(host.calls, vec!["halt".to_string()]);

        let above = r.bind_predicate("above", Some(&Arg::Float(5.0))).unwrap();
        assert_eq!(above.invoke(&mut host), Ok(true));

        let scaled = r.bind_scalar("scaled", Some(&Arg::Int(3))).unwrap();
        assert_eq!(scaled.invoke(&mut host), Ok(30.0));
    }

    #[test]
    fn host_error_is_returned() {
        let r = registry();
        let mut host = Host::default();
        let err = r.bind_action("refuse", None).unwrap().invoke(&mut host).unwrap_err();
        assert_eq!(err, CallError::Failed("out of ammo".into()));
    }

    #[test]
    fn host_panic_is_caught() {
        let r = registry();
        let mut host = Host::default();
        let err = r.bind_action("explode", None).unwrap().invoke(&mut host).unwrap_err();
        assert_eq!(err, CallError::Panicked("boom".into()));
    }

    #[test]
    fn object_path_downcasts() {
        #[derive(Debug)]
        struct Waypoint(u32);

        let mut r = CallableRegistry::<Host>::new();
        r.action1("goto", |h: &mut Host, wp: Object<Waypoint>| {
            h.calls.push(format!("goto {}", wp.0.0));
            Ok(())
        });

        let mut host = Host::default();
        let ok = r.bind_action("goto", Some(&Arg::object(Waypoint(4)))).unwrap();
        ok.invoke(&mut host).unwrap();
        assert_eq!(host.calls, vec!["goto 4".to_string()]);

        let wrong = r.bind_action("goto", Some(&Arg::object(4u8))).unwrap();
        assert!(matches!(wrong.invoke(&mut host), Err(CallError::ObjectType(_))));
    }
}
