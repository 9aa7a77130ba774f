//! Unit tests for bg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentHandle, ComponentId, GraphId, TransitionId};

    #[test]
    fn index_roundtrip() {
        let id = ComponentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ComponentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(ComponentId::INVALID.0, u32::MAX);
        assert_eq!(TransitionId::default(), TransitionId::INVALID);
        assert_eq!(AgentHandle::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(GraphId(7).to_string(), "GraphId(7)");
        assert_eq!(AgentHandle(3).to_string(), "AgentHandle(3)");
    }
}

#[cfg(test)]
mod time {
    use crate::{AgentClock, BgError, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(4).to_string(), "T4");
    }

    #[test]
    fn clock_accumulates_agent_time() {
        let mut clock = AgentClock::new();
        clock.advance(0.5).unwrap();
        clock.advance(1.25).unwrap();
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.now() - 1.75).abs() < 1e-12);
    }

    #[test]
    fn zero_delta_still_counts_a_tick() {
        let mut clock = AgentClock::new();
        clock.advance(0.0).unwrap();
        assert_eq!(clock.current_tick, Tick(1));
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn rejects_bad_deltas() {
        let mut clock = AgentClock::new();
        assert_eq!(clock.advance(-1.0), Err(BgError::InvalidDelta(-1.0)));
        assert!(clock.advance(f64::NAN).is_err());
        assert!(clock.advance(f64::INFINITY).is_err());
        assert_eq!(clock, AgentClock::new());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentHandle, AgentRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentHandle(0));
        let mut r2 = AgentRng::new(12345, AgentHandle(0));
        for _ in 0..100 {
            assert_eq!(r1.percent(), r2.percent());
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentHandle(0));
        let mut r1 = AgentRng::new(1, AgentHandle(1));
        let a: Vec<f64> = (0..4).map(|_| r0.percent()).collect();
        let b: Vec<f64> = (0..4).map(|_| r1.percent()).collect();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn percent_in_bounds() {
        let mut rng = AgentRng::new(0, AgentHandle(0));
        for _ in 0..1000 {
            let v = rng.percent();
            assert!((0.0..100.0).contains(&v));
        }
    }

    #[test]
    fn uniform_inclusive_degenerate_and_bounded() {
        let mut rng = AgentRng::new(9, AgentHandle(2));
        assert_eq!(rng.uniform_inclusive(5.0, 5.0), 5.0);
        for _ in 0..1000 {
            let v = rng.uniform_inclusive(2.0, 3.0);
            assert!((2.0..=3.0).contains(&v));
        }
    }
}

#[cfg(test)]
mod arg {
    use crate::{Arg, ArgKind};

    #[test]
    fn kinds() {
        assert_eq!(Arg::from(true).kind(), ArgKind::Bool);
        assert_eq!(Arg::from(3_i64).kind(), ArgKind::Int);
        assert_eq!(Arg::from(1.5).kind(), ArgKind::Float);
        assert_eq!(Arg::from("north").kind(), ArgKind::Str);
        assert_eq!(Arg::object(vec![1u8]).kind(), ArgKind::Object);
        assert_eq!(ArgKind::Str.to_string(), "string");
    }

    #[test]
    fn object_equality_is_identity() {
        let a = Arg::object(7u32);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Arg::object(7u32));
    }
}

#[cfg(test)]
mod config {
    use crate::EngineConfig;

    #[test]
    fn default_is_valid_single_hop() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.max_hops_per_tick, 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn too_many_hops_rejected() {
        let cfg = EngineConfig { max_hops_per_tick: EngineConfig::MAX_HOPS + 1, ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
