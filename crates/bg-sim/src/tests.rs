//! Integration tests for bg-sim.

use std::sync::Arc;

use bg_core::{AgentHandle, ComponentId, EngineConfig, GraphId, Tick};
use bg_graph::{CallSpec, GraphBuilder, GraphDescriptor, TransitionSpec};
use bg_registry::CallableRegistry;
use bg_runtime::{BehaviourCore, TickReport};

use crate::{NoopObserver, SimBuilder, SimConfig, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Critter {
    hungry: bool,
    meals:  u32,
    naps:   u32,
}

fn registry() -> Arc<CallableRegistry<Critter>> {
    let mut r = CallableRegistry::new();
    r.predicate0("hungry", |c: &mut Critter| Ok(c.hungry))
        .action0("eat", |c: &mut Critter| {
            c.meals += 1;
            c.hungry = false;
            Ok(())
        })
        .action0("nap", |c: &mut Critter| {
            c.naps += 1;
            c.hungry = true;
            Ok(())
        });
    Arc::new(r)
}

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        total_ticks,
        tick_duration:           1.0,
        num_threads:             Some(1),
        snapshot_interval_ticks: 0,
        engine:                  EngineConfig { seed: 42, ..Default::default() },
    }
}

/// Entry → hungry?; true → eat, false → nap; eat/nap → hungry?.
///
/// Ids: entry 0, hungry? 1, eat 2, nap 3.
fn day_graph() -> GraphDescriptor {
    let mut b = GraphBuilder::new(GraphId(1), "day");
    let e = b.entry();
    let c = b.condition("hungry?", CallSpec::new("hungry"), false);
    let eat = b.action("eat", CallSpec::new("eat"));
    let nap = b.action("nap", CallSpec::new("nap"));
    b.connect(e, c, TransitionSpec::new());
    b.on_true(c, eat, TransitionSpec::new());
    b.on_false(c, nap, TransitionSpec::new());
    b.connect(eat, c, TransitionSpec::new());
    b.connect(nap, c, TransitionSpec::new());
    b.build().unwrap()
}

/// Entry that naps with a 50 % chance each tick.
fn coin_graph() -> GraphDescriptor {
    let mut b = GraphBuilder::new(GraphId(2), "coin");
    let e = b.entry();
    let nap = b.action("nap", CallSpec::new("nap"));
    b.connect(e, nap, TransitionSpec::new().chance(50.0).capture_control());
    b.build().unwrap()
}

/// Records every agent report, in callback order.
#[derive(Default)]
struct Recorder {
    starts:    usize,
    ends:      Vec<(Tick, usize)>,
    reports:   Vec<(AgentHandle, TickReport)>,
    snapshots: Vec<Tick>,
    finished:  Option<Tick>,
}

impl SimObserver<Critter> for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.starts += 1;
    }
    fn on_agent_tick(&mut self, agent: AgentHandle, report: &TickReport) {
        self.reports.push((agent, report.clone()));
    }
    fn on_tick_end(&mut self, tick: Tick, moved: usize) {
        self.ends.push((tick, moved));
    }
    fn on_snapshot(&mut self, tick: Tick, cores: &[BehaviourCore<Critter>], hosts: &[Critter]) {
        assert_eq!(cores.len(), hosts.len());
        self.snapshots.push(tick);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.finished = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_no_agents() {
        let sim = SimBuilder::new(test_config(10), registry()).build().unwrap();
        assert_eq!(sim.agent_count(), 0);
        assert_eq!(sim.compile_count(), 0);
    }

    #[test]
    fn agents_share_one_compilation_per_graph() {
        let day = day_graph();
        let sim = SimBuilder::new(test_config(10), registry())
            .spawn_many(&day, (0..10).map(|_| Critter::default()))
            .spawn(&coin_graph(), Critter::default())
            .spawn(&day, Critter::default())
            .build()
            .unwrap();
        assert_eq!(sim.agent_count(), 12);
        assert_eq!(sim.compile_count(), 2);
        assert!(Arc::ptr_eq(
            sim.core(AgentHandle(0)).unwrap().graph().unwrap(),
            sim.core(AgentHandle(11)).unwrap().graph().unwrap(),
        ));
        assert_eq!(sim.core(AgentHandle(10)).unwrap().graph().unwrap().name(), "coin");
    }

    #[test]
    fn bad_tick_duration_errors() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let config = SimConfig { tick_duration: bad, ..test_config(10) };
            let result = SimBuilder::new(config, registry()).build();
            assert!(matches!(result, Err(SimError::Config(_))));
        }
    }

    #[test]
    fn bad_engine_config_errors() {
        let mut config = test_config(10);
        config.engine.max_hops_per_tick = u32::MAX;
        assert!(SimBuilder::new(config, registry()).build().is_err());
    }

    #[test]
    fn zero_threads_errors() {
        let config = SimConfig { num_threads: Some(0), ..test_config(10) };
        assert!(SimBuilder::new(config, registry()).build().is_err());
    }

    #[test]
    fn malformed_graph_errors() {
        let mut b = GraphBuilder::new(GraphId(9), "headless");
        b.action("nap", CallSpec::new("nap"));
        let result = SimBuilder::new(test_config(10), registry())
            .spawn(&b.finish(), Critter::default())
            .build();
        assert!(matches!(result, Err(SimError::Runtime(_))));
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_end_tick() {
        let mut sim = SimBuilder::new(test_config(10), registry())
            .spawn_many(&day_graph(), (0..3).map(|_| Critter::default()))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick, Tick(10));
        assert_eq!(sim.core(AgentHandle(0)).unwrap().clock().now(), 10.0);
    }

    #[test]
    fn run_ticks_advances() {
        let mut sim = SimBuilder::new(test_config(100), registry())
            .spawn(&day_graph(), Critter::default())
            .build()
            .unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick, Tick(8));
    }

    #[test]
    fn hosts_are_driven_by_their_cores() {
        let mut sim = SimBuilder::new(test_config(6), registry())
            .spawn(&day_graph(), Critter::default())
            .spawn(&day_graph(), Critter { hungry: true, ..Default::default() })
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        // Every tick after the first runs one action, alternating nap/eat.
        for agent in [AgentHandle(0), AgentHandle(1)] {
            let c = sim.host(agent).unwrap();
            assert_eq!(c.meals + c.naps, 5, "{agent}");
        }
        assert_eq!(sim.host(AgentHandle(1)).unwrap().meals, 3);
    }

    #[test]
    fn observer_sees_every_agent_in_order() {
        let mut sim = SimBuilder::new(test_config(4), registry())
            .spawn_many(&day_graph(), (0..5).map(|_| Critter::default()))
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();

        assert_eq!(obs.starts, 4);
        assert_eq!(obs.ends.len(), 4);
        assert_eq!(obs.reports.len(), 20);
        for (i, (agent, report)) in obs.reports.iter().enumerate() {
            assert_eq!(agent.index(), i % 5);
            assert_eq!(report.tick, Tick((i / 5) as u64 + 1));
        }
        assert_eq!(obs.finished, Some(Tick(4)));
    }

    #[test]
    fn moved_counts_agents_whose_pointer_changed() {
        let mut sim = SimBuilder::new(test_config(1), registry())
            .spawn_many(&day_graph(), (0..3).map(|_| Critter::default()))
            .spawn(&coin_graph(), Critter::default())
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();
        // The coin agent captures control and never leaves its entry.
        assert_eq!(obs.ends, vec![(Tick(0), 3)]);
        assert_eq!(sim.core(AgentHandle(0)).unwrap().active(), Some(ComponentId(3)));
    }

    #[test]
    fn snapshots_follow_interval() {
        let config = SimConfig { snapshot_interval_ticks: 3, ..test_config(10) };
        let mut sim = SimBuilder::new(config, registry())
            .spawn(&day_graph(), Critter::default())
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.snapshots, vec![Tick(0), Tick(3), Tick(6), Tick(9)]);
    }

    #[test]
    fn same_seed_same_outcome() {
        let run = |seed: u64| {
            let mut config = test_config(200);
            config.engine.seed = seed;
            let mut sim = SimBuilder::new(config, registry())
                .spawn_many(&coin_graph(), (0..8).map(|_| Critter::default()))
                .build()
                .unwrap();
            sim.run(&mut NoopObserver).unwrap();
            sim.hosts().iter().map(|c| c.naps).collect::<Vec<_>>()
        };
        let a = run(7);
        assert_eq!(a, run(7));
        // Agents draw from independent streams.
        assert!(a.windows(2).any(|w| w[0] != w[1]), "{a:?}");
    }
}

// ── Per-agent control ─────────────────────────────────────────────────────────

#[cfg(test)]
mod agent_tests {
    use super::*;

    #[test]
    fn reset_agent_returns_to_entry() {
        let mut sim = SimBuilder::new(test_config(10), registry())
            .spawn_many(&day_graph(), (0..2).map(|_| Critter::default()))
            .build()
            .unwrap();
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        sim.reset_agent(AgentHandle(1)).unwrap();
        assert_eq!(sim.core(AgentHandle(1)).unwrap().active(), Some(ComponentId(0)));
        assert_ne!(sim.core(AgentHandle(0)).unwrap().active(), Some(ComponentId(0)));
    }

    #[test]
    fn unknown_agent_errors() {
        let mut sim = SimBuilder::new(test_config(10), registry()).build().unwrap();
        assert!(matches!(
            sim.reset_agent(AgentHandle(3)),
            Err(SimError::UnknownAgent(AgentHandle(3)))
        ));
        assert!(sim.swap_graph(AgentHandle(0), &day_graph()).is_err());
        assert!(sim.host(AgentHandle(0)).is_none());
    }

    #[test]
    fn swap_graph_rebinds_through_cache() {
        let mut sim = SimBuilder::new(test_config(10), registry())
            .spawn_many(&day_graph(), (0..2).map(|_| Critter::default()))
            .build()
            .unwrap();
        sim.run_ticks(2, &mut NoopObserver).unwrap();

        sim.swap_graph(AgentHandle(0), &coin_graph()).unwrap();
        sim.swap_graph(AgentHandle(1), &coin_graph()).unwrap();
        assert_eq!(sim.compile_count(), 2);

        let core = sim.core(AgentHandle(0)).unwrap();
        assert_eq!(core.graph().unwrap().name(), "coin");
        assert_eq!(core.active(), Some(ComponentId(0)));
        assert_eq!(core.clock().current_tick, Tick(0));
    }

    #[test]
    fn unbound_core_stops_the_run() {
        let mut sim = SimBuilder::new(test_config(10), registry())
            .spawn(&day_graph(), Critter::default())
            .build()
            .unwrap();
        sim.core_mut(AgentHandle(0)).unwrap().unbind();
        assert!(matches!(sim.run(&mut NoopObserver), Err(SimError::Runtime(_))));
        assert_eq!(sim.current_tick, Tick(1));
    }

    #[test]
    fn failing_agent_does_not_desync_the_others() {
        let mut sim = SimBuilder::new(test_config(10), registry())
            .spawn_many(&day_graph(), (0..3).map(|_| Critter::default()))
            .build()
            .unwrap();
        sim.core_mut(AgentHandle(0)).unwrap().unbind();

        let mut rec = Recorder::default();
        assert!(matches!(sim.run(&mut rec), Err(SimError::Runtime(_))));
        assert_eq!(sim.current_tick, Tick(1));
        for i in 1..3 {
            assert_eq!(sim.core(AgentHandle(i)).unwrap().clock().current_tick, Tick(1));
        }
        let agents: Vec<AgentHandle> = rec.reports.iter().map(|(a, _)| *a).collect();
        assert_eq!(agents, vec![AgentHandle(1), AgentHandle(2)]);
        assert_eq!(rec.starts, 1);
        assert_eq!(rec.ends.len(), 1);
        assert_eq!(rec.ends[0].0, Tick(0));
        assert_eq!(rec.finished, None);

        // Resuming keeps the healthy agents in step with the sim tick.
        assert!(sim.run_ticks(1, &mut rec).is_err());
        assert_eq!(sim.current_tick, Tick(2));
        assert_eq!(sim.core(AgentHandle(1)).unwrap().clock().current_tick, Tick(2));
        assert_eq!(sim.core(AgentHandle(2)).unwrap().clock().current_tick, Tick(2));
        assert_eq!(sim.core(AgentHandle(0)).unwrap().clock().current_tick, Tick(0));
        assert_eq!(rec.ends.len(), 2);
    }
}
