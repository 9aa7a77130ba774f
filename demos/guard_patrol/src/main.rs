//! guard_patrol: a handful of guards walking a route, reacting to noise.
//!
//! Exercises every node kind: a condition decides whether a guard heard
//! something, a utility node weighs investigating against raising the alarm,
//! a loop walks the patrol route, and capture-control transitions fire
//! radio checks and shouts without interrupting the main behaviour.
//!
//! Logging follows `RUST_LOG`; try `RUST_LOG=bg_runtime=debug` to watch every
//! transition.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bg_core::{AgentHandle, EngineConfig, GraphId, Tick};
use bg_graph::{
    CallSpec, CurveDescriptor, GraphBuilder, GraphDescriptor, ResponseCurve, TransitionSpec,
};
use bg_registry::CallableRegistry;
use bg_runtime::{BehaviourCore, TickReport};
use bg_sim::{SimBuilder, SimConfig, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const GUARD_COUNT:       usize = 6;
const SEED:              u64   = 42;
const SIM_TICKS:         u64   = 120;
const TICK_SECONDS:      f64   = 1.0;
const SNAPSHOT_INTERVAL: u64   = 30;
const ROUTE:             [&str; 4] = ["gate", "yard", "tower", "barracks"];

// ── Host ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Guard {
    waypoint:       usize,
    noise:          f64,
    stamina:        f64,
    ears:           u64,
    rests:          u32,
    investigations: u32,
    alarms:         u32,
    radio_checks:   u32,
    last_shout:     Option<String>,
}

impl Guard {
    fn new(i: usize) -> Self {
        Self { stamina: 100.0, ears: i as u64 * 13, ..Default::default() }
    }

    /// Sample the surroundings.  A cheap deterministic noise source keeps
    /// runs reproducible without touching the core's RNG.
    fn listen(&mut self) {
        self.ears = self.ears.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        let sample = (self.ears >> 33) as f64 / (1u64 << 31) as f64;
        self.noise = (self.noise * 0.5 + sample * 0.5).clamp(0.0, 1.0);
    }
}

fn build_registry() -> CallableRegistry<Guard> {
    let mut r = CallableRegistry::new();
    r.predicate0("heard_noise", |g: &mut Guard| {
        g.listen();
        Ok(g.noise > 0.55)
    })
    .predicate0("route_remaining", |g: &mut Guard| Ok(g.waypoint < ROUTE.len()))
    .predicate1("stamina_at_least", |g: &mut Guard, min: f64| Ok(g.stamina >= min))
    .action0("walk", |g: &mut Guard| {
        g.waypoint += 1;
        g.stamina = (g.stamina - 4.0).max(0.0);
        Ok(())
    })
    .action0("rest", |g: &mut Guard| {
        g.waypoint = 0;
        g.rests += 1;
        g.stamina = (g.stamina + 20.0).min(100.0);
        Ok(())
    })
    .action0("investigate", |g: &mut Guard| {
        g.investigations += 1;
        g.noise *= 0.25;
        g.stamina = (g.stamina - 6.0).max(0.0);
        Ok(())
    })
    .action0("raise_alarm", |g: &mut Guard| {
        g.alarms += 1;
        g.noise = 0.0;
        Ok(())
    })
    .action0("radio_check", |g: &mut Guard| {
        g.radio_checks += 1;
        Ok(())
    })
    .action1("shout", |g: &mut Guard, line: String| {
        g.last_shout = Some(line);
        Ok(())
    })
    .scalar0("noise", |g: &mut Guard| Ok(g.noise))
    .scalar1("constant", |_g: &mut Guard, v: f64| Ok(v));
    r
}

// ── Graph ─────────────────────────────────────────────────────────────────────

fn patrol_graph() -> Result<GraphDescriptor> {
    let mut b = GraphBuilder::new(GraphId(1), "guard patrol");

    let entry  = b.entry();
    let look   = b.condition("look around", CallSpec::new("heard_noise"), false);
    let react  = b.utility("react", vec![
        CurveDescriptor::new("investigate", CallSpec::new("noise")),
        CurveDescriptor::new("alarm", CallSpec::new("noise"))
            .response(ResponseCurve::Logistic { steepness: 14.0, midpoint: 0.85 }),
        CurveDescriptor::new("shrug", CallSpec::with_arg("constant", 0.6)),
    ]);
    let patrol = b.looping("patrol", CallSpec::new("route_remaining"), false);
    let walk   = b.action("walk", CallSpec::new("walk"));
    let rest   = b.action("rest", CallSpec::new("rest"));
    let search = b.action("investigate", CallSpec::new("investigate"));
    let alarm  = b.action("raise alarm", CallSpec::new("raise_alarm"));
    let radio  = b.action("radio check", CallSpec::new("radio_check"));
    let shout  = b.action("shout", CallSpec::with_arg("shout", "Who goes there?"));

    b.connect(entry, look, TransitionSpec::new());
    b.on_true(look, react, TransitionSpec::new());
    b.on_false(look, patrol, TransitionSpec::new());

    b.on_curve(react, 0, search, TransitionSpec::new());
    b.on_curve(
        react,
        1,
        alarm,
        TransitionSpec::new().guard(CallSpec::with_arg("stamina_at_least", 20.0), false),
    );
    b.on_curve(react, 1, search, TransitionSpec::new());
    b.on_curve(react, 2, patrol, TransitionSpec::new());

    b.connect(search, shout, TransitionSpec::new().capture_control().terminate(false).chance(50.0));
    b.connect(search, look, TransitionSpec::new());
    b.connect(alarm, look, TransitionSpec::new().cooldown(2.0, 4.0));

    b.on_while(patrol, walk, TransitionSpec::new());
    b.on_end(patrol, rest, TransitionSpec::new());
    b.connect(
        walk,
        radio,
        TransitionSpec::new().capture_control().terminate(false).chance(30.0).cooldown(5.0, 8.0),
    );
    b.connect(walk, look, TransitionSpec::new());
    b.connect(rest, look, TransitionSpec::new().probability(40.0, 60.0));

    Ok(b.build()?)
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct PatrolObserver {
    moves:   usize,
    firings: usize,
}

impl SimObserver<Guard> for PatrolObserver {
    fn on_agent_tick(&mut self, _agent: AgentHandle, report: &TickReport) {
        self.firings += report.fired.len();
    }

    fn on_tick_end(&mut self, _tick: Tick, moved: usize) {
        self.moves += moved;
    }

    fn on_snapshot(&mut self, tick: Tick, cores: &[BehaviourCore<Guard>], hosts: &[Guard]) {
        let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
        for view in cores.iter().filter_map(|c| c.active_component()) {
            *tally.entry(view.label).or_default() += 1;
        }
        let tired = hosts.iter().filter(|g| g.stamina < 20.0).count();
        info!(%tick, ?tally, tired, "snapshot");
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!(%final_tick, moves = self.moves, firings = self.firings, "patrol over");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let graph = patrol_graph()?;
    let config = SimConfig {
        total_ticks:             SIM_TICKS,
        tick_duration:           TICK_SECONDS,
        num_threads:             None,
        snapshot_interval_ticks: SNAPSHOT_INTERVAL,
        engine: EngineConfig { seed: SEED, ..Default::default() },
    };

    let mut sim = SimBuilder::new(config, Arc::new(build_registry()))
        .spawn_many(&graph, (0..GUARD_COUNT).map(Guard::new))
        .build()?;

    if let Some(compiled) = sim.core(AgentHandle(0)).and_then(|c| c.graph()) {
        for (component, err) in compiled.binding_errors() {
            tracing::warn!(%component, %err, "unbound callable");
        }
        info!(
            graph = compiled.name(),
            components = compiled.component_count(),
            transitions = compiled.transition_count(),
            unreachable = compiled.unreachable().len(),
            "graph compiled"
        );
    }

    let started = Instant::now();
    let mut observer = PatrolObserver::default();
    sim.run(&mut observer)?;
    let elapsed = started.elapsed();

    println!();
    println!(
        "{:<6} {:>7} {:>6} {:>12} {:>7} {:>6}  last shout",
        "guard", "stamina", "rests", "investigated", "alarms", "radio",
    );
    for (i, g) in sim.hosts().iter().enumerate() {
        println!(
            "{:<6} {:>7.1} {:>6} {:>12} {:>7} {:>6}  {}",
            i,
            g.stamina,
            g.rests,
            g.investigations,
            g.alarms,
            g.radio_checks,
            g.last_shout.as_deref().unwrap_or("-"),
        );
    }
    println!();
    println!(
        "{} guards × {} ticks in {:.2?} ({} compilation)",
        sim.agent_count(),
        SIM_TICKS,
        elapsed,
        sim.compile_count(),
    );
    Ok(())
}
