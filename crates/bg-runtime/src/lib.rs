//! `bg-runtime`: compiled behaviour graphs and the engine that ticks them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`graph`]       | `CompiledGraph`, `compile`: descriptor → runtime arena         |
//! | [`component`]   | `Component`, `ComponentKind`, `Curve`, `Outcome`               |
//! | [`transition`]  | `Transition`, `Guard`, `Span`, `Binding`                       |
//! | [`select`]      | transition selection within a group                            |
//! | [`utility`]     | curve scoring and winner selection                             |
//! | [`agent_core`]  | `BehaviourCore`: per-agent state and the tick driver           |
//! | [`pool`]        | `CorePool`: compile-once cache of per-agent cores              |
//! | [`status`]      | `Status`, `ComponentView`                                      |
//! | [`report`]      | `TickReport`, `Firing`                                         |
//! | [`error`]       | `RuntimeError`, `RuntimeResult<T>`                             |
//!
//! # Quick-start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use bg_core::{AgentHandle, EngineConfig, GraphId};
//! use bg_graph::{CallSpec, GraphBuilder, TransitionSpec};
//! use bg_registry::CallableRegistry;
//! use bg_runtime::CorePool;
//!
//! struct Npc { waves: u32 }
//!
//! let mut registry = CallableRegistry::<Npc>::new();
//! registry.action0("wave", |npc| { npc.waves += 1; Ok(()) });
//!
//! let mut b = GraphBuilder::new(GraphId(1), "greeter");
//! let entry = b.entry();
//! let wave = b.action("wave", CallSpec::new("wave"));
//! b.connect(entry, wave, TransitionSpec::new());
//! let graph = b.build().unwrap();
//!
//! let mut pool = CorePool::new(Arc::new(registry), EngineConfig::default()).unwrap();
//! let mut npc = Npc { waves: 0 };
//! let core = pool.get_core(&graph, AgentHandle(0)).unwrap();
//! let report = core.tick(&mut npc, 1.0).unwrap();
//! assert_eq!(npc.waves, 1);
//! assert!(report.moved());
//! ```

pub mod agent_core;
pub mod component;
pub mod error;
pub(crate) mod execute;
pub mod graph;
pub mod pool;
pub mod report;
pub mod select;
pub(crate) mod state;
pub mod status;
pub mod transition;
pub mod utility;


pub use agent_core::BehaviourCore;
pub use component::{Component, ComponentKind, Curve, Outcome};
pub use error::{RuntimeError, RuntimeResult};
pub use graph::{CompiledGraph, compile};
pub use pool::CorePool;
pub use report::{Firing, TickReport};
pub use select::roll;
pub use status::{ComponentView, Status};
pub use transition::{Binding, Guard, Span, Transition};
