//! The compiled, shareable form of a graph descriptor.
//!
//! # Compilation
//!
//! 1. Structural validation ([`bg_graph::validate`]); any defect fails the
//!    whole compile and nothing is produced.
//! 2. Nodes become components in descriptor order, so `ComponentId(i)` is
//!    the `i`-th node.
//! 3. Every callable name is resolved against the registry exactly once.
//!    A name that cannot be bound does not fail the compile: the component
//!    keeps the binding error and reports `Status::Error` whenever it runs.
//! 4. Transitions become the transition arena in descriptor order and are
//!    appended to their origin's group, preserving declaration order.
//!
//! The result holds no per-agent state and is shared between every core
//! created from the same descriptor.

use std::collections::HashMap;

use bg_core::{ComponentId, GraphId, TransitionId};
use bg_graph::{CallSpec, GraphDescriptor, GroupTag, NodeKey, NodeKind, validate};
use bg_registry::{CallableRegistry, RegistryError};
use tracing::debug;

use crate::{
    Binding, Component, ComponentKind, Curve, Guard, RuntimeResult, Span, Transition,
};

pub struct CompiledGraph<H> {
    id:          GraphId,
    name:        String,
    entry:       ComponentId,
    components:  Vec<Component<H>>,
    transitions: Vec<Transition<H>>,
}

impl<H> CompiledGraph<H> {
    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry(&self) -> ComponentId {
        self.entry
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// # Panics
    /// Panics if `id` is not a component of this graph.  Ids handed out by
    /// the runtime always are.
    #[inline]
    pub fn component(&self, id: ComponentId) -> &Component<H> {
        &self.components[id.index()]
    }

    pub fn get_component(&self, id: ComponentId) -> Option<&Component<H>> {
        self.components.get(id.index())
    }

    /// # Panics
    /// Panics if `id` is not a transition of this graph.
    #[inline]
    pub fn transition(&self, id: TransitionId) -> &Transition<H> {
        &self.transitions[id.index()]
    }

    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        (0..self.components.len() as u32).map(ComponentId)
    }

    pub fn transitions(&self) -> &[Transition<H>] {
        &self.transitions
    }

    /// First component carrying `label`.  Labels are not unique.
    pub fn find(&self, label: &str) -> Option<ComponentId> {
        self.components
            .iter()
            .position(|c| c.label == label)
            .map(|i| ComponentId(i as u32))
    }

    /// Every component carrying `label`.
    pub fn find_all<'a>(&'a self, label: &'a str) -> impl Iterator<Item = ComponentId> + 'a {
        self.components
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.label == label)
            .map(|(i, _)| ComponentId(i as u32))
    }

    /// Components that can never run because nothing leads to them from
    /// the entry.  Legal, but usually an authoring mistake.
    pub fn unreachable(&self) -> Vec<ComponentId> {
        let mut seen = vec![false; self.components.len()];
        let mut stack = vec![self.entry];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.index()], true) {
                continue;
            }
            for t in self.component(id).outgoing() {
                stack.push(self.transition(t).to);
            }
        }
        self.component_ids().filter(|id| !seen[id.index()]).collect()
    }

    /// Every binding failure recorded at compile time, by component.
    pub fn binding_errors(&self) -> Vec<(ComponentId, &RegistryError)> {
        let mut out = Vec::new();
        for (i, c) in self.components.iter().enumerate() {
            let id = ComponentId(i as u32);
            match &c.kind {
                ComponentKind::Entry { .. } => {}
                ComponentKind::Action { call, .. } => push_err(&mut out, id, call),
                ComponentKind::Condition { test, .. } | ComponentKind::Loop { test, .. } => {
                    push_err(&mut out, id, test)
                }
                ComponentKind::Utility { curves } => {
                    for curve in curves {
                        push_err(&mut out, id, &curve.score);
                    }
                }
            }
        }
        for t in &self.transitions {
            if let Some(guard) = &t.guard {
                push_err(&mut out, t.from, &guard.test);
            }
        }
        out
    }
}

fn push_err<'a, B>(out: &mut Vec<(ComponentId, &'a RegistryError)>, id: ComponentId, b: &'a Binding<B>) {
    if let Err(e) = b {
        out.push((id, e));
    }
}

// ── Compilation ───────────────────────────────────────────────────────────────

/// Compile `desc` against `registry`.
///
/// Fails only on structural defects.
pub fn compile<H: 'static>(
    desc:     &GraphDescriptor,
    registry: &CallableRegistry<H>,
) -> RuntimeResult<CompiledGraph<H>> {
    validate(desc)?;

    let index: HashMap<NodeKey, ComponentId> = desc
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.key, ComponentId(i as u32)))
        .collect();

    let bind_action = |c: &CallSpec| registry.bind_action(&c.name, c.arg.as_ref());
    let bind_predicate = |c: &CallSpec| registry.bind_predicate(&c.name, c.arg.as_ref());

    let mut entry = ComponentId::INVALID;
    let mut components: Vec<Component<H>> = Vec::with_capacity(desc.nodes.len());
    for (i, node) in desc.nodes.iter().enumerate() {
        let kind = match &node.kind {
            NodeKind::Entry => {
                entry = ComponentId(i as u32);
                ComponentKind::Entry { out: Vec::new() }
            }
            NodeKind::Action(call) => ComponentKind::Action {
                call: bind_action(call),
                out:  Vec::new(),
            },
            NodeKind::Condition { call, reverse } => ComponentKind::Condition {
                test:     bind_predicate(call),
                reverse:  *reverse,
                if_true:  Vec::new(),
                if_false: Vec::new(),
            },
            NodeKind::Loop { call, reverse } => ComponentKind::Loop {
                test:        bind_predicate(call),
                reverse:     *reverse,
                while_group: Vec::new(),
                end_group:   Vec::new(),
            },
            NodeKind::Utility { curves } => ComponentKind::Utility {
                curves: curves
                    .iter()
                    .map(|c| Curve {
                        name:     c.name.clone(),
                        score:    registry.bind_scalar(&c.call.name, c.call.arg.as_ref()),
                        response: c.response.clone(),
                        clamp:    c.clamp,
                        group:    Vec::new(),
                    })
                    .collect(),
            },
        };
        components.push(Component { label: node.label.clone(), kind });
    }

    let mut transitions: Vec<Transition<H>> = Vec::with_capacity(desc.transitions.len());
    for (i, t) in desc.transitions.iter().enumerate() {
        let id = TransitionId(i as u32);
        // `validate` has already rejected unknown endpoints and illegal groups.
        let from = index[&t.from];
        let to = index[&t.to];
        if let Some(group) = group_mut(&mut components[from.index()], t.group) {
            group.push(id);
        }

        transitions.push(Transition {
            id,
            from,
            to,
            group:           t.group,
            probability:     Span::new(t.probability.0, t.probability.1),
            cooldown:        Span::new(t.cooldown.0, t.cooldown.1),
            terminate:       t.terminate,
            capture_control: t.capture_control,
            guard:           t.guard.as_ref().map(|g| Guard {
                test:    bind_predicate(&g.call),
                reverse: g.reverse,
            }),
        });
    }

    let graph = CompiledGraph {
        id: desc.id,
        name: desc.name.clone(),
        entry,
        components,
        transitions,
    };
    debug!(
        graph = %graph.id,
        name = %graph.name,
        components = graph.components.len(),
        transitions = graph.transitions.len(),
        unresolved = graph.binding_errors().len(),
        "compiled behaviour graph"
    );
    Ok(graph)
}

fn group_mut<H>(component: &mut Component<H>, tag: GroupTag) -> Option<&mut Vec<TransitionId>> {
    match (&mut component.kind, tag) {
        (ComponentKind::Entry { out }, GroupTag::Out)
        | (ComponentKind::Action { out, .. }, GroupTag::Out) => Some(out),
        (ComponentKind::Condition { if_true, .. }, GroupTag::IfTrue) => Some(if_true),
        (ComponentKind::Condition { if_false, .. }, GroupTag::IfFalse) => Some(if_false),
        (ComponentKind::Loop { while_group, .. }, GroupTag::While) => Some(while_group),
        (ComponentKind::Loop { end_group, .. }, GroupTag::End) => Some(end_group),
        (ComponentKind::Utility { curves }, GroupTag::Curve(i)) => {
            curves.get_mut(usize::from(i)).map(|c| &mut c.group)
        }
        _ => None,
    }
}
