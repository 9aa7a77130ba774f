//! Per-component execution: run a component's body, evaluate the group it
//! selects, and commit its status.

use bg_core::ComponentId;
use bg_registry::BoundPredicate;
use tracing::warn;

use crate::report::Firing;
use crate::select::{GroupResult, evaluate_group};
use crate::state::CoreState;
use crate::{Binding, CompiledGraph, ComponentKind, Outcome, Status, utility};

/// Result of a component's own execution, before its transitions run.
struct Executed {
    outcome: Outcome,
    status:  Status,
    cause:   Option<String>,
}

impl Executed {
    fn ok(outcome: Outcome) -> Self {
        Self { outcome, status: Status::Normal, cause: None }
    }

    fn failed(outcome: Outcome, cause: String) -> Self {
        Self { outcome, status: Status::Error, cause: Some(cause) }
    }
}

/// Everything one tick works on, borrowed for the tick's duration.
pub(crate) struct Step<'a, H> {
    pub graph:  &'a CompiledGraph<H>,
    pub host:   &'a mut H,
    pub state:  &'a mut CoreState,
    pub fired:  &'a mut Vec<Firing>,
    pub record: bool,
}

impl<H> Step<'_, H> {
    /// Update `id`: execute it, then evaluate the group its outcome selects.
    ///
    /// Returns the component the last non-captured firing points at.
    pub fn update(&mut self, id: ComponentId) -> Option<ComponentId> {
        let graph = self.graph;
        let executed = self.execute(id);
        let group = graph.component(id).group(executed.outcome);
        let GroupResult { next, guard_failure } = evaluate_group(self, id, group);

        let status = match guard_failure {
            Some(_) => executed.status.escalate(Status::Warning),
            None => executed.status,
        };
        self.commit(id, status, executed.cause.or(guard_failure));
        next
    }

    /// Run the destination of a capture-control firing once, without
    /// evaluating its transitions or moving the active pointer.
    pub fn run_captured(&mut self, id: ComponentId) {
        let executed = self.execute(id);
        self.commit(id, executed.status, executed.cause);
    }

    fn execute(&mut self, id: ComponentId) -> Executed {
        let graph = self.graph;
        match &graph.component(id).kind {
            ComponentKind::Entry { .. } => Executed::ok(Outcome::Pass),

            ComponentKind::Action { call, .. } => {
                let result = match call {
                    Ok(bound) => bound.invoke(self.host).map_err(|e| e.to_string()),
                    Err(e) => Err(e.to_string()),
                };
                match result {
                    Ok(()) => Executed::ok(Outcome::Pass),
                    Err(cause) => Executed::failed(Outcome::Pass, cause),
                }
            }

            ComponentKind::Condition { test, reverse, .. }
            | ComponentKind::Loop { test, reverse, .. } => {
                // A failed predicate reads as `false` before `reverse`.
                match self.predicate(test) {
                    Ok(raw) => Executed::ok(Outcome::Branch(raw != *reverse)),
                    Err(cause) => Executed::failed(Outcome::Branch(*reverse), cause),
                }
            }

            ComponentKind::Utility { curves } => {
                let (winner, failure) = utility::select(curves, self.host);
                match failure {
                    None => Executed::ok(Outcome::Winner(winner)),
                    Some(cause) => Executed::failed(Outcome::Winner(winner), cause),
                }
            }
        }
    }

    pub fn predicate(&mut self, test: &Binding<BoundPredicate<H>>) -> Result<bool, String> {
        match test {
            Ok(bound) => bound.invoke(self.host).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    fn commit(&mut self, id: ComponentId, status: Status, cause: Option<String>) {
        let previous = std::mem::replace(&mut self.state.statuses[id.index()], status);
        if status > previous {
            let component = self.graph.component(id);
            warn!(
                graph = %self.graph.id(),
                component = %id,
                label = %component.label,
                kind = component.kind.as_str(),
                %status,
                cause = cause.as_deref().unwrap_or(""),
                "component status degraded"
            );
        }
    }
}
