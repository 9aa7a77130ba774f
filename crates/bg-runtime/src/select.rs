//! Transition selection within one group.
//!
//! For each transition, in declaration order:
//!
//! 1. skip it while its cooldown has not expired;
//! 2. draw `d ∈ [0, 100)` and a threshold `p ∈ [min, max]`; it is armed
//!    only if `d < p` (so a maximum of 0 never fires and 100 always does);
//! 3. if it has a guard, the guard (after `reverse`) must hold too;
//! 4. fire it: schedule its cooldown, run or target its destination, and
//!    stop the group if it terminates.
//!
//! Several non-terminating transitions may fire in one pass.  Captured
//! firings run their destination on the spot; among the others, the last
//! one decides where control moves.

use bg_core::{AgentRng, ComponentId, TransitionId};
use tracing::{debug, trace};

use crate::execute::Step;
use crate::report::Firing;
use crate::{Guard, Span};

#[derive(Default)]
pub(crate) struct GroupResult {
    /// Destination of the last non-captured firing.
    pub next:          Option<ComponentId>,
    /// First guard that could not be evaluated.
    pub guard_failure: Option<String>,
}

/// One probability roll against `span`.
#[inline]
pub fn roll(rng: &mut AgentRng, span: Span) -> bool {
    let draw = rng.percent();
    let threshold = rng.uniform_inclusive(span.min, span.max);
    draw < threshold
}

pub(crate) fn evaluate_group<H>(
    step:   &mut Step<'_, H>,
    origin: ComponentId,
    group:  &[TransitionId],
) -> GroupResult {
    let graph = step.graph;
    let now = step.state.clock.now();
    let mut result = GroupResult::default();

    for &tid in group {
        let t = graph.transition(tid);

        if step.state.cooling(tid, now) {
            trace!(transition = %tid, until = step.state.cooldown_until[tid.index()], "cooling down");
            continue;
        }
        if !roll(&mut step.state.rng, t.probability) {
            trace!(transition = %tid, "probability roll failed");
            continue;
        }
        if let Some(guard) = &t.guard {
            match check_guard(step, guard) {
                Ok(true) => {}
                Ok(false) => {
                    trace!(transition = %tid, "guard rejected");
                    continue;
                }
                Err(cause) => {
                    result.guard_failure.get_or_insert(cause);
                    continue;
                }
            }
        }

        let wait = step.state.rng.uniform_inclusive(t.cooldown.min, t.cooldown.max);
        step.state.cooldown_until[tid.index()] = now + wait;
        debug!(
            graph = %graph.id(),
            transition = %tid,
            from = %origin,
            to = %t.to,
            captured = t.capture_control,
            cooldown = wait,
            "transition fired"
        );
        if step.record {
            step.fired.push(Firing {
                transition: tid,
                from:       origin,
                to:         t.to,
                captured:   t.capture_control,
            });
        }

        if t.capture_control {
            step.run_captured(t.to);
        } else {
            result.next = Some(t.to);
        }

        if t.terminate {
            break;
        }
    }

    result
}

fn check_guard<H>(step: &mut Step<'_, H>, guard: &Guard<H>) -> Result<bool, String> {
    step.predicate(&guard.test).map(|holds| holds != guard.reverse)
}
