//! Structural validation.
//!
//! A graph that passes [`validate`] compiles; binding failures (unknown
//! callable names, wrong arity) are not structural and are reported per
//! component at run time instead.

use std::collections::HashMap;

use crate::{GraphDescriptor, GraphError, GraphResult, NodeKey, NodeKind};

/// Check a descriptor for defects that would make compilation impossible.
///
/// Returns the first defect found, scanning nodes before transitions.
pub fn validate(graph: &GraphDescriptor) -> GraphResult<()> {
    // ── Nodes ─────────────────────────────────────────────────────────────
    let mut kinds: HashMap<NodeKey, &NodeKind> = HashMap::with_capacity(graph.nodes.len());
    let mut entries = 0usize;

    for node in &graph.nodes {
        if kinds.insert(node.key, &node.kind).is_some() {
            return Err(GraphError::DuplicateNode(node.key));
        }
        match &node.kind {
            NodeKind::Entry => entries += 1,
            NodeKind::Utility { curves } => {
                for curve in curves {
                    let clamp = match curve.clamp {
                        Some((lo, hi)) if !(lo.is_finite() && hi.is_finite() && lo <= hi) => {
                            Err(format!("clamp range [{lo}, {hi}] is invalid"))
                        }
                        _ => Ok(()),
                    };
                    clamp.and_then(|()| curve.response.check()).map_err(|reason| {
                        GraphError::Curve {
                            node: node.key,
                            curve: curve.name.clone(),
                            reason,
                        }
                    })?;
                }
            }
            _ => {}
        }
    }

    match entries {
        0 => return Err(GraphError::NoEntry),
        1 => {}
        n => return Err(GraphError::MultipleEntries(n)),
    }

    // ── Transitions ───────────────────────────────────────────────────────
    for (i, t) in graph.transitions.iter().enumerate() {
        let from_kind = kinds
            .get(&t.from)
            .ok_or(GraphError::UnknownNode { transition: i, node: t.from })?;
        if !kinds.contains_key(&t.to) {
            return Err(GraphError::UnknownNode { transition: i, node: t.to });
        }
        if !from_kind.accepts(t.group) {
            return Err(GraphError::IllegalGroup {
                transition: i,
                group:      t.group,
                kind:       from_kind.as_str(),
            });
        }

        let (pmin, pmax) = t.probability;
        if !(0.0..=100.0).contains(&pmin) || !(0.0..=100.0).contains(&pmax) || pmin > pmax {
            return Err(GraphError::Probability { transition: i, min: pmin, max: pmax });
        }

        let (cmin, cmax) = t.cooldown;
        if !(cmin.is_finite() && cmax.is_finite()) || cmin < 0.0 || cmin > cmax {
            return Err(GraphError::Cooldown { transition: i, min: cmin, max: cmax });
        }
    }

    Ok(())
}
