//! Unit tests for bg-graph.

use bg_core::GraphId;

use crate::{
    CallSpec, CurveDescriptor, GraphBuilder, GraphError, GroupTag, NodeKey, NodeKind,
    ResponseCurve, TransitionSpec, validate,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Entry → condition; condition true → A, false → B.
fn branching() -> GraphBuilder {
    let mut b = GraphBuilder::new(GraphId(1), "branch");
    let entry = b.entry();
    let c = b.condition("c", CallSpec::new("ready"), false);
    let a = b.action("a", CallSpec::new("go"));
    let z = b.action("b", CallSpec::new("wait"));
    b.connect(entry, c, TransitionSpec::new());
    b.on_true(c, a, TransitionSpec::new());
    b.on_false(c, z, TransitionSpec::new());
    b
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn keys_are_sequential() {
        let mut b = GraphBuilder::new(GraphId(0), "g");
        assert_eq!(b.entry(), NodeKey(0));
        assert_eq!(b.action("x", CallSpec::new("x")), NodeKey(1));
    }

    #[test]
    fn transition_defaults() {
        let graph = branching().build().unwrap();
        let t = &graph.transitions[0];
        assert_eq!(t.probability, (100.0, 100.0));
        assert_eq!(t.cooldown, (0.0, 0.0));
        assert!(t.terminate);
        assert!(!t.capture_control);
        assert!(t.guard.is_none());
    }

    #[test]
    fn spec_setters() {
        let mut b = GraphBuilder::new(GraphId(0), "g");
        let e = b.entry();
        let a = b.action("a", CallSpec::new("a"));
        b.connect(
            e,
            a,
            TransitionSpec::new()
                .chance(40.0)
                .cooldown(1.0, 3.0)
                .terminate(false)
                .capture_control()
                .guard(CallSpec::new("ok"), true),
        );
        let g = b.build().unwrap();
        let t = &g.transitions[0];
        assert_eq!(t.probability, (40.0, 40.0));
        assert_eq!(t.cooldown, (1.0, 3.0));
        assert!(!t.terminate);
        assert!(t.capture_control);
        assert!(t.guard.as_ref().is_some_and(|g| g.reverse && g.call.name == "ok"));
    }

    #[test]
    fn descriptor_lookup() {
        let g = branching().build().unwrap();
        assert_eq!(g.entry().map(|n| n.key), Some(NodeKey(0)));
        assert_eq!(g.node(NodeKey(2)).map(|n| n.label.as_str()), Some("a"));
        assert!(g.node(NodeKey(9)).is_none());
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validate_tests {
    use super::*;

    #[test]
    fn missing_entry() {
        let mut b = GraphBuilder::new(GraphId(0), "g");
        b.action("a", CallSpec::new("a"));
        assert_eq!(b.build(), Err(GraphError::NoEntry));
    }

    #[test]
    fn two_entries() {
        let mut b = GraphBuilder::new(GraphId(0), "g");
        b.entry();
        b.entry();
        assert_eq!(b.build(), Err(GraphError::MultipleEntries(2)));
    }

    #[test]
    fn dangling_destination() {
        let mut g = branching().finish();
        g.transitions[1].to = NodeKey(77);
        assert_eq!(
            validate(&g),
            Err(GraphError::UnknownNode { transition: 1, node: NodeKey(77) })
        );
    }

    #[test]
    fn duplicate_keys() {
        let mut g = branching().finish();
        g.nodes[3].key = NodeKey(1);
        assert_eq!(validate(&g), Err(GraphError::DuplicateNode(NodeKey(1))));
    }

    #[test]
    fn group_must_match_origin_kind() {
        let mut b = GraphBuilder::new(GraphId(0), "g");
        let e = b.entry();
        let a = b.action("a", CallSpec::new("a"));
        b.on_while(e, a, TransitionSpec::new());
        assert_eq!(
            b.build(),
            Err(GraphError::IllegalGroup { transition: 0, group: GroupTag::While, kind: "entry" })
        );
    }

    #[test]
    fn curve_index_must_exist() {
        let mut b = GraphBuilder::new(GraphId(0), "g");
        let e = b.entry();
        let u = b.utility("u", vec![CurveDescriptor::new("only", CallSpec::new("s"))]);
        b.connect(e, u, TransitionSpec::new());
        b.on_curve(u, 0, e, TransitionSpec::new());
        b.on_curve(u, 1, e, TransitionSpec::new());
        assert!(matches!(b.build(), Err(GraphError::IllegalGroup { transition: 2, .. })));
    }

    #[test]
    fn probability_bounds() {
        let mut g = branching().finish();
        g.transitions[0].probability = (50.0, 120.0);
        assert!(matches!(validate(&g), Err(GraphError::Probability { transition: 0, .. })));
        g.transitions[0].probability = (60.0, 40.0);
        assert!(matches!(validate(&g), Err(GraphError::Probability { .. })));
        g.transitions[0].probability = (f64::NAN, 40.0);
        assert!(matches!(validate(&g), Err(GraphError::Probability { .. })));
    }

    #[test]
    fn cooldown_bounds() {
        let mut g = branching().finish();
        g.transitions[2].cooldown = (-1.0, 1.0);
        assert!(matches!(validate(&g), Err(GraphError::Cooldown { transition: 2, .. })));
        g.transitions[2].cooldown = (0.0, f64::INFINITY);
        assert!(matches!(validate(&g), Err(GraphError::Cooldown { .. })));
    }

    #[test]
    fn unreachable_nodes_are_legal() {
        let mut b = branching();
        b.action("orphan", CallSpec::new("never"));
        assert!(b.build().is_ok());
    }

    #[test]
    fn bad_curve_rejected() {
        let mut b = GraphBuilder::new(GraphId(0), "g");
        b.entry();
        b.node(
            "u",
            NodeKind::Utility {
                curves: vec![CurveDescriptor::new("c", CallSpec::new("s"))
                    .response(ResponseCurve::Keyframes(vec![(1.0, 0.0), (1.0, 1.0)]))],
            },
        );
        assert!(matches!(b.build(), Err(GraphError::Curve { .. })));

        let mut b = GraphBuilder::new(GraphId(0), "g");
        b.entry();
        b.utility("u", vec![CurveDescriptor::new("c", CallSpec::new("s")).clamp(2.0, 1.0)]);
        assert!(matches!(b.build(), Err(GraphError::Curve { .. })));
    }
}

// ── Response curves ───────────────────────────────────────────────────────────

#[cfg(test)]
mod curve_tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn closed_forms() {
        assert_eq!(ResponseCurve::Identity.apply(0.3), 0.3);
        assert!(close(ResponseCurve::Linear { slope: 2.0, intercept: 1.0 }.apply(0.5), 2.0));
        assert!(close(ResponseCurve::Exponential { exponent: 2.0 }.apply(0.5), 0.25));
        assert!(close(ResponseCurve::Logistic { steepness: 10.0, midpoint: 0.5 }.apply(0.5), 0.5));
    }

    #[test]
    fn keyframes_interpolate_and_clamp() {
        let k = ResponseCurve::Keyframes(vec![(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)]);
        assert!(close(k.apply(-5.0), 0.0));
        assert!(close(k.apply(0.5), 5.0));
        assert!(close(k.apply(1.0), 10.0));
        assert!(close(k.apply(1.5), 5.0));
        assert!(close(k.apply(9.0), 0.0));
    }

    #[test]
    fn check_rejects_degenerate_keyframes() {
        assert!(ResponseCurve::Keyframes(vec![]).check().is_err());
        assert!(ResponseCurve::Keyframes(vec![(0.0, f64::NAN)]).check().is_err());
        assert!(ResponseCurve::Keyframes(vec![(0.0, 1.0)]).check().is_ok());
        assert!(ResponseCurve::Linear { slope: f64::INFINITY, intercept: 0.0 }.check().is_err());
    }
}
