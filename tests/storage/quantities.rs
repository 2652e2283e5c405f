//! Integration tests for parameters and expressions

use garm_foundation::{ErrorKind, NameKind};
use garm_language::Formula;
use garm_storage::{Quantity, Registry};
use proptest::prelude::*;

fn formula(text: &str) -> Formula {
    Formula::parse(text).unwrap()
}

fn rates() -> Registry {
    Registry::new()
        .declare_parameter("kf_L_bind_R", 1e-3)
        .unwrap()
        .declare_parameter("Kd_LR", 100.0)
        .unwrap()
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn reverse_rate_from_dissociation_constant() {
    let registry = rates()
        .declare_expression("kr_L_bind_R", formula("Kd_LR * kf_L_bind_R"))
        .unwrap();
    assert_eq!(registry.lookup("kr_L_bind_R"), Some(NameKind::Expression));
    assert!((registry.resolve("kr_L_bind_R").unwrap() - 0.1).abs() < 1e-12);
}

#[test]
fn infinite_parameter_leaves_registry_unchanged() {
    let registry = rates();
    let err = registry.declare_parameter("V_CM", f64::INFINITY).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NonFiniteValue { .. }));
    assert_eq!(registry.lookup("V_CM"), None);
}

#[test]
fn expressions_chain() {
    let registry = rates()
        .declare_expression("kr", formula("Kd_LR * kf_L_bind_R"))
        .unwrap()
        .declare_expression("kr_half", formula("kr / 2"))
        .unwrap();
    assert!((registry.resolve("kr_half").unwrap() - 0.05).abs() < 1e-12);
}

#[test]
fn resolution_is_repeatable() {
    let registry = rates()
        .declare_expression("kr", formula("Kd_LR * kf_L_bind_R"))
        .unwrap();
    let first = registry.resolve("kr").unwrap();
    let second = registry.resolve("kr").unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn store_keeps_declaration_order() {
    let registry = rates()
        .declare_expression("kr", formula("Kd_LR * kf_L_bind_R"))
        .unwrap();
    let names: Vec<&str> = registry
        .parameters()
        .iter()
        .map(|q| q.name().as_str())
        .collect();
    assert_eq!(names, vec!["kf_L_bind_R", "Kd_LR", "kr"]);
    assert!(matches!(
        registry.parameters().get("kr"),
        Some(Quantity::Expression(_))
    ));
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn reference_must_be_declared_first() {
    let err = Registry::new()
        .declare_expression("kr", formula("Kd * kf"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownReference(_)));
}

#[test]
fn reference_must_be_numeric() {
    let registry = rates().declare_monomer("L", &["b"], &[]).unwrap();
    let err = registry
        .declare_expression("weird", formula("L * 2"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownReference(ref n) if n == "L"));
}

#[test]
fn self_reference_is_a_cycle() {
    let err = rates()
        .declare_expression("x", formula("x + 1"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CyclicReference { .. }));
}

#[test]
fn batch_resolves_forward_references() {
    let registry = rates()
        .declare_expressions(vec![
            ("b", formula("a * 2")),
            ("a", formula("Kd_LR + 1")),
        ])
        .unwrap();
    assert_eq!(registry.resolve("b").unwrap(), 202.0);
}

#[test]
fn batch_cycle_commits_nothing() {
    let registry = rates();
    let err = registry
        .declare_expressions(vec![
            ("a", formula("b + 1")),
            ("b", formula("c + 1")),
            ("c", formula("a + 1")),
        ])
        .unwrap_err();
    match err.kind {
        ErrorKind::CyclicReference { cycle } => {
            assert_eq!(cycle.first(), cycle.last());
            assert_eq!(cycle.len(), 4);
        }
        other => panic!("expected cycle, got {other:?}"),
    }
    assert_eq!(registry.lookup("a"), None);
}

#[test]
fn unknown_name_does_not_resolve() {
    let err = rates().resolve("kcat").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownReference(_)));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn product_expression_resolves(kd in 1e-3f64..1e4, kf in 1e-6f64..1e2) {
        let registry = Registry::new()
            .declare_parameter("Kd", kd)
            .unwrap()
            .declare_parameter("kf", kf)
            .unwrap()
            .declare_expression("kr", formula("Kd * kf"))
            .unwrap();
        let value = registry.resolve("kr").unwrap();
        prop_assert!((value - kd * kf).abs() <= 1e-12 * (kd * kf).abs());
    }
}
