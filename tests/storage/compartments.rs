//! Integration tests for the compartment hierarchy

use garm_foundation::{ErrorKind, Name, NameKind};
use garm_storage::{Dimension, Registry};

fn volumes() -> Registry {
    Registry::new()
        .declare_parameter("V_EXTRA", 1000.0)
        .unwrap()
        .declare_parameter("V_CM", 100.0)
        .unwrap()
        .declare_parameter("V_C", 100.0)
        .unwrap()
}

fn cell() -> Registry {
    volumes()
        .declare_compartment("EXTRA", 3, "V_EXTRA", None)
        .unwrap()
        .declare_compartment("CM", 2, "V_CM", Some("EXTRA"))
        .unwrap()
        .declare_compartment("C", 3, "V_C", Some("CM"))
        .unwrap()
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn membrane_sits_between_volumes() {
    let registry = cell();
    let cm = registry.lookup_compartment("CM").unwrap();
    assert_eq!(cm.dimension, Dimension::Surface);
    assert_eq!(cm.parent.as_ref().map(Name::as_str), Some("EXTRA"));
    assert_eq!(cm.size.as_str(), "V_CM");
}

#[test]
fn ancestor_chain_reaches_root() {
    let registry = cell();
    let chain: Vec<String> = registry
        .ancestor_chain("C")
        .unwrap()
        .map(ToString::to_string)
        .collect();
    assert_eq!(chain, vec!["C", "CM", "EXTRA"]);

    let compartments = registry.compartments();
    assert!(compartments.is_within("C", "EXTRA"));
    assert!(compartments.is_within("CM", "CM"));
    assert!(!compartments.is_within("EXTRA", "C"));
}

#[test]
fn chain_can_be_restarted() {
    let registry = cell();
    let first = registry.ancestor_chain("CM").unwrap().count();
    let second = registry.ancestor_chain("CM").unwrap().count();
    assert_eq!(first, 2);
    assert_eq!(first, second);
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn parent_must_exist() {
    let err = volumes()
        .declare_compartment("CM", 2, "V_CM", Some("EXTRA"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidHierarchy { .. }));
}

#[test]
fn dimensions_must_alternate() {
    let registry = volumes()
        .declare_compartment("EXTRA", 3, "V_EXTRA", None)
        .unwrap();
    let err = registry
        .declare_compartment("C", 3, "V_C", Some("EXTRA"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidHierarchy { .. }));
}

#[test]
fn only_surfaces_and_volumes() {
    for dimension in [0, 1, 4] {
        let err = volumes()
            .declare_compartment("X", dimension, "V_C", None)
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidHierarchy { .. }));
    }
}

#[test]
fn size_must_be_a_parameter() {
    let err = volumes()
        .declare_compartment("X", 3, "V_MISSING", None)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownParameter(ref n) if n == "V_MISSING"));

    let registry = volumes()
        .declare_expression("V_TWICE", garm_language::parse("2 * V_C").unwrap())
        .unwrap();
    let err = registry
        .declare_compartment("X", 3, "V_TWICE", None)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownParameter(_)));
}

#[test]
fn unknown_compartment_lookup() {
    let err = cell().ancestor_chain("NUCLEUS").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnknownEntity {
            kind: NameKind::Compartment,
            ..
        }
    ));
}
