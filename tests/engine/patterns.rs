//! Integration tests for species patterns

use garm_engine::SiteCondition::{Bound, Unbound, Unconstrained};
use garm_engine::{ComplexPattern, SiteCondition, compose};
use garm_foundation::{ErrorKind, NameKind};

use crate::fixtures::receptor_model;

// =============================================================================
// Monomer Patterns
// =============================================================================

#[test]
fn pattern_lists_sites_in_declaration_order() {
    let model = receptor_model();
    let pattern = model
        .pattern(
            "R",
            &[("state", SiteCondition::state("I")), ("bl", Unbound)],
            Some("CM"),
        )
        .unwrap();
    assert_eq!(pattern.to_string(), "R(bl,state~I)@CM");
    assert_eq!(pattern.condition("bg"), &Unconstrained);
    assert_eq!(pattern.compartment().map(|c| c.as_str()), Some("CM"));
}

#[test]
fn unconstrained_sites_are_dropped() {
    let model = receptor_model();
    let explicit = model
        .pattern("R", &[("bl", Unconstrained), ("bg", Unbound)], None)
        .unwrap();
    let implicit = model.pattern("R", &[("bg", Unbound)], None).unwrap();
    assert_eq!(explicit, implicit);
}

#[test]
fn pattern_rejects_unknown_names() {
    let model = receptor_model();

    let err = model.pattern("G", &[], None).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnknownEntity {
            kind: NameKind::Monomer,
            ..
        }
    ));

    let err = model.pattern("L", &[("x", Unbound)], None).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownSite { .. }));

    let err = model.pattern("L", &[], Some("C")).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnknownEntity {
            kind: NameKind::Compartment,
            ..
        }
    ));
}

#[test]
fn state_labels_are_checked() {
    let model = receptor_model();
    let err = model
        .pattern("R", &[("state", SiteCondition::state("X"))], None)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidState { .. }));

    // A binding site has no states to choose from.
    let err = model
        .pattern("L", &[("b", SiteCondition::state("I"))], None)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidState { .. }));
}

#[test]
fn site_assigned_twice() {
    let model = receptor_model();
    let err = model
        .pattern("L", &[("b", Unbound), ("b", Bound(1))], None)
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateName {
            kind: NameKind::Site,
            ..
        }
    ));
}

// =============================================================================
// Complexes
// =============================================================================

#[test]
fn complex_order_is_canonical() {
    let model = receptor_model();
    let l = model.pattern("L", &[("b", Bound(7))], Some("EXTRA")).unwrap();
    let r = model.pattern("R", &[("bl", Bound(7))], Some("CM")).unwrap();

    let forward = compose(vec![l.clone(), r.clone()]).unwrap();
    let backward = compose(vec![r, l]).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward.to_string(), "L(b!1)@EXTRA.R(bl!1)@CM");
    assert_eq!(forward.bond_count(), 1);
    assert!(forward.contains_monomer("R"));
}

#[test]
fn dangling_bond_is_rejected() {
    let model = receptor_model();
    let l = model.pattern("L", &[("b", Bound(1))], None).unwrap();
    let err = ComplexPattern::single(l).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnbalancedBond { index: 1, count: 1 }
    ));
}

#[test]
fn bond_shared_by_three_sites() {
    let model = receptor_model();
    let err = compose(vec![
        model.pattern("L", &[("b", Bound(1))], None).unwrap(),
        model.pattern("R", &[("bl", Bound(1))], None).unwrap(),
        model.pattern("R", &[("bl", Bound(1))], None).unwrap(),
    ])
    .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnbalancedBond { index: 1, count: 3 }
    ));
}

#[test]
fn empty_complex_is_rejected() {
    assert!(compose(Vec::new()).is_err());
}

#[test]
fn species_shortcut_matches_single() {
    let model = receptor_model();
    let via_species = model.species("L", &[("b", Unbound)], Some("EXTRA")).unwrap();
    let via_single = ComplexPattern::single(
        model.pattern("L", &[("b", Unbound)], Some("EXTRA")).unwrap(),
    )
    .unwrap();
    assert_eq!(via_species, via_single);
    assert_eq!(via_species.len(), 1);
}
