//! Integration tests for the shared namespace

use garm_foundation::{ErrorKind, NameKind};
use garm_language::Formula;
use garm_storage::Registry;

fn formula(text: &str) -> Formula {
    Formula::parse(text).unwrap()
}

fn receptor_registry() -> Registry {
    Registry::new()
        .declare_monomer("L", &["b"], &[])
        .unwrap()
        .declare_monomer("R", &["bl", "bg", "state"], &[("state", &["I", "A"])])
        .unwrap()
        .declare_parameter("V_EXTRA", 1000.0)
        .unwrap()
        .declare_compartment("EXTRA", 3, "V_EXTRA", None)
        .unwrap()
}

// =============================================================================
// Namespace
// =============================================================================

#[test]
fn every_declaration_is_bound() {
    let registry = receptor_registry();
    assert_eq!(registry.lookup("L"), Some(NameKind::Monomer));
    assert_eq!(registry.lookup("EXTRA"), Some(NameKind::Compartment));
    assert_eq!(registry.lookup("V_EXTRA"), Some(NameKind::Parameter));
    assert_eq!(registry.lookup("CM"), None);
    assert_eq!(registry.name_count(), 4);
}

#[test]
fn collisions_cross_kinds() {
    let registry = receptor_registry();

    let err = registry.declare_parameter("R", 1.0).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateName {
            kind: NameKind::Monomer,
            ..
        }
    ));

    let err = registry.declare_monomer("V_EXTRA", &[], &[]).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateName {
            kind: NameKind::Parameter,
            ..
        }
    ));
}

#[test]
fn failed_declaration_leaves_registry_unchanged() {
    let registry = receptor_registry();
    let snapshot = registry.clone();
    assert!(registry.declare_monomer("L", &["b"], &[]).is_err());
    assert!(registry.declare_expression("bad", formula("nope * 2")).is_err());
    assert_eq!(registry, snapshot);
}

#[test]
fn reserve_binds_foreign_kinds() {
    let registry = receptor_registry().reserve("LR", NameKind::Observable).unwrap();
    assert_eq!(registry.lookup("LR"), Some(NameKind::Observable));
    assert!(!registry.is_numeric("LR"));
    assert!(registry.declare_parameter("LR", 1.0).is_err());
}

// =============================================================================
// Monomers
// =============================================================================

#[test]
fn monomer_sites_keep_declaration_order() {
    let registry = receptor_registry();
    let receptor = registry.lookup_monomer("R").unwrap();
    let sites: Vec<&str> = receptor.sites().iter().map(|s| s.name().as_str()).collect();
    assert_eq!(sites, vec!["bl", "bg", "state"]);
    assert!(receptor.site("state").unwrap().allows("A"));
    assert!(!receptor.site("state").unwrap().allows("X"));
    assert!(!receptor.site("bl").unwrap().is_state_site());
    assert_eq!(receptor.to_string(), "R(bl,bg,state~I~A)");
}

#[test]
fn malformed_monomers_are_rejected() {
    let registry = Registry::new();

    let err = registry.declare_monomer("R", &["b", "b"], &[]).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateName {
            kind: NameKind::Site,
            ..
        }
    ));

    let err = registry
        .declare_monomer("R", &["b"], &[("state", &["I"])])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownSite { .. }));

    let err = registry
        .declare_monomer("R", &["state"], &[("state", &["I", "I"])])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidSiteState { .. }));

    let err = registry.declare_monomer("R", &["state"], &[("state", &[])]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidSiteState { .. }));

    assert_eq!(registry.name_count(), 0);
}

#[test]
fn unknown_monomer_lookup() {
    let err = Registry::new().lookup_monomer("G").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnknownEntity {
            kind: NameKind::Monomer,
            ..
        }
    ));
}
