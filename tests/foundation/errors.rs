//! Integration tests for error reporting

use garm_foundation::{Error, ErrorContext, ErrorKind, NameKind};

// =============================================================================
// Messages
// =============================================================================

#[test]
fn duplicate_name_message_names_kind() {
    let err = Error::duplicate_name(NameKind::Parameter, "kf");
    assert_eq!(err.to_string(), "duplicate parameter name: kf");
}

#[test]
fn cyclic_reference_message_lists_cycle() {
    let err = Error::new(ErrorKind::CyclicReference {
        cycle: vec!["a".into(), "b".into(), "a".into()],
    });
    assert_eq!(err.to_string(), "cyclic reference: a -> b -> a");
}

#[test]
fn unbalanced_bond_message() {
    let err = Error::new(ErrorKind::UnbalancedBond { index: 1, count: 1 });
    assert_eq!(
        err.to_string(),
        "unbalanced bond 1: appears 1 time(s), expected 2"
    );
}

#[test]
fn hierarchy_message_names_compartment() {
    let err = Error::invalid_hierarchy("C", "parent CM is not declared");
    let msg = err.to_string();
    assert!(msg.contains("compartment C"));
    assert!(msg.contains("parent CM"));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_records_module_and_frames() {
    let err = Error::unknown_parameter("V_C").with_context(
        ErrorContext::new()
            .with_source("gprotein")
            .with_frame("compartments phase"),
    );
    assert_eq!(err.source_module(), Some("gprotein"));

    let rendered = err.context.unwrap().to_string();
    assert!(rendered.starts_with("in module gprotein"));
    assert!(rendered.contains("  in compartments phase"));
}

#[test]
fn error_without_context_has_no_module() {
    let err = Error::rate_reference("L");
    assert!(err.source_module().is_none());
    assert!(matches!(err.kind, ErrorKind::RateReference(ref name) if name == "L"));
}
