//! Integration tests for identifiers and namespace kinds

use garm_foundation::{ErrorKind, Name, NameKind};

// =============================================================================
// Validation
// =============================================================================

#[test]
fn model_identifiers_are_valid() {
    for text in ["L", "R", "kf_L_bind_R", "Kd_LR", "V_EXTRA", "_private", "LR_A"] {
        assert!(Name::new(text).is_ok(), "{text} should be valid");
    }
}

#[test]
fn malformed_identifiers_are_rejected() {
    for text in ["", "1st", "L-R", "has space", "kf.x", "état"] {
        let err = Name::new(text).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidName(_)), "{text}");
    }
}

#[test]
fn conversions_agree_with_new() {
    let from_str = Name::try_from("Kd_LR").unwrap();
    let from_string = Name::try_from(String::from("Kd_LR")).unwrap();
    assert_eq!(from_str, from_string);
    assert_eq!(String::from(from_str), "Kd_LR");
    assert!(Name::try_from("no way").is_err());
}

#[test]
fn display_is_bare_text() {
    let name = Name::new("R_0").unwrap();
    assert_eq!(name.to_string(), "R_0");
    assert_eq!(name.as_str(), "R_0");
}

// =============================================================================
// Kinds
// =============================================================================

#[test]
fn only_parameters_and_expressions_are_numeric() {
    assert!(NameKind::Parameter.is_numeric());
    assert!(NameKind::Expression.is_numeric());
    for kind in [
        NameKind::Monomer,
        NameKind::Site,
        NameKind::Compartment,
        NameKind::Observable,
        NameKind::Initial,
    ] {
        assert!(!kind.is_numeric(), "{kind}");
    }
}
