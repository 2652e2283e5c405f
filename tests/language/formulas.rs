//! Integration tests for rate formulas

use garm_foundation::{Error, ErrorKind, Name, Result};
use garm_language::{BinaryOp, Formula, parse};
use proptest::prelude::*;

fn eval_with(formula: &Formula, values: &[(&str, f64)]) -> Result<f64> {
    formula.evaluate(&mut |name: &Name| {
        values
            .iter()
            .find(|(n, _)| *n == name.as_str())
            .map(|(_, v)| *v)
            .ok_or_else(|| Error::unknown_reference(name.as_str()))
    })
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn dissociation_rate_formula() {
    let formula = Formula::parse("Kd_LR * kf_L_bind_R").unwrap();
    let value = eval_with(&formula, &[("Kd_LR", 100.0), ("kf_L_bind_R", 1e-3)]).unwrap();
    assert!((value - 0.1).abs() < 1e-12);
}

#[test]
fn references_are_collected_once() {
    let formula = parse("kf * kf + Kd / (kf - 1)").unwrap();
    let names: Vec<&str> = formula.references().into_iter().map(Name::as_str).collect();
    assert_eq!(names, vec!["Kd", "kf"]);
    assert!(formula.references_name("Kd"));
    assert!(!formula.references_name("kr"));
}

#[test]
fn precedence_follows_arithmetic() {
    let formula = parse("1 + 2 * 3 ^ 2").unwrap();
    assert_eq!(eval_with(&formula, &[]).unwrap(), 19.0);
    let formula = parse("-2 ^ 2").unwrap();
    assert_eq!(eval_with(&formula, &[]).unwrap(), -4.0);
}

#[test]
fn parse_error_reports_position() {
    let err = parse("kf *\n  )").unwrap_err();
    match err.kind {
        ErrorKind::ParseError { line, context, .. } => {
            assert_eq!(line, 2);
            assert_eq!(context, "  )");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn operators_build_the_same_tree_as_text() {
    let built = Formula::named("Kd").unwrap() * Formula::named("kf").unwrap();
    assert_eq!(built, parse("Kd * kf").unwrap());
    assert_eq!(
        built,
        Formula::binary(
            BinaryOp::Mul,
            Formula::named("Kd").unwrap(),
            Formula::named("kf").unwrap()
        )
    );
}

#[test]
fn display_reparses() {
    for source in ["a - (b - c)", "(a + b) * c", "a ^ b ^ c", "-(a + 1) / 2"] {
        let formula = parse(source).unwrap();
        assert_eq!(parse(&formula.to_string()).unwrap(), formula, "{source}");
    }
}

#[test]
fn division_by_zero_is_an_error() {
    let formula = parse("kf / zero").unwrap();
    let err = eval_with(&formula, &[("kf", 1.0), ("zero", 0.0)]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DivisionByZero));
}

#[test]
fn missing_reference_propagates() {
    let formula = parse("Kd * kf").unwrap();
    let err = eval_with(&formula, &[("kf", 1.0)]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownReference(ref n) if n == "Kd"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn products_match_native_arithmetic(a in 1e-6f64..1e6, b in 1e-6f64..1e6) {
        let formula = parse("a * b").unwrap();
        let value = eval_with(&formula, &[("a", a), ("b", b)]).unwrap();
        prop_assert!((value - a * b).abs() <= 1e-9 * (a * b).abs());
    }
}
