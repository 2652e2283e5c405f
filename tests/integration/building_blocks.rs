//! Integration tests for combining building blocks

use garm_debug::{TraceEvent, TracerConfig};
use garm_engine::{Model, Module};
use garm_foundation::{ErrorKind, NameKind, Result};
use garm_runtime::{Assembler, AssemblyConfig, merge};
use garm_stdlib::{
    Activation, GProtein, GProteinConfig, ReceptorActivation, ReceptorConfig,
    ReversibleTwoStateRates, TwoStateRates,
};

/// A minimal module that only declares a G monomer.
struct Named(&'static str);

impl Module for Named {
    fn name(&self) -> &str {
        self.0
    }

    fn monomers(&self, model: &Model) -> Result<Model> {
        model.declare_monomer("G", &["b"], &[])
    }
}

// =============================================================================
// Atomic Merge
// =============================================================================

#[test]
fn two_modules_declaring_g_commit_nothing() {
    let base = Model::new();
    let err = base.merge(&[&Named("first"), &Named("second")]).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateName {
            kind: NameKind::Monomer,
            ref name,
        } if name == "G"
    ));
    assert_eq!(err.source_module(), Some("second"));
    assert_eq!(base.lookup("G"), None);
    assert_eq!(base.stats(), Model::new().stats());
}

#[test]
fn stock_gprotein_clashes_with_custom_g() {
    let receptor = ReceptorActivation::default();
    let gprotein = GProtein::default();
    let custom = Named("custom");
    let modules: [&dyn Module; 3] = [&receptor, &custom, &gprotein];

    let err = merge(&modules).unwrap_err();
    assert_eq!(err.source_module(), Some("gprotein"));
}

#[test]
fn extending_a_model_is_atomic() {
    let base = merge(&[&ReceptorActivation::default()]).unwrap();
    let before = base.stats();

    let gprotein = GProtein::default();
    let clash = Named("clash");
    let modules: [&dyn Module; 2] = [&gprotein, &clash];
    assert!(Assembler::default().extend(&base, &modules).is_err());
    assert_eq!(base.stats(), before);
    assert_eq!(base.lookup("GDP"), None);
}

// =============================================================================
// Receptor and G-protein
// =============================================================================

#[test]
fn receptor_and_gprotein_compose() {
    let receptor = ReceptorActivation::default();
    let gprotein = GProtein::default();
    let modules: [&dyn Module; 2] = [&receptor, &gprotein];
    let model = merge(&modules).unwrap();

    let stats = model.stats();
    assert_eq!(stats.monomers, 8);
    assert_eq!(stats.compartments, 3);
    assert_eq!(stats.rules, 7);
    assert_eq!(stats.reversible_rules, 7);
    assert!(model.registry().compartments().is_within("C", "EXTRA"));
}

#[test]
fn gprotein_needs_the_membrane() {
    let err = merge(&[&GProtein::default()]).unwrap_err();
    assert_eq!(err.source_module(), Some("gprotein"));
    assert!(matches!(err.kind, ErrorKind::InvalidHierarchy { .. }));
}

#[test]
fn every_activation_mechanism_assembles() {
    let cases = [
        (Activation::None, 0),
        (Activation::SingleState(Default::default()), 1),
        (Activation::TwoState(TwoStateRates::default()), 2),
        (
            Activation::ReversibleTwoState(ReversibleTwoStateRates::default()),
            4,
        ),
    ];
    for (activation, rules) in cases {
        let receptor =
            ReceptorActivation::new(ReceptorConfig::new().with_activation(activation));
        let model = merge(&[&receptor]).unwrap();
        assert_eq!(model.stats().rules, rules, "{activation:?}");
        assert_eq!(model.stats().observables, 6);
    }
}

#[test]
fn custom_amounts_flow_into_parameters() {
    let receptor =
        ReceptorActivation::new(ReceptorConfig::new().with_initials(5e3, 50.0));
    let gprotein = GProtein::new(
        GProteinConfig::new()
            .with_initials(2e3, 10.0, 20.0)
            .with_ternary(None),
    );
    let modules: [&dyn Module; 2] = [&receptor, &gprotein];
    let model = merge(&modules).unwrap();

    assert_eq!(model.resolve("L_0").unwrap(), 5e3);
    assert_eq!(model.resolve("R_0").unwrap(), 50.0);
    assert_eq!(model.resolve("G_0").unwrap(), 2e3);
    assert_eq!(model.resolve("GTP_0").unwrap(), 20.0);
    assert_eq!(model.stats().rules, 1);
}

// =============================================================================
// Tracing
// =============================================================================

#[test]
fn traced_assembly_reports_rules() {
    let config = AssemblyConfig::new().with_trace(TracerConfig::new().enabled());
    let mut assembler = Assembler::new(config);
    let receptor = ReceptorActivation::default();
    let gprotein = GProtein::default();
    let modules: [&dyn Module; 2] = [&receptor, &gprotein];
    let model = assembler.assemble(&modules).unwrap();

    let buffer = assembler.tracer().buffer();
    let rules: Vec<_> = buffer
        .iter()
        .filter(|r| matches!(r.event, TraceEvent::RuleAdded { .. }))
        .collect();
    assert_eq!(rules.len(), model.stats().rules);
    assert!(matches!(
        buffer.iter().next().map(|r| &r.event),
        Some(TraceEvent::AssemblyStart { .. })
    ));
}
