//! End-to-end assembly of a single ligand-receptor binding model
//!
//! Declares everything by hand through the module phases and checks the
//! assembled model against the stock receptor building block.

use garm::engine::SiteCondition::{Bound, Unbound};
use garm::engine::{Model, Module, SiteCondition, compose};
use garm::foundation::{ErrorKind, NameKind, Result};
use garm::language::Formula;
use garm::stdlib::ReceptorActivation;

struct Binding;

impl Module for Binding {
    fn name(&self) -> &str {
        "binding"
    }

    fn monomers(&self, model: &Model) -> Result<Model> {
        model
            .declare_monomer("L", &["b"], &[])?
            .declare_monomer("R", &["bl", "bg", "state"], &[("state", &["I", "A"])])
    }

    fn compartments(&self, model: &Model) -> Result<Model> {
        model
            .declare_parameters(&[("V_EXTRA", 1000.0), ("V_CM", 100.0)])?
            .declare_compartment("EXTRA", 3, "V_EXTRA", None)?
            .declare_compartment("CM", 2, "V_CM", Some("EXTRA"))
    }

    fn initials(&self, model: &Model) -> Result<Model> {
        let model = model.declare_parameters(&[("L_0", 1e4), ("R_0", 200.0)])?;
        let ligand = model.species("L", &[("b", Unbound)], Some("EXTRA"))?;
        let receptor = model.species(
            "R",
            &[("bl", Unbound), ("bg", Unbound), ("state", SiteCondition::state("I"))],
            Some("CM"),
        )?;
        model.add_initial(ligand, "L_0")?.add_initial(receptor, "R_0")
    }

    fn rules(&self, model: &Model) -> Result<Model> {
        let model = model
            .declare_parameters(&[("Kd_LR", 100.0), ("kf_L_bind_R", 1e-3)])?
            .declare_expression("kr_L_bind_R", Formula::parse("Kd_LR * kf_L_bind_R")?)?;
        let ligand = model.species("L", &[("b", Unbound)], Some("EXTRA"))?;
        let receptor = model.species(
            "R",
            &[("bl", Unbound), ("bg", Unbound), ("state", SiteCondition::state("I"))],
            Some("CM"),
        )?;
        let complex = compose(vec![
            model.pattern("L", &[("b", Bound(1))], Some("EXTRA"))?,
            model.pattern(
                "R",
                &[("bl", Bound(1)), ("bg", Unbound), ("state", SiteCondition::state("A"))],
                Some("CM"),
            )?,
        ])?;
        let (model, _) = model.add_rule(
            vec![ligand, receptor],
            vec![complex],
            "kf_L_bind_R",
            Some("kr_L_bind_R"),
        )?;
        Ok(model)
    }
}

#[test]
fn binding_model_assembles() {
    let model = Model::new().merge(&[&Binding]).unwrap();
    let stats = model.stats();

    assert_eq!(stats.monomers, 2);
    assert_eq!(stats.compartments, 2);
    assert_eq!(model.lookup("L_0"), Some(NameKind::Parameter));
    assert_eq!(model.lookup("R_0"), Some(NameKind::Parameter));
    assert_eq!(model.resolve("L_0").unwrap(), 1e4);
    assert_eq!(model.resolve("R_0").unwrap(), 200.0);
    assert_eq!(stats.initials, 2);

    assert_eq!(stats.rules, 1);
    let (_, rule) = model.rules().iter().next().unwrap();
    let (forward, reverse) = rule.resolved_rates(model.registry()).unwrap();
    assert!((forward - 1e-3).abs() < 1e-15);
    assert!((reverse.unwrap() - 0.1).abs() < 1e-12);
}

#[test]
fn membrane_is_inside_extracellular_space() {
    let model = Model::new().merge(&[&Binding]).unwrap();
    let compartments = model.registry().compartments();
    assert!(compartments.is_within("CM", "EXTRA"));
    assert!(!compartments.is_within("EXTRA", "CM"));
}

#[test]
fn stock_receptor_builds_the_same_rule() {
    let by_hand = Model::new().merge(&[&Binding]).unwrap();
    let stock = Model::new()
        .merge(&[&ReceptorActivation::default()])
        .unwrap();

    let hand_rules: Vec<String> = by_hand.rules().iter().map(|(_, r)| r.to_string()).collect();
    let stock_rules: Vec<String> = stock.rules().iter().map(|(_, r)| r.to_string()).collect();
    assert_eq!(hand_rules, stock_rules);
    assert_eq!(
        by_hand.initials().iter().map(ToString::to_string).collect::<Vec<_>>(),
        stock.initials().iter().map(ToString::to_string).collect::<Vec<_>>()
    );
}

#[test]
fn binding_twice_is_rejected() {
    let err = Model::new().merge(&[&Binding, &Binding]).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateName {
            kind: NameKind::Monomer,
            ..
        }
    ));
}
