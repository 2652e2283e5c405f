//! Receptor activation.
//!
//! Declares ligand `L(b)` and receptor `R(bl, bg, state~{I,A})`, the
//! extracellular volume `EXTRA` with the membrane `CM` inside it, the seeded
//! free ligand and inactive receptor, and six observables. The rules depend
//! on the selected [`Activation`] mechanism.

use garm_engine::{Model, Module};
use garm_foundation::Result;

use crate::dissociation;
use crate::species::{
    ACTIVE, CM, EXTRA, INACTIVE, ligand_free, ligand_receptor, ligand_receptor_any,
    receptor_free, receptor_in_state,
};

// =============================================================================
// Configuration
// =============================================================================

/// Rates for ligand binding with a single receptor conformation change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BindingRates {
    /// `Kd_LR`, the ligand-receptor dissociation constant.
    pub kd: f64,
    /// `kf_L_bind_R`, the binding rate.
    pub kf: f64,
}

impl Default for BindingRates {
    fn default() -> Self {
        Self { kd: 100.0, kf: 1e-3 }
    }
}

/// Rates for binding followed by activation of the bound receptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoStateRates {
    /// Ligand binding to the inactive receptor.
    pub binding: BindingRates,
    /// `kf_R_I_to_A`.
    pub kf_activate: f64,
    /// `kr_R_I_to_A`.
    pub kr_activate: f64,
}

impl Default for TwoStateRates {
    fn default() -> Self {
        Self {
            binding: BindingRates::default(),
            kf_activate: 0.1,
            kr_activate: 1.0,
        }
    }
}

/// Rates for the reversible two-state scheme, where both free and bound
/// receptors switch conformation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReversibleTwoStateRates {
    /// `Kd_LR_I` and `kf_L_bind_R_I`.
    pub inactive: BindingRates,
    /// `Kd_LR_A` and `kf_L_bind_R_A`.
    pub active: BindingRates,
    /// `kf_LR_I_to_A`.
    pub kf_complex_activate: f64,
    /// `kr_LR_I_to_A`.
    pub kr_complex_activate: f64,
    /// `kf_R_I_to_A`.
    pub kf_receptor_activate: f64,
    /// `kr_R_I_to_A`.
    pub kr_receptor_activate: f64,
}

impl Default for ReversibleTwoStateRates {
    fn default() -> Self {
        Self {
            inactive: BindingRates { kd: 100.0, kf: 1e-3 },
            active: BindingRates { kd: 200.0, kf: 1e-4 },
            kf_complex_activate: 0.1,
            kr_complex_activate: 1.0,
            kf_receptor_activate: 0.1,
            kr_receptor_activate: 0.1,
        }
    }
}

/// How ligand binding activates the receptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Activation {
    /// No rules; species, geometry, initials and observables only.
    None,
    /// `L + R_I <-> LR_A`.
    SingleState(BindingRates),
    /// `L + R_I <-> LR_I <-> LR_A`.
    TwoState(TwoStateRates),
    /// `L + R_I <-> LR_I`, `L + R_A <-> LR_A`, `LR_I <-> LR_A`, `R_I <-> R_A`.
    ReversibleTwoState(ReversibleTwoStateRates),
}

impl Default for Activation {
    fn default() -> Self {
        Self::SingleState(BindingRates::default())
    }
}

/// Geometry, initial amounts and mechanism for [`ReceptorActivation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReceptorConfig {
    /// `V_EXTRA`, the extracellular volume.
    pub v_extra: f64,
    /// `V_CM`, the membrane area.
    pub v_cm: f64,
    /// `L_0`, the seeded free ligand.
    pub ligand: f64,
    /// `R_0`, the seeded inactive receptor.
    pub receptor: f64,
    /// The activation mechanism.
    pub activation: Activation,
}

impl Default for ReceptorConfig {
    fn default() -> Self {
        Self {
            v_extra: 1000.0,
            v_cm: 100.0,
            ligand: 1e4,
            receptor: 200.0,
            activation: Activation::default(),
        }
    }
}

impl ReceptorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the compartment sizes.
    #[must_use]
    pub fn with_volumes(mut self, v_extra: f64, v_cm: f64) -> Self {
        self.v_extra = v_extra;
        self.v_cm = v_cm;
        self
    }

    /// Builder method to set the seeded amounts.
    #[must_use]
    pub fn with_initials(mut self, ligand: f64, receptor: f64) -> Self {
        self.ligand = ligand;
        self.receptor = receptor;
        self
    }

    /// Builder method to select the activation mechanism.
    #[must_use]
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }
}

// =============================================================================
// Module
// =============================================================================

/// The receptor activation building block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReceptorActivation {
    config: ReceptorConfig,
}

impl ReceptorActivation {
    /// Creates the module from a configuration.
    #[must_use]
    pub fn new(config: ReceptorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ReceptorConfig {
        &self.config
    }
}

impl Module for ReceptorActivation {
    fn name(&self) -> &str {
        "receptor"
    }

    fn monomers(&self, model: &Model) -> Result<Model> {
        // bl binds ligand, bg binds G-protein.
        model
            .declare_monomer("R", &["bl", "bg", "state"], &[("state", &[INACTIVE, ACTIVE])])?
            .declare_monomer("L", &["b"], &[])
    }

    fn compartments(&self, model: &Model) -> Result<Model> {
        model
            .declare_parameters(&[("V_EXTRA", self.config.v_extra), ("V_CM", self.config.v_cm)])?
            .declare_compartment(EXTRA, 3, "V_EXTRA", None)?
            .declare_compartment(CM, 2, "V_CM", Some(EXTRA))
    }

    fn initials(&self, model: &Model) -> Result<Model> {
        let model = model
            .declare_parameters(&[("L_0", self.config.ligand), ("R_0", self.config.receptor)])?;
        let ligand = ligand_free(&model)?;
        let receptor = receptor_free(&model, INACTIVE)?;
        model.add_initial(ligand, "L_0")?.add_initial(receptor, "R_0")
    }

    fn rules(&self, model: &Model) -> Result<Model> {
        match self.config.activation {
            Activation::None => Ok(model.clone()),
            Activation::SingleState(rates) => single_state(model, rates),
            Activation::TwoState(rates) => two_state(model, rates),
            Activation::ReversibleTwoState(rates) => reversible_two_state(model, rates),
        }
    }

    fn observables(&self, model: &Model) -> Result<Model> {
        model
            .add_observable("L_free", vec![ligand_free(model)?])?
            .add_observable("LR", vec![ligand_receptor_any(model)?])?
            .add_observable("LR_I", vec![ligand_receptor(model, INACTIVE)?])?
            .add_observable("LR_A", vec![ligand_receptor(model, ACTIVE)?])?
            .add_observable("R_I", vec![receptor_in_state(model, INACTIVE)?])?
            .add_observable("R_A", vec![receptor_in_state(model, ACTIVE)?])
    }
}

// =============================================================================
// Mechanisms
// =============================================================================

fn single_state(model: &Model, rates: BindingRates) -> Result<Model> {
    let model = dissociation(
        model,
        ("Kd_LR", rates.kd),
        ("kf_L_bind_R", rates.kf),
        "kr_L_bind_R",
    )?;
    let (model, _) = model.add_rule(
        vec![ligand_free(&model)?, receptor_free(&model, INACTIVE)?],
        vec![ligand_receptor(&model, ACTIVE)?],
        "kf_L_bind_R",
        Some("kr_L_bind_R"),
    )?;
    Ok(model)
}

fn two_state(model: &Model, rates: TwoStateRates) -> Result<Model> {
    let model = dissociation(
        model,
        ("Kd_LR", rates.binding.kd),
        ("kf_L_bind_R", rates.binding.kf),
        "kr_L_bind_R",
    )?
    .declare_parameters(&[
        ("kf_R_I_to_A", rates.kf_activate),
        ("kr_R_I_to_A", rates.kr_activate),
    ])?;

    let complex_inactive = ligand_receptor(&model, INACTIVE)?;
    let complex_active = ligand_receptor(&model, ACTIVE)?;

    let (model, _) = model.add_rule(
        vec![ligand_free(&model)?, receptor_free(&model, INACTIVE)?],
        vec![complex_inactive.clone()],
        "kf_L_bind_R",
        Some("kr_L_bind_R"),
    )?;
    let (model, _) = model.add_rule(
        vec![complex_inactive],
        vec![complex_active],
        "kf_R_I_to_A",
        Some("kr_R_I_to_A"),
    )?;
    Ok(model)
}

fn reversible_two_state(model: &Model, rates: ReversibleTwoStateRates) -> Result<Model> {
    let model = dissociation(
        model,
        ("Kd_LR_I", rates.inactive.kd),
        ("kf_L_bind_R_I", rates.inactive.kf),
        "kr_L_bind_R_I",
    )?;
    let model = dissociation(
        &model,
        ("Kd_LR_A", rates.active.kd),
        ("kf_L_bind_R_A", rates.active.kf),
        "kr_L_bind_R_A",
    )?
    .declare_parameters(&[
        ("kf_LR_I_to_A", rates.kf_complex_activate),
        ("kr_LR_I_to_A", rates.kr_complex_activate),
        ("kf_R_I_to_A", rates.kf_receptor_activate),
        ("kr_R_I_to_A", rates.kr_receptor_activate),
    ])?;

    let ligand = ligand_free(&model)?;
    let receptor_inactive = receptor_free(&model, INACTIVE)?;
    let receptor_active = receptor_free(&model, ACTIVE)?;
    let complex_inactive = ligand_receptor(&model, INACTIVE)?;
    let complex_active = ligand_receptor(&model, ACTIVE)?;

    let (model, _) = model.add_rule(
        vec![ligand.clone(), receptor_inactive.clone()],
        vec![complex_inactive.clone()],
        "kf_L_bind_R_I",
        Some("kr_L_bind_R_I"),
    )?;
    let (model, _) = model.add_rule(
        vec![ligand, receptor_active.clone()],
        vec![complex_active.clone()],
        "kf_L_bind_R_A",
        Some("kr_L_bind_R_A"),
    )?;
    let (model, _) = model.add_rule(
        vec![complex_inactive],
        vec![complex_active],
        "kf_LR_I_to_A",
        Some("kr_LR_I_to_A"),
    )?;
    let (model, _) = model.add_rule(
        vec![receptor_inactive],
        vec![receptor_active],
        "kf_R_I_to_A",
        Some("kr_R_I_to_A"),
    )?;
    Ok(model)
}

// =============================================================================
// Tests
// =============================================================================
