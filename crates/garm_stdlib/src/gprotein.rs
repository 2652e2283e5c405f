//! G-protein cycling.
//!
//! Declares the heterotrimer `G`, its subunits, the nucleotides, and the
//! cytosol `C`, and optionally the ternary complex between ligand, receptor
//! and G-protein. The module uses `L`, `R`, `EXTRA` and `CM`, so it must be
//! merged after [`ReceptorActivation`](crate::ReceptorActivation).

use garm_engine::{Model, Module, SiteCondition};
use garm_foundation::Result;

use crate::dissociation;
use crate::species::{
    ACTIVE, CM, CYTOSOL, INACTIVE, gprotein_free, ligand_free, receptor_free, receptor_gprotein,
    ternary,
};

/// Rates for the ternary complex mechanism.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TernaryComplexRates {
    /// `Kd_LRG_I` and `kf_L_bind_R_IG`: ligand binding inactive receptor-G.
    pub ligand_inactive: (f64, f64),
    /// `Kd_LRG_A` and `kf_L_bind_R_AG`: ligand binding active receptor-G.
    pub ligand_active: (f64, f64),
    /// `kf_LR_IG_to_A` and `kr_LR_IG_to_A`: ternary complex activation.
    pub ternary_activation: (f64, f64),
    /// `kf_R_IG_to_A` and `kr_R_IG_to_A`: receptor-G activation.
    pub complex_activation: (f64, f64),
    /// `Kd_R_IG` and `kf_G_bind_R_I`: G binding the inactive receptor.
    pub gprotein_inactive: (f64, f64),
    /// `Kd_R_AG` and `kf_G_bind_R_A`: G binding the active receptor.
    pub gprotein_active: (f64, f64),
}

impl Default for TernaryComplexRates {
    fn default() -> Self {
        Self {
            ligand_inactive: (100.0, 1e-3),
            ligand_active: (200.0, 1e-4),
            ternary_activation: (0.1, 1.0),
            complex_activation: (0.1, 0.1),
            gprotein_inactive: (100.0, 0.01),
            gprotein_active: (80.0, 0.001),
        }
    }
}

/// Geometry, initial amounts and mechanism for [`GProtein`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GProteinConfig {
    /// `V_C`, the cytosol volume.
    pub v_c: f64,
    /// `G_0`, the seeded heterotrimer.
    pub gprotein: f64,
    /// `GDP_0`.
    pub gdp: f64,
    /// `GTP_0`.
    pub gtp: f64,
    /// Ternary complex rates, or `None` to declare no rules.
    pub ternary: Option<TernaryComplexRates>,
}

impl Default for GProteinConfig {
    fn default() -> Self {
        Self {
            v_c: 100.0,
            gprotein: 1e4,
            gdp: 200.0,
            gtp: 500.0,
            ternary: Some(TernaryComplexRates::default()),
        }
    }
}

impl GProteinConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the cytosol volume.
    #[must_use]
    pub fn with_volume(mut self, v_c: f64) -> Self {
        self.v_c = v_c;
        self
    }

    /// Builder method to set the seeded amounts.
    #[must_use]
    pub fn with_initials(mut self, gprotein: f64, gdp: f64, gtp: f64) -> Self {
        self.gprotein = gprotein;
        self.gdp = gdp;
        self.gtp = gtp;
        self
    }

    /// Builder method to select the ternary complex rates.
    #[must_use]
    pub fn with_ternary(mut self, rates: Option<TernaryComplexRates>) -> Self {
        self.ternary = rates;
        self
    }
}

/// The G-protein building block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GProtein {
    config: GProteinConfig,
}

impl GProtein {
    /// Creates the module from a configuration.
    #[must_use]
    pub fn new(config: GProteinConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GProteinConfig {
        &self.config
    }
}

impl Module for GProtein {
    fn name(&self) -> &str {
        "gprotein"
    }

    fn monomers(&self, model: &Model) -> Result<Model> {
        model
            .declare_monomer("G", &["b"], &[])?
            .declare_monomer("Ga", &["bp", "bgb", "br"], &[])?
            .declare_monomer("Gb", &["bga", "bgg"], &[])?
            .declare_monomer("Gg", &["bgb"], &[])?
            .declare_monomer("GDP", &["b"], &[])?
            .declare_monomer("GTP", &["b"], &[])
    }

    fn compartments(&self, model: &Model) -> Result<Model> {
        model
            .declare_parameter("V_C", self.config.v_c)?
            .declare_compartment(CYTOSOL, 3, "V_C", Some(CM))
    }

    fn initials(&self, model: &Model) -> Result<Model> {
        let model = model.declare_parameters(&[
            ("G_0", self.config.gprotein),
            ("GDP_0", self.config.gdp),
            ("GTP_0", self.config.gtp),
        ])?;
        let trimer = gprotein_free(&model)?;
        let gdp = model.species("GDP", &[("b", SiteCondition::Unbound)], Some(CYTOSOL))?;
        let gtp = model.species("GTP", &[("b", SiteCondition::Unbound)], Some(CYTOSOL))?;
        model
            .add_initial(trimer, "G_0")?
            .add_initial(gdp, "GDP_0")?
            .add_initial(gtp, "GTP_0")
    }

    fn rules(&self, model: &Model) -> Result<Model> {
        match self.config.ternary {
            Some(rates) => ternary_complex(model, rates),
            None => Ok(model.clone()),
        }
    }
}

fn ternary_complex(model: &Model, rates: TernaryComplexRates) -> Result<Model> {
    let model = dissociation(
        model,
        ("Kd_LRG_I", rates.ligand_inactive.0),
        ("kf_L_bind_R_IG", rates.ligand_inactive.1),
        "kr_L_bind_R_IG",
    )?;
    let model = dissociation(
        &model,
        ("Kd_LRG_A", rates.ligand_active.0),
        ("kf_L_bind_R_AG", rates.ligand_active.1),
        "kr_L_bind_R_AG",
    )?;
    let model = model.declare_parameters(&[
        ("kf_LR_IG_to_A", rates.ternary_activation.0),
        ("kr_LR_IG_to_A", rates.ternary_activation.1),
        ("kf_R_IG_to_A", rates.complex_activation.0),
        ("kr_R_IG_to_A", rates.complex_activation.1),
    ])?;
    let model = dissociation(
        &model,
        ("Kd_R_IG", rates.gprotein_inactive.0),
        ("kf_G_bind_R_I", rates.gprotein_inactive.1),
        "kr_G_bind_R_I",
    )?;
    let model = dissociation(
        &model,
        ("Kd_R_AG", rates.gprotein_active.0),
        ("kf_G_bind_R_A", rates.gprotein_active.1),
        "kr_G_bind_R_A",
    )?;

    let ligand = ligand_free(&model)?;
    let trimer = gprotein_free(&model)?;
    let receptor_g_inactive = receptor_gprotein(&model, INACTIVE)?;
    let receptor_g_active = receptor_gprotein(&model, ACTIVE)?;
    let ternary_inactive = ternary(&model, INACTIVE)?;
    let ternary_active = ternary(&model, ACTIVE)?;

    let steps = [
        (
            vec![ligand.clone(), receptor_g_inactive.clone()],
            vec![ternary_inactive.clone()],
            "kf_L_bind_R_IG",
            "kr_L_bind_R_IG",
        ),
        (
            vec![ligand, receptor_g_active.clone()],
            vec![ternary_active.clone()],
            "kf_L_bind_R_AG",
            "kr_L_bind_R_AG",
        ),
        (
            vec![ternary_inactive],
            vec![ternary_active],
            "kf_LR_IG_to_A",
            "kr_LR_IG_to_A",
        ),
        (
            vec![receptor_g_inactive.clone()],
            vec![receptor_g_active.clone()],
            "kf_R_IG_to_A",
            "kr_R_IG_to_A",
        ),
        (
            vec![receptor_free(&model, INACTIVE)?, trimer.clone()],
            vec![receptor_g_inactive],
            "kf_G_bind_R_I",
            "kr_G_bind_R_I",
        ),
        (
            vec![receptor_free(&model, ACTIVE)?, trimer],
            vec![receptor_g_active],
            "kf_G_bind_R_A",
            "kr_G_bind_R_A",
        ),
    ];

    let mut model = model;
    for (reactants, products, forward, reverse) in steps {
        model = model.add_rule(reactants, products, forward, Some(reverse))?.0;
    }
    Ok(model)
}
