//! Receptor activation and G-protein building blocks for Garm.
//!
//! This crate provides modules that are merged into a [`Model`](garm_engine::Model):
//! - [`ReceptorActivation`] - Ligand, receptor, their geometry, and an activation mechanism
//! - [`GProtein`] - G-protein subunits, nucleotides, cytosol, and the ternary complex
//! - [`species`] - The named complexes both modules build rules from

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod gprotein;
pub mod receptor;
pub mod species;

pub use gprotein::{GProtein, GProteinConfig, TernaryComplexRates};
pub use receptor::{
    Activation, BindingRates, ReceptorActivation, ReceptorConfig, ReversibleTwoStateRates,
    TwoStateRates,
};

use garm_engine::Model;
use garm_foundation::Result;
use garm_language::Formula;

/// Declares a dissociation constant, a forward rate, and the reverse rate
/// `kd * kf` derived from them.
pub(crate) fn dissociation(
    model: &Model,
    kd: (&str, f64),
    kf: (&str, f64),
    kr: &str,
) -> Result<Model> {
    let reverse = Formula::named(kd.0)? * Formula::named(kf.0)?;
    model
        .declare_parameters(&[kd, kf])?
        .declare_expression(kr, reverse)
}
