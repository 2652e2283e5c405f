//! Named species patterns shared by the building blocks.
//!
//! Ligand lives in `EXTRA`; receptor and G-protein live in the membrane `CM`.
//! Ligand-receptor bonds use index 1 and receptor-G-protein bonds index 2.

use garm_engine::{ComplexPattern, Model, MonomerPattern, SiteCondition, compose};
use garm_foundation::Result;

use SiteCondition::{Bound, Unbound};

/// Extracellular volume.
pub const EXTRA: &str = "EXTRA";
/// Cell membrane.
pub const CM: &str = "CM";
/// Cytosol.
pub const CYTOSOL: &str = "C";

/// Inactive receptor state label.
pub const INACTIVE: &str = "I";
/// Active receptor state label.
pub const ACTIVE: &str = "A";

fn ligand(model: &Model, b: SiteCondition) -> Result<MonomerPattern> {
    model.pattern("L", &[("b", b)], Some(EXTRA))
}

fn receptor(
    model: &Model,
    bl: SiteCondition,
    bg: SiteCondition,
    state: &str,
) -> Result<MonomerPattern> {
    model.pattern(
        "R",
        &[("bl", bl), ("bg", bg), ("state", SiteCondition::state(state))],
        Some(CM),
    )
}

fn gprotein(model: &Model, b: SiteCondition) -> Result<MonomerPattern> {
    model.pattern("G", &[("b", b)], Some(CM))
}

/// `L(b)@EXTRA`: unbound ligand.
///
/// # Errors
///
/// Fails if `L` or `EXTRA` is not declared.
pub fn ligand_free(model: &Model) -> Result<ComplexPattern> {
    ComplexPattern::single(ligand(model, Unbound)?)
}

/// `R(bl,bg,state~S)@CM`: receptor with both binding sites free.
///
/// # Errors
///
/// Fails if `R` or `CM` is not declared, or `state` is not a receptor state.
pub fn receptor_free(model: &Model, state: &str) -> Result<ComplexPattern> {
    ComplexPattern::single(receptor(model, Unbound, Unbound, state)?)
}

/// `L(b!1)@EXTRA.R(bl!1,bg,state~S)@CM`: ligand-receptor complex.
///
/// # Errors
///
/// Fails on an undeclared monomer, compartment, or state.
pub fn ligand_receptor(model: &Model, state: &str) -> Result<ComplexPattern> {
    compose(vec![
        ligand(model, Bound(1))?,
        receptor(model, Bound(1), Unbound, state)?,
    ])
}

/// `L(b!1)@EXTRA.R(bl!1,bg)@CM`: ligand-receptor complex in either state.
///
/// # Errors
///
/// Fails on an undeclared monomer or compartment.
pub fn ligand_receptor_any(model: &Model) -> Result<ComplexPattern> {
    compose(vec![
        ligand(model, Bound(1))?,
        model.pattern("R", &[("bl", Bound(1)), ("bg", Unbound)], Some(CM))?,
    ])
}

/// `R(state~S)@CM`: every receptor in a state, bound or not.
///
/// # Errors
///
/// Fails on an undeclared monomer, compartment, or state.
pub fn receptor_in_state(model: &Model, state: &str) -> Result<ComplexPattern> {
    ComplexPattern::single(model.pattern(
        "R",
        &[("state", SiteCondition::state(state))],
        Some(CM),
    )?)
}

/// `G(b)@CM`: free G-protein heterotrimer.
///
/// # Errors
///
/// Fails if `G` or `CM` is not declared.
pub fn gprotein_free(model: &Model) -> Result<ComplexPattern> {
    ComplexPattern::single(gprotein(model, Unbound)?)
}

/// `R(bl,bg!2,state~S)@CM.G(b!2)@CM`: receptor-G-protein complex.
///
/// # Errors
///
/// Fails on an undeclared monomer, compartment, or state.
pub fn receptor_gprotein(model: &Model, state: &str) -> Result<ComplexPattern> {
    compose(vec![
        receptor(model, Unbound, Bound(2), state)?,
        gprotein(model, Bound(2))?,
    ])
}

/// `L(b!1)@EXTRA.R(bl!1,bg!2,state~S)@CM.G(b!2)@CM`: ternary complex.
///
/// # Errors
///
/// Fails on an undeclared monomer, compartment, or state.
pub fn ternary(model: &Model, state: &str) -> Result<ComplexPattern> {
    compose(vec![
        ligand(model, Bound(1))?,
        receptor(model, Bound(1), Bound(2), state)?,
        gprotein(model, Bound(2))?,
    ])
}
