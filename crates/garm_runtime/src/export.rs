//! BioNetGen language export.
//!
//! Renders an assembled model as a BNGL `begin model ... end model` block so
//! an external engine can generate and integrate the reaction network.

use std::fmt::Write;

use garm_engine::Model;
use garm_foundation::Result;
use garm_storage::Quantity;

/// Renders a model as BNGL text.
///
/// Expressions are written as formulas followed by their resolved value in
/// a comment. Blocks appear in the order BioNetGen expects them.
///
/// # Errors
///
/// Returns an error if an expression fails to resolve, such as a division
/// by zero.
pub fn to_bngl(model: &Model) -> Result<String> {
    let registry = model.registry();
    let mut out = String::new();

    let _ = writeln!(out, "begin model");

    let _ = writeln!(out, "begin parameters");
    for quantity in registry.parameters().iter() {
        match quantity {
            Quantity::Parameter(p) => {
                let _ = writeln!(out, "  {} {}", p.name, p.value);
            }
            Quantity::Expression(e) => {
                let value = registry.resolve(e.name.as_str())?;
                let _ = writeln!(out, "  {} {}  # {value}", e.name, e.formula);
            }
        }
    }
    let _ = writeln!(out, "end parameters");

    let _ = writeln!(out, "begin compartments");
    for compartment in registry.compartments().iter() {
        let _ = write!(
            out,
            "  {} {} {}",
            compartment.name, compartment.dimension, compartment.size
        );
        if let Some(parent) = &compartment.parent {
            let _ = write!(out, " {parent}");
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "end compartments");

    let _ = writeln!(out, "begin molecule types");
    for monomer in registry.monomers().iter() {
        let _ = writeln!(out, "  {monomer}");
    }
    let _ = writeln!(out, "end molecule types");

    let _ = writeln!(out, "begin seed species");
    for initial in model.initials().iter() {
        let _ = writeln!(out, "  {initial}");
    }
    let _ = writeln!(out, "end seed species");

    let _ = writeln!(out, "begin observables");
    for observable in model.observables().iter() {
        let _ = writeln!(out, "  {observable}");
    }
    let _ = writeln!(out, "end observables");

    let _ = writeln!(out, "begin reaction rules");
    for (_, rule) in model.rules().iter() {
        let _ = writeln!(out, "  {rule}");
    }
    let _ = writeln!(out, "end reaction rules");

    let _ = writeln!(out, "end model");
    Ok(out)
}
