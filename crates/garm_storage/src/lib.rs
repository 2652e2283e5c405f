//! Monomer, compartment, and parameter registries for Garm.
//!
//! This crate provides:
//! - [`MonomerStore`] - Species templates and their sites
//! - [`CompartmentStore`] - Nested compartment geometry
//! - [`ParameterStore`] - Named constants and derived expressions
//! - [`Registry`] - Immutable snapshot over all stores with a shared namespace

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compartment;
pub mod monomer;
pub mod parameter;
pub mod registry;

pub use compartment::{Ancestors, Compartment, CompartmentStore, Dimension};
pub use monomer::{Monomer, MonomerStore, Site};
pub use parameter::{Expression, Parameter, ParameterStore, Quantity};
pub use registry::Registry;
