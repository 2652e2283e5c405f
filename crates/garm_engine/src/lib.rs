//! Species patterns, rules, observables, and initial conditions for Garm.
//!
//! This crate provides:
//! - [`pattern()`] and [`compose`] - Species pattern construction
//! - [`RuleSet`] - Reversible and irreversible reaction rules
//! - [`ObservableSet`] - Named sums over species patterns
//! - [`InitialSet`] - Seeded species and their starting amounts
//! - [`Model`] and [`Module`] - The model aggregate and its building blocks

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod initial;
pub mod model;
pub mod observable;
pub mod pattern;
pub mod rule;

pub use initial::{InitialCondition, InitialSet};
pub use model::{AssemblyPhase, Model, ModelStats, Module};
pub use observable::{Observable, ObservableSet};
pub use pattern::{ComplexPattern, MonomerPattern, SiteCondition, compose, pattern};
pub use rule::{Direction, Rule, RuleId, RuleSet};
