//! Model assembly, serialization, and BNGL export for Garm.
//!
//! This crate provides:
//! - [`Assembler`] - Traced, atomic merging of building-block modules
//! - [`to_bytes`] and [`from_bytes`] - Model serialization in `MessagePack`
//! - [`to_bngl`] - BioNetGen text for an external network generator

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assembler;
pub mod export;
pub mod serialize;

pub use assembler::{Assembler, AssemblyConfig, merge};
pub use export::to_bngl;
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};

// Re-export commonly used types
pub use garm_engine::{AssemblyPhase, Model, ModelStats, Module};
pub use garm_foundation::{Error, ErrorKind, Result};
pub use garm_stdlib::{GProtein, GProteinConfig, ReceptorActivation, ReceptorConfig};
