//! Garm - Rule-based reaction-network specification for receptor activation
//!
//! This crate re-exports all layers of the Garm system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: garm_runtime     - Traced assembly, serialization, BNGL export
//! Layer 4: garm_stdlib      - Receptor activation and G-protein building blocks
//! Layer 3: garm_engine      - Patterns, rules, initials, observables, models
//!          garm_debug       - Assembly tracing
//! Layer 2: garm_storage     - Monomers, compartments, parameters, registry
//! Layer 1: garm_language    - Rate expression lexer and parser
//! Layer 0: garm_foundation  - Core types (Name, Error)
//! ```

pub use garm_debug as debug;
pub use garm_engine as engine;
pub use garm_foundation as foundation;
pub use garm_language as language;
pub use garm_runtime as runtime;
pub use garm_stdlib as stdlib;
pub use garm_storage as storage;
