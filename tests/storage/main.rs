//! Integration tests for Layer 2: Storage
//!
//! Tests for the declaration registry: monomers, compartments and quantities
//! sharing one namespace.

mod compartments;
mod quantities;
mod registry;
