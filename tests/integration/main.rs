//! Cross-layer integration tests for Garm
//!
//! Tests that verify correct interaction between multiple crates.

mod building_blocks;
mod persistence;
mod receptor_binding;
