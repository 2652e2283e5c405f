//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Name, Error, and declaration-ordered maps.

mod collections;
mod errors;
mod names;
