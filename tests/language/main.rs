//! Integration tests for Layer 1: Language
//!
//! Tests for the rate formula lexer and parser.

mod formulas;
mod lexer;
