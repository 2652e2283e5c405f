//! Lexer, parser, and evaluator for Garm rate formulas.
//!
//! Rate constants that are derived from other quantities, such as a reverse
//! rate computed from a dissociation constant and a forward rate, are written
//! as small arithmetic formulas:
//!
//! ```text
//! Kd_LR * kf_L_bind_R
//! (kf_a + kf_b) / 2
//! k0 * 10^-3
//! ```
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of formula text
//! - [`Parser`] - Parsing tokens into a [`Formula`]
//! - [`Formula`] - The formula AST, with evaluation and display

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use ast::{BinaryOp, Formula};
pub use lexer::Lexer;
pub use parser::{Parser, parse};
pub use span::Span;
pub use token::{Token, TokenKind};
