//! Token types for rate formulas.
//!
//! Tokens are the output of the lexer and input to the parser.

use std::fmt;

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}

/// Token types for rate formulas.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Numeric literal like `100`, `0.5` or `1e-3`
    Number(f64),
    /// Identifier like `kf_L_bind_R`
    Ident(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^` or `**`
    Power,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// End of input
    Eof,
    /// Lexical error
    Error(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Ident(name) => write!(f, "identifier {name}"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::Power => write!(f, "'^'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::Eof => write!(f, "end of input"),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}
