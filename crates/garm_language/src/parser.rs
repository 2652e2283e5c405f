//! Parser for rate formulas.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := atom ('^' unary)?
//! atom    := number | identifier | '(' sum ')'
//! ```

use garm_foundation::{Error, ErrorKind, Name, Result};

use crate::ast::{BinaryOp, Formula};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parser for formula text.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for error messages).
    source: &'src str,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
        }
    }

    /// Parses the whole source as one formula.
    ///
    /// # Errors
    /// Returns an error if the source is empty, malformed, or has trailing input.
    pub fn parse(&mut self) -> Result<Formula> {
        if self.current.kind == TokenKind::Eof {
            return Err(self.error("empty formula"));
        }
        let formula = self.parse_sum()?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.error(&format!("unexpected {}", self.current.kind)));
        }
        Ok(formula)
    }

    fn parse_sum(&mut self) -> Result<Formula> {
        let mut lhs = self.parse_product()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_product()?;
            lhs = Formula::binary(op, lhs, rhs);
        }
    }

    fn parse_product(&mut self) -> Result<Formula> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Formula::binary(op, lhs, rhs);
        }
    }

    fn parse_unary(&mut self) -> Result<Formula> {
        match self.current.kind {
            TokenKind::Minus => {
                self.advance();
                Ok(Formula::Neg(Box::new(self.parse_unary()?)))
            }
            TokenKind::Plus => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Formula> {
        let base = self.parse_atom()?;
        if self.current.kind == TokenKind::Power {
            self.advance();
            // Right associative: the exponent may itself contain `^`.
            let exponent = self.parse_unary()?;
            return Ok(Formula::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Formula> {
        match &self.current.kind {
            TokenKind::Number(n) => {
                let n = *n;
                self.advance();
                Ok(Formula::Number(n))
            }
            TokenKind::Ident(text) => {
                let span = self.current.span;
                let name = Name::new(text).map_err(|_| self.error_at(span, "invalid identifier"))?;
                self.advance();
                Ok(Formula::Reference(name))
            }
            TokenKind::LParen => {
                let open = self.current.span;
                self.advance();
                let inner = self.parse_sum()?;
                if self.current.kind != TokenKind::RParen {
                    return Err(self.error_at(open, "unclosed '('"));
                }
                self.advance();
                Ok(inner)
            }
            TokenKind::Error(message) => {
                let message = message.clone();
                Err(self.error(&message))
            }
            other => Err(self.error(&format!("expected a number, name or '(', found {other}"))),
        }
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Creates a parse error at the current token.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates a parse error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::new(ErrorKind::ParseError {
            message: message.to_string(),
            line: span.line,
            column: span.column,
            context: self.context_at(span),
        })
    }

    /// Gets the source line containing a span.
    fn context_at(&self, span: Span) -> String {
        let line_start = self.source[..span.start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.source[span.start..]
            .find('\n')
            .map_or(self.source.len(), |i| span.start + i);

        self.source[line_start..line_end].to_string()
    }
}

/// Parses formula text.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<Formula> {
    Parser::new(source).parse()
}
