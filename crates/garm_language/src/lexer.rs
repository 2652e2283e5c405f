//! Lexer for rate formulas.
//!
//! The lexer converts formula text into a stream of tokens.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for formula text.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(
                TokenKind::Eof,
                Span::new(start, start, start_line, start_column),
            );
        };

        let kind = match c {
            '(' => {
                self.advance();
                TokenKind::LParen
            }
            ')' => {
                self.advance();
                TokenKind::RParen
            }
            '+' => {
                self.advance();
                TokenKind::Plus
            }
            '-' => {
                self.advance();
                TokenKind::Minus
            }
            '/' => {
                self.advance();
                TokenKind::Slash
            }
            '^' => {
                self.advance();
                TokenKind::Power
            }
            '*' => {
                self.advance();
                if self.peek_char() == Some('*') {
                    self.advance();
                    TokenKind::Power
                } else {
                    TokenKind::Star
                }
            }
            '.' if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) => self.scan_number(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_ident(),
            c => {
                self.advance();
                TokenKind::Error(format!("unexpected character: {c}"))
            }
        };

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
        )
    }

    /// Tokenizes all source and returns a vector of tokens ending in `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks at the character `n` positions ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Advances over a run of ASCII digits.
    fn skip_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Scans a number: digits, optional fraction, optional exponent.
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;

        self.skip_digits();
        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        // An exponent needs at least one digit, otherwise `2e` is a number
        // followed by an identifier.
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let signed = matches!(self.peek_char_n(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_char_n(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
                if signed {
                    self.advance();
                }
                self.skip_digits();
            }
        }

        let text = &self.source[start..self.position];
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => TokenKind::Number(n),
            Ok(_) => TokenKind::Error(format!("number out of range: {text}")),
            Err(e) => TokenKind::Error(format!("invalid number {text}: {e}")),
        }
    }

    /// Scans an identifier.
    fn scan_ident(&mut self) -> TokenKind {
        let start = self.position;
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        TokenKind::Ident(self.source[start..self.position].to_string())
    }
}
