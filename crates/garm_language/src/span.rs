//! Source location tracking.
//!
//! `Span` tracks the position of tokens in formula text for error reporting.

/// A span of source text.
///
/// Tracks byte offsets and line/column positions for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset where this span starts.
    pub start: usize,
    /// Byte offset where this span ends (exclusive).
    pub end: usize,
    /// 1-based line number where this span starts.
    pub line: u32,
    /// 1-based column number where this span starts.
    pub column: u32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Returns the length of this span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the text this span covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}
