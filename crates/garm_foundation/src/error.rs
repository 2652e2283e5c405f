//! Error types for the Garm system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every declaration-time violation is reported through [`ErrorKind`];
//! nothing is silently repaired.

use std::fmt;

use thiserror::Error;

use crate::name::NameKind;

/// The main error type for Garm operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a duplicate name error.
    #[must_use]
    pub fn duplicate_name(kind: NameKind, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateName {
            kind,
            name: name.into(),
        })
    }

    /// Creates an unknown entity error.
    #[must_use]
    pub fn unknown_entity(kind: NameKind, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownEntity {
            kind,
            name: name.into(),
        })
    }

    /// Creates an unknown site error.
    #[must_use]
    pub fn unknown_site(monomer: impl Into<String>, site: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownSite {
            monomer: monomer.into(),
            site: site.into(),
        })
    }

    /// Creates an unknown parameter error.
    #[must_use]
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownParameter(name.into()))
    }

    /// Creates an unknown reference error.
    #[must_use]
    pub fn unknown_reference(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownReference(name.into()))
    }

    /// Creates an invalid hierarchy error.
    #[must_use]
    pub fn invalid_hierarchy(compartment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidHierarchy {
            compartment: compartment.into(),
            reason: reason.into(),
        })
    }

    /// Creates an unbalanced rule error.
    #[must_use]
    pub fn unbalanced_rule(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnbalancedRule(reason.into()))
    }

    /// Creates a rate reference error.
    #[must_use]
    pub fn rate_reference(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateReference(name.into()))
    }

    /// Returns the module recorded in this error's context, if any.
    #[must_use]
    pub fn source_module(&self) -> Option<&str> {
        self.context.as_ref().and_then(|c| c.source.as_deref())
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A name is already bound in its namespace.
    #[error("duplicate {kind} name: {name}")]
    DuplicateName {
        /// What the existing or attempted binding is.
        kind: NameKind,
        /// The colliding name.
        name: String,
    },

    /// A referenced monomer or compartment does not exist.
    #[error("unknown {kind}: {name}")]
    UnknownEntity {
        /// What kind of entity was expected.
        kind: NameKind,
        /// The missing name.
        name: String,
    },

    /// A pattern names a site the monomer does not declare.
    #[error("unknown site {site} on monomer {monomer}")]
    UnknownSite {
        /// The monomer being patterned.
        monomer: String,
        /// The unrecognized site.
        site: String,
    },

    /// A pattern assigns a state label outside the site's declared states.
    #[error("invalid state {state} for site {site} on monomer {monomer}")]
    InvalidState {
        /// The monomer being patterned.
        monomer: String,
        /// The site being assigned.
        site: String,
        /// The rejected label.
        state: String,
    },

    /// A monomer declaration has a malformed state enumeration.
    #[error("invalid states for site {site} on monomer {monomer}: {reason}")]
    InvalidSiteState {
        /// The monomer being declared.
        monomer: String,
        /// The offending site.
        site: String,
        /// What is wrong with the enumeration.
        reason: String,
    },

    /// A compartment size names an undeclared parameter.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// An expression or lookup references an undeclared name.
    #[error("unknown reference: {0}")]
    UnknownReference(String),

    /// An expression would depend on itself.
    #[error("cyclic reference: {}", cycle.join(" -> "))]
    CyclicReference {
        /// The names on the cycle, first name repeated at the end.
        cycle: Vec<String>,
    },

    /// A compartment parent is missing or has an incompatible dimension.
    #[error("invalid hierarchy for compartment {compartment}: {reason}")]
    InvalidHierarchy {
        /// The compartment being declared.
        compartment: String,
        /// Why the placement is invalid.
        reason: String,
    },

    /// A bond index does not pair exactly two sites.
    #[error("unbalanced bond {index}: appears {count} time(s), expected 2")]
    UnbalancedBond {
        /// The bond index.
        index: u32,
        /// How many sites carry it.
        count: usize,
    },

    /// A rule's reactant and product sides do not conserve monomers and sites.
    #[error("unbalanced rule: {0}")]
    UnbalancedRule(String),

    /// An observable was declared without any patterns.
    #[error("observable {0} has no patterns")]
    EmptyObservable(String),

    /// A rule rate is not a declared parameter or expression.
    #[error("rate reference is not a parameter or expression: {0}")]
    RateReference(String),

    /// A parameter value is NaN or infinite.
    #[error("parameter {name} has non-finite value {value}")]
    NonFiniteValue {
        /// The parameter.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// A name is not a valid identifier.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// Parse error in a rate formula.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// Division by zero while resolving an expression.
    #[error("division by zero")]
    DivisionByZero,

    /// Model serialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File I/O failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Contributing module name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Assembly phases and declarations leading to the error.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            line: None,
            column: None,
            stack: Vec::new(),
        }
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in module {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
