//! Validated identifiers for model declarations.
//!
//! Every monomer, site, state label, compartment, parameter, expression and
//! observable is referred to by a [`Name`]. Names are cheap to clone and compare.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};
use crate::Result;

/// A validated identifier.
///
/// Names start with an ASCII letter or underscore and continue with ASCII
/// letters, digits or underscores, so they can be emitted verbatim into
/// rule-based modeling languages.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Name(Arc<str>);

impl Name {
    /// Creates a name, validating its characters.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidName`] if `text` is empty or is not an identifier.
    pub fn new(text: impl AsRef<str>) -> Result<Self> {
        let text = text.as_ref();
        if Self::is_valid(text) {
            Ok(Self(Arc::from(text)))
        } else {
            Err(Error::new(ErrorKind::InvalidName(text.to_string())))
        }
    }

    /// Returns true if `text` would be accepted by [`Name::new`].
    #[must_use]
    pub fn is_valid(text: &str) -> bool {
        let mut chars = text.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Name {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for Name {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0.to_string()
    }
}

/// What a name is bound to.
///
/// Monomers, compartments, parameters, expressions and observables share a
/// single model-wide namespace. Sites and initial conditions are scoped and
/// only appear in errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NameKind {
    /// A species template.
    Monomer,
    /// A site on a monomer.
    Site,
    /// A geometric compartment.
    Compartment,
    /// A numeric constant.
    Parameter,
    /// A derived quantity.
    Expression,
    /// An aggregate query.
    Observable,
    /// A seeded species.
    Initial,
}

impl NameKind {
    /// Returns true for kinds that may be used as a numeric value.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Parameter | Self::Expression)
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monomer => write!(f, "monomer"),
            Self::Site => write!(f, "site"),
            Self::Compartment => write!(f, "compartment"),
            Self::Parameter => write!(f, "parameter"),
            Self::Expression => write!(f, "expression"),
            Self::Observable => write!(f, "observable"),
            Self::Initial => write!(f, "initial condition"),
        }
    }
}
