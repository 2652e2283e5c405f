//! Observables: named sums over species patterns.

use std::fmt;

use garm_foundation::{DeclMap, Error, ErrorKind, Name, NameKind, Result};

use crate::pattern::ComplexPattern;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A reported quantity summed over one or more patterns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observable {
    name: Name,
    patterns: Vec<ComplexPattern>,
}

impl Observable {
    /// Returns the observable name.
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the summed patterns.
    #[must_use]
    pub fn patterns(&self) -> &[ComplexPattern] {
        &self.patterns
    }

    /// Sums the counts reported for each pattern.
    ///
    /// Counting species instances is left to the caller, which owns the
    /// generated network.
    pub fn value<F>(&self, mut count: F) -> f64
    where
        F: FnMut(&ComplexPattern) -> f64,
    {
        self.patterns.iter().map(|p| count(p)).sum()
    }
}

impl fmt::Display for Observable {
    /// Writes a BNGL `Molecules` observable line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Molecules {}", self.name)?;
        for pattern in &self.patterns {
            write!(f, " {pattern}")?;
        }
        Ok(())
    }
}

/// Observables in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObservableSet {
    observables: DeclMap<Observable>,
}

impl ObservableSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new set with the observable added.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DuplicateName`] if an observable has this name
    /// - [`ErrorKind::EmptyObservable`] if `patterns` is empty
    pub fn add_observable(&self, name: &str, patterns: Vec<ComplexPattern>) -> Result<Self> {
        let name = Name::new(name)?;
        if patterns.is_empty() {
            return Err(Error::new(ErrorKind::EmptyObservable(name.to_string())));
        }
        let observable = Observable {
            name: name.clone(),
            patterns,
        };
        let observables = self
            .observables
            .try_insert(name.clone(), observable)
            .ok_or_else(|| Error::duplicate_name(NameKind::Observable, name.as_str()))?;
        Ok(Self { observables })
    }

    /// Gets an observable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Observable> {
        self.observables.get(name)
    }

    /// Returns the number of observables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observables.len()
    }

    /// Returns true if there are no observables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observables.is_empty()
    }

    /// Iterates observables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Observable> {
        self.observables.values()
    }
}
