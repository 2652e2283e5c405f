//! Initial conditions.

use std::fmt;

use garm_foundation::{Error, Name, NameKind, Result};
use garm_storage::Registry;

use crate::pattern::ComplexPattern;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A seeded species and the parameter giving its starting amount.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InitialCondition {
    /// The seeded species.
    pub species: ComplexPattern,
    /// Parameter holding the starting amount.
    pub amount: Name,
}

impl fmt::Display for InitialCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.species, self.amount)
    }
}

/// Ordered initial conditions.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InitialSet {
    initials: im::Vector<InitialCondition>,
}

impl InitialSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new set with the initial condition added.
    ///
    /// With `strict` set, a second initial condition for a species that is
    /// already seeded is rejected.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::UnknownParameter`](garm_foundation::ErrorKind::UnknownParameter)
    ///   if `amount` is not a declared parameter
    /// - [`ErrorKind::DuplicateName`](garm_foundation::ErrorKind::DuplicateName) for a
    ///   repeated species under `strict`
    pub fn add_initial(
        &self,
        registry: &Registry,
        species: ComplexPattern,
        amount: &str,
        strict: bool,
    ) -> Result<Self> {
        let amount = registry
            .parameters()
            .parameter(amount)
            .map(|p| p.name.clone())
            .ok_or_else(|| Error::unknown_parameter(amount))?;

        if strict && self.get(&species).is_some() {
            return Err(Error::duplicate_name(NameKind::Initial, species.to_string()));
        }

        let mut initials = self.initials.clone();
        initials.push_back(InitialCondition { species, amount });
        Ok(Self { initials })
    }

    /// Finds the initial condition seeding `species`.
    #[must_use]
    pub fn get(&self, species: &ComplexPattern) -> Option<&InitialCondition> {
        self.initials.iter().find(|i| &i.species == species)
    }

    /// Returns the number of initial conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.initials.len()
    }

    /// Returns true if nothing is seeded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.initials.is_empty()
    }

    /// Iterates initial conditions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &InitialCondition> {
        self.initials.iter()
    }
}
