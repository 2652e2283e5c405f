//! Compartment hierarchy.
//!
//! Compartments are named regions that scope where species live. They form
//! a forest: a compartment may name an already-declared parent, and a surface
//! (2-D) must sit inside a volume (3-D) or the other way round.

use std::fmt;

use garm_foundation::{DeclMap, Error, Name, NameKind, Result};

use crate::parameter::ParameterStore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Spatial dimensionality of a compartment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dimension {
    /// A membrane or other surface.
    Surface,
    /// A bulk volume.
    Volume,
}

impl Dimension {
    /// Returns the number of spatial dimensions.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Surface => 2,
            Self::Volume => 3,
        }
    }
}

impl TryFrom<u8> for Dimension {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, u8> {
        match value {
            2 => Ok(Self::Surface),
            3 => Ok(Self::Volume),
            other => Err(other),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A named geometric compartment.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Compartment {
    /// Compartment name.
    pub name: Name,
    /// Surface or volume.
    pub dimension: Dimension,
    /// Parameter giving the compartment size.
    pub size: Name,
    /// Enclosing compartment, if nested.
    pub parent: Option<Name>,
}

/// Registry of declared compartments.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompartmentStore {
    compartments: DeclMap<Compartment>,
}

impl CompartmentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new store with the compartment added.
    ///
    /// `dimension` must be 2 or 3 and `size` must name a declared parameter.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DuplicateName`](garm_foundation::ErrorKind::DuplicateName) if the name is taken
    /// - [`ErrorKind::UnknownParameter`](garm_foundation::ErrorKind::UnknownParameter) if `size` is not a parameter
    /// - [`ErrorKind::InvalidHierarchy`](garm_foundation::ErrorKind::InvalidHierarchy) for a bad
    ///   dimension, a missing parent, or a parent of the same dimension
    pub fn declare(
        &self,
        name: &str,
        dimension: u8,
        size: &str,
        parent: Option<&str>,
        parameters: &ParameterStore,
    ) -> Result<Self> {
        let name = Name::new(name)?;
        if self.compartments.contains(name.as_str()) {
            return Err(Error::duplicate_name(NameKind::Compartment, name.as_str()));
        }

        let dimension = Dimension::try_from(dimension).map_err(|d| {
            Error::invalid_hierarchy(name.as_str(), format!("dimension must be 2 or 3, got {d}"))
        })?;

        let size = parameters
            .parameter(size)
            .map(|p| p.name.clone())
            .ok_or_else(|| Error::unknown_parameter(size))?;

        let parent = match parent {
            None => None,
            Some(parent_name) => {
                let Some(outer) = self.compartments.get(parent_name) else {
                    return Err(Error::invalid_hierarchy(
                        name.as_str(),
                        format!("parent {parent_name} is not declared"),
                    ));
                };
                if outer.dimension == dimension {
                    return Err(Error::invalid_hierarchy(
                        name.as_str(),
                        format!(
                            "a {dimension}-D compartment cannot nest directly in {parent_name}, \
                             which is also {dimension}-D"
                        ),
                    ));
                }
                Some(outer.name.clone())
            }
        };

        let compartment = Compartment {
            name: name.clone(),
            dimension,
            size,
            parent,
        };
        let compartments = self
            .compartments
            .try_insert(name.clone(), compartment)
            .ok_or_else(|| Error::duplicate_name(NameKind::Compartment, name.as_str()))?;
        Ok(Self { compartments })
    }

    /// Gets a compartment by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Compartment> {
        self.compartments.get(name)
    }

    /// Gets a compartment by name, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns an unknown entity error if no compartment has this name.
    pub fn lookup(&self, name: &str) -> Result<&Compartment> {
        self.get(name)
            .ok_or_else(|| Error::unknown_entity(NameKind::Compartment, name))
    }

    /// Returns the chain of compartment names from `name` up to its root.
    ///
    /// The iterator is lazy and finite; call again to restart it.
    ///
    /// # Errors
    ///
    /// Returns an unknown entity error if `name` is not declared.
    pub fn ancestor_chain(&self, name: &str) -> Result<Ancestors<'_>> {
        let start = self.lookup(name)?;
        Ok(Ancestors {
            store: self,
            next: Some(start),
        })
    }

    /// Returns true if `inner` is `outer` or nested anywhere below it.
    #[must_use]
    pub fn is_within(&self, inner: &str, outer: &str) -> bool {
        self.ancestor_chain(inner)
            .is_ok_and(|mut chain| chain.any(|n| n.as_str() == outer))
    }

    /// Returns the number of compartments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compartments.len()
    }

    /// Returns true if no compartments are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compartments.is_empty()
    }

    /// Iterates compartments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Compartment> {
        self.compartments.values()
    }
}

/// Lazy walk from a compartment to the root of its tree.
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    store: &'a CompartmentStore,
    next: Option<&'a Compartment>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Name;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        // Parents are declared before children, so this walk cannot cycle.
        self.next = current
            .parent
            .as_ref()
            .and_then(|p| self.store.compartments.get(p.as_str()));
        Some(&current.name)
    }
}
