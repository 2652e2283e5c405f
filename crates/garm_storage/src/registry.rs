//! Unified declaration registry with a shared namespace.
//!
//! The `Registry` ties the monomer, compartment and parameter stores together
//! and owns the model-wide namespace. Every declaration method takes `&self`
//! and returns a new registry, so a failed call leaves the receiver untouched.

use garm_foundation::{Error, Name, NameKind, Result};
use garm_language::Formula;

use crate::compartment::{Ancestors, Compartment, CompartmentStore};
use crate::monomer::{Monomer, MonomerStore};
use crate::parameter::ParameterStore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable snapshot of everything declared so far.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Registry {
    /// Species templates.
    monomers: MonomerStore,
    /// Geometry.
    compartments: CompartmentStore,
    /// Parameters and expressions.
    parameters: ParameterStore,
    /// Every bound name and what it is bound to.
    namespace: im::HashMap<Name, NameKind>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Namespace ---

    /// Returns what `name` is bound to, if anything.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<NameKind> {
        self.namespace.get(name).copied()
    }

    /// Returns true if `name` is a parameter or expression.
    #[must_use]
    pub fn is_numeric(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(NameKind::is_numeric)
    }

    /// Returns the number of bound names.
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.namespace.len()
    }

    /// Binds a name owned by a later layer, such as an observable.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DuplicateName`](garm_foundation::ErrorKind::DuplicateName)
    /// if the name is already bound, or an invalid name error.
    pub fn reserve(&self, name: &str, kind: NameKind) -> Result<Self> {
        let name = Name::new(name)?;
        let namespace = self.bind(&name, kind)?;
        Ok(Self {
            namespace,
            ..self.clone()
        })
    }

    fn check_free(&self, name: &str) -> Result<()> {
        match self.lookup(name) {
            Some(existing) => Err(Error::duplicate_name(existing, name)),
            None => Ok(()),
        }
    }

    fn bind(&self, name: &Name, kind: NameKind) -> Result<im::HashMap<Name, NameKind>> {
        self.check_free(name.as_str())?;
        Ok(self.namespace.update(name.clone(), kind))
    }

    // --- Entity registry ---

    /// Declares a monomer.
    ///
    /// # Errors
    ///
    /// Fails on a name collision or a malformed site list; see [`Monomer::new`].
    pub fn declare_monomer(
        &self,
        name: &str,
        sites: &[&str],
        site_states: &[(&str, &[&str])],
    ) -> Result<Self> {
        self.check_free(name)?;
        let monomer = Monomer::new(name, sites, site_states)?;
        let namespace = self.bind(monomer.name(), NameKind::Monomer)?;
        let monomers = self.monomers.declare(monomer)?;
        Ok(Self {
            monomers,
            namespace,
            ..self.clone()
        })
    }

    /// Looks up a monomer.
    ///
    /// # Errors
    ///
    /// Returns an unknown entity error if no monomer has this name.
    pub fn lookup_monomer(&self, name: &str) -> Result<&Monomer> {
        self.monomers.lookup(name)
    }

    // --- Compartment hierarchy ---

    /// Declares a compartment sized by a declared parameter.
    ///
    /// # Errors
    ///
    /// Fails on a name collision, an unknown size parameter, or a bad parent;
    /// see [`CompartmentStore::declare`].
    pub fn declare_compartment(
        &self,
        name: &str,
        dimension: u8,
        size: &str,
        parent: Option<&str>,
    ) -> Result<Self> {
        self.check_free(name)?;
        let compartments =
            self.compartments
                .declare(name, dimension, size, parent, &self.parameters)?;
        let namespace = self.bind(&Name::new(name)?, NameKind::Compartment)?;
        Ok(Self {
            compartments,
            namespace,
            ..self.clone()
        })
    }

    /// Looks up a compartment.
    ///
    /// # Errors
    ///
    /// Returns an unknown entity error if no compartment has this name.
    pub fn lookup_compartment(&self, name: &str) -> Result<&Compartment> {
        self.compartments.lookup(name)
    }

    /// Walks from a compartment to its root.
    ///
    /// # Errors
    ///
    /// Returns an unknown entity error if `name` is not declared.
    pub fn ancestor_chain(&self, name: &str) -> Result<Ancestors<'_>> {
        self.compartments.ancestor_chain(name)
    }

    // --- Parameter/expression store ---

    /// Declares a parameter.
    ///
    /// # Errors
    ///
    /// Fails on a name collision.
    pub fn declare_parameter(&self, name: &str, value: f64) -> Result<Self> {
        self.check_free(name)?;
        let parameters = self.parameters.declare_parameter(name, value)?;
        let namespace = self.bind(&Name::new(name)?, NameKind::Parameter)?;
        Ok(Self {
            parameters,
            namespace,
            ..self.clone()
        })
    }

    /// Declares an expression.
    ///
    /// # Errors
    ///
    /// Fails on a name collision, a dangling reference, or a self reference.
    pub fn declare_expression(&self, name: &str, formula: Formula) -> Result<Self> {
        self.declare_expressions(vec![(name, formula)])
    }

    /// Declares a group of expressions that may reference each other.
    ///
    /// # Errors
    ///
    /// Fails on a name collision, a dangling reference, or a dependency
    /// cycle; see [`ParameterStore::declare_expressions`].
    pub fn declare_expressions(&self, batch: Vec<(&str, Formula)>) -> Result<Self> {
        for (name, _) in &batch {
            self.check_free(name)?;
        }
        let names: Vec<&str> = batch.iter().map(|(name, _)| *name).collect();
        let parameters = self.parameters.declare_expressions(batch)?;
        let mut namespace = self.namespace.clone();
        for name in names {
            namespace.insert(Name::new(name)?, NameKind::Expression);
        }
        Ok(Self {
            parameters,
            namespace,
            ..self.clone()
        })
    }

    /// Resolves a parameter or expression to a number.
    ///
    /// # Errors
    ///
    /// Returns an unknown reference error if `name` is not numeric.
    pub fn resolve(&self, name: &str) -> Result<f64> {
        self.parameters.resolve(name)
    }

    // --- Accessors ---

    /// Returns the monomer store.
    #[must_use]
    pub fn monomers(&self) -> &MonomerStore {
        &self.monomers
    }

    /// Returns the compartment store.
    #[must_use]
    pub fn compartments(&self) -> &CompartmentStore {
        &self.compartments
    }

    /// Returns the parameter and expression store.
    #[must_use]
    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }
}
