//! Monomer (species template) definitions.
//!
//! A monomer is a named molecule type with an ordered list of sites. A site
//! is either a binding site or a state site restricted to an enumerated set
//! of labels. Monomers are immutable once declared.

use std::collections::HashSet;
use std::fmt;

use garm_foundation::{DeclMap, Error, ErrorKind, Name, NameKind, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named site on a monomer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Site {
    name: Name,
    /// Allowed state labels, `None` for a plain binding site.
    states: Option<Vec<Name>>,
}

impl Site {
    /// Returns the site name.
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the allowed state labels, if this is a state site.
    #[must_use]
    pub fn states(&self) -> Option<&[Name]> {
        self.states.as_deref()
    }

    /// Returns true if the site carries an enumerated state.
    #[must_use]
    pub fn is_state_site(&self) -> bool {
        self.states.is_some()
    }

    /// Returns true if `label` is one of this site's states.
    #[must_use]
    pub fn allows(&self, label: &str) -> bool {
        self.states
            .as_ref()
            .is_some_and(|states| states.iter().any(|s| s.as_str() == label))
    }
}

/// A species template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Monomer {
    name: Name,
    sites: Vec<Site>,
}

impl Monomer {
    /// Builds and validates a monomer definition.
    ///
    /// `site_states` restricts the named sites to enumerated labels; every
    /// other site is a binding site.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidName`] if any name is not an identifier
    /// - [`ErrorKind::DuplicateName`] if a site is listed twice
    /// - [`ErrorKind::UnknownSite`] if `site_states` names a site not in `sites`
    /// - [`ErrorKind::InvalidSiteState`] if a state list is empty or repeats a label
    pub fn new(name: &str, sites: &[&str], site_states: &[(&str, &[&str])]) -> Result<Self> {
        let name = Name::new(name)?;

        let mut seen = HashSet::new();
        let mut built = Vec::with_capacity(sites.len());
        for site in sites {
            let site_name = Name::new(site)?;
            if !seen.insert(site_name.clone()) {
                return Err(Error::duplicate_name(NameKind::Site, format!("{name}.{site}")));
            }
            built.push(Site {
                name: site_name,
                states: None,
            });
        }

        let mut restricted = HashSet::new();
        for (site, labels) in site_states {
            let Some(target) = built.iter_mut().find(|s| s.name.as_str() == *site) else {
                return Err(Error::unknown_site(name.as_str(), *site));
            };
            if !restricted.insert(*site) {
                return Err(Self::invalid_states(&name, site, "states listed twice"));
            }
            if labels.is_empty() {
                return Err(Self::invalid_states(&name, site, "state list is empty"));
            }
            let mut unique = HashSet::new();
            let mut states = Vec::with_capacity(labels.len());
            for label in *labels {
                let label = Name::new(label)?;
                if !unique.insert(label.clone()) {
                    return Err(Self::invalid_states(
                        &name,
                        site,
                        &format!("state {label} repeated"),
                    ));
                }
                states.push(label);
            }
            target.states = Some(states);
        }

        Ok(Self { name, sites: built })
    }

    fn invalid_states(monomer: &Name, site: &str, reason: &str) -> Error {
        Error::new(ErrorKind::InvalidSiteState {
            monomer: monomer.to_string(),
            site: site.to_string(),
            reason: reason.to_string(),
        })
    }

    /// Returns the monomer name.
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the sites in declaration order.
    #[must_use]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Looks up a site by name.
    #[must_use]
    pub fn site(&self, name: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.name.as_str() == name)
    }
}

impl fmt::Display for Monomer {
    /// Writes the BNGL molecule type, e.g. `R(bl,bg,state~I~A)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, site) in self.sites.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", site.name)?;
            for state in site.states().unwrap_or_default() {
                write!(f, "~{state}")?;
            }
        }
        f.write_str(")")
    }
}

/// Registry of declared monomers.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonomerStore {
    monomers: DeclMap<Monomer>,
}

impl MonomerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new store with the monomer added.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DuplicateName`] if the name is taken.
    pub fn declare(&self, monomer: Monomer) -> Result<Self> {
        let name = monomer.name.clone();
        let monomers = self
            .monomers
            .try_insert(name.clone(), monomer)
            .ok_or_else(|| Error::duplicate_name(NameKind::Monomer, name.as_str()))?;
        Ok(Self { monomers })
    }

    /// Gets a monomer by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Monomer> {
        self.monomers.get(name)
    }

    /// Gets a monomer by name, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownEntity`] if no monomer has this name.
    pub fn lookup(&self, name: &str) -> Result<&Monomer> {
        self.get(name)
            .ok_or_else(|| Error::unknown_entity(NameKind::Monomer, name))
    }

    /// Returns the number of monomers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.monomers.len()
    }

    /// Returns true if no monomers are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monomers.is_empty()
    }

    /// Iterates monomers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Monomer> {
        self.monomers.values()
    }
}
