//! Species patterns.
//!
//! A [`MonomerPattern`] constrains some sites of one monomer and may name a
//! compartment. A [`ComplexPattern`] joins monomer patterns through paired
//! bond indices. Complex patterns are kept in a canonical form, so two
//! patterns built from the same parts in a different order compare equal.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use garm_foundation::{Error, ErrorKind, Name, NameKind, Result};
use garm_storage::Registry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Site Conditions
// =============================================================================

/// What a pattern requires of one site.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SiteCondition {
    /// The site carries no bond.
    Unbound,
    /// The site is bonded to the other site carrying this index.
    Bound(u32),
    /// The site is in the given state.
    State(String),
    /// Anything goes.
    Unconstrained,
}

impl SiteCondition {
    /// Shorthand for [`SiteCondition::State`].
    #[must_use]
    pub fn state(label: &str) -> Self {
        Self::State(label.to_string())
    }
}

// =============================================================================
// Monomer Patterns
// =============================================================================

/// A partial specification of a single monomer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonomerPattern {
    monomer: Name,
    /// Constrained sites in the monomer's declaration order.
    sites: Vec<(Name, SiteCondition)>,
    compartment: Option<Name>,
}

/// Builds a monomer pattern checked against the registry.
///
/// `Unconstrained` assignments are accepted and dropped, so a pattern that
/// lists a site as unconstrained equals one that leaves it out.
///
/// # Errors
///
/// - [`ErrorKind::UnknownEntity`] if the monomer or compartment is not declared
/// - [`ErrorKind::UnknownSite`] if a site is not on the monomer
/// - [`ErrorKind::InvalidState`] if a state label is not allowed on the site
/// - [`ErrorKind::DuplicateName`] if a site is assigned twice
pub fn pattern(
    registry: &Registry,
    monomer: &str,
    sites: &[(&str, SiteCondition)],
    compartment: Option<&str>,
) -> Result<MonomerPattern> {
    let definition = registry.lookup_monomer(monomer)?;

    let mut assigned: HashMap<&str, &SiteCondition> = HashMap::with_capacity(sites.len());
    for (site, condition) in sites {
        let Some(declared) = definition.site(site) else {
            return Err(Error::unknown_site(monomer, *site));
        };
        if let SiteCondition::State(label) = condition {
            if !declared.allows(label) {
                return Err(Error::new(ErrorKind::InvalidState {
                    monomer: monomer.to_string(),
                    site: (*site).to_string(),
                    state: label.clone(),
                }));
            }
        }
        if assigned.insert(*site, condition).is_some() {
            return Err(Error::duplicate_name(
                NameKind::Site,
                format!("{monomer}.{site}"),
            ));
        }
    }

    let constrained = definition
        .sites()
        .iter()
        .filter_map(|site| {
            assigned
                .get(site.name().as_str())
                .filter(|c| ***c != SiteCondition::Unconstrained)
                .map(|c| (site.name().clone(), (*c).clone()))
        })
        .collect();

    let compartment = compartment
        .map(|c| registry.lookup_compartment(c).map(|c| c.name.clone()))
        .transpose()?;

    Ok(MonomerPattern {
        monomer: definition.name().clone(),
        sites: constrained,
        compartment,
    })
}

impl MonomerPattern {
    /// Returns the monomer name.
    #[must_use]
    pub fn monomer(&self) -> &Name {
        &self.monomer
    }

    /// Returns the constrained sites in declaration order.
    #[must_use]
    pub fn sites(&self) -> &[(Name, SiteCondition)] {
        &self.sites
    }

    /// Returns the condition on a site; unlisted sites are unconstrained.
    #[must_use]
    pub fn condition(&self, site: &str) -> &SiteCondition {
        self.sites
            .iter()
            .find(|(name, _)| name.as_str() == site)
            .map_or(&SiteCondition::Unconstrained, |(_, c)| c)
    }

    /// Returns the compartment qualifier.
    #[must_use]
    pub fn compartment(&self) -> Option<&Name> {
        self.compartment.as_ref()
    }

    /// Returns a copy placed in another compartment.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownEntity`] if the compartment is not declared.
    pub fn in_compartment(&self, registry: &Registry, compartment: &str) -> Result<Self> {
        let compartment = registry.lookup_compartment(compartment)?.name.clone();
        Ok(Self {
            compartment: Some(compartment),
            ..self.clone()
        })
    }

    /// Iterates the bond indices this pattern carries.
    pub fn bonds(&self) -> impl Iterator<Item = u32> + '_ {
        self.sites.iter().filter_map(|(_, c)| match c {
            SiteCondition::Bound(index) => Some(*index),
            _ => None,
        })
    }

    /// The same pattern with every bond index erased, used to order parts.
    fn shape(&self) -> Self {
        let sites = self
            .sites
            .iter()
            .map(|(name, c)| match c {
                SiteCondition::Bound(_) => (name.clone(), SiteCondition::Bound(0)),
                other => (name.clone(), other.clone()),
            })
            .collect();
        Self {
            sites,
            ..self.clone()
        }
    }
}

impl fmt::Display for MonomerPattern {
    /// Writes BNGL, e.g. `R(bl!1,bg,state~A)@CM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.monomer)?;
        for (i, (site, condition)) in self.sites.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match condition {
                SiteCondition::Unbound | SiteCondition::Unconstrained => write!(f, "{site}")?,
                SiteCondition::Bound(index) => write!(f, "{site}!{index}")?,
                SiteCondition::State(label) => write!(f, "{site}~{label}")?,
            }
        }
        f.write_str(")")?;
        if let Some(compartment) = &self.compartment {
            write!(f, "@{compartment}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Complex Patterns
// =============================================================================

/// One or more monomer patterns joined by bonds, in canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComplexPattern {
    monomers: Vec<MonomerPattern>,
}

/// Joins monomer patterns into one complex.
///
/// # Errors
///
/// Returns [`ErrorKind::UnbalancedBond`] if any bond index is not carried by
/// exactly two sites. An empty part list is reported as bond 0 with count 0.
pub fn compose(parts: Vec<MonomerPattern>) -> Result<ComplexPattern> {
    if parts.is_empty() {
        return Err(Error::new(ErrorKind::UnbalancedBond { index: 0, count: 0 }));
    }

    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for part in &parts {
        for index in part.bonds() {
            *counts.entry(index).or_default() += 1;
        }
    }
    if let Some((&index, &count)) = counts.iter().find(|&(_, &count)| count != 2) {
        return Err(Error::new(ErrorKind::UnbalancedBond { index, count }));
    }

    Ok(ComplexPattern {
        monomers: canonicalize(parts),
    })
}

/// Orders parts by shape and renumbers bonds from 1 in order of appearance.
///
/// Parts with identical shapes are tried in every relative order and the
/// smallest renumbered result wins, so the outcome never depends on the
/// order the caller listed them in.
fn canonicalize(mut parts: Vec<MonomerPattern>) -> Vec<MonomerPattern> {
    parts.sort_by_cached_key(MonomerPattern::shape);
    let shapes: Vec<MonomerPattern> = parts.iter().map(MonomerPattern::shape).collect();

    let mut order: Vec<usize> = (0..parts.len()).collect();
    let mut best: Option<Vec<MonomerPattern>> = None;
    visit_tie_orders(&shapes, &mut order, 0, &mut |order: &[usize]| {
        let candidate = renumber(order.iter().map(|&i| parts[i].clone()).collect());
        if best.as_ref().is_none_or(|current| candidate < *current) {
            best = Some(candidate);
        }
    });
    best.unwrap_or_default()
}

/// Calls `visit` with every permutation of `order` that only swaps parts of
/// equal shape.
fn visit_tie_orders(
    shapes: &[MonomerPattern],
    order: &mut [usize],
    position: usize,
    visit: &mut dyn FnMut(&[usize]),
) {
    if position == order.len() {
        visit(order);
        return;
    }
    for candidate in position..order.len() {
        if shapes[order[candidate]] != shapes[order[position]] {
            break;
        }
        order.swap(position, candidate);
        visit_tie_orders(shapes, order, position + 1, visit);
        order.swap(position, candidate);
    }
}

fn renumber(mut parts: Vec<MonomerPattern>) -> Vec<MonomerPattern> {
    let mut renumbered: HashMap<u32, u32> = HashMap::new();
    for part in &mut parts {
        for (_, condition) in &mut part.sites {
            if let SiteCondition::Bound(index) = condition {
                let next = u32::try_from(renumbered.len()).unwrap_or(u32::MAX).saturating_add(1);
                *index = *renumbered.entry(*index).or_insert(next);
            }
        }
    }
    parts
}

impl ComplexPattern {
    /// Wraps a single unbonded monomer pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnbalancedBond`] if the pattern carries a dangling bond.
    pub fn single(part: MonomerPattern) -> Result<Self> {
        compose(vec![part])
    }

    /// Returns the monomer patterns in canonical order.
    #[must_use]
    pub fn monomers(&self) -> &[MonomerPattern] {
        &self.monomers
    }

    /// Returns the number of monomer patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.monomers.len()
    }

    /// Always false: a complex holds at least one monomer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monomers.is_empty()
    }

    /// Returns the number of distinct bonds.
    #[must_use]
    pub fn bond_count(&self) -> usize {
        let indices: HashSet<u32> = self.monomers.iter().flat_map(MonomerPattern::bonds).collect();
        indices.len()
    }

    /// Returns true if any part names this monomer.
    #[must_use]
    pub fn contains_monomer(&self, monomer: &str) -> bool {
        self.monomers.iter().any(|m| m.monomer.as_str() == monomer)
    }
}

impl TryFrom<MonomerPattern> for ComplexPattern {
    type Error = Error;

    fn try_from(part: MonomerPattern) -> Result<Self> {
        Self::single(part)
    }
}

impl fmt::Display for ComplexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, monomer) in self.monomers.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{monomer}")?;
        }
        Ok(())
    }
}
