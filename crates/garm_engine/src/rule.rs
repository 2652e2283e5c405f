//! Reaction rules.
//!
//! A rule rewrites a multiset of reactant complexes into a multiset of
//! product complexes at a named rate. Reversible rules carry a second rate
//! for the reverse direction. Rules must conserve monomers and the set of
//! sites they constrain; bonds and states may change.

use std::collections::BTreeMap;
use std::fmt;

use garm_foundation::{Error, Name, Result};
use garm_storage::Registry;

use crate::pattern::ComplexPattern;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies a rule by declaration position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleId(pub usize);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule#{}", self.0)
    }
}

/// Whether a rule also runs backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Reactants to products only.
    Irreversible,
    /// Both ways.
    Reversible,
}

impl Direction {
    /// Returns the BNGL arrow.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Irreversible => "->",
            Self::Reversible => "<->",
        }
    }
}

/// A transformation between reactant and product patterns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    reactants: Vec<ComplexPattern>,
    products: Vec<ComplexPattern>,
    forward: Name,
    reverse: Option<Name>,
}

impl Rule {
    /// Returns the reactant patterns.
    #[must_use]
    pub fn reactants(&self) -> &[ComplexPattern] {
        &self.reactants
    }

    /// Returns the product patterns.
    #[must_use]
    pub fn products(&self) -> &[ComplexPattern] {
        &self.products
    }

    /// Returns the forward rate name.
    #[must_use]
    pub fn forward_rate(&self) -> &Name {
        &self.forward
    }

    /// Returns the reverse rate name for a reversible rule.
    #[must_use]
    pub fn reverse_rate(&self) -> Option<&Name> {
        self.reverse.as_ref()
    }

    /// Returns the rule direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.reverse.is_some() {
            Direction::Reversible
        } else {
            Direction::Irreversible
        }
    }

    /// Returns true if the rule has a reverse rate.
    #[must_use]
    pub fn is_reversible(&self) -> bool {
        self.reverse.is_some()
    }

    /// Resolves the forward and reverse rates to numbers.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures from the registry.
    pub fn resolved_rates(&self, registry: &Registry) -> Result<(f64, Option<f64>)> {
        let forward = registry.resolve(self.forward.as_str())?;
        let reverse = self
            .reverse
            .as_ref()
            .map(|r| registry.resolve(r.as_str()))
            .transpose()?;
        Ok((forward, reverse))
    }
}

fn write_side(f: &mut fmt::Formatter<'_>, side: &[ComplexPattern]) -> fmt::Result {
    for (i, complex) in side.iter().enumerate() {
        if i > 0 {
            f.write_str(" + ")?;
        }
        write!(f, "{complex}")?;
    }
    Ok(())
}

impl fmt::Display for Rule {
    /// Writes the BNGL rule body, e.g. `L(b) + R(bl) <-> L(b!1).R(bl!1) kf, kr`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_side(f, &self.reactants)?;
        write!(f, " {} ", self.direction().arrow())?;
        write_side(f, &self.products)?;
        write!(f, " {}", self.forward)?;
        if let Some(reverse) = &self.reverse {
            write!(f, ", {reverse}")?;
        }
        Ok(())
    }
}

/// What one side of a rule contains, for balance checking.
#[derive(Debug, Default, PartialEq, Eq)]
struct Inventory {
    monomers: BTreeMap<Name, usize>,
    sites: BTreeMap<(Name, Name), usize>,
}

impl Inventory {
    fn of(side: &[ComplexPattern]) -> Self {
        let mut inventory = Self::default();
        for part in side.iter().flat_map(ComplexPattern::monomers) {
            *inventory.monomers.entry(part.monomer().clone()).or_default() += 1;
            for (site, _) in part.sites() {
                *inventory
                    .sites
                    .entry((part.monomer().clone(), site.clone()))
                    .or_default() += 1;
            }
        }
        inventory
    }

    /// Describes the first difference from `products`, if any.
    fn mismatch(&self, products: &Self) -> Option<String> {
        if self.monomers != products.monomers {
            return Some(format!(
                "monomers differ: {} on the left, {} on the right",
                describe(&self.monomers, |m| m.to_string()),
                describe(&products.monomers, |m| m.to_string()),
            ));
        }
        if self.sites != products.sites {
            let site = |(m, s): &(Name, Name)| format!("{m}.{s}");
            return Some(format!(
                "constrained sites differ: {} on the left, {} on the right",
                describe(&self.sites, site),
                describe(&products.sites, site),
            ));
        }
        None
    }
}

fn describe<K>(counts: &BTreeMap<K, usize>, label: impl Fn(&K) -> String) -> String {
    if counts.is_empty() {
        return "nothing".to_string();
    }
    counts
        .iter()
        .map(|(k, n)| {
            if *n == 1 {
                label(k)
            } else {
                format!("{n}x{}", label(k))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered, append-only collection of rules.
///
/// Adding the same reactants and products twice yields two rules.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleSet {
    rules: im::Vector<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new set with the rule appended, and the rule's id.
    ///
    /// The rule is reversible exactly when `reverse` is given.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::RateReference`](garm_foundation::ErrorKind::RateReference) if a
    ///   rate is not a declared parameter or expression
    /// - [`ErrorKind::UnbalancedRule`](garm_foundation::ErrorKind::UnbalancedRule) if
    ///   either side is empty or the sides do not conserve monomers and constrained sites
    pub fn add_rule(
        &self,
        registry: &Registry,
        reactants: Vec<ComplexPattern>,
        products: Vec<ComplexPattern>,
        forward: &str,
        reverse: Option<&str>,
    ) -> Result<(Self, RuleId)> {
        let forward = Self::rate(registry, forward)?;
        let reverse = reverse.map(|r| Self::rate(registry, r)).transpose()?;

        if reactants.is_empty() || products.is_empty() {
            return Err(Error::unbalanced_rule(
                "both sides need at least one pattern; synthesis and degradation are not supported",
            ));
        }
        if let Some(reason) = Inventory::of(&reactants).mismatch(&Inventory::of(&products)) {
            return Err(Error::unbalanced_rule(reason));
        }

        let id = RuleId(self.rules.len());
        let mut rules = self.rules.clone();
        rules.push_back(Rule {
            reactants,
            products,
            forward,
            reverse,
        });
        Ok((Self { rules }, id))
    }

    fn rate(registry: &Registry, name: &str) -> Result<Name> {
        if !registry.is_numeric(name) {
            return Err(Error::rate_reference(name));
        }
        Name::new(name)
    }

    /// Gets a rule by id.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0)
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates rules with their ids in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules.iter().enumerate().map(|(i, r)| (RuleId(i), r))
    }

    /// Returns the number of reversible rules.
    #[must_use]
    pub fn reversible_count(&self) -> usize {
        self.rules.iter().filter(|r| r.is_reversible()).count()
    }
}
