//! The model aggregate and the modules that contribute to it.
//!
//! A [`Model`] is an immutable snapshot of everything declared so far. A
//! [`Module`] contributes declarations phase by phase; merging runs every
//! phase across all modules before moving on, so a module's rules can use
//! monomers and parameters that a later module declares in an earlier phase.

use std::fmt;

use garm_foundation::{Error, NameKind, Result};
use garm_language::Formula;
use garm_storage::Registry;

use crate::initial::InitialSet;
use crate::observable::ObservableSet;
use crate::pattern::{ComplexPattern, MonomerPattern, SiteCondition, pattern};
use crate::rule::{RuleId, RuleSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Assembly Phase
// =============================================================================

/// Phase of model assembly.
///
/// Phases run in this order across all modules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssemblyPhase {
    /// Monomer declarations.
    Monomers,
    /// Geometry and the parameters that size it.
    Compartments,
    /// Seeded species and their amounts.
    Initials,
    /// Rate parameters, expressions and rules.
    Rules,
    /// Observables.
    Observables,
}

impl AssemblyPhase {
    /// All phases in execution order.
    pub const ALL: [Self; 5] = [
        Self::Monomers,
        Self::Compartments,
        Self::Initials,
        Self::Rules,
        Self::Observables,
    ];
}

impl fmt::Display for AssemblyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monomers => write!(f, "monomers"),
            Self::Compartments => write!(f, "compartments"),
            Self::Initials => write!(f, "initials"),
            Self::Rules => write!(f, "rules"),
            Self::Observables => write!(f, "observables"),
        }
    }
}

// =============================================================================
// Module
// =============================================================================

/// A building block that contributes declarations to a model.
///
/// Each phase method receives the model accumulated so far and returns the
/// model with this module's declarations added. The defaults contribute
/// nothing.
pub trait Module {
    /// Name used in error context and trace output.
    fn name(&self) -> &str;

    /// Declares monomers.
    ///
    /// # Errors
    ///
    /// Returns any declaration error.
    fn monomers(&self, model: &Model) -> Result<Model> {
        Ok(model.clone())
    }

    /// Declares size parameters and compartments.
    ///
    /// # Errors
    ///
    /// Returns any declaration error.
    fn compartments(&self, model: &Model) -> Result<Model> {
        Ok(model.clone())
    }

    /// Declares initial amounts and seeded species.
    ///
    /// # Errors
    ///
    /// Returns any declaration error.
    fn initials(&self, model: &Model) -> Result<Model> {
        Ok(model.clone())
    }

    /// Declares rate parameters, expressions and rules.
    ///
    /// # Errors
    ///
    /// Returns any declaration error.
    fn rules(&self, model: &Model) -> Result<Model> {
        Ok(model.clone())
    }

    /// Declares observables.
    ///
    /// # Errors
    ///
    /// Returns any declaration error.
    fn observables(&self, model: &Model) -> Result<Model> {
        Ok(model.clone())
    }
}

// =============================================================================
// Model
// =============================================================================

/// Everything declared by the merged modules.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Model {
    registry: Registry,
    rules: RuleSet,
    initials: InitialSet,
    observables: ObservableSet,
    strict_initials: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            rules: RuleSet::new(),
            initials: InitialSet::new(),
            observables: ObservableSet::new(),
            strict_initials: true,
        }
    }
}

impl Model {
    /// Creates an empty model that rejects duplicate initial conditions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether a species may be seeded more than once.
    #[must_use]
    pub fn with_strict_initials(mut self, strict: bool) -> Self {
        self.strict_initials = strict;
        self
    }

    /// Merges modules into this model.
    ///
    /// Every phase runs across all modules, in the given order, before the
    /// next phase starts. Either every module is merged or the error is
    /// returned and nothing is.
    ///
    /// # Errors
    ///
    /// Returns the first declaration error, attributed to the module and
    /// phase that raised it.
    pub fn merge(&self, modules: &[&dyn Module]) -> Result<Self> {
        let mut model = self.clone();
        for phase in AssemblyPhase::ALL {
            for module in modules {
                model = model.contribute(*module, phase)?;
            }
        }
        Ok(model)
    }

    /// Runs one phase of one module.
    ///
    /// # Errors
    ///
    /// Returns the module's declaration error with the module name as its
    /// source and the phase pushed onto its stack.
    pub fn contribute(&self, module: &dyn Module, phase: AssemblyPhase) -> Result<Self> {
        let result = match phase {
            AssemblyPhase::Monomers => module.monomers(self),
            AssemblyPhase::Compartments => module.compartments(self),
            AssemblyPhase::Initials => module.initials(self),
            AssemblyPhase::Rules => module.rules(self),
            AssemblyPhase::Observables => module.observables(self),
        };
        result.map_err(|err| attribute(err, module.name(), phase))
    }

    // --- Declarations ---

    /// Declares a monomer.
    ///
    /// # Errors
    ///
    /// See [`Registry::declare_monomer`].
    pub fn declare_monomer(
        &self,
        name: &str,
        sites: &[&str],
        site_states: &[(&str, &[&str])],
    ) -> Result<Self> {
        let registry = self.registry.declare_monomer(name, sites, site_states)?;
        Ok(Self {
            registry,
            ..self.clone()
        })
    }

    /// Declares a compartment.
    ///
    /// # Errors
    ///
    /// See [`Registry::declare_compartment`].
    pub fn declare_compartment(
        &self,
        name: &str,
        dimension: u8,
        size: &str,
        parent: Option<&str>,
    ) -> Result<Self> {
        let registry = self
            .registry
            .declare_compartment(name, dimension, size, parent)?;
        Ok(Self {
            registry,
            ..self.clone()
        })
    }

    /// Declares a parameter.
    ///
    /// # Errors
    ///
    /// See [`Registry::declare_parameter`].
    pub fn declare_parameter(&self, name: &str, value: f64) -> Result<Self> {
        let registry = self.registry.declare_parameter(name, value)?;
        Ok(Self {
            registry,
            ..self.clone()
        })
    }

    /// Declares several parameters in order.
    ///
    /// # Errors
    ///
    /// Returns the first failure; no parameter is declared in that case.
    pub fn declare_parameters(&self, parameters: &[(&str, f64)]) -> Result<Self> {
        let mut registry = self.registry.clone();
        for (name, value) in parameters {
            registry = registry.declare_parameter(name, *value)?;
        }
        Ok(Self {
            registry,
            ..self.clone()
        })
    }

    /// Declares an expression.
    ///
    /// # Errors
    ///
    /// See [`Registry::declare_expression`].
    pub fn declare_expression(&self, name: &str, formula: Formula) -> Result<Self> {
        let registry = self.registry.declare_expression(name, formula)?;
        Ok(Self {
            registry,
            ..self.clone()
        })
    }

    /// Declares expressions that may reference each other.
    ///
    /// # Errors
    ///
    /// See [`Registry::declare_expressions`].
    pub fn declare_expressions(&self, batch: Vec<(&str, Formula)>) -> Result<Self> {
        let registry = self.registry.declare_expressions(batch)?;
        Ok(Self {
            registry,
            ..self.clone()
        })
    }

    /// Builds a monomer pattern against the declared monomers and compartments.
    ///
    /// # Errors
    ///
    /// See [`pattern`].
    pub fn pattern(
        &self,
        monomer: &str,
        sites: &[(&str, SiteCondition)],
        compartment: Option<&str>,
    ) -> Result<MonomerPattern> {
        pattern(&self.registry, monomer, sites, compartment)
    }

    /// Builds an unbonded single-monomer species pattern.
    ///
    /// # Errors
    ///
    /// See [`pattern`]; a bond index is reported as unbalanced.
    pub fn species(
        &self,
        monomer: &str,
        sites: &[(&str, SiteCondition)],
        compartment: Option<&str>,
    ) -> Result<ComplexPattern> {
        ComplexPattern::single(self.pattern(monomer, sites, compartment)?)
    }

    /// Seeds a species with the amount held by a parameter.
    ///
    /// # Errors
    ///
    /// See [`InitialSet::add_initial`].
    pub fn add_initial(&self, species: ComplexPattern, amount: &str) -> Result<Self> {
        let initials =
            self.initials
                .add_initial(&self.registry, species, amount, self.strict_initials)?;
        Ok(Self {
            initials,
            ..self.clone()
        })
    }

    /// Appends a rule; it is reversible when `reverse` is given.
    ///
    /// # Errors
    ///
    /// See [`RuleSet::add_rule`].
    pub fn add_rule(
        &self,
        reactants: Vec<ComplexPattern>,
        products: Vec<ComplexPattern>,
        forward: &str,
        reverse: Option<&str>,
    ) -> Result<(Self, RuleId)> {
        let (rules, id) =
            self.rules
                .add_rule(&self.registry, reactants, products, forward, reverse)?;
        Ok((
            Self {
                rules,
                ..self.clone()
            },
            id,
        ))
    }

    /// Declares an observable, binding its name in the shared namespace.
    ///
    /// # Errors
    ///
    /// Fails if the name is taken by any declaration, or on
    /// [`ObservableSet::add_observable`] errors.
    pub fn add_observable(&self, name: &str, patterns: Vec<ComplexPattern>) -> Result<Self> {
        let observables = self.observables.add_observable(name, patterns)?;
        let registry = self.registry.reserve(name, NameKind::Observable)?;
        Ok(Self {
            registry,
            observables,
            ..self.clone()
        })
    }

    // --- Queries ---

    /// Returns what `name` is bound to, if anything.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<NameKind> {
        self.registry.lookup(name)
    }

    /// Resolves a parameter or expression to a number.
    ///
    /// # Errors
    ///
    /// Returns an unknown reference error if `name` is not numeric.
    pub fn resolve(&self, name: &str) -> Result<f64> {
        self.registry.resolve(name)
    }

    /// Returns the declaration registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the rules.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the initial conditions.
    #[must_use]
    pub fn initials(&self) -> &InitialSet {
        &self.initials
    }

    /// Returns the observables.
    #[must_use]
    pub fn observables(&self) -> &ObservableSet {
        &self.observables
    }

    /// Returns true if duplicate initial conditions are rejected.
    #[must_use]
    pub fn strict_initials(&self) -> bool {
        self.strict_initials
    }

    /// Returns declaration counts.
    #[must_use]
    pub fn stats(&self) -> ModelStats {
        let parameters = self.registry.parameters();
        ModelStats {
            monomers: self.registry.monomers().len(),
            compartments: self.registry.compartments().len(),
            parameters: parameters.parameters().count(),
            expressions: parameters.expressions().count(),
            initials: self.initials.len(),
            rules: self.rules.len(),
            reversible_rules: self.rules.reversible_count(),
            observables: self.observables.len(),
        }
    }
}

fn attribute(mut err: Error, module: &str, phase: AssemblyPhase) -> Error {
    let context = err
        .context
        .take()
        .unwrap_or_default()
        .with_source(module)
        .with_frame(format!("{phase} phase"));
    err.with_context(context)
}

/// Declaration counts for a model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelStats {
    /// Declared monomers.
    pub monomers: usize,
    /// Declared compartments.
    pub compartments: usize,
    /// Declared parameters.
    pub parameters: usize,
    /// Declared expressions.
    pub expressions: usize,
    /// Initial conditions.
    pub initials: usize,
    /// Rules, each counted once whatever its direction.
    pub rules: usize,
    /// Rules with a reverse rate.
    pub reversible_rules: usize,
    /// Observables.
    pub observables: usize,
}

impl fmt::Display for ModelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} monomers, {} compartments, {} parameters, {} expressions, \
             {} initials, {} rules ({} reversible), {} observables",
            self.monomers,
            self.compartments,
            self.parameters,
            self.expressions,
            self.initials,
            self.rules,
            self.reversible_rules,
            self.observables
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
