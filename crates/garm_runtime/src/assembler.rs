//! Traced model assembly.
//!
//! The [`Assembler`] runs every phase of every module the way
//! [`Model::merge`] does, and reports each committed declaration to a
//! [`Tracer`].

use garm_debug::{Tracer, TracerConfig};
use garm_engine::{AssemblyPhase, Model, Module};
use garm_foundation::{NameKind, Result};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for an [`Assembler`].
#[derive(Clone, Debug)]
pub struct AssemblyConfig {
    /// Tracer settings.
    pub trace: TracerConfig,
    /// Whether a species may be seeded only once.
    pub strict_initials: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            trace: TracerConfig::default(),
            strict_initials: true,
        }
    }
}

impl AssemblyConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set tracer settings.
    #[must_use]
    pub fn with_trace(mut self, trace: TracerConfig) -> Self {
        self.trace = trace;
        self
    }

    /// Builder method to allow or reject reseeding a species.
    #[must_use]
    pub fn with_strict_initials(mut self, strict: bool) -> Self {
        self.strict_initials = strict;
        self
    }
}

// =============================================================================
// Assembler
// =============================================================================

/// Merges modules into models, recording what each run declares.
#[derive(Debug)]
pub struct Assembler {
    strict_initials: bool,
    tracer: Tracer,
}

impl Assembler {
    /// Creates an assembler.
    #[must_use]
    pub fn new(config: AssemblyConfig) -> Self {
        Self {
            strict_initials: config.strict_initials,
            tracer: Tracer::new(config.trace),
        }
    }

    /// Returns the tracer.
    #[must_use]
    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Returns the tracer mutably.
    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    /// Merges modules into a new model.
    ///
    /// # Errors
    ///
    /// Returns the first declaration error; see [`Model::merge`].
    pub fn assemble(&mut self, modules: &[&dyn Module]) -> Result<Model> {
        let base = Model::new().with_strict_initials(self.strict_initials);
        self.extend(&base, modules)
    }

    /// Merges modules into an existing model, leaving it unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns the first declaration error; see [`Model::merge`].
    pub fn extend(&mut self, base: &Model, modules: &[&dyn Module]) -> Result<Model> {
        self.tracer
            .assembly_start(modules.iter().map(|m| m.name().to_string()).collect());
        let result = self.run(base, modules);
        self.tracer.assembly_end(result.is_ok());
        result
    }

    fn run(&mut self, base: &Model, modules: &[&dyn Module]) -> Result<Model> {
        let mut model = base.clone();
        for phase in AssemblyPhase::ALL {
            for module in modules {
                self.tracer.phase_start(module.name(), phase);
                let next = match model.contribute(*module, phase) {
                    Ok(next) => next,
                    Err(err) => {
                        self.tracer.rejected(module.name(), err.to_string());
                        return Err(err);
                    }
                };
                if self.tracer.is_enabled() {
                    record_declarations(&mut self.tracer, &model, &next);
                }
                self.tracer.phase_end(module.name(), phase);
                model = next;
            }
        }
        Ok(model)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(AssemblyConfig::default())
    }
}

/// Merges modules into a new model without tracing.
///
/// # Errors
///
/// Returns the first declaration error; see [`Model::merge`].
pub fn merge(modules: &[&dyn Module]) -> Result<Model> {
    Assembler::default().assemble(modules)
}

/// Records what `after` declares beyond `before`.
///
/// Every store is insertion-ordered, so new entries are the tail.
fn record_declarations(tracer: &mut Tracer, before: &Model, after: &Model) {
    let (old, new) = (before.registry(), after.registry());

    for quantity in new.parameters().iter().skip(old.parameters().len()) {
        tracer.declared(quantity.kind(), quantity.name().as_str());
    }
    for monomer in new.monomers().iter().skip(old.monomers().len()) {
        tracer.declared(NameKind::Monomer, monomer.name().as_str());
    }
    for compartment in new.compartments().iter().skip(old.compartments().len()) {
        tracer.declared(NameKind::Compartment, compartment.name.as_str());
    }
    for initial in after.initials().iter().skip(before.initials().len()) {
        tracer.declared(NameKind::Initial, initial.to_string());
    }
    for (id, rule) in after.rules().iter().skip(before.rules().len()) {
        tracer.rule_added(id.0, rule.is_reversible(), rule.to_string());
    }
    for observable in after.observables().iter().skip(before.observables().len()) {
        tracer.declared(NameKind::Observable, observable.name().as_str());
    }
}

// =============================================================================
// Tests
// =============================================================================
