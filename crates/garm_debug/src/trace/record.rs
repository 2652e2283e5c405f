//! Trace event and record types.
//!
//! This module defines the events recorded while modules are merged into a model.

use garm_foundation::NameKind;

pub use garm_engine::AssemblyPhase;

// =============================================================================
// Trace Event
// =============================================================================

/// Events that can be traced during model assembly.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceEvent {
    /// A merge has started.
    AssemblyStart {
        /// Contributing modules in merge order.
        modules: Vec<String>,
    },

    /// A merge has ended.
    AssemblyEnd {
        /// Whether the model was committed.
        success: bool,
    },

    /// A module has entered a phase.
    PhaseStart {
        /// The contributing module.
        module: String,
        /// The phase.
        phase: AssemblyPhase,
    },

    /// A module has finished a phase.
    PhaseEnd {
        /// The contributing module.
        module: String,
        /// The phase.
        phase: AssemblyPhase,
    },

    /// A name was bound.
    Declared {
        /// What the name is bound to.
        kind: NameKind,
        /// The name, or a rendering of the declared species.
        name: String,
    },

    /// A rule was appended.
    RuleAdded {
        /// Position in the rule set.
        index: usize,
        /// Whether the rule has a reverse rate.
        reversible: bool,
        /// The rule in BNGL form.
        text: String,
    },

    /// A module's contribution was refused.
    Rejected {
        /// The contributing module.
        module: String,
        /// The error message.
        message: String,
    },
}

impl TraceEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::AssemblyStart { .. } => "assembly-start",
            Self::AssemblyEnd { .. } => "assembly-end",
            Self::PhaseStart { .. } => "phase-start",
            Self::PhaseEnd { .. } => "phase-end",
            Self::Declared { .. } => "declared",
            Self::RuleAdded { .. } => "rule-added",
            Self::Rejected { .. } => "rejected",
        }
    }

    /// Returns true if this is an assembly boundary event.
    #[must_use]
    pub fn is_assembly_boundary(&self) -> bool {
        matches!(self, Self::AssemblyStart { .. } | Self::AssemblyEnd { .. })
    }

    /// Returns true if this event records something entering the model.
    #[must_use]
    pub fn is_declaration(&self) -> bool {
        matches!(self, Self::Declared { .. } | Self::RuleAdded { .. })
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped trace record.
#[derive(Clone, Debug)]
pub struct TraceRecord {
    /// Unique record ID within the session.
    pub id: u64,
    /// The assembly run this event belongs to.
    pub run: u64,
    /// Timestamp in nanoseconds since the tracer was created.
    pub timestamp_ns: u64,
    /// The trace event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, run: u64, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            run,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}

// =============================================================================
// Tests
// =============================================================================
