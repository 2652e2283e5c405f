//! Tracing system for Garm.
//!
//! Records what model assembly declares, with zero overhead when disabled.
//! Supports both human-readable and JSON output formats.
//!
//! # Example
//!
//! ```
//! use garm_debug::{Tracer, TracerConfig};
//!
//! let mut tracer = Tracer::new(TracerConfig::new().enabled());
//! tracer.assembly_start(vec!["receptor".to_string()]);
//! tracer.assembly_end(true);
//! assert_eq!(tracer.buffer().len(), 2);
//! ```

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
pub use record::{AssemblyPhase, TraceEvent, TraceRecord};

use std::io::{self, Write};
use std::time::Instant;

use garm_foundation::NameKind;

// =============================================================================
// Trace Output
// =============================================================================

/// Where trace output should be sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// No output (traces still recorded in buffer).
    #[default]
    None,
    /// Write each record to stderr as it is recorded.
    Stderr,
}

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Configuration for the tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in buffer.
    pub buffer_size: usize,
    /// Where to output traces.
    pub output: TraceOutput,
    /// Whether to use JSON format.
    pub json_format: bool,
    /// Filter for specific event types (empty = all).
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10000,
            output: TraceOutput::None,
            json_format: false,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a new tracer configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable tracing.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Builder method to set buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to output to stderr.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.output = TraceOutput::Stderr;
        self
    }

    /// Builder method to use JSON format.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Builder method to filter event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// The main tracer for recording assembly events.
///
/// Designed for zero overhead when disabled - the `record` method
/// returns immediately if tracing is off.
#[derive(Debug)]
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    current_run: u64,
    start_time: Instant,
    human_formatter: HumanFormatter,
    json_formatter: JsonFormatter,
}

impl Tracer {
    /// Creates a new tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer_size = config.buffer_size;
        Self {
            config,
            buffer: TraceBuffer::new(buffer_size),
            current_run: 0,
            start_time: Instant::now(),
            human_formatter: HumanFormatter::new().with_timestamps(),
            json_formatter: JsonFormatter::new(),
        }
    }

    /// Creates a tracer with default configuration (disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Creates an enabled tracer that outputs to stderr.
    #[must_use]
    pub fn to_stderr() -> Self {
        Self::new(TracerConfig::new().enabled().to_stderr())
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Returns the current assembly run number.
    #[must_use]
    pub fn current_run(&self) -> u64 {
        self.current_run
    }

    /// Sets whether to use JSON output format.
    pub fn set_json_format(&mut self, json: bool) {
        self.config.json_format = json;
    }

    /// Sets the trace output destination.
    pub fn set_output(&mut self, output: TraceOutput) {
        self.config.output = output;
    }

    /// Records a trace event.
    ///
    /// This is the main entry point for recording events. It's designed
    /// to be as fast as possible when tracing is disabled.
    #[inline]
    pub fn record(&mut self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }

        self.record_internal(event);
    }

    fn record_internal(&mut self, event: TraceEvent) {
        if !self.config.event_filter.is_empty()
            && !self
                .config
                .event_filter
                .iter()
                .any(|t| t == event.event_type())
        {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;
        self.buffer.push(self.current_run, timestamp_ns, event);

        if self.config.output == TraceOutput::Stderr {
            if let Some(record) = self.buffer.last() {
                let line = self.format_record(record);
                let _ = writeln!(io::stderr(), "{line}");
            }
        }
    }

    /// Formats a record using the current format settings.
    #[must_use]
    pub fn format_record(&self, record: &TraceRecord) -> String {
        if self.config.json_format {
            self.json_formatter.format(record)
        } else {
            self.human_formatter.format(record)
        }
    }

    /// Formats multiple records.
    #[must_use]
    pub fn format_records(&self, records: &[&TraceRecord]) -> String {
        if self.config.json_format {
            self.json_formatter.format_many(records)
        } else {
            self.human_formatter.format_many(records)
        }
    }

    /// Returns the trace buffer.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Clears the trace buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }

    // -------------------------------------------------------------------------
    // Convenience methods for common events
    // -------------------------------------------------------------------------

    /// Starts a new assembly run and records it.
    #[inline]
    pub fn assembly_start(&mut self, modules: Vec<String>) {
        self.current_run += 1;
        self.record(TraceEvent::AssemblyStart { modules });
    }

    /// Records the end of the current assembly run.
    #[inline]
    pub fn assembly_end(&mut self, success: bool) {
        self.record(TraceEvent::AssemblyEnd { success });
    }

    /// Records a module entering a phase.
    #[inline]
    pub fn phase_start(&mut self, module: &str, phase: AssemblyPhase) {
        if self.is_enabled() {
            self.record(TraceEvent::PhaseStart {
                module: module.to_string(),
                phase,
            });
        }
    }

    /// Records a module finishing a phase.
    #[inline]
    pub fn phase_end(&mut self, module: &str, phase: AssemblyPhase) {
        if self.is_enabled() {
            self.record(TraceEvent::PhaseEnd {
                module: module.to_string(),
                phase,
            });
        }
    }

    /// Records a name binding.
    #[inline]
    pub fn declared(&mut self, kind: NameKind, name: impl Into<String>) {
        if self.is_enabled() {
            self.record(TraceEvent::Declared {
                kind,
                name: name.into(),
            });
        }
    }

    /// Records a rule being appended.
    #[inline]
    pub fn rule_added(&mut self, index: usize, reversible: bool, text: impl Into<String>) {
        if self.is_enabled() {
            self.record(TraceEvent::RuleAdded {
                index,
                reversible,
                text: text.into(),
            });
        }
    }

    /// Records a refused module contribution.
    #[inline]
    pub fn rejected(&mut self, module: &str, message: impl Into<String>) {
        if self.is_enabled() {
            self.record(TraceEvent::Rejected {
                module: module.to_string(),
                message: message.into(),
            });
        }
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

// =============================================================================
// Tests
// =============================================================================
