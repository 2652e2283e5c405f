//! Trace output formatters.
//!
//! Provides human-readable and JSON formatters for trace records.

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats multiple records.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record IDs.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    /// Formats timestamp in microseconds.
    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        use std::fmt::Write;
        let mut prefix = String::new();

        if self.show_ids {
            let _ = write!(prefix, "[{:06}] ", record.id);
        }

        let _ = write!(prefix, "A{:03} ", record.run);

        if self.show_timestamps {
            let _ = write!(
                prefix,
                "{:>10} ",
                Self::format_timestamp(record.timestamp_ns)
            );
        }

        let event_str = match &record.event {
            TraceEvent::AssemblyStart { modules } => {
                format!("=== ASSEMBLE [{}] ===", modules.join(", "))
            }
            TraceEvent::AssemblyEnd { success } => {
                let status = if *success { "OK" } else { "FAILED" };
                format!("=== ASSEMBLY END ({status}) ===")
            }
            TraceEvent::PhaseStart { module, phase } => format!("  >> {module}/{phase}"),
            TraceEvent::PhaseEnd { module, phase } => format!("  << {module}/{phase}"),
            TraceEvent::Declared { kind, name } => format!("    DECLARE {kind} {name}"),
            TraceEvent::RuleAdded {
                index,
                reversible,
                text,
            } => {
                let arrow = if *reversible { "reversible" } else { "irreversible" };
                format!("    RULE #{index} ({arrow}) {text}")
            }
            TraceEvent::Rejected { module, message } => format!("  REJECTED {module}: {message}"),
        };

        format!("{prefix}{event_str}")
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats trace records as JSON.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether to put each record of a batch on its own line.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Escapes a string for JSON.
    fn escape_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    fn string(s: &str) -> String {
        format!("\"{}\"", Self::escape_string(s))
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let event_data = match &record.event {
            TraceEvent::AssemblyStart { modules } => {
                let names: Vec<_> = modules.iter().map(|m| Self::string(m)).collect();
                format!("\"modules\":[{}]", names.join(","))
            }
            TraceEvent::AssemblyEnd { success } => format!("\"success\":{success}"),
            TraceEvent::PhaseStart { module, phase } | TraceEvent::PhaseEnd { module, phase } => {
                format!("\"module\":{},\"phase\":\"{phase}\"", Self::string(module))
            }
            TraceEvent::Declared { kind, name } => {
                format!("\"kind\":\"{kind}\",\"name\":{}", Self::string(name))
            }
            TraceEvent::RuleAdded {
                index,
                reversible,
                text,
            } => format!(
                "\"index\":{index},\"reversible\":{reversible},\"text\":{}",
                Self::string(text)
            ),
            TraceEvent::Rejected { module, message } => format!(
                "\"module\":{},\"message\":{}",
                Self::string(module),
                Self::string(message)
            ),
        };

        format!(
            "{{\"id\":{},\"run\":{},\"timestamp_ns\":{},\"type\":\"{}\",{}}}",
            record.id,
            record.run,
            record.timestamp_ns,
            record.event_type(),
            event_data
        )
    }

    fn format_many(&self, records: &[&TraceRecord]) -> String {
        let items: Vec<_> = records.iter().map(|r| self.format(r)).collect();
        if self.pretty {
            format!("[\n  {}\n]", items.join(",\n  "))
        } else {
            format!("[{}]", items.join(","))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
