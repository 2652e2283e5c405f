//! Assembly tracing for Garm.
//!
//! This crate provides:
//! - [`Tracer`] - Records what model assembly declares, with zero overhead when disabled
//! - [`TraceBuffer`] - Bounded history of trace records
//! - [`HumanFormatter`] and [`JsonFormatter`] - Output formats

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod trace;

pub use trace::{
    AssemblyPhase, HumanFormatter, JsonFormatter, TraceBuffer, TraceBufferStats, TraceEvent,
    TraceFormatter, TraceOutput, TraceRecord, Tracer, TracerConfig,
};
