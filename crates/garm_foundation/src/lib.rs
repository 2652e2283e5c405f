//! Core names, errors, and persistent declaration maps for Garm.
//!
//! This crate provides:
//! - [`Name`] - Validated identifiers shared by every declaration
//! - [`NameKind`] - What a name is bound to in the model namespace
//! - [`Error`] - Rich error types with context
//! - [`DeclMap`] - Insertion-ordered persistent map for declarations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod name;

pub use collections::DeclMap;
pub use error::{Error, ErrorContext, ErrorKind};
pub use name::{Name, NameKind};

/// Result type for Garm operations.
pub type Result<T> = std::result::Result<T, Error>;
