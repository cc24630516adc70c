//! Core types, names, subscripts and errors for labelkit.
//!
//! This crate provides:
//! - [`Names`] - Ordered name tables with first-occurrence reverse lookup
//! - [`Subscript`] and [`normalize_subscript`] - Canonical index resolution
//! - [`Value`] - Dynamic element type for heterogeneous lists
//! - [`Type`] - Type descriptors for validating dynamic inputs
//! - [`Missing`] and [`Label`] - Missing-value and stringification capabilities
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod missing;
pub mod names;
pub mod subscript;
pub mod types;
pub mod value;

pub use error::{Error, ErrorCategory, ErrorContext, ErrorKind, Result};
pub use missing::{Label, Missing};
pub use names::Names;
pub use subscript::{Normalized, Slice, Subscript, normalize_subscript, resolve_position};
pub use types::Type;
pub use value::Value;
