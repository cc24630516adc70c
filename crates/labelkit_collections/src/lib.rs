//! Factor and NamedList collection types for labelkit.
//!
//! This crate provides:
//! - [`Factor`] - Integer-coded categorical vectors with a shared level table
//! - [`NamedList`] - Persistent lists with optional first-occurrence names
//! - [`StringList`] - A named list of optional strings
//! - [`Selection`] - The scalar-or-collection result of subscript access

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod factor;
pub mod named_list;
pub mod selection;

pub use factor::{Factor, FactorOptions, Levels, MISSING_CODE};
pub use named_list::{Key, NamedList, StringList, string_list};
pub use selection::Selection;
