//! Labelkit - R-like labelled collections
//!
//! This crate re-exports all layers of the labelkit system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: labelkit_generics    - subset, combine, assign, match, order, split
//! Layer 1: labelkit_collections - Factor, NamedList
//! Layer 0: labelkit_foundation  - Names, subscripts, Value, Error
//! ```

pub use labelkit_collections as collections;
pub use labelkit_foundation as foundation;
pub use labelkit_generics as generics;

pub use labelkit_collections::{Factor, FactorOptions, NamedList, StringList};
pub use labelkit_foundation::{Error, ErrorCategory, Names, Result, Subscript};
