//! Generic sequence operations for labelkit.
//!
//! Every operation is a trait implemented for plain vectors, [`Factor`],
//! [`NamedList`] and, where it makes sense, [`RowMajor`] tables. The free
//! functions dispatch statically through those traits.
//!
//! This crate provides:
//! - [`subset`], [`combine`], [`combine_sequences`], [`assign`] - Positional building blocks
//! - [`match_indices`], [`create_match_index`] - Position lookup with factor fast paths
//! - [`order`], [`sort`] - Stable ordering with forced-last values
//! - [`duplicated`], [`unique`] - Duplicate detection
//! - [`split`] - Grouping by a parallel key
//! - [`intersect`], [`union`] - Set operations
//!
//! [`Factor`]: labelkit_collections::Factor
//! [`NamedList`]: labelkit_collections::NamedList

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assign;
pub mod combine;
pub mod duplicated;
pub mod height;
pub mod matching;
pub mod options;
pub mod order;
pub mod sets;
pub mod split;
pub mod subset;

pub use assign::{Assign, assign};
pub use combine::{
    Combinable, Combine, CombineRows, Combined, RowMajor, combine, combine_sequences,
};
pub use duplicated::{Duplicated, duplicated, unique};
pub use height::Height;
pub use matching::{MatchIndex, MatchTargets, Matchable, create_match_index, match_indices};
pub use options::{
    DuplicateMethod, Exclusions, IntType, MatchOptions, OrderOptions, SplitOptions,
};
pub use order::{Orderable, Rank, order, sort};
pub use sets::{intersect, union};
pub use split::{Grouping, Split, split};
pub use subset::{Subset, subset};
