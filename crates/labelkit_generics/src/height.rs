//! Logical height of sequences and tables.

use labelkit_collections::{Factor, NamedList};
use labelkit_foundation::Names;

use crate::combine::RowMajor;

/// Number of elements of a sequence, or rows of a table.
pub trait Height {
    /// Returns the logical height.
    fn height(&self) -> usize;
}

impl<T> Height for [T] {
    fn height(&self) -> usize {
        self.len()
    }
}

impl<T> Height for Vec<T> {
    fn height(&self) -> usize {
        self.len()
    }
}

impl Height for Names {
    fn height(&self) -> usize {
        self.len()
    }
}

impl Height for Factor {
    fn height(&self) -> usize {
        self.len()
    }
}

impl<T: Clone> Height for NamedList<T> {
    fn height(&self) -> usize {
        self.len()
    }
}

impl<T> Height for RowMajor<T> {
    fn height(&self) -> usize {
        self.nrow()
    }
}
