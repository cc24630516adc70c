//! Positional subsetting.

use labelkit_collections::{Factor, NamedList};
use labelkit_foundation::{Error, Names, Result};

use crate::combine::RowMajor;

/// Types that can build a new value from a list of their positions.
///
/// Positions may repeat and come in any order. An out-of-range position fails
/// with `IndexOutOfRange`.
pub trait Subset: Sized {
    /// Returns the elements (or rows) at `indices`, in that order.
    fn subset(&self, indices: &[usize]) -> Result<Self>;
}

/// Subsets `x` by `indices`.
pub fn subset<S: Subset>(x: &S, indices: &[usize]) -> Result<S> {
    x.subset(indices)
}

pub(crate) fn out_of_bounds(index: usize, length: usize) -> Error {
    Error::index_out_of_bounds(i64::try_from(index).unwrap_or(i64::MAX), length)
}

impl<T: Clone> Subset for Vec<T> {
    fn subset(&self, indices: &[usize]) -> Result<Self> {
        indices
            .iter()
            .map(|&i| self.get(i).cloned().ok_or_else(|| out_of_bounds(i, self.len())))
            .collect()
    }
}

impl Subset for Names {
    fn subset(&self, indices: &[usize]) -> Result<Self> {
        self.select(indices)
    }
}

impl Subset for Factor {
    fn subset(&self, indices: &[usize]) -> Result<Self> {
        self.select(indices)
    }
}

impl<T: Clone> Subset for NamedList<T> {
    fn subset(&self, indices: &[usize]) -> Result<Self> {
        self.select(indices)
    }
}

impl<T: Clone> Subset for RowMajor<T> {
    fn subset(&self, indices: &[usize]) -> Result<Self> {
        self.select_rows(indices)
    }
}
