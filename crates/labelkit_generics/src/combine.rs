//! Concatenation of sequences and row-wise stacking of tables.
//!
//! [`combine`] decides between the two from an explicit tag on each input:
//! [`Combinable::Flat`] values are concatenated through [`Combine`], while
//! [`Combinable::Tabular`] values are stacked through [`CombineRows`].

use labelkit_collections::{Factor, NamedList};
use labelkit_foundation::{Error, Names, Result};
use tracing::debug;

use crate::subset::out_of_bounds;

/// Sequences that can be concatenated with others of the same type.
pub trait Combine: Sized {
    /// Concatenates `parts` in order. Fails on an empty slice.
    fn combine(parts: &[&Self]) -> Result<Self>;
}

/// Tables that can be stacked by rows.
pub trait CombineRows: Sized {
    /// Stacks `parts` top to bottom. Fails on an empty slice.
    fn combine_rows(parts: &[&Self]) -> Result<Self>;
}

fn require_parts<T>(parts: &[T]) -> Result<()> {
    if parts.is_empty() {
        return Err(Error::invalid_argument("need at least one object to combine"));
    }
    Ok(())
}

/// Concatenates flat sequences, dispatching on their type.
pub fn combine_sequences<S: Combine>(parts: &[&S]) -> Result<S> {
    S::combine(parts)
}

impl<T: Clone> Combine for Vec<T> {
    fn combine(parts: &[&Self]) -> Result<Self> {
        require_parts(parts)?;
        Ok(parts.iter().flat_map(|part| part.iter().cloned()).collect())
    }
}

impl Combine for Names {
    fn combine(parts: &[&Self]) -> Result<Self> {
        require_parts(parts)?;
        let mut out = Names::new();
        for part in parts {
            out.extend(part.iter());
        }
        Ok(out)
    }
}

impl Combine for Factor {
    fn combine(parts: &[&Self]) -> Result<Self> {
        Factor::combine(parts)
    }
}

impl<T: Clone> Combine for NamedList<T> {
    fn combine(parts: &[&Self]) -> Result<Self> {
        require_parts(parts)?;
        let mut out = parts[0].clone();
        for part in &parts[1..] {
            out.extend_in_place(part);
        }
        Ok(out)
    }
}

/// A dense table stored row by row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowMajor<T> {
    nrow: usize,
    ncol: usize,
    data: Vec<T>,
}

impl<T> RowMajor<T> {
    /// Creates a table from row-major `data`.
    ///
    /// # Errors
    ///
    /// Fails with a length mismatch if `data.len() != nrow * ncol`.
    pub fn new(nrow: usize, ncol: usize, data: Vec<T>) -> Result<Self> {
        let expected = nrow
            .checked_mul(ncol)
            .ok_or_else(|| Error::invalid_argument(format!("{nrow} x {ncol} table is too large")))?;
        if data.len() != expected {
            return Err(Error::length_mismatch("table data", expected, data.len()));
        }
        Ok(Self { nrow, ncol, data })
    }

    /// Builds a table from a list of rows of equal width.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let ncol = rows.first().map_or(0, Vec::len);
        let nrow = rows.len();
        let mut data = Vec::with_capacity(nrow * ncol);
        for row in rows {
            if row.len() != ncol {
                return Err(Error::length_mismatch("table row", ncol, row.len()));
            }
            data.extend(row);
        }
        Ok(Self { nrow, ncol, data })
    }

    /// Number of rows.
    #[must_use]
    pub const fn nrow(&self) -> usize {
        self.nrow
    }

    /// Number of columns.
    #[must_use]
    pub const fn ncol(&self) -> usize {
        self.ncol
    }

    /// Returns row `index`, if present.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[T]> {
        if index >= self.nrow {
            return None;
        }
        let start = index * self.ncol;
        self.data.get(start..start + self.ncol)
    }

    /// Returns the underlying row-major storage.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Clone> RowMajor<T> {
    /// Returns the rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self> {
        let mut data = Vec::with_capacity(indices.len() * self.ncol);
        for &i in indices {
            let row = self.row(i).ok_or_else(|| out_of_bounds(i, self.nrow))?;
            data.extend_from_slice(row);
        }
        Ok(Self {
            nrow: indices.len(),
            ncol: self.ncol,
            data,
        })
    }
}

impl<T: Clone> CombineRows for RowMajor<T> {
    fn combine_rows(parts: &[&Self]) -> Result<Self> {
        require_parts(parts)?;
        let ncol = parts[0].ncol;
        let mut nrow = 0;
        let mut data = Vec::new();
        for part in parts {
            if part.ncol != ncol {
                return Err(Error::length_mismatch("table columns", ncol, part.ncol)
                    .in_operation("combine_rows"));
            }
            nrow += part.nrow;
            data.extend_from_slice(&part.data);
        }
        Ok(Self { nrow, ncol, data })
    }
}

/// An input to [`combine`], tagged by shape.
#[derive(Debug)]
pub enum Combinable<'a, S, R> {
    /// A one-dimensional sequence.
    Flat(&'a S),
    /// A table with rows.
    Tabular(&'a R),
}

impl<S, R> Clone for Combinable<'_, S, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, R> Copy for Combinable<'_, S, R> {}

/// The output of [`combine`].
#[derive(Clone, Debug, PartialEq)]
pub enum Combined<S, R> {
    /// Concatenated sequence.
    Flat(S),
    /// Stacked table.
    Tabular(R),
}

impl<S, R> Combined<S, R> {
    /// Returns the sequence, if the inputs were flat.
    #[must_use]
    pub fn flat(self) -> Option<S> {
        match self {
            Self::Flat(s) => Some(s),
            Self::Tabular(_) => None,
        }
    }

    /// Returns the table, if the inputs were tabular.
    #[must_use]
    pub fn tabular(self) -> Option<R> {
        match self {
            Self::Tabular(r) => Some(r),
            Self::Flat(_) => None,
        }
    }
}

/// Combines inputs that are either all flat or all tabular.
///
/// # Errors
///
/// Fails with `InvalidArgument` when `inputs` is empty or mixes shapes.
pub fn combine<S: Combine, R: CombineRows>(
    inputs: &[Combinable<'_, S, R>],
) -> Result<Combined<S, R>> {
    require_parts(inputs)?;
    let flat: Vec<&S> = inputs
        .iter()
        .filter_map(|input| match input {
            Combinable::Flat(s) => Some(*s),
            Combinable::Tabular(_) => None,
        })
        .collect();
    if flat.len() == inputs.len() {
        debug!(parts = flat.len(), "combining sequences");
        return S::combine(&flat).map(Combined::Flat);
    }
    if flat.is_empty() {
        let tables: Vec<&R> = inputs
            .iter()
            .filter_map(|input| match input {
                Combinable::Tabular(r) => Some(*r),
                Combinable::Flat(_) => None,
            })
            .collect();
        debug!(parts = tables.len(), "combining rows");
        return R::combine_rows(&tables).map(Combined::Tabular);
    }
    Err(Error::invalid_argument(
        "cannot combine flat sequences with tables",
    ))
}
