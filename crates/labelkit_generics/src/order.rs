//! Stable ordering permutations.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use labelkit_collections::{Factor, NamedList};
use labelkit_foundation::{Missing, Result, Value};

use crate::options::{Exclusions, IntType, OrderOptions};
use crate::subset::Subset;

/// Sequences whose elements can be ranked.
pub trait Orderable {
    /// Element type named by `force_last`.
    type Element;

    /// Returns the permutation that sorts this sequence.
    fn order_with(&self, options: &OrderOptions<Self::Element>) -> Result<Vec<usize>>;
}

/// Stable sort of positions, with forced positions appended in input order.
fn ranked<F, C>(
    len: usize,
    forced: F,
    compare: C,
    decreasing: bool,
    dtype: Option<IntType>,
) -> Result<Vec<usize>>
where
    F: Fn(usize) -> bool,
    C: Fn(usize, usize) -> Ordering,
{
    if let (Some(dtype), Some(last)) = (dtype, len.checked_sub(1)) {
        dtype.check(last)?;
    }
    let (mut kept, last): (Vec<usize>, Vec<usize>) = (0..len).partition(|&i| !forced(i));
    if decreasing {
        kept.sort_by(|&a, &b| compare(b, a));
    } else {
        kept.sort_by(|&a, &b| compare(a, b));
    }
    kept.extend(last);
    Ok(kept)
}

/// Element types with a total ranking.
///
/// Floats rank by `total_cmp`; a missing `None` ranks below any value.
pub trait Rank {
    /// Compares two elements.
    fn rank(&self, other: &Self) -> Ordering;
}

macro_rules! rank_by_ord {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Rank for $ty {
                fn rank(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

rank_by_ord!(
    str, String, Arc<str>, bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, Value,
);

impl Rank for f64 {
    fn rank(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl<T: Rank> Rank for Option<T> {
    fn rank(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Some(a), Some(b)) => a.rank(b),
            (a, b) => a.is_some().cmp(&b.is_some()),
        }
    }
}

impl<T: Rank + ?Sized> Rank for &T {
    fn rank(&self, other: &Self) -> Ordering {
        (**self).rank(*other)
    }
}

// NaN never equals a listed NaN, so listed missing values force every
// missing element.
fn is_forced<T: Missing + PartialEq>(force_last: &Exclusions<T>, value: &T) -> bool {
    force_last.contains(value)
        || (value.is_missing() && force_last.covers_missing(Missing::is_missing))
}

impl<T: Rank + Missing + PartialEq> Orderable for [T] {
    type Element = T;

    fn order_with(&self, options: &OrderOptions<T>) -> Result<Vec<usize>> {
        ranked(
            self.len(),
            |i| is_forced(&options.force_last, &self[i]),
            |a, b| self[a].rank(&self[b]),
            options.decreasing,
            options.dtype,
        )
    }
}

impl<T: Rank + Missing + PartialEq> Orderable for Vec<T> {
    type Element = T;

    fn order_with(&self, options: &OrderOptions<T>) -> Result<Vec<usize>> {
        self.as_slice().order_with(options)
    }
}

impl<T: Clone + Rank + Missing + PartialEq> Orderable for NamedList<T> {
    type Element = T;

    fn order_with(&self, options: &OrderOptions<T>) -> Result<Vec<usize>> {
        self.to_vec().order_with(options)
    }
}

impl Orderable for Factor {
    type Element = Option<String>;

    /// Orders by level rank, not by level string.
    fn order_with(&self, options: &OrderOptions<Option<String>>) -> Result<Vec<usize>> {
        let codes = self.codes();
        let forced_codes: HashSet<i32> = match &options.force_last {
            Exclusions::Missing => HashSet::new(),
            Exclusions::Values(values) => values
                .iter()
                .flatten()
                .filter_map(|level| self.levels().iter().position(|l| l == level))
                .filter_map(|i| i32::try_from(i).ok())
                .collect(),
        };
        let force_missing = options.force_last.covers_missing(Option::is_none);
        ranked(
            codes.len(),
            |i| {
                let code = codes[i];
                if code < 0 {
                    force_missing
                } else {
                    forced_codes.contains(&code)
                }
            },
            |a, b| codes[a].cmp(&codes[b]),
            options.decreasing,
            options.dtype,
        )
    }
}

/// Returns the stable permutation that sorts `x`.
///
/// Elements listed in `force_last` (missing elements by default) go to the
/// end in their original order, whatever the direction.
pub fn order<X: Orderable + ?Sized>(x: &X, options: &OrderOptions<X::Element>) -> Result<Vec<usize>> {
    x.order_with(options)
}

/// Returns a sorted copy of `x`.
pub fn sort<X: Orderable + Subset>(x: &X, options: &OrderOptions<X::Element>) -> Result<X> {
    let permutation = x.order_with(options)?;
    x.subset(&permutation)
}
