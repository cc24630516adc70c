//! Duplicate detection and de-duplication.

use std::collections::HashSet;
use std::hash::Hash;

use labelkit_collections::{Factor, NamedList};
use labelkit_foundation::Result;

use crate::subset::Subset;

/// Sequences whose repeated elements can be flagged.
pub trait Duplicated {
    /// Element type listed in `incomparables`.
    type Element;

    /// Flags every occurrence of a value after its first (or, with
    /// `from_last`, before its last). Values in `incomparables` are never
    /// flagged.
    fn duplicated_with(&self, incomparables: &[Self::Element], from_last: bool) -> Vec<bool>;
}

fn scan_order(len: usize, from_last: bool) -> Box<dyn Iterator<Item = usize>> {
    if from_last {
        Box::new((0..len).rev())
    } else {
        Box::new(0..len)
    }
}

impl<T: Eq + Hash> Duplicated for [T] {
    type Element = T;

    fn duplicated_with(&self, incomparables: &[T], from_last: bool) -> Vec<bool> {
        let mut seen: HashSet<&T> = HashSet::with_capacity(self.len());
        let mut out = vec![false; self.len()];
        for i in scan_order(self.len(), from_last) {
            let value = &self[i];
            if !incomparables.contains(value) && !seen.insert(value) {
                out[i] = true;
            }
        }
        out
    }
}

impl<T: Eq + Hash> Duplicated for Vec<T> {
    type Element = T;

    fn duplicated_with(&self, incomparables: &[T], from_last: bool) -> Vec<bool> {
        self.as_slice().duplicated_with(incomparables, from_last)
    }
}

impl<T: Clone + Eq + Hash> Duplicated for NamedList<T> {
    type Element = T;

    fn duplicated_with(&self, incomparables: &[T], from_last: bool) -> Vec<bool> {
        self.to_vec().duplicated_with(incomparables, from_last)
    }
}

impl Duplicated for Factor {
    type Element = Option<String>;

    /// Tracks one flag per level plus one for missing elements.
    fn duplicated_with(&self, incomparables: &[Option<String>], from_last: bool) -> Vec<bool> {
        let levels = self.levels();
        // `None` marks an incomparable slot; the last slot is for missing codes.
        let mut present: Vec<Option<bool>> = levels
            .iter()
            .map(|level| {
                let listed = incomparables.iter().flatten().any(|v| v == level);
                (!listed).then_some(false)
            })
            .collect();
        present.push((!incomparables.iter().any(Option::is_none)).then_some(false));
        let missing_slot = levels.len();

        let codes = self.codes();
        let mut out = vec![false; codes.len()];
        for i in scan_order(codes.len(), from_last) {
            let slot = usize::try_from(codes[i]).unwrap_or(missing_slot);
            if let Some(Some(seen)) = present.get_mut(slot) {
                out[i] = *seen;
                *seen = true;
            }
        }
        out
    }
}

/// Flags repeated elements of `x`.
pub fn duplicated<X: Duplicated + ?Sized>(x: &X, incomparables: &[X::Element], from_last: bool) -> Vec<bool> {
    x.duplicated_with(incomparables, from_last)
}

/// Returns `x` without its repeated elements, in original order.
///
/// With `from_last`, the last occurrence of each value is the one kept.
pub fn unique<X: Duplicated + Subset>(x: &X, incomparables: &[X::Element], from_last: bool) -> Result<X> {
    let keep: Vec<usize> = x
        .duplicated_with(incomparables, from_last)
        .iter()
        .enumerate()
        .filter_map(|(i, &dup)| (!dup).then_some(i))
        .collect();
    x.subset(&keep)
}
