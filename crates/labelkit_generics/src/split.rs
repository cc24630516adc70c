//! Grouping of a sequence by a parallel key.

use std::collections::BTreeMap;
use std::hash::Hash;

use indexmap::IndexMap;
use labelkit_collections::{Factor, NamedList};
use labelkit_foundation::{Error, Label, Names, Result};
use tracing::debug;

use crate::height::Height;
use crate::options::{Exclusions, SplitOptions};
use crate::subset::Subset;

/// Sequences that can serve as grouping keys.
///
/// Missing keys never form a group.
pub trait Grouping {
    /// Type of a group key.
    type Key: Clone + Eq + Hash + Label;

    /// Number of elements being grouped.
    fn group_len(&self) -> usize;

    /// Each group key with the positions that carry it, in group order.
    fn group_positions(&self, options: &SplitOptions<Self::Key>) -> Vec<(Self::Key, Vec<usize>)>;
}

impl<T: Clone + Ord + Hash + Label> Grouping for [T] {
    type Key = T;

    fn group_len(&self) -> usize {
        self.len()
    }

    /// Groups come out in sorted key order.
    fn group_positions(&self, options: &SplitOptions<T>) -> Vec<(T, Vec<usize>)> {
        let mut groups: BTreeMap<&T, Vec<usize>> = BTreeMap::new();
        for (i, key) in self.iter().enumerate() {
            if key.is_missing() || options.skip.contains(key) {
                continue;
            }
            groups.entry(key).or_default().push(i);
        }
        groups
            .into_iter()
            .map(|(key, positions)| (key.clone(), positions))
            .collect()
    }
}

impl<T: Clone + Ord + Hash + Label> Grouping for Vec<T> {
    type Key = T;

    fn group_len(&self) -> usize {
        self.len()
    }

    fn group_positions(&self, options: &SplitOptions<T>) -> Vec<(T, Vec<usize>)> {
        self.as_slice().group_positions(options)
    }
}

impl Grouping for Factor {
    type Key = String;

    fn group_len(&self) -> usize {
        self.len()
    }

    /// Groups follow level order. With `drop`, empty levels are left out.
    fn group_positions(&self, options: &SplitOptions<String>) -> Vec<(String, Vec<usize>)> {
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); self.levels().len()];
        for (i, &code) in self.codes().iter().enumerate() {
            if let Some(bucket) = usize::try_from(code).ok().and_then(|c| buckets.get_mut(c)) {
                bucket.push(i);
            }
        }
        self.levels()
            .iter()
            .zip(buckets)
            .filter(|(level, positions)| {
                let skipped = match &options.skip {
                    Exclusions::Missing => false,
                    Exclusions::Values(values) => values.contains(*level),
                };
                !skipped && !(options.drop && positions.is_empty())
            })
            .map(|(level, positions)| (level.clone(), positions))
            .collect()
    }
}

/// The groups produced by [`split`].
#[derive(Clone, Debug)]
pub enum Split<K, X: Clone> {
    /// Group key to group contents.
    Map(IndexMap<K, X>),
    /// Group contents named by the string form of the key.
    Named(NamedList<X>),
}

impl<K, X: Clone> Split<K, X> {
    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Map(map) => map.len(),
            Self::Named(list) => list.len(),
        }
    }

    /// Returns true if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the map form, if that is what was requested.
    #[must_use]
    pub fn into_map(self) -> Option<IndexMap<K, X>> {
        match self {
            Self::Map(map) => Some(map),
            Self::Named(_) => None,
        }
    }

    /// Returns the named-list form, if that is what was requested.
    #[must_use]
    pub fn into_named_list(self) -> Option<NamedList<X>> {
        match self {
            Self::Named(list) => Some(list),
            Self::Map(_) => None,
        }
    }
}

/// Splits `x` into groups defined by the parallel key `f`.
///
/// # Errors
///
/// Fails with `HeightMismatch` if `f` and `x` differ in height.
pub fn split<X, F>(x: &X, f: &F, options: &SplitOptions<F::Key>) -> Result<Split<F::Key, X>>
where
    X: Subset + Height + Clone,
    F: Grouping + ?Sized,
{
    if x.height() != f.group_len() {
        return Err(Error::height_mismatch(x.height(), f.group_len()).in_operation("split"));
    }
    let groups = f.group_positions(options);
    debug!(groups = groups.len(), "split into groups");

    if options.as_named_list {
        let mut names = Names::new();
        let mut values = Vec::with_capacity(groups.len());
        for (key, positions) in &groups {
            names.push(key.label().unwrap_or_default());
            values.push(x.subset(positions)?);
        }
        return NamedList::with_names(values, Some(names)).map(Split::Named);
    }

    let mut map = IndexMap::with_capacity(groups.len());
    for (key, positions) in groups {
        map.insert(key, x.subset(&positions)?);
    }
    Ok(Split::Map(map))
}
