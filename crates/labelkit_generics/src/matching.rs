//! Position lookup of values in a target sequence.
//!
//! A [`MatchIndex`] is built once from the targets and can then be queried
//! with any number of inputs. [`match_indices`] is the one-shot form.
//! Factor targets and factor inputs both go through their level tables, so
//! each element costs one code lookup instead of a string hash.

use std::collections::HashMap;
use std::hash::Hash;

use labelkit_collections::Factor;
use labelkit_foundation::{Error, Label, Missing, Result};
use tracing::{trace, warn};

use crate::options::{IntType, MatchOptions};

/// A reusable lookup from target value to position.
#[derive(Clone, Debug)]
pub struct MatchIndex<K> {
    map: HashMap<K, usize>,
    dtype: Option<IntType>,
    fail_missing: bool,
}

impl<K: Eq + Hash> MatchIndex<K> {
    fn build<I>(keys: I, options: &MatchOptions) -> Result<Self>
    where
        I: IntoIterator<Item = Option<K>>,
    {
        let fail_missing = options.effective_fail_missing()?;
        let keep_first = options.duplicate_method.keeps_first();
        let mut map = HashMap::new();
        for (i, key) in keys.into_iter().enumerate() {
            let Some(key) = key else { continue };
            if keep_first {
                map.entry(key).or_insert(i);
            } else {
                map.insert(key, i);
            }
        }
        Ok(Self {
            map,
            dtype: options.dtype,
            fail_missing,
        })
    }

    /// Builds an index over plain targets. Missing targets are never matched.
    ///
    /// # Errors
    ///
    /// Fails if `options` pairs an unsigned dtype with `fail_missing(false)`.
    pub fn new(targets: &[K], options: &MatchOptions) -> Result<Self>
    where
        K: Missing + Clone,
    {
        Self::build(
            targets
                .iter()
                .map(|t| (!t.is_missing()).then(|| t.clone())),
            options,
        )
    }

    /// Wraps an existing value-to-position map.
    #[deprecated(note = "use `create_match_index` instead")]
    pub fn from_map(map: HashMap<K, usize>, options: &MatchOptions) -> Self {
        warn!("MatchIndex::from_map is deprecated, use create_match_index instead");
        Self {
            map,
            dtype: options.dtype,
            fail_missing: options.fail_missing.unwrap_or_else(|| {
                options.dtype.is_some_and(IntType::is_unsigned)
            }),
        }
    }

    /// Number of distinct target values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no target can be matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Whether unmatched inputs are an error.
    #[must_use]
    pub const fn fails_missing(&self) -> bool {
        self.fail_missing
    }

    /// Position recorded for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<usize> {
        self.map.get(key).copied()
    }

    fn report(&self, found: Option<usize>, missing: bool, label: impl FnOnce() -> Option<String>) -> Result<Option<usize>> {
        match found {
            Some(position) => {
                if let Some(dtype) = self.dtype {
                    dtype.check(position)?;
                }
                Ok(Some(position))
            }
            None if self.fail_missing && !missing => {
                Err(Error::no_match(label().unwrap_or_default()).in_operation("match"))
            }
            None => Ok(None),
        }
    }

    /// Looks up each value of `x`.
    ///
    /// Missing values are never found and never raise.
    ///
    /// # Errors
    ///
    /// Fails on the first unmatched value when `fail_missing` is in effect,
    /// or when a position does not fit the dtype.
    pub fn match_values<'a, I>(&self, x: I) -> Result<Vec<Option<usize>>>
    where
        I: IntoIterator<Item = &'a K>,
        K: Label + 'a,
    {
        x.into_iter()
            .map(|value| {
                let missing = value.is_missing();
                let found = if missing { None } else { self.get(value) };
                self.report(found, missing, || value.label())
            })
            .collect()
    }
}

impl MatchIndex<String> {
    /// Builds an index over the string forms of `targets`.
    pub fn from_labels<T: Label>(targets: &[T], options: &MatchOptions) -> Result<Self> {
        Self::build(targets.iter().map(Label::label), options)
    }

    /// Builds an index over a factor's elements, keyed by level.
    ///
    /// Codes are scanned once; levels that no element uses are absent.
    pub fn from_factor(targets: &Factor, options: &MatchOptions) -> Result<Self> {
        let keep_first = options.duplicate_method.keeps_first();
        let mut per_level: Vec<Option<usize>> = vec![None; targets.levels().len()];
        for (i, &code) in targets.codes().iter().enumerate() {
            let Some(slot) = usize::try_from(code).ok().and_then(|c| per_level.get_mut(c)) else {
                continue;
            };
            if !keep_first || slot.is_none() {
                *slot = Some(i);
            }
        }
        let mut index = Self::build(std::iter::empty(), options)?;
        index.map = targets
            .levels()
            .iter()
            .zip(per_level)
            .filter_map(|(level, position)| position.map(|p| (level.clone(), p)))
            .collect();
        Ok(index)
    }

    /// Looks up the string form of each value of `x`.
    pub fn match_labels<I>(&self, x: I) -> Result<Vec<Option<usize>>>
    where
        I: IntoIterator,
        I::Item: Label,
    {
        x.into_iter()
            .map(|value| {
                let label = value.label();
                let found = label.as_ref().and_then(|l| self.map.get(l).copied());
                let missing = label.is_none();
                self.report(found, missing, || label)
            })
            .collect()
    }

    /// Looks up each element of a factor through its level table.
    pub fn match_factor(&self, x: &Factor) -> Result<Vec<Option<usize>>> {
        let per_level: Vec<Option<usize>> = x
            .levels()
            .iter()
            .map(|level| self.map.get(level).copied())
            .collect();
        trace!(levels = per_level.len(), "matching factor by level");
        x.codes()
            .iter()
            .map(|&code| {
                let level = usize::try_from(code).ok();
                let found = level.and_then(|c| per_level.get(c).copied().flatten());
                self.report(found, level.is_none(), || {
                    level.and_then(|c| x.levels().get(c).cloned())
                })
            })
            .collect()
    }
}

/// Target sequences that a [`MatchIndex`] can be built from.
pub trait MatchTargets {
    /// Key type of the resulting index.
    type Key;

    /// Builds the index.
    fn match_index(&self, options: &MatchOptions) -> Result<MatchIndex<Self::Key>>;
}

impl<T: Clone + Eq + Hash + Missing> MatchTargets for [T] {
    type Key = T;

    fn match_index(&self, options: &MatchOptions) -> Result<MatchIndex<T>> {
        MatchIndex::new(self, options)
    }
}

impl<T: Clone + Eq + Hash + Missing> MatchTargets for Vec<T> {
    type Key = T;

    fn match_index(&self, options: &MatchOptions) -> Result<MatchIndex<T>> {
        MatchIndex::new(self, options)
    }
}

impl MatchTargets for Factor {
    type Key = String;

    fn match_index(&self, options: &MatchOptions) -> Result<MatchIndex<String>> {
        MatchIndex::from_factor(self, options)
    }
}

/// Creates an index for matching any number of inputs against `targets`.
///
/// `create_match_index(targets, options)?.match_values(x)` is equivalent to
/// `match_indices(x, targets, options)`.
pub fn create_match_index<T>(targets: &T, options: &MatchOptions) -> Result<MatchIndex<T::Key>>
where
    T: MatchTargets + ?Sized,
{
    targets.match_index(options)
}

/// Inputs that can be matched against targets of type `Targets`.
pub trait Matchable<Targets: ?Sized> {
    /// For each element, its position in `targets` or `None`.
    fn match_in(&self, targets: &Targets, options: &MatchOptions) -> Result<Vec<Option<usize>>>;
}

impl<T: Clone + Eq + Hash + Label> Matchable<[T]> for [T] {
    fn match_in(&self, targets: &[T], options: &MatchOptions) -> Result<Vec<Option<usize>>> {
        MatchIndex::new(targets, options)?.match_values(self)
    }
}

impl<T: Clone + Eq + Hash + Label> Matchable<Vec<T>> for Vec<T> {
    fn match_in(&self, targets: &Vec<T>, options: &MatchOptions) -> Result<Vec<Option<usize>>> {
        self.as_slice().match_in(targets.as_slice(), options)
    }
}

impl Matchable<Factor> for Factor {
    fn match_in(&self, targets: &Factor, options: &MatchOptions) -> Result<Vec<Option<usize>>> {
        MatchIndex::from_factor(targets, options)?.match_factor(self)
    }
}

impl<T: Label> Matchable<Factor> for [T] {
    fn match_in(&self, targets: &Factor, options: &MatchOptions) -> Result<Vec<Option<usize>>> {
        MatchIndex::from_factor(targets, options)?.match_labels(self)
    }
}

impl<T: Label> Matchable<Factor> for Vec<T> {
    fn match_in(&self, targets: &Factor, options: &MatchOptions) -> Result<Vec<Option<usize>>> {
        self.as_slice().match_in(targets, options)
    }
}

impl<T: Label> Matchable<[T]> for Factor {
    fn match_in(&self, targets: &[T], options: &MatchOptions) -> Result<Vec<Option<usize>>> {
        MatchIndex::from_labels(targets, options)?.match_factor(self)
    }
}

impl<T: Label> Matchable<Vec<T>> for Factor {
    fn match_in(&self, targets: &Vec<T>, options: &MatchOptions) -> Result<Vec<Option<usize>>> {
        self.match_in(targets.as_slice(), options)
    }
}

/// For each element of `x`, finds its position in `targets`.
///
/// Missing elements of `x` and values absent from `targets` yield `None`,
/// unless `fail_missing` is in effect, in which case the first absent value
/// fails with `KeyNotFound`.
pub fn match_indices<X, T>(x: &X, targets: &T, options: &MatchOptions) -> Result<Vec<Option<usize>>>
where
    X: Matchable<T> + ?Sized,
    T: ?Sized,
{
    x.match_in(targets, options)
}
