//! Integer-coded categorical vectors.
//!
//! A [`Factor`] stores one signed code per element plus a table of unique
//! level strings. Code `-1` marks a missing element; every other code is an
//! index into the level table. The level table sits behind an `Arc` so that
//! subsets and shallow copies share it.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use labelkit_foundation::{Error, Label, Result, Subscript, Type, Value, normalize_subscript};

use crate::selection::Selection;

/// Code marking a missing element.
pub const MISSING_CODE: i32 = -1;

/// A categorical vector: codes into a table of unique levels.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Factor {
    codes: Vec<i32>,
    levels: Arc<[String]>,
    ordered: bool,
}

/// How [`Factor::set_levels`] should rebuild the level table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Levels {
    /// Move an existing level to the front, keeping the others in order.
    Lead(String),
    /// Replace the table outright. Codes of levels not listed become missing.
    Replace(Vec<String>),
}

impl From<&str> for Levels {
    fn from(level: &str) -> Self {
        Self::Lead(level.to_string())
    }
}

impl From<String> for Levels {
    fn from(level: String) -> Self {
        Self::Lead(level)
    }
}

impl From<Vec<String>> for Levels {
    fn from(levels: Vec<String>) -> Self {
        Self::Replace(levels)
    }
}

impl From<Vec<&str>> for Levels {
    fn from(levels: Vec<&str>) -> Self {
        Self::Replace(levels.into_iter().map(str::to_string).collect())
    }
}

/// Options for [`Factor::from_sequence`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactorOptions {
    /// Reference levels. When `None`, levels are discovered from the values.
    pub levels: Option<Vec<String>>,
    /// Sort discovered levels instead of keeping first-appearance order.
    /// Ignored when `levels` is given.
    pub sort_levels: bool,
    /// Whether level order carries ranking semantics.
    pub ordered: bool,
}

impl Default for FactorOptions {
    fn default() -> Self {
        Self {
            levels: None,
            sort_levels: true,
            ordered: false,
        }
    }
}

impl FactorOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to supply reference levels.
    #[must_use]
    pub fn with_levels<L>(mut self, levels: L) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
    {
        self.levels = Some(levels.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method to control sorting of discovered levels.
    #[must_use]
    pub fn with_sort_levels(mut self, sort_levels: bool) -> Self {
        self.sort_levels = sort_levels;
        self
    }

    /// Builder method to mark the factor as ordered.
    #[must_use]
    pub fn with_ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }
}

/// Level index referenced by `code`, or `None` for the missing code.
fn level_index(code: i32) -> Option<usize> {
    usize::try_from(code).ok()
}

/// Code for level position `index`. Level tables are capped at `i32::MAX`
/// entries when they are checked, so the fallback is unreachable.
fn code_for(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(MISSING_CODE)
}

fn to_signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

fn check_levels(levels: &[String]) -> Result<()> {
    if i32::try_from(levels.len()).is_err() {
        return Err(Error::invalid_argument(format!(
            "{} levels cannot be addressed by 32-bit codes",
            levels.len()
        )));
    }
    let mut seen = HashSet::with_capacity(levels.len());
    for level in levels {
        if !seen.insert(level.as_str()) {
            return Err(Error::duplicate("level", level.clone()));
        }
    }
    Ok(())
}

fn positions(levels: &[String]) -> HashMap<&str, i32> {
    levels
        .iter()
        .enumerate()
        .map(|(i, level)| (level.as_str(), code_for(i)))
        .collect()
}

impl Factor {
    /// Creates a factor from codes and levels.
    ///
    /// Negative codes are normalized to [`MISSING_CODE`]. Fails if a code is
    /// not a valid level index or if the levels contain duplicates.
    pub fn new<L>(codes: Vec<i32>, levels: L, ordered: bool) -> Result<Self>
    where
        L: IntoIterator,
        L::Item: Into<String>,
    {
        let levels: Arc<[String]> = levels.into_iter().map(Into::into).collect();
        check_levels(&levels)?;

        let mut codes = codes;
        for code in &mut codes {
            match level_index(*code) {
                None => *code = MISSING_CODE,
                Some(i) if i >= levels.len() => {
                    return Err(Error::code_out_of_range(i64::from(*code), levels.len()));
                }
                Some(_) => {}
            }
        }
        Ok(Self::from_parts(codes, levels, ordered))
    }

    /// Creates a factor from dynamically typed codes and levels.
    ///
    /// Codes must be integers or nil (missing); levels must be strings.
    pub fn from_dynamic(codes: &[Value], levels: &[Value], ordered: bool) -> Result<Self> {
        let codes = codes
            .iter()
            .map(|code| match code {
                Value::Nil => Ok(MISSING_CODE),
                Value::Int(n) if *n < 0 => Ok(MISSING_CODE),
                Value::Int(n) => {
                    i32::try_from(*n).map_err(|_| Error::code_out_of_range(*n, levels.len()))
                }
                other => Err(Error::type_mismatch(Type::Int, other.value_type())),
            })
            .collect::<Result<Vec<_>>>()?;

        let levels = levels
            .iter()
            .map(|level| {
                level
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::type_mismatch(Type::String, level.value_type()))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(codes, levels, ordered)
    }

    /// Assembles a factor without validation. Callers guarantee the invariants.
    pub(crate) fn from_parts(codes: Vec<i32>, levels: Arc<[String]>, ordered: bool) -> Self {
        Self {
            codes,
            levels,
            ordered,
        }
    }

    /// Converts a sequence of labelled values into a factor.
    ///
    /// Missing values never become levels. Without explicit levels, the
    /// distinct labels are collected in order of first appearance and then
    /// sorted if requested; with explicit levels, values absent from them
    /// become missing.
    pub fn from_sequence<I>(values: I, options: &FactorOptions) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Label,
    {
        let values: Vec<Option<String>> = values.into_iter().map(|v| v.label()).collect();

        let levels = match &options.levels {
            Some(levels) => {
                check_levels(levels)?;
                levels.clone()
            }
            None => {
                let seen: IndexSet<&str> = values.iter().flatten().map(String::as_str).collect();
                let mut found: Vec<String> = seen.into_iter().map(str::to_string).collect();
                if options.sort_levels {
                    found.sort();
                }
                check_levels(&found)?;
                debug!(levels = found.len(), "discovered factor levels");
                found
            }
        };

        let codes = {
            let lookup = positions(&levels);
            values
                .iter()
                .map(|v| {
                    v.as_deref()
                        .and_then(|s| lookup.get(s).copied())
                        .unwrap_or(MISSING_CODE)
                })
                .collect()
        };
        Ok(Self::from_parts(codes, levels.into(), options.ordered))
    }

    /// Returns the codes; `-1` marks a missing element.
    #[must_use]
    pub fn codes(&self) -> &[i32] {
        &self.codes
    }

    /// Returns the level table.
    #[must_use]
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Returns true if level order carries ranking semantics.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Returns the level for `code`, or `None` for the missing code.
    #[must_use]
    pub fn level(&self, code: i32) -> Option<&str> {
        level_index(code)
            .and_then(|i| self.levels.get(i))
            .map(String::as_str)
    }

    /// Returns the level of the element at `index`, `None` if it is missing.
    pub fn get(&self, index: usize) -> Result<Option<&str>> {
        let code = self
            .codes
            .get(index)
            .ok_or_else(|| Error::index_out_of_bounds(to_signed(index), self.len()))?;
        Ok(self.level(*code))
    }

    /// Iterates over element levels.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.codes.iter().map(|&code| self.level(code))
    }

    /// Returns the element levels as owned strings.
    #[must_use]
    pub fn to_strings(&self) -> Vec<Option<String>> {
        self.iter().map(|s| s.map(str::to_string)).collect()
    }

    /// Returns true if both factors use the same level table.
    #[must_use]
    pub fn same_levels(&self, other: &Factor) -> bool {
        Arc::ptr_eq(&self.levels, &other.levels) || self.levels == other.levels
    }

    /// Indexes the factor.
    ///
    /// A scalar subscript yields the element's level; anything else yields a
    /// factor sharing this level table. Factors carry no names, so name
    /// subscripts fail with `KeyNotFound`.
    pub fn get_item(&self, subscript: &Subscript) -> Result<Selection<Option<String>, Factor>> {
        let normalized = normalize_subscript(subscript, self.len(), None)?;
        if normalized.scalar {
            if let Some(&i) = normalized.indices.first() {
                return Ok(Selection::Scalar(self.level(self.codes[i]).map(str::to_string)));
            }
        }
        Ok(Selection::Many(self.take(&normalized.indices)))
    }

    /// Returns the elements at `indices`, sharing this level table.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(Error::index_out_of_bounds(to_signed(bad), self.len()));
        }
        Ok(self.take(indices))
    }

    fn take(&self, indices: &[usize]) -> Self {
        let codes = indices.iter().map(|&i| self.codes[i]).collect();
        Self::from_parts(codes, Arc::clone(&self.levels), self.ordered)
    }

    /// Returns a copy with the addressed elements replaced by `value`.
    ///
    /// When the level tables differ, each replacement is looked up by level
    /// string; levels absent from this factor become missing.
    pub fn replace(&self, subscript: &Subscript, value: &Factor) -> Result<Self> {
        let mut out = self.clone();
        out.replace_in_place(subscript, value)?;
        Ok(out)
    }

    /// In-place form of [`Factor::replace`].
    pub fn replace_in_place(&mut self, subscript: &Subscript, value: &Factor) -> Result<&mut Self> {
        let indices = normalize_subscript(subscript, self.len(), None)?.indices;
        if indices.len() != value.len() {
            return Err(Error::length_mismatch(
                "replacement factor",
                indices.len(),
                value.len(),
            ));
        }

        let replacement: Vec<i32> = if self.same_levels(value) {
            value.codes.clone()
        } else {
            let mapping = self.remap_levels(&value.levels);
            trace!(
                from = value.levels.len(),
                onto = self.levels.len(),
                "remapping replacement codes"
            );
            value
                .codes
                .iter()
                .map(|&c| {
                    level_index(c)
                        .and_then(|i| mapping.get(i).copied())
                        .unwrap_or(MISSING_CODE)
                })
                .collect()
        };

        for (&i, code) in indices.iter().zip(replacement) {
            self.codes[i] = code;
        }
        Ok(self)
    }

    /// Replaces the addressed elements with plain strings.
    ///
    /// The strings are first encoded against this factor's levels, so values
    /// that are not existing levels become missing.
    pub fn replace_strings(&self, subscript: &Subscript, values: &[Option<&str>]) -> Result<Self> {
        let mut out = self.clone();
        out.replace_strings_in_place(subscript, values)?;
        Ok(out)
    }

    /// In-place form of [`Factor::replace_strings`].
    pub fn replace_strings_in_place(
        &mut self,
        subscript: &Subscript,
        values: &[Option<&str>],
    ) -> Result<&mut Self> {
        let encoded = self.encode(values);
        self.replace_in_place(subscript, &encoded)
    }

    /// Encodes strings against this factor's level table.
    fn encode(&self, values: &[Option<&str>]) -> Self {
        let lookup = positions(&self.levels);
        let codes = values
            .iter()
            .map(|v| v.and_then(|s| lookup.get(s).copied()).unwrap_or(MISSING_CODE))
            .collect();
        Self::from_parts(codes, Arc::clone(&self.levels), self.ordered)
    }

    /// For each entry of `other`, the code of the same level here.
    fn remap_levels(&self, other: &[String]) -> Vec<i32> {
        let lookup = positions(&self.levels);
        other
            .iter()
            .map(|level| lookup.get(level.as_str()).copied().unwrap_or(MISSING_CODE))
            .collect()
    }

    /// Returns a copy whose level table only holds levels that some element uses.
    #[must_use]
    pub fn drop_unused_levels(&self) -> Self {
        let mut out = self.clone();
        out.drop_unused_levels_in_place();
        out
    }

    /// In-place form of [`Factor::drop_unused_levels`].
    pub fn drop_unused_levels_in_place(&mut self) -> &mut Self {
        let mut in_use = vec![false; self.levels.len()];
        for &code in &self.codes {
            if let Some(slot) = level_index(code).and_then(|i| in_use.get_mut(i)) {
                *slot = true;
            }
        }

        let mut reindex = vec![MISSING_CODE; self.levels.len()];
        let mut kept = Vec::new();
        for (i, level) in self.levels.iter().enumerate() {
            if in_use[i] {
                reindex[i] = code_for(kept.len());
                kept.push(level.clone());
            }
        }
        if kept.len() == self.levels.len() {
            return self;
        }

        debug!(
            dropped = self.levels.len() - kept.len(),
            kept = kept.len(),
            "dropping unused factor levels"
        );
        for code in &mut self.codes {
            *code = level_index(*code)
                .and_then(|i| reindex.get(i).copied())
                .unwrap_or(MISSING_CODE);
        }
        self.levels = kept.into();
        self
    }

    /// Returns a copy with a new level table.
    ///
    /// Codes keep pointing at the same level strings; elements whose level is
    /// not in the new table become missing.
    pub fn set_levels(&self, levels: impl Into<Levels>) -> Result<Self> {
        let mut out = self.clone();
        out.set_levels_in_place(levels)?;
        Ok(out)
    }

    /// In-place form of [`Factor::set_levels`].
    pub fn set_levels_in_place(&mut self, levels: impl Into<Levels>) -> Result<&mut Self> {
        let new_levels: Vec<String> = match levels.into() {
            Levels::Lead(lead) => {
                if !self.levels.contains(&lead) {
                    return Err(Error::level_not_found(lead));
                }
                let mut reordered = Vec::with_capacity(self.levels.len());
                reordered.extend(self.levels.iter().filter(|l| **l != lead).cloned());
                reordered.insert(0, lead);
                reordered
            }
            Levels::Replace(list) => {
                check_levels(&list)?;
                list
            }
        };

        let mapping = {
            let lookup = positions(&new_levels);
            self.levels
                .iter()
                .map(|l| lookup.get(l.as_str()).copied().unwrap_or(MISSING_CODE))
                .collect::<Vec<_>>()
        };
        for code in &mut self.codes {
            *code = level_index(*code)
                .and_then(|i| mapping.get(i).copied())
                .unwrap_or(MISSING_CODE);
        }
        self.levels = new_levels.into();
        Ok(self)
    }

    /// Concatenates factors.
    ///
    /// Codes are remapped onto the union of level tables: the first factor's
    /// levels in order, then unseen levels from later factors as they appear.
    /// The result is ordered only if every input is ordered with identical
    /// levels.
    pub fn combine(factors: &[&Factor]) -> Result<Self> {
        let Some((first, rest)) = factors.split_first() else {
            return Err(Error::invalid_argument("no factors to combine"));
        };
        let total = factors.iter().map(|f| f.len()).sum();

        if rest.iter().all(|f| first.same_levels(f)) {
            let mut codes = Vec::with_capacity(total);
            for f in factors {
                codes.extend_from_slice(&f.codes);
            }
            let ordered = factors.iter().all(|f| f.ordered);
            return Ok(Self::from_parts(codes, Arc::clone(&first.levels), ordered));
        }

        let mut union: IndexSet<&str> = IndexSet::new();
        for f in factors {
            union.extend(f.levels.iter().map(String::as_str));
        }

        let mut codes = Vec::with_capacity(total);
        for f in factors {
            let mapping: Vec<i32> = f
                .levels
                .iter()
                .map(|l| union.get_index_of(l.as_str()).map_or(MISSING_CODE, code_for))
                .collect();
            codes.extend(f.codes.iter().map(|&c| {
                level_index(c)
                    .and_then(|i| mapping.get(i).copied())
                    .unwrap_or(MISSING_CODE)
            }));
        }

        let levels: Vec<String> = union.into_iter().map(str::to_string).collect();
        check_levels(&levels)?;
        debug!(
            inputs = factors.len(),
            levels = levels.len(),
            "combined factors over merged levels"
        );
        Ok(Self::from_parts(codes, levels.into(), false))
    }

    /// Returns a copy that shares no storage with this factor.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        Self::from_parts(self.codes.clone(), self.levels.to_vec().into(), self.ordered)
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.levels.len() == 1 { "" } else { "s" };
        writeln!(
            f,
            "Factor of length {} with {} level{plural}",
            self.len(),
            self.levels.len()
        )?;
        write!(f, "values: [")?;
        for (i, level) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match level {
                Some(level) => write!(f, "{level:?}")?,
                None => write!(f, "None")?,
            }
        }
        writeln!(f, "]")?;
        writeln!(f, "levels: {:?}", &*self.levels)?;
        write!(f, "ordered: {}", self.ordered)
    }
}
