//! Ordered name tables with first-occurrence lookup.
//!
//! [`Names`] is a plain list of strings (duplicates allowed) plus a reverse
//! index from name to the position of its first occurrence. The index is
//! built on the first [`Names::map`] call and stored in one step; appends
//! keep it current, while positional writes and inserts drop it.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::ops::Add;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::subscript::{Subscript, normalize_subscript};

/// An ordered sequence of names with a lazily built reverse index.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Names {
    names: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    reverse: OnceCell<HashMap<String, usize>>,
}

impl Names {
    /// Creates an empty name table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table of `n` empty names.
    #[must_use]
    pub fn blank(n: usize) -> Self {
        Self::from(vec![String::new(); n])
    }

    /// Builds names by stringifying each element with its `Display` impl.
    pub fn from_display<I>(iter: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        iter.into_iter().map(|x| x.to_string()).collect()
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if there are no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the name at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Returns an iterator over the names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns the names as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Consumes the table and returns the underlying strings.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.names
    }

    /// Returns true if every name is the empty string.
    #[must_use]
    pub fn all_blank(&self) -> bool {
        self.names.iter().all(String::is_empty)
    }

    /// Returns the position of the first occurrence of `name`.
    #[must_use]
    pub fn map(&self, name: &str) -> Option<usize> {
        self.reverse.get_or_init(|| self.build_reverse()).get(name).copied()
    }

    fn build_reverse(&self) -> HashMap<String, usize> {
        let mut reverse = HashMap::with_capacity(self.names.len());
        for (i, name) in self.names.iter().enumerate() {
            reverse.entry(name.clone()).or_insert(i);
        }
        reverse
    }

    fn invalidate(&mut self) {
        self.reverse.take();
    }

    /// Appends a name. An existing reverse index is updated in place.
    pub fn push(&mut self, name: impl Into<String>) {
        let name = name.into();
        let position = self.names.len();
        if let Some(reverse) = self.reverse.get_mut() {
            reverse.entry(name.clone()).or_insert(position);
        }
        self.names.push(name);
    }

    /// Inserts a name before `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        if index > self.names.len() {
            return Err(Error::index_out_of_bounds(
                i64::try_from(index).unwrap_or(i64::MAX),
                self.names.len(),
            ));
        }
        self.names.insert(index, name.into());
        self.invalidate();
        Ok(())
    }

    /// Overwrites the name at `index`.
    pub fn set(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        let length = self.names.len();
        let slot = self.names.get_mut(index).ok_or_else(|| {
            Error::index_out_of_bounds(i64::try_from(index).unwrap_or(i64::MAX), length)
        })?;
        *slot = name.into();
        self.invalidate();
        Ok(())
    }

    /// Overwrites the names addressed by `subscript` with `values`, pairwise.
    ///
    /// Name subscripts resolve against this table before anything is
    /// written. Nothing is written unless the subscript is valid and the
    /// counts agree.
    pub fn set_slice<I>(&mut self, subscript: &Subscript, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let indices = normalize_subscript(subscript, self.len(), Some(self))?.indices;
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if indices.len() != values.len() {
            return Err(Error::length_mismatch(
                "replacement names",
                indices.len(),
                values.len(),
            ));
        }
        for (i, value) in indices.into_iter().zip(values) {
            self.names[i] = value;
        }
        self.invalidate();
        Ok(())
    }

    /// Returns the names at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        indices
            .iter()
            .map(|&i| {
                self.names.get(i).cloned().ok_or_else(|| {
                    Error::index_out_of_bounds(
                        i64::try_from(i).unwrap_or(i64::MAX),
                        self.names.len(),
                    )
                })
            })
            .collect()
    }

    /// Returns the names addressed by `subscript`.
    ///
    /// Name subscripts resolve against this table.
    pub fn slice(&self, subscript: &Subscript) -> Result<Self> {
        let normalized = normalize_subscript(subscript, self.len(), Some(self))?;
        self.select(&normalized.indices)
    }
}

impl PartialEq for Names {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for Names {}

impl fmt::Debug for Names {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Names").field(&self.names).finish()
    }
}

impl fmt::Display for Names {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name:?}")?;
        }
        write!(f, "]")
    }
}

impl<S: Into<String>> FromIterator<S> for Names {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
            reverse: OnceCell::new(),
        }
    }
}

impl<S: Into<String>> Extend<S> for Names {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.push(name);
        }
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Self {
            names,
            reverse: OnceCell::new(),
        }
    }
}

impl From<Vec<&str>> for Names {
    fn from(names: Vec<&str>) -> Self {
        names.into_iter().collect()
    }
}

impl From<&[&str]> for Names {
    fn from(names: &[&str]) -> Self {
        names.iter().copied().collect()
    }
}

impl<'a> IntoIterator for &'a Names {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }
}

impl Add for Names {
    type Output = Names;

    fn add(mut self, rhs: Names) -> Names {
        self.extend(rhs.names);
        self
    }
}

impl Add<&Names> for &Names {
    type Output = Names;

    fn add(self, rhs: &Names) -> Names {
        let mut out = self.clone();
        out.extend(rhs.iter());
        out
    }
}
