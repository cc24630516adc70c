//! Ordered lists with optional names.
//!
//! A [`NamedList`] is a persistent vector of values plus an optional parallel
//! [`Names`] table. Elements are addressed by position or by name; a name
//! resolves to its first occurrence. Cloning is the shallow copy: the backing
//! vector shares structure until either side is modified.

use std::fmt;

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use labelkit_foundation::{
    Error, Label, Names, Result, Subscript, normalize_subscript, resolve_position,
};

use crate::selection::Selection;

/// Addresses a single element of a [`NamedList`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A position; negative values count from the end.
    Position(i64),
    /// A name, resolved to its first occurrence.
    Name(String),
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Self::Position(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Self::Position(i64::from(i))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Self::Position(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(i) => write!(f, "{i}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// An ordered list of values with optional names.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamedList<T: Clone> {
    data: im::Vector<T>,
    names: Option<Names>,
}

/// A named list of optional strings.
pub type StringList = NamedList<Option<String>>;

/// Builds a [`StringList`], stringifying every value. Missing values stay missing.
pub fn string_list<I>(values: I) -> StringList
where
    I: IntoIterator,
    I::Item: Label,
{
    values.into_iter().map(|v| v.label()).collect()
}

impl<T: Clone> Default for NamedList<T> {
    fn default() -> Self {
        Self {
            data: im::Vector::new(),
            names: None,
        }
    }
}

impl<T: Clone> NamedList<T> {
    /// Creates an empty list without names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list from values and optional names of the same length.
    pub fn with_names<I>(values: I, names: Option<Names>) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let data: im::Vector<T> = values.into_iter().collect();
        check_names(data.len(), names.as_ref())?;
        Ok(Self { data, names })
    }

    /// Creates a list from `(name, value)` pairs, stringifying each name.
    pub fn from_dict<K, I>(entries: I) -> Self
    where
        K: fmt::Display,
        I: IntoIterator<Item = (K, T)>,
    {
        let mut data = im::Vector::new();
        let mut names = Names::new();
        for (key, value) in entries {
            names.push(key.to_string());
            data.push_back(value);
        }
        Self {
            data,
            names: Some(names),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the names, if any.
    #[must_use]
    pub fn names(&self) -> Option<&Names> {
        self.names.as_ref()
    }

    /// Returns the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Returns the backing persistent vector.
    #[must_use]
    pub fn values(&self) -> &im::Vector<T> {
        &self.data
    }

    /// Returns the values as a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }

    /// Returns a copy that shares no storage with this list.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        Self {
            data: self.data.iter().cloned().collect(),
            names: self
                .names
                .as_ref()
                .map(|n| Names::from(n.as_slice().to_vec())),
        }
    }

    fn resolve(&self, key: &Key) -> Result<usize> {
        match key {
            Key::Position(i) => resolve_position(*i, self.len()),
            Key::Name(name) => self
                .names
                .as_ref()
                .and_then(|n| n.map(name))
                .ok_or_else(|| Error::key_not_found(name.as_str())),
        }
    }

    /// Returns the value at a position or under a name.
    pub fn get_value(&self, key: impl Into<Key>) -> Result<&T> {
        let index = self.resolve(&key.into())?;
        self.data
            .get(index)
            .ok_or_else(|| Error::index_out_of_bounds(to_signed(index), self.len()))
    }

    /// Returns the sub-list addressed by `subscript`, names included.
    pub fn get_slice(&self, subscript: &Subscript) -> Result<Self> {
        let normalized = normalize_subscript(subscript, self.len(), self.names.as_ref())?;
        self.select(&normalized.indices)
    }

    /// Indexes the list: scalar subscripts yield a value, others a sub-list.
    pub fn get_item(&self, subscript: &Subscript) -> Result<Selection<T, Self>> {
        let normalized = normalize_subscript(subscript, self.len(), self.names.as_ref())?;
        if normalized.scalar {
            if let Some(value) = normalized.indices.first().and_then(|&i| self.data.get(i)) {
                return Ok(Selection::Scalar(value.clone()));
            }
        }
        self.select(&normalized.indices).map(Selection::Many)
    }

    /// Returns the elements at `indices`, names included.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        let data = indices
            .iter()
            .map(|&i| {
                self.data
                    .get(i)
                    .cloned()
                    .ok_or_else(|| Error::index_out_of_bounds(to_signed(i), self.len()))
            })
            .collect::<Result<im::Vector<T>>>()?;
        let names = self
            .names
            .as_ref()
            .map(|n| n.select(indices))
            .transpose()?;
        Ok(Self { data, names })
    }

    /// Returns a copy with the value at `key` replaced.
    ///
    /// An absent name appends the value under that name instead of failing.
    pub fn set_value(&self, key: impl Into<Key>, value: T) -> Result<Self> {
        let mut out = self.clone();
        out.set_value_in_place(key, value)?;
        Ok(out)
    }

    /// In-place form of [`NamedList::set_value`].
    pub fn set_value_in_place(&mut self, key: impl Into<Key>, value: T) -> Result<&mut Self> {
        match key.into() {
            Key::Position(i) => {
                let index = resolve_position(i, self.len())?;
                self.data.set(index, value);
            }
            Key::Name(name) => match self.names.as_ref().and_then(|n| n.map(&name)) {
                Some(index) => {
                    self.data.set(index, value);
                }
                None => {
                    trace!(name = %name, "appending under new name");
                    self.names_or_blank().push(name);
                    self.data.push_back(value);
                }
            },
        }
        Ok(self)
    }

    /// Returns a copy with the addressed positions replaced by `values`.
    ///
    /// Names are left untouched. Unlike [`NamedList::set_value`], an absent
    /// name is an error.
    pub fn set_slice<I>(&self, subscript: &Subscript, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut out = self.clone();
        out.set_slice_in_place(subscript, values)?;
        Ok(out)
    }

    /// In-place form of [`NamedList::set_slice`].
    pub fn set_slice_in_place<I>(&mut self, subscript: &Subscript, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
    {
        let indices = normalize_subscript(subscript, self.len(), self.names.as_ref())
            .map_err(|e| e.in_operation("NamedList::set_slice"))?
            .indices;
        let values: Vec<T> = values.into_iter().collect();
        if values.len() != indices.len() {
            return Err(Error::length_mismatch(
                "replacement values",
                indices.len(),
                values.len(),
            ));
        }
        for (i, value) in indices.into_iter().zip(values) {
            self.data.set(i, value);
        }
        Ok(self)
    }

    /// Returns a copy with `value` inserted before `key`.
    ///
    /// A position equal to the length appends. The new element's name is empty.
    pub fn insert(&self, key: impl Into<Key>, value: T) -> Result<Self> {
        let mut out = self.clone();
        out.insert_in_place(key, value)?;
        Ok(out)
    }

    /// In-place form of [`NamedList::insert`].
    pub fn insert_in_place(&mut self, key: impl Into<Key>, value: T) -> Result<&mut Self> {
        let index = match key.into() {
            Key::Position(i) if to_signed(self.len()) == i => self.len(),
            key => self.resolve(&key)?,
        };
        if let Some(names) = self.names.as_mut() {
            names.insert(index, "")?;
        }
        self.data.insert(index, value);
        Ok(self)
    }

    /// Returns a copy with `value` appended.
    #[must_use]
    pub fn append(&self, value: T) -> Self {
        let mut out = self.clone();
        out.append_in_place(value);
        out
    }

    /// In-place form of [`NamedList::append`]. The new element's name is empty.
    pub fn append_in_place(&mut self, value: T) -> &mut Self {
        if let Some(names) = self.names.as_mut() {
            names.push("");
        }
        self.data.push_back(value);
        self
    }

    /// Returns a copy with the elements of `other` appended.
    #[must_use]
    pub fn extend(&self, other: &NamedList<T>) -> Self {
        let mut out = self.clone();
        out.extend_in_place(other);
        out
    }

    /// In-place form of [`NamedList::extend`].
    ///
    /// Names of `other` are carried over. If only `other` has names, the
    /// existing elements receive empty names.
    pub fn extend_in_place(&mut self, other: &NamedList<T>) -> &mut Self {
        if let Some(theirs) = &other.names {
            self.names_or_blank().extend(theirs.iter());
        } else if let Some(names) = self.names.as_mut() {
            names.extend(std::iter::repeat_n("", other.len()));
        }
        self.data.append(other.data.clone());
        self
    }

    /// Returns a copy with replaced names.
    pub fn set_names(&self, names: Option<Names>) -> Result<Self> {
        let mut out = self.clone();
        out.set_names_in_place(names)?;
        Ok(out)
    }

    /// In-place form of [`NamedList::set_names`].
    pub fn set_names_in_place(&mut self, names: Option<Names>) -> Result<&mut Self> {
        check_names(self.len(), names.as_ref())?;
        self.names = names;
        Ok(self)
    }

    /// Maps each name to its value. The first occurrence of a name wins;
    /// an unnamed list yields an empty map.
    #[must_use]
    pub fn as_dict(&self) -> IndexMap<String, T> {
        let mut out = IndexMap::new();
        if let Some(names) = &self.names {
            for (name, value) in names.iter().zip(self.data.iter()) {
                out.entry(name.to_string()).or_insert_with(|| value.clone());
            }
        }
        out
    }

    /// Returns the names, creating blank ones if the list had none.
    fn names_or_blank(&mut self) -> &mut Names {
        let len = self.data.len();
        self.names.get_or_insert_with(|| Names::blank(len))
    }
}

fn check_names(len: usize, names: Option<&Names>) -> Result<()> {
    match names {
        Some(names) if names.len() != len => Err(Error::length_mismatch("names", len, names.len())),
        _ => Ok(()),
    }
}

fn to_signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

// A list without names never equals one with blank names.
impl<T: Clone + PartialEq> PartialEq for NamedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.names == other.names
    }
}

impl<T: Clone + Eq> Eq for NamedList<T> {}

impl<T: Clone + fmt::Debug> fmt::Debug for NamedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedList")
            .field("data", &self.data)
            .field("names", &self.names)
            .finish()
    }
}

impl<T: Clone> FromIterator<T> for NamedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
            names: None,
        }
    }
}

impl<T: Clone> From<Vec<T>> for NamedList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T: Clone> IntoIterator for &'a NamedList<T> {
    type Item = &'a T;
    type IntoIter = im::vector::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: Clone> std::ops::Add for &NamedList<T> {
    type Output = NamedList<T>;

    fn add(self, rhs: Self) -> NamedList<T> {
        self.extend(rhs)
    }
}
