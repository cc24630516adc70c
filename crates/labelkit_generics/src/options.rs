//! Options for match, order and split.
//!
//! Each operation takes an options struct built from `Default` plus `with_*`
//! builder methods.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use labelkit_foundation::{Error, Missing, Result};

/// Which position to report when a target value occurs more than once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DuplicateMethod {
    /// The first occurrence.
    #[default]
    First,
    /// The last occurrence.
    Last,
    /// Any occurrence. Resolves to the first, so results are deterministic.
    Any,
}

impl DuplicateMethod {
    /// Returns true if the earliest occurrence should win.
    #[must_use]
    pub const fn keeps_first(self) -> bool {
        matches!(self, Self::First | Self::Any)
    }
}

/// Integer type that reported positions must fit in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntType {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
}

impl IntType {
    /// Returns true for unsigned types, which cannot hold a not-found sentinel.
    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    /// Largest representable value.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn max_value(self) -> u64 {
        match self {
            Self::I8 => i8::MAX as u64,
            Self::I16 => i16::MAX as u64,
            Self::I32 => i32::MAX as u64,
            Self::I64 => i64::MAX as u64,
            Self::U8 => u8::MAX as u64,
            Self::U16 => u16::MAX as u64,
            Self::U32 => u32::MAX as u64,
            Self::U64 => u64::MAX,
        }
    }

    /// Type name as written in Rust.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }

    /// Fails if `position` cannot be represented.
    pub fn check(self, position: usize) -> Result<()> {
        match u64::try_from(position) {
            Ok(p) if p <= self.max_value() => Ok(()),
            _ => Err(Error::overflow(position, self.name())),
        }
    }
}

impl fmt::Display for IntType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for [`match_indices`](crate::match_indices) and
/// [`create_match_index`](crate::create_match_index).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// How repeated targets are resolved.
    pub duplicate_method: DuplicateMethod,

    /// Integer type that positions must fit in. `None` imposes no limit.
    pub dtype: Option<IntType>,

    /// Whether an unmatched value is an error. `None` means "only if
    /// `dtype` is unsigned".
    pub fail_missing: Option<bool>,
}

impl MatchOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the duplicate method.
    #[must_use]
    pub fn with_duplicate_method(mut self, method: DuplicateMethod) -> Self {
        self.duplicate_method = method;
        self
    }

    /// Builder method to set the output integer type.
    #[must_use]
    pub fn with_dtype(mut self, dtype: IntType) -> Self {
        self.dtype = Some(dtype);
        self
    }

    /// Builder method to set whether unmatched values are an error.
    #[must_use]
    pub fn with_fail_missing(mut self, fail_missing: bool) -> Self {
        self.fail_missing = Some(fail_missing);
        self
    }

    /// Resolves `fail_missing` against `dtype`.
    ///
    /// Unsigned types have no room for "not found", so asking them not to
    /// fail is rejected.
    pub fn effective_fail_missing(&self) -> Result<bool> {
        let unsigned = self.dtype.is_some_and(IntType::is_unsigned);
        match self.fail_missing {
            None => Ok(unsigned),
            Some(false) if unsigned => Err(Error::invalid_argument(format!(
                "fail_missing must be set for unsigned dtype {}",
                self.dtype.map_or("", IntType::name)
            ))),
            Some(fail) => Ok(fail),
        }
    }
}

/// A set of element values that get special treatment.
///
/// Used for the values placed last by `order` and skipped by `split`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Exclusions<T> {
    /// Every missing element.
    #[default]
    Missing,
    /// Elements equal to one of these values.
    Values(Vec<T>),
}

impl<T> Exclusions<T> {
    /// Excludes nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self::Values(Vec::new())
    }

    /// Returns true if `value` is excluded.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Missing + PartialEq,
    {
        match self {
            Self::Missing => value.is_missing(),
            Self::Values(values) => values.contains(value),
        }
    }

    /// Returns true if missing elements are excluded, given a test for
    /// whether a listed value is missing.
    pub fn covers_missing(&self, is_missing: impl Fn(&T) -> bool) -> bool {
        match self {
            Self::Missing => true,
            Self::Values(values) => values.iter().any(is_missing),
        }
    }
}

/// Options for [`order`](crate::order) and [`sort`](crate::sort).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderOptions<T> {
    /// Elements placed at the end, in their original order.
    pub force_last: Exclusions<T>,

    /// Sort by decreasing value. Ties keep their original order.
    pub decreasing: bool,

    /// Integer type that positions must fit in. `None` imposes no limit.
    pub dtype: Option<IntType>,
}

impl<T> Default for OrderOptions<T> {
    fn default() -> Self {
        Self {
            force_last: Exclusions::Missing,
            decreasing: false,
            dtype: None,
        }
    }
}

impl<T> OrderOptions<T> {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to list the values placed last.
    #[must_use]
    pub fn with_force_last(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.force_last = Exclusions::Values(values.into_iter().collect());
        self
    }

    /// Builder method to set decreasing order.
    #[must_use]
    pub fn with_decreasing(mut self, decreasing: bool) -> Self {
        self.decreasing = decreasing;
        self
    }

    /// Builder method to set the output integer type.
    #[must_use]
    pub fn with_dtype(mut self, dtype: IntType) -> Self {
        self.dtype = Some(dtype);
        self
    }
}

/// Options for [`split`](crate::split).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitOptions<K> {
    /// Grouping values that do not form a group.
    pub skip: Exclusions<K>,

    /// For factor keys, leave out levels with no elements.
    pub drop: bool,

    /// Return a named list instead of a map.
    pub as_named_list: bool,
}

impl<K> Default for SplitOptions<K> {
    fn default() -> Self {
        Self {
            skip: Exclusions::Missing,
            drop: false,
            as_named_list: false,
        }
    }
}

impl<K> SplitOptions<K> {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to list grouping values that are skipped.
    #[must_use]
    pub fn with_skip(mut self, values: impl IntoIterator<Item = K>) -> Self {
        self.skip = Exclusions::Values(values.into_iter().collect());
        self
    }

    /// Builder method to drop empty factor levels.
    #[must_use]
    pub fn with_drop(mut self, drop: bool) -> Self {
        self.drop = drop;
        self
    }

    /// Builder method to return a named list.
    #[must_use]
    pub fn with_named_list(mut self, as_named_list: bool) -> Self {
        self.as_named_list = as_named_list;
        self
    }
}
