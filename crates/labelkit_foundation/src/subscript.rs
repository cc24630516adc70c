//! Subscript normalization.
//!
//! Every positional or name-based access in labelkit funnels through
//! [`normalize_subscript`], which turns integers, masks, names and slices into
//! a canonical list of non-negative positions plus a scalar flag. Named matrix
//! wrappers can reuse it to resolve row/column keys exactly like `NamedList`.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::names::Names;

/// A request for one or more positions of a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Subscript {
    /// A single position; negative values count from the end.
    Position(i64),
    /// Several positions; negative values count from the end.
    Positions(Vec<i64>),
    /// A boolean mask of the same length as the sequence.
    Mask(Vec<bool>),
    /// A single name, resolved to its first occurrence.
    Name(String),
    /// Several names, each resolved independently.
    Names(Vec<String>),
    /// A start/stop/step slice.
    Slice(Slice),
}

/// Start/stop/step slice with open ends and negative indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slice {
    /// First position (inclusive); `None` is the open end.
    pub start: Option<i64>,
    /// Last position (exclusive); `None` is the open end.
    pub stop: Option<i64>,
    /// Stride; must be non-zero.
    pub step: i64,
}

impl Slice {
    /// Creates a unit-step slice.
    #[must_use]
    pub const fn new(start: Option<i64>, stop: Option<i64>) -> Self {
        Self {
            start,
            stop,
            step: 1,
        }
    }

    /// Creates a slice covering everything.
    #[must_use]
    pub const fn full() -> Self {
        Self::new(None, None)
    }

    /// Builder method to set the stride.
    #[must_use]
    pub const fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    /// Resolves this slice against a sequence of `length` elements.
    pub fn indices(&self, length: usize) -> Result<Vec<usize>> {
        if self.step == 0 {
            return Err(Error::invalid_argument("slice step cannot be zero"));
        }

        let len = to_signed(length);
        let (lower, upper) = if self.step > 0 { (0, len) } else { (-1, len - 1) };
        let clamp = |bound: Option<i64>, default: i64| match bound {
            None => default,
            Some(b) if b < 0 => (b + len).max(lower),
            Some(b) => b.min(upper),
        };

        let start = clamp(self.start, if self.step > 0 { lower } else { upper });
        let stop = clamp(self.stop, if self.step > 0 { upper } else { lower });

        let mut out = Vec::new();
        let mut i = start;
        while (self.step > 0 && i < stop) || (self.step < 0 && i > stop) {
            // The clamped bounds keep `i` within [0, len).
            out.push(usize::try_from(i).map_err(|_| Error::index_out_of_bounds(i, length))?);
            i += self.step;
        }
        Ok(out)
    }
}

/// Canonical form of a subscript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
    /// Non-negative positions, in request order.
    pub indices: Vec<usize>,
    /// True if the request addressed a single element.
    pub scalar: bool,
}

/// Normalizes `subscript` against a sequence of `length` elements.
///
/// `names` resolves string subscripts; when it is `None` every name lookup
/// fails with `KeyNotFound`.
pub fn normalize_subscript(
    subscript: &Subscript,
    length: usize,
    names: Option<&Names>,
) -> Result<Normalized> {
    let (indices, scalar) = match subscript {
        Subscript::Position(i) => (vec![resolve_position(*i, length)?], true),
        Subscript::Positions(v) => (
            v.iter()
                .map(|&i| resolve_position(i, length))
                .collect::<Result<Vec<_>>>()?,
            false,
        ),
        Subscript::Mask(mask) => {
            if mask.len() != length {
                return Err(Error::length_mismatch("boolean mask", length, mask.len()));
            }
            let indices = mask
                .iter()
                .enumerate()
                .filter_map(|(i, &keep)| keep.then_some(i))
                .collect();
            (indices, false)
        }
        Subscript::Name(name) => (vec![resolve_name(name, names)?], true),
        Subscript::Names(v) => (
            v.iter()
                .map(|name| resolve_name(name, names))
                .collect::<Result<Vec<_>>>()?,
            false,
        ),
        Subscript::Slice(slice) => (slice.indices(length)?, false),
    };
    Ok(Normalized { indices, scalar })
}

/// Resolves a possibly negative position against `length`.
pub fn resolve_position(index: i64, length: usize) -> Result<usize> {
    let resolved = if index < 0 {
        index + to_signed(length)
    } else {
        index
    };
    usize::try_from(resolved)
        .ok()
        .filter(|&i| i < length)
        .ok_or_else(|| Error::index_out_of_bounds(index, length))
}

fn resolve_name(name: &str, names: Option<&Names>) -> Result<usize> {
    names
        .and_then(|n| n.map(name))
        .ok_or_else(|| Error::key_not_found(name))
}

fn to_signed(length: usize) -> i64 {
    i64::try_from(length).unwrap_or(i64::MAX)
}

impl From<i64> for Subscript {
    fn from(i: i64) -> Self {
        Self::Position(i)
    }
}

impl From<i32> for Subscript {
    fn from(i: i32) -> Self {
        Self::Position(i64::from(i))
    }
}

impl From<usize> for Subscript {
    fn from(i: usize) -> Self {
        Self::Position(to_signed(i))
    }
}

impl From<&str> for Subscript {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Subscript {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Vec<i64>> for Subscript {
    fn from(v: Vec<i64>) -> Self {
        Self::Positions(v)
    }
}

impl From<Vec<i32>> for Subscript {
    fn from(v: Vec<i32>) -> Self {
        Self::Positions(v.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<usize>> for Subscript {
    fn from(v: Vec<usize>) -> Self {
        Self::Positions(v.into_iter().map(to_signed).collect())
    }
}

impl From<&[usize]> for Subscript {
    fn from(v: &[usize]) -> Self {
        Self::Positions(v.iter().copied().map(to_signed).collect())
    }
}

impl From<Vec<bool>> for Subscript {
    fn from(mask: Vec<bool>) -> Self {
        Self::Mask(mask)
    }
}

impl From<Vec<&str>> for Subscript {
    fn from(v: Vec<&str>) -> Self {
        Self::Names(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Subscript {
    fn from(v: Vec<String>) -> Self {
        Self::Names(v)
    }
}

impl From<Slice> for Subscript {
    fn from(s: Slice) -> Self {
        Self::Slice(s)
    }
}

impl From<Range<i64>> for Subscript {
    fn from(r: Range<i64>) -> Self {
        Self::Slice(Slice::new(Some(r.start), Some(r.end)))
    }
}

impl From<Range<usize>> for Subscript {
    fn from(r: Range<usize>) -> Self {
        Self::Slice(Slice::new(Some(to_signed(r.start)), Some(to_signed(r.end))))
    }
}

impl From<RangeFrom<i64>> for Subscript {
    fn from(r: RangeFrom<i64>) -> Self {
        Self::Slice(Slice::new(Some(r.start), None))
    }
}

impl From<RangeTo<i64>> for Subscript {
    fn from(r: RangeTo<i64>) -> Self {
        Self::Slice(Slice::new(None, Some(r.end)))
    }
}

impl From<RangeFull> for Subscript {
    fn from(_: RangeFull) -> Self {
        Self::Slice(Slice::full())
    }
}
