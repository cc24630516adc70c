//! Positional assignment.

use labelkit_collections::{Factor, NamedList};
use labelkit_foundation::{Error, Result, Subscript};

use crate::subset::out_of_bounds;

/// Types that can produce a copy with some positions overwritten by `V`.
///
/// `indices` and the replacement values are walked together, so the value
/// count must equal the index count. Names and levels of the receiver are
/// only affected through the positions written; names carried by `values`
/// are ignored.
pub trait Assign<V: ?Sized>: Sized {
    /// Returns a copy with `values` written at `indices`.
    fn assign(&self, indices: &[usize], values: &V) -> Result<Self>;
}

/// Writes `values` into a copy of `x` at `indices`.
pub fn assign<X, V>(x: &X, indices: &[usize], values: &V) -> Result<X>
where
    X: Assign<V>,
    V: ?Sized,
{
    x.assign(indices, values)
}

impl<T: Clone> Assign<[T]> for Vec<T> {
    fn assign(&self, indices: &[usize], values: &[T]) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(Error::length_mismatch(
                "replacement values",
                indices.len(),
                values.len(),
            ));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(out_of_bounds(bad, self.len()));
        }
        let mut out = self.clone();
        for (&i, value) in indices.iter().zip(values) {
            out[i] = value.clone();
        }
        Ok(out)
    }
}

impl<T: Clone> Assign<Vec<T>> for Vec<T> {
    fn assign(&self, indices: &[usize], values: &Vec<T>) -> Result<Self> {
        <Self as Assign<[T]>>::assign(self, indices, values)
    }
}

impl<T: Clone> Assign<[T]> for NamedList<T> {
    fn assign(&self, indices: &[usize], values: &[T]) -> Result<Self> {
        self.set_slice(&Subscript::from(indices), values.iter().cloned())
    }
}

impl<T: Clone> Assign<Vec<T>> for NamedList<T> {
    fn assign(&self, indices: &[usize], values: &Vec<T>) -> Result<Self> {
        <Self as Assign<[T]>>::assign(self, indices, values)
    }
}

impl<T: Clone> Assign<NamedList<T>> for NamedList<T> {
    fn assign(&self, indices: &[usize], values: &NamedList<T>) -> Result<Self> {
        self.set_slice(&Subscript::from(indices), values.iter().cloned())
    }
}

impl Assign<Factor> for Factor {
    fn assign(&self, indices: &[usize], values: &Factor) -> Result<Self> {
        self.replace(&Subscript::from(indices), values)
    }
}

impl<'a> Assign<[Option<&'a str>]> for Factor {
    fn assign(&self, indices: &[usize], values: &[Option<&'a str>]) -> Result<Self> {
        self.replace_strings(&Subscript::from(indices), values)
    }
}
