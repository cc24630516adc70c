//! Results of subscript-based access.

/// What an indexing operation returned.
///
/// Scalar subscripts (a single position or name) yield one element; every
/// other subscript yields a collection of the same type as the receiver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<S, M> {
    /// A single element.
    Scalar(S),
    /// A sub-collection.
    Many(M),
}

impl<S, M> Selection<S, M> {
    /// Returns true if a single element was selected.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns the element if this is a scalar selection.
    #[must_use]
    pub fn scalar(self) -> Option<S> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Many(_) => None,
        }
    }

    /// Returns the sub-collection if this is not a scalar selection.
    #[must_use]
    pub fn many(self) -> Option<M> {
        match self {
            Self::Scalar(_) => None,
            Self::Many(m) => Some(m),
        }
    }
}
