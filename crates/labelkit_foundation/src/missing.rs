//! Missing-value and labelling capabilities.

use std::fmt::Display;

/// Elements that can represent a missing value.
///
/// Missing elements never become factor levels, never match a target, and
/// are placed last by default when ordering.
pub trait Missing {
    /// Returns true if this element is missing.
    fn is_missing(&self) -> bool;
}

impl<T> Missing for Option<T> {
    fn is_missing(&self) -> bool {
        self.is_none()
    }
}

impl<T: Missing + ?Sized> Missing for &T {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

/// Elements that can be rendered as a factor level or a name.
///
/// Missing elements have no label.
pub trait Label: Missing {
    /// Returns the string form of this element, or `None` if it is missing.
    fn label(&self) -> Option<String>;
}

impl<T: Display> Label for Option<T> {
    fn label(&self) -> Option<String> {
        self.as_ref().map(ToString::to_string)
    }
}

impl<T: Label + ?Sized> Label for &T {
    fn label(&self) -> Option<String> {
        (**self).label()
    }
}

impl Missing for f64 {
    fn is_missing(&self) -> bool {
        self.is_nan()
    }
}

impl Label for f64 {
    fn label(&self) -> Option<String> {
        (!self.is_nan()).then(|| self.to_string())
    }
}

macro_rules! never_missing {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Missing for $ty {
                fn is_missing(&self) -> bool {
                    false
                }
            }

            impl Label for $ty {
                fn label(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

never_missing!(
    str,
    String,
    std::sync::Arc<str>,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
);
