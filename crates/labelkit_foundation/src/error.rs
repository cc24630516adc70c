//! Error types for labelkit.
//!
//! Uses `thiserror` for ergonomic error definition with rich context. Every
//! [`ErrorKind`] maps onto one of the five [`ErrorCategory`] values that
//! callers (and any logging layer built on top) can match on.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// Result type for labelkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for labelkit operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Adds a single operation frame, creating the context if needed.
    #[must_use]
    pub fn in_operation(mut self, operation: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(operation));
        self
    }

    /// Returns the taxonomy category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates a duplicate entry error.
    #[must_use]
    pub fn duplicate(what: &'static str, value: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateEntry {
            what,
            value: value.into(),
        })
    }

    /// Creates a code out of range error.
    #[must_use]
    pub fn code_out_of_range(code: i64, levels: usize) -> Self {
        Self::new(ErrorKind::CodeOutOfRange { code, levels })
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::LengthMismatch {
            what,
            expected,
            actual,
        })
    }

    /// Creates a key not found error.
    #[must_use]
    pub fn key_not_found(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::KeyNotFound(name.into()))
    }

    /// Creates a level not found error.
    #[must_use]
    pub fn level_not_found(level: impl Into<String>) -> Self {
        Self::new(ErrorKind::LevelNotFound(level.into()))
    }

    /// Creates an unmatched value error.
    #[must_use]
    pub fn no_match(value: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoMatch(value.into()))
    }

    /// Creates an index out of bounds error.
    #[must_use]
    pub fn index_out_of_bounds(index: i64, length: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfBounds { index, length })
    }

    /// Creates an error for a position that does not fit in an integer type.
    #[must_use]
    pub fn overflow(value: usize, target: &'static str) -> Self {
        Self::new(ErrorKind::Overflow {
            value: u64::try_from(value).unwrap_or(u64::MAX),
            target,
        })
    }

    /// Creates a height mismatch error.
    #[must_use]
    pub fn height_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::HeightMismatch { expected, actual })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A value had the wrong dynamic type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// An argument was malformed (zero slice step, empty combine, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A table that must be unique contained a repeated entry.
    #[error("duplicate {what}: '{value}'")]
    DuplicateEntry {
        /// What kind of entry was duplicated (`"level"`, `"name"`).
        what: &'static str,
        /// The repeated value.
        value: String,
    },

    /// A factor code does not refer to an entry of the level table.
    #[error("code {code} does not refer to a level ({levels} levels available)")]
    CodeOutOfRange {
        /// The offending code.
        code: i64,
        /// Number of levels in the table.
        levels: usize,
    },

    /// Two parallel sequences disagree in length.
    #[error("length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Which sequence was checked.
        what: &'static str,
        /// The required length.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// A name lookup failed where absence is not allowed.
    #[error("failed to find value with name '{0}'")]
    KeyNotFound(String),

    /// A level passed to `set_levels` is not among the existing levels.
    #[error("level '{0}' should already be present among the factor levels")]
    LevelNotFound(String),

    /// A value could not be matched while `fail_missing` was set.
    #[error("cannot find '{0}' in targets")]
    NoMatch(String),

    /// A position cannot be represented in the requested integer type.
    #[error("position {value} does not fit in {target}")]
    Overflow {
        /// The position.
        value: u64,
        /// Name of the integer type.
        target: &'static str,
    },

    /// Index out of bounds.
    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: i64,
        /// The actual length of the collection.
        length: usize,
    },

    /// Grouping key length disagrees with the grouped object's height.
    #[error("heights of 'x' and 'f' should be the same: expected {expected}, got {actual}")]
    HeightMismatch {
        /// Height of the object being split.
        expected: usize,
        /// Length of the grouping key.
        actual: usize,
    },
}

impl ErrorKind {
    /// Returns the taxonomy category of this kind.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::TypeMismatch { .. } | Self::InvalidArgument(_) => ErrorCategory::InvalidArgument,
            Self::DuplicateEntry { .. }
            | Self::CodeOutOfRange { .. }
            | Self::LengthMismatch { .. }
            | Self::LevelNotFound(_)
            | Self::Overflow { .. } => ErrorCategory::ValueConstraintViolation,
            Self::KeyNotFound(_) | Self::NoMatch(_) => ErrorCategory::KeyNotFound,
            Self::IndexOutOfBounds { .. } => ErrorCategory::IndexOutOfRange,
            Self::HeightMismatch { .. } => ErrorCategory::HeightMismatch,
        }
    }
}

/// Coarse error taxonomy shared by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Shape or type violations at construction time.
    InvalidArgument,
    /// Duplicates, out-of-range codes, length mismatches.
    ValueConstraintViolation,
    /// A name, level or match target was absent where it must exist.
    KeyNotFound,
    /// An integer or slice position was outside valid bounds.
    IndexOutOfRange,
    /// A grouping key disagrees with the data's logical height.
    HeightMismatch,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid argument",
            Self::ValueConstraintViolation => "value constraint violation",
            Self::KeyNotFound => "key not found",
            Self::IndexOutOfRange => "index out of range",
            Self::HeightMismatch => "height mismatch",
        };
        f.write_str(name)
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The public operation that failed.
    pub operation: Option<String>,
    /// Nested operations, innermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing operation.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
