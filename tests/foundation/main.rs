//! Integration tests for Layer 0: Foundation
//!
//! Tests for the name table, subscript normalization, dynamic values and errors.

mod subscripts;
