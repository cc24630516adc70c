//! Integration tests for Layer 2: Generics
//!
//! Tests the generic operations across plain vectors, factors and named lists.

mod building_blocks;
mod search;
