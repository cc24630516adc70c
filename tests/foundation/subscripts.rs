//! Integration tests for subscript normalization
//!
//! Tests every subscript form against positions, masks, names and slices.

use labelkit_foundation::{
    ErrorCategory, Names, Normalized, Slice, Subscript, normalize_subscript, resolve_position,
};

fn normalize(subscript: impl Into<Subscript>, length: usize) -> Normalized {
    normalize_subscript(&subscript.into(), length, None).unwrap()
}

// =============================================================================
// Positions
// =============================================================================

#[test]
fn scalar_position_counts_from_end() {
    let out = normalize(-1i64, 5);
    assert_eq!(out.indices, vec![4]);
    assert!(out.scalar);
    assert_eq!(resolve_position(-5, 5).unwrap(), 0);
}

#[test]
fn position_out_of_range() {
    for index in [5i64, -6] {
        let err = normalize_subscript(&Subscript::Position(index), 5, None).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::IndexOutOfRange);
    }
}

#[test]
fn position_lists_are_never_scalar() {
    let out = normalize(vec![-1i64], 3);
    assert_eq!(out.indices, vec![2]);
    assert!(!out.scalar);
}

// =============================================================================
// Masks and Names
// =============================================================================

#[test]
fn mask_selects_true_positions() {
    let out = normalize(vec![true, false, true], 3);
    assert_eq!(out.indices, vec![0, 2]);
    assert!(!out.scalar);

    let err = normalize_subscript(&Subscript::Mask(vec![true]), 3, None).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueConstraintViolation);
}

#[test]
fn names_resolve_to_first_occurrence() {
    let names = Names::from(vec!["a", "b", "a"]);
    let out = normalize_subscript(&Subscript::from("a"), 3, Some(&names)).unwrap();
    assert_eq!(out.indices, vec![0]);
    assert!(out.scalar);

    let out = normalize_subscript(&Subscript::from(vec!["b", "a"]), 3, Some(&names)).unwrap();
    assert_eq!(out.indices, vec![1, 0]);
    assert!(!out.scalar);
}

#[test]
fn names_fail_when_absent() {
    let names = Names::from(vec!["a"]);
    let err = normalize_subscript(&Subscript::from("z"), 1, Some(&names)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::KeyNotFound);

    let err = normalize_subscript(&Subscript::from("a"), 1, None).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::KeyNotFound);
}

// =============================================================================
// Slices
// =============================================================================

#[test]
fn slices_follow_start_stop_step() {
    assert_eq!(normalize(Slice::full(), 4).indices, vec![0, 1, 2, 3]);
    assert_eq!(normalize(Slice::full().with_step(-1), 4).indices, vec![3, 2, 1, 0]);
    assert_eq!(normalize(Slice::new(Some(1), None).with_step(2), 6).indices, vec![1, 3, 5]);
    assert_eq!(normalize(Slice::new(Some(-2), None), 5).indices, vec![3, 4]);
    assert_eq!(normalize(..2i64, 5).indices, vec![0, 1]);
    assert!(normalize(Slice::new(Some(10), Some(20)), 5).indices.is_empty());
    assert!(!normalize(.., 3).scalar);
}

#[test]
fn zero_step_is_invalid() {
    let err = normalize_subscript(&Subscript::from(Slice::full().with_step(0)), 3, None)
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
}
