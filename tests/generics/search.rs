//! Integration tests for match, order, duplicated, split and set operations
//!
//! Tests that factor fast paths agree with plain sequences.

use labelkit::generics::{
    DuplicateMethod, IntType, MatchOptions, OrderOptions, SplitOptions, create_match_index,
    duplicated, intersect, match_indices, order, sort, split, union, unique,
};
use labelkit::{ErrorCategory, Factor, FactorOptions, NamedList};
use labelkit_foundation::Value;

fn factor(values: &[Option<&str>]) -> Factor {
    Factor::from_sequence(values.iter().copied(), &FactorOptions::new()).unwrap()
}

// =============================================================================
// Match
// =============================================================================

#[test]
fn match_dynamic_values() {
    let targets = vec![Value::from("a"), Value::Nil, Value::from(2i64)];
    let x = vec![Value::from(2i64), Value::Nil, Value::from("b"), Value::from("a")];
    let out = match_indices(&x, &targets, &MatchOptions::default()).unwrap();
    assert_eq!(out, vec![Some(2), None, None, Some(0)]);
}

#[test]
fn factor_and_plain_agree() {
    let x = [Some("b"), None, Some("c"), Some("a")];
    let targets = [Some("c"), Some("a"), Some("c"), None];
    for method in [DuplicateMethod::First, DuplicateMethod::Last, DuplicateMethod::Any] {
        let options = MatchOptions::new().with_duplicate_method(method);
        let plain = match_indices(&x[..], &targets[..], &options).unwrap();
        assert_eq!(match_indices(&factor(&x), &factor(&targets), &options).unwrap(), plain);
        assert_eq!(match_indices(&x[..], &factor(&targets), &options).unwrap(), plain);
        assert_eq!(match_indices(&factor(&x), &targets[..], &options).unwrap(), plain);
    }
}

#[test]
fn match_index_is_reusable() {
    let targets = factor(&[Some("x"), Some("y")]);
    let index = create_match_index(&targets, &MatchOptions::new().with_fail_missing(true)).unwrap();
    assert_eq!(index.match_labels(["y", "x"]).unwrap(), vec![Some(1), Some(0)]);
    let err = index.match_labels(["q"]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::KeyNotFound);
    assert!(err.to_string().contains("cannot find 'q'"));
}

#[test]
fn unsigned_dtype_without_failing_is_rejected() {
    let options = MatchOptions::new()
        .with_dtype(IntType::U32)
        .with_fail_missing(false);
    let err = match_indices(&vec![1], &vec![1], &options).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
}

// =============================================================================
// Order
// =============================================================================

#[test]
fn order_factor_by_level_rank() {
    let options = FactorOptions::new().with_levels(["D", "C", "B", "A"]);
    let f = Factor::from_sequence(["D", "B", "C", "A"], &options).unwrap();
    assert_eq!(order(&f, &OrderOptions::new()).unwrap(), vec![0, 2, 1, 3]);
    let sorted = sort(&f, &OrderOptions::new().with_decreasing(true)).unwrap();
    assert_eq!(
        sorted.to_strings(),
        vec![Some("A".to_string()), Some("B".to_string()), Some("C".to_string()), Some("D".to_string())]
    );
}

#[test]
fn order_values_puts_nil_last() {
    let x = vec![Value::from("b"), Value::Nil, Value::from(1i64), Value::from("a")];
    assert_eq!(order(&x, &OrderOptions::new()).unwrap(), vec![2, 3, 0, 1]);
    let decreasing = OrderOptions::new().with_decreasing(true);
    assert_eq!(order(&x, &decreasing).unwrap(), vec![0, 3, 2, 1]);
}

#[test]
fn order_floats_and_float_values_put_nan_last() {
    let x = vec![15.0, 1.0, f64::NAN, 3.0];
    assert_eq!(order(&x, &OrderOptions::new()).unwrap(), vec![1, 3, 0, 2]);
    let decreasing = OrderOptions::new().with_decreasing(true);
    assert_eq!(order(&x, &decreasing).unwrap(), vec![0, 3, 1, 2]);

    let values = vec![Value::Float(1.0), Value::Float(f64::NAN), Value::Float(0.5)];
    assert_eq!(order(&values, &OrderOptions::new()).unwrap(), vec![2, 0, 1]);
}

#[test]
fn sort_decreasing_with_missing() {
    let x = vec![Some("A"), Some("B"), None, Some("C"), Some("D")];
    let sorted = sort(&x, &OrderOptions::new().with_decreasing(true)).unwrap();
    assert_eq!(sorted, vec![Some("D"), Some("C"), Some("B"), Some("A"), None]);
}

// =============================================================================
// Duplicated and Unique
// =============================================================================

#[test]
fn duplicated_factor_agrees_with_strings() {
    let values = [Some("1"), Some("2"), None, None, Some("3"), Some("2"), Some("3")];
    let f = factor(&values);
    for from_last in [false, true] {
        assert_eq!(
            duplicated(&f, &[None], from_last),
            duplicated(&values.to_vec(), &[None], from_last)
        );
    }
}

#[test]
fn unique_named_list() {
    let x = NamedList::from_dict([("a", 1), ("b", 2), ("c", 1)]);
    let u = unique(&x, &[], true).unwrap();
    assert_eq!(u.to_vec(), vec![2, 1]);
    assert_eq!(u.names().unwrap().as_slice(), &["b", "c"]);
}

// =============================================================================
// Split
// =============================================================================

#[test]
fn split_by_factor_into_named_list() {
    let x = NamedList::from_dict([("p", 1), ("q", 2), ("r", 3), ("s", 4)]);
    let f = factor(&[Some("hi"), Some("lo"), None, Some("hi")]);
    let groups = split(&x, &f, &SplitOptions::new().with_named_list(true))
        .unwrap()
        .into_named_list()
        .unwrap();
    assert_eq!(groups.names().unwrap().as_slice(), &["hi", "lo"]);
    let hi = groups.get_value("hi").unwrap();
    assert_eq!(hi.to_vec(), vec![1, 4]);
    assert_eq!(hi.names().unwrap().as_slice(), &["p", "s"]);
}

#[test]
fn split_skips_nan_keys() {
    let x = vec![10, 20, 30, 40];
    let f = vec![Value::Float(f64::NAN), Value::Float(1.0), Value::Float(2.0), Value::Float(1.0)];
    let groups = split(&x, &f, &SplitOptions::new()).unwrap().into_map().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[&Value::Float(1.0)], vec![20, 40]);
    assert_eq!(groups[&Value::Float(2.0)], vec![30]);
}

#[test]
fn split_height_mismatch() {
    let f = factor(&[Some("a")]);
    let err = split(&vec![1, 2], &f, &SplitOptions::new()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::HeightMismatch);
}

// =============================================================================
// Set Operations
// =============================================================================

#[test]
fn intersect_and_union() {
    let a = vec![Value::from("b"), Value::Nil, Value::from("a"), Value::from("b")];
    let b = vec![Value::from("a"), Value::from("b"), Value::from("c")];
    assert_eq!(
        intersect(&[&a[..], &b[..]], DuplicateMethod::First),
        vec![Value::from("b"), Value::from("a")]
    );
    assert_eq!(
        union(&[&a[..], &b[..]]),
        vec![Value::from("b"), Value::from("a"), Value::from("c")]
    );
}
