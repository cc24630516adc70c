//! Integration tests for Factor
//!
//! Tests construction, subscripting, replacement and level management.

use labelkit_collections::{Factor, FactorOptions, Levels, MISSING_CODE, Selection};
use labelkit_foundation::{ErrorCategory, Slice, Subscript, Value};

fn strings(values: &[Option<&str>]) -> Vec<Option<String>> {
    values.iter().map(|v| v.map(str::to_string)).collect()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn new_validates_codes_and_levels() {
    let f = Factor::new(vec![0, 1, -3], ["A", "B"], false).unwrap();
    assert_eq!(f.codes(), &[0, 1, MISSING_CODE]);

    let err = Factor::new(vec![2], ["A", "B"], false).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueConstraintViolation);

    let err = Factor::new(vec![0], ["A", "A"], false).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueConstraintViolation);
}

#[test]
fn from_dynamic_checks_types() {
    let f = Factor::from_dynamic(
        &[Value::from(1i64), Value::Nil],
        &[Value::from("x"), Value::from("y")],
        true,
    )
    .unwrap();
    assert_eq!(f.codes(), &[1, -1]);
    assert!(f.is_ordered());

    let err = Factor::from_dynamic(&[Value::from("0")], &[Value::from("x")], false).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);

    let err = Factor::from_dynamic(&[Value::from(0i64)], &[Value::Nil], false).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
}

#[test]
fn from_sequence_discovers_sorted_levels() {
    let f = Factor::from_sequence(["C", "A", "C", "B"], &FactorOptions::new()).unwrap();
    assert_eq!(f.levels(), &["A", "B", "C"]);
    assert_eq!(f.codes(), &[2, 0, 2, 1]);

    let unsorted = FactorOptions::new().with_sort_levels(false);
    let f = Factor::from_sequence([Some("C"), None, Some("A")], &unsorted).unwrap();
    assert_eq!(f.levels(), &["C", "A"]);
    assert_eq!(f.codes(), &[0, -1, 1]);
}

#[test]
fn from_sequence_with_explicit_levels() {
    let options = FactorOptions::new()
        .with_levels(["B", "A"])
        .with_ordered(true);
    let f = Factor::from_sequence(["A", "Z", "B"], &options).unwrap();
    assert_eq!(f.codes(), &[1, -1, 0]);
    assert!(f.is_ordered());
}

#[test]
fn from_sequence_treats_nan_as_missing() {
    let values = [Value::Float(f64::NAN), Value::Float(1.0), Value::Nil];
    let f = Factor::from_sequence(values, &FactorOptions::new()).unwrap();
    assert_eq!(f.levels(), &["1"]);
    assert_eq!(f.codes(), &[MISSING_CODE, 0, MISSING_CODE]);

    let f = Factor::from_sequence([f64::NAN, 1.0], &FactorOptions::new()).unwrap();
    assert_eq!(f.levels(), &["1"]);
}

// =============================================================================
// Access
// =============================================================================

#[test]
fn get_item_scalar_and_sequence() {
    let f = Factor::new(vec![0, -1, 1, 0], ["A", "B"], false).unwrap();
    assert_eq!(f.get(1).unwrap(), None);
    assert_eq!(f.get(2).unwrap(), Some("B"));

    match f.get_item(&Subscript::Position(-1)).unwrap() {
        Selection::Scalar(value) => assert_eq!(value.as_deref(), Some("A")),
        Selection::Many(_) => panic!("expected a scalar"),
    }

    let sub = f
        .get_item(&Subscript::from(Slice::full().with_step(2)))
        .unwrap()
        .many()
        .unwrap();
    assert_eq!(sub.codes(), &[0, 1]);
    assert!(sub.same_levels(&f));

    let err = f.get_item(&Subscript::from("A")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::KeyNotFound);
}

#[test]
fn subset_round_trips() {
    let f = Factor::new(vec![2, 0, -1, 1], ["A", "B", "C"], true).unwrap();
    let all: Vec<usize> = (0..f.len()).collect();
    assert_eq!(f.select(&all).unwrap(), f);
}

// =============================================================================
// Replacement
// =============================================================================

#[test]
fn replace_remaps_foreign_levels() {
    let f1 = Factor::new(vec![0, 1, 0, 1], ["A", "B"], false).unwrap();
    let f2 = Factor::new(vec![1, 0], ["B", "C"], false).unwrap();
    let out = f1.replace(&Subscript::from(vec![2i64, 3]), &f2).unwrap();
    assert_eq!(out.to_strings(), strings(&[Some("A"), Some("B"), None, Some("B")]));
    assert_eq!(f1.codes(), &[0, 1, 0, 1]);
}

#[test]
fn replace_with_shared_levels_copies_codes() {
    let mut f = Factor::new(vec![0, 0, 0], ["A", "B"], false).unwrap();
    let value = Factor::new(vec![1, -1], ["A", "B"], false).unwrap();
    f.replace_in_place(&Subscript::from(1i64..3), &value).unwrap();
    assert_eq!(f.codes(), &[0, 1, -1]);
}

#[test]
fn failed_replace_leaves_factor_untouched() {
    let mut f = Factor::new(vec![0, 1], ["A", "B"], false).unwrap();
    let value = Factor::new(vec![1], ["A", "B"], false).unwrap();
    let err = f
        .replace_in_place(&Subscript::from(vec![0i64, 1]), &value)
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueConstraintViolation);
    assert_eq!(f.codes(), &[0, 1]);
}

#[test]
fn replace_strings_encodes_against_levels() {
    let f = Factor::new(vec![0, 1], ["A", "B"], false).unwrap();
    let out = f
        .replace_strings(&Subscript::from(vec![0i64, 1]), &[Some("B"), Some("Q")])
        .unwrap();
    assert_eq!(out.codes(), &[1, -1]);
}

// =============================================================================
// Levels
// =============================================================================

#[test]
fn drop_unused_levels_compacts() {
    let f = Factor::new(vec![3, -1, 1, 3], ["A", "B", "C", "D"], false).unwrap();
    let dropped = f.drop_unused_levels();
    assert_eq!(dropped.levels(), &["B", "D"]);
    assert_eq!(dropped.codes(), &[1, -1, 0, 1]);
    assert_eq!(dropped.drop_unused_levels(), dropped);
}

#[test]
fn set_levels_lead_and_replace() {
    let f = Factor::new(vec![0, 1, 2], ["A", "B", "C"], false).unwrap();

    let lead = f.set_levels("C").unwrap();
    assert_eq!(lead.levels(), &["C", "A", "B"]);
    assert_eq!(lead.to_strings(), f.to_strings());

    let replaced = f.set_levels(Levels::Replace(vec!["C".into(), "A".into()])).unwrap();
    assert_eq!(replaced.to_strings(), strings(&[Some("A"), None, Some("C")]));

    let err = f.set_levels("Z").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueConstraintViolation);
    let err = f.set_levels(vec!["A", "A"]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueConstraintViolation);
}

#[test]
fn display_summarizes() {
    let f = Factor::new(vec![0, -1], ["A"], true).unwrap();
    let text = f.to_string();
    assert!(text.starts_with("Factor of length 2 with 1 level"));
    assert!(text.contains("ordered: true"));
}
