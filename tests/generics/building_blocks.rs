//! Integration tests for subset, combine and assign
//!
//! Tests that the positional operations behave the same across types.

use labelkit::generics::{
    Combinable, Combined, Height, RowMajor, assign, combine, combine_sequences, subset,
};
use labelkit::{ErrorCategory, Factor, NamedList, Names};
use labelkit_foundation::Value;

// =============================================================================
// Subset
// =============================================================================

#[test]
fn subset_all_types_by_the_same_positions() {
    let positions = [2, 0];

    let plain = vec!["a", "b", "c"];
    assert_eq!(subset(&plain, &positions).unwrap(), vec!["c", "a"]);

    let names = Names::from(plain.clone());
    assert_eq!(subset(&names, &positions).unwrap().as_slice(), &["c", "a"]);

    let factor = Factor::from_sequence(plain.iter().copied(), &Default::default()).unwrap();
    let picked = subset(&factor, &positions).unwrap();
    assert_eq!(picked.to_strings(), vec![Some("c".to_string()), Some("a".to_string())]);

    let list = NamedList::from_dict(plain.iter().map(|s| (*s, s.to_uppercase())));
    let picked = subset(&list, &positions).unwrap();
    assert_eq!(picked.to_vec(), vec!["C".to_string(), "A".to_string()]);
    assert_eq!(picked.names().unwrap().as_slice(), &["c", "a"]);

    let table = RowMajor::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
    assert_eq!(subset(&table, &positions).unwrap().as_slice(), &[5, 6, 1, 2]);
}

#[test]
fn subset_out_of_range_everywhere() {
    let err = subset(&vec![1], &[1]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::IndexOutOfRange);
    let err = subset(&NamedList::from(vec![1]), &[1]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::IndexOutOfRange);
    let err = subset(&Factor::new(vec![0], ["A"], false).unwrap(), &[3]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::IndexOutOfRange);
}

#[test]
fn heights() {
    assert_eq!(vec![1, 2, 3].height(), 3);
    assert_eq!(RowMajor::new(4, 2, vec![0; 8]).unwrap().height(), 4);
    assert_eq!(Factor::new(vec![], Vec::<String>::new(), false).unwrap().height(), 0);
}

// =============================================================================
// Combine
// =============================================================================

#[test]
fn combine_named_lists_carries_names() {
    let a = NamedList::from_dict([("x", Value::from(1i64))]);
    let b = NamedList::from(vec![Value::Nil]);
    let c = NamedList::from_dict([("z", Value::from("s"))]);
    let out = combine_sequences(&[&a, &b, &c]).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out.names().unwrap().as_slice(), &["x", "", "z"]);
}

#[test]
fn combine_factors_appends_new_levels() {
    let a = Factor::new(vec![0, 1], ["A", "B"], true).unwrap();
    let b = Factor::new(vec![0, 1, -1], ["C", "A"], true).unwrap();
    let out = combine_sequences(&[&a, &b]).unwrap();
    assert_eq!(out.levels(), &["A", "B", "C"]);
    assert_eq!(out.codes(), &[0, 1, 2, 0, -1]);
    assert!(!out.is_ordered());
}

#[test]
fn combine_by_shape() {
    let t1 = RowMajor::new(1, 3, vec![1, 2, 3]).unwrap();
    let t2 = RowMajor::new(1, 3, vec![4, 5, 6]).unwrap();
    let stacked = combine::<Vec<i32>, _>(&[Combinable::Tabular(&t1), Combinable::Tabular(&t2)])
        .unwrap();
    match stacked {
        Combined::Tabular(table) => {
            assert_eq!(table.nrow(), 2);
            assert_eq!(table.row(1), Some(&[4, 5, 6][..]));
        }
        Combined::Flat(_) => panic!("expected a table"),
    }

    let v = vec![1, 2, 3];
    let err = combine(&[Combinable::Flat(&v), Combinable::Tabular(&t1)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);

    let err = combine::<Vec<i32>, RowMajor<i32>>(&[]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
}

// =============================================================================
// Assign
// =============================================================================

#[test]
fn assign_never_touches_names() {
    let x = NamedList::from_dict([("a", 1), ("b", 2), ("c", 3)]);
    let position = x.names().unwrap().map("c").unwrap();
    let replacement = NamedList::from_dict([("zzz", 30)]);
    let out = assign(&x, &[position], &replacement).unwrap();
    assert_eq!(out.names(), x.names());
    assert_eq!(*out.get_value("c").unwrap(), 30);
}

#[test]
fn assign_factor_keeps_levels() {
    let f = Factor::new(vec![0, 1, 2], ["A", "B", "C"], false).unwrap();
    let value = Factor::new(vec![0, 1], ["C", "D"], false).unwrap();
    let out = assign(&f, &[0, 1], &value).unwrap();
    assert_eq!(out.levels(), f.levels());
    assert_eq!(out.codes(), &[2, -1, 2]);
}

#[test]
fn assign_length_mismatch() {
    let err = assign(&vec![1, 2, 3], &[0, 1], &vec![9]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueConstraintViolation);
}
