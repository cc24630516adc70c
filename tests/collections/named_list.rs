//! Integration tests for NamedList
//!
//! Tests dual position/name addressing, grow-on-write and name maintenance.

use labelkit_collections::{Key, NamedList, Selection, string_list};
use labelkit_foundation::{ErrorCategory, Names, Subscript, Value};

fn people() -> NamedList<i32> {
    NamedList::from_dict([("Aaron", 1), ("Bob", 2), ("Chris", 3)])
}

// =============================================================================
// Access
// =============================================================================

#[test]
fn name_and_position_agree() {
    let x = people();
    let names = x.names().unwrap();
    for name in names {
        let by_name = x.get_value(name).unwrap();
        let position = names.map(name).unwrap();
        assert_eq!(by_name, x.get_value(position).unwrap());
    }
}

#[test]
fn absent_name_is_key_not_found() {
    let err = people().get_value("Zoe").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::KeyNotFound);
    assert!(err.to_string().contains("Zoe"));

    let unnamed = NamedList::from(vec![1, 2]);
    assert_eq!(
        unnamed.get_value("a").unwrap_err().category(),
        ErrorCategory::KeyNotFound
    );
}

#[test]
fn get_slice_by_mask_names_and_slices() {
    let x = people();
    let masked = x.get_slice(&Subscript::from(vec![true, false, true])).unwrap();
    assert_eq!(masked.to_vec(), vec![1, 3]);
    assert_eq!(masked.names().unwrap().as_slice(), &["Aaron", "Chris"]);

    let named = x.get_slice(&Subscript::from(vec!["Chris", "Aaron"])).unwrap();
    assert_eq!(named.to_vec(), vec![3, 1]);

    let tail = x.get_slice(&Subscript::from(1i64..)).unwrap();
    assert_eq!(tail.to_vec(), vec![2, 3]);
}

#[test]
fn get_item_distinguishes_scalars() {
    let x = people();
    assert!(matches!(
        x.get_item(&Subscript::from("Bob")).unwrap(),
        Selection::Scalar(2)
    ));
    let many = x.get_item(&Subscript::from(vec![0i64])).unwrap();
    assert_eq!(many.many().unwrap().len(), 1);
}

// =============================================================================
// Mutation
// =============================================================================

#[test]
fn set_value_grows_on_absent_name() {
    let x = people();
    let grown = x.set_value("Zoe", 26).unwrap();
    assert_eq!(grown.len(), x.len() + 1);
    assert_eq!(*grown.get_value(-1i64).unwrap(), 26);
    assert_eq!(grown.names().unwrap().get(3), Some("Zoe"));
    assert_eq!(x.len(), 3);

    let updated = x.set_value("Bob", 20).unwrap();
    assert_eq!(updated.to_vec(), vec![1, 20, 3]);
}

#[test]
fn set_value_on_unnamed_list_creates_names() {
    let mut x = NamedList::from(vec![1, 2]);
    x.set_value_in_place("c", 3).unwrap();
    assert_eq!(x.names().unwrap().as_slice(), &["", "", "c"]);
}

#[test]
fn set_slice_rejects_absent_names() {
    let x = people();
    let err = x
        .set_slice(&Subscript::from(vec!["Bob", "Zoe"]), [5, 6])
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::KeyNotFound);

    let out = x.set_slice(&Subscript::from(vec!["Chris", "Aaron"]), [30, 10]).unwrap();
    assert_eq!(out.to_vec(), vec![10, 2, 30]);
    assert_eq!(out.names(), x.names());

    let err = x.set_slice(&Subscript::from(vec![0i64]), [1, 2]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueConstraintViolation);
}

#[test]
fn insert_append_extend() {
    let mut x = people();
    x.insert_in_place("Bob", 0).unwrap();
    assert_eq!(x.to_vec(), vec![1, 0, 2, 3]);
    assert_eq!(x.names().unwrap().get(1), Some(""));
    assert_eq!(x.names().unwrap().map("Bob"), Some(2));

    x.append_in_place(4);
    assert_eq!(x.len(), 5);

    let err = x.insert(Key::from("Zoe"), 9).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::KeyNotFound);

    let unnamed = NamedList::from(vec![10, 20]);
    let joined = unnamed.extend(&people());
    assert_eq!(
        joined.names().unwrap().as_slice(),
        &["", "", "Aaron", "Bob", "Chris"]
    );
    let joined = people().extend(&unnamed);
    assert_eq!(joined.names().unwrap().get(4), Some(""));
}

#[test]
fn set_names_checks_length() {
    let x = NamedList::from(vec![1, 2]);
    let err = x.set_names(Some(Names::from(vec!["a"]))).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueConstraintViolation);
    let named = x.set_names(Some(Names::from(vec!["a", "b"]))).unwrap();
    assert_eq!(*named.get_value("b").unwrap(), 2);
}

// =============================================================================
// Conversion and Equality
// =============================================================================

#[test]
fn as_dict_keeps_first_occurrence() {
    let x = NamedList::with_names(vec![1, 2, 3], Some(Names::from(vec!["a", "b", "a"]))).unwrap();
    let dict = x.as_dict();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict["a"], 1);
    assert_eq!(NamedList::from_dict(dict).to_vec(), vec![1, 2]);
}

#[test]
fn missing_names_differ_from_blank_names() {
    let plain = NamedList::from(vec![1, 2]);
    let blank = plain.set_names(Some(Names::blank(2))).unwrap();
    assert_ne!(plain, blank);
    assert_eq!(plain, NamedList::from(vec![1, 2]));
}

#[test]
fn copies_do_not_alias() {
    let x = people();
    let mut shallow = x.clone();
    shallow.set_value_in_place(0i64, 100).unwrap();
    let deep = x.deep_copy();
    assert_eq!(*x.get_value(0i64).unwrap(), 1);
    assert_eq!(deep, x);
}

#[test]
fn string_lists_coerce_values() {
    let x = string_list([Value::from(1i64), Value::Nil, Value::from("a")]);
    assert_eq!(x.to_vec(), vec![Some("1".to_string()), None, Some("a".to_string())]);
}
