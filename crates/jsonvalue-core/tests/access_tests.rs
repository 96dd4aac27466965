/// Key-path lookup and array index mutation tests.
use jsonvalue_core::{from_str, JsonError, Value};

fn doc() -> Value {
    from_str(r#"{"derp":{"blerp":["a","b"]},"herp.derp":"literal","nothing":null}"#).unwrap()
}

// ============================================================================
// Key paths
// ============================================================================

#[test]
fn dotted_path_walks_nested_objects() {
    let v = doc();
    assert_eq!(v.get("derp.blerp"), Some(&Value::from(vec!["a", "b"])));
    assert_eq!(v["derp.blerp"], Value::from(vec!["a", "b"]));
}

#[test]
fn single_key_lookup() {
    let v = doc();
    assert!(v.get("derp").unwrap().is_object());
}

#[test]
fn literal_dotted_key_is_found_first() {
    let v = doc();
    assert_eq!(v.get("herp.derp"), Some(&Value::from("literal")));
}

#[test]
fn missing_key_is_absent() {
    let v = doc();
    assert!(v.get("herp").is_none());
    assert!(v.get("derp.herp").is_none());
    assert!(v.get("derp.blerp.0").is_none());
}

#[test]
fn null_part_way_through_path_is_returned() {
    let v = doc();
    assert_eq!(v.get("nothing.a.b"), Some(&Value::Null));
    assert_eq!(v.get("nothing"), Some(&Value::Null));
}

#[test]
fn get_key_does_not_split() {
    let v = doc();
    assert!(v.get_key("derp.blerp").is_none());
    assert_eq!(v.get_key("herp.derp"), Some(&Value::from("literal")));
}

#[test]
fn insert_and_remove_key_keep_order() {
    let mut v = from_str(r#"{"a":1,"b":2,"c":3}"#).unwrap();
    assert_eq!(v.remove_key("b"), Some(Value::from(2)));
    v.insert("d", Value::from(4)).unwrap();
    assert_eq!(v.encode_as_string().unwrap(), r#"{"a":1,"c":3,"d":4}"#);
}

#[test]
fn insert_on_non_object_fails() {
    let mut v = Value::from(vec![1]);
    assert!(matches!(
        v.insert("a", Value::Null),
        Err(JsonError::TypeMismatch { .. })
    ));
}

#[test]
fn mutate_through_get_key_mut() {
    let mut v = doc();
    *v.get_key_mut("nothing").unwrap() = Value::from(true);
    assert_eq!(v.get("nothing"), Some(&Value::Bool(true)));
}

// ============================================================================
// Array indices
// ============================================================================

#[test]
fn index_read() {
    let v = from_str(r#"[1,"derp",[3,5.0]]"#).unwrap();
    assert_eq!(v[1], Value::from("derp"));
    assert_eq!(v[2][1], Value::from(5.0));
    assert_eq!(v.get_index(3), None);
}

#[test]
fn index_set_replaces_in_place() {
    let mut v = Value::from(vec![1, 2, 3]);
    let old = v.set_index(1, Some(Value::from("two"))).unwrap();
    assert_eq!(old, Some(Value::from(2)));
    assert_eq!(v.encode_as_string().unwrap(), r#"[1,"two",3]"#);
}

#[test]
fn index_set_at_len_appends() {
    let mut v = Value::from(vec![1, 2]);
    assert_eq!(v.set_index(2, Some(Value::from(3))).unwrap(), None);
    assert_eq!(v, Value::from(vec![1, 2, 3]));
}

#[test]
fn index_set_none_removes_and_shifts() {
    let mut v = Value::from(vec!["a", "b", "c"]);
    let removed = v.set_index(0, None).unwrap();
    assert_eq!(removed, Some(Value::from("a")));
    assert_eq!(v, Value::from(vec!["b", "c"]));
    assert_eq!(v[0], Value::from("b"));
}

#[test]
fn index_set_beyond_len_fails() {
    let mut v = Value::from(vec![1]);
    let err = v.set_index(4, Some(Value::Null)).unwrap_err();
    assert!(matches!(err, JsonError::IndexOutOfBounds { index: 4, len: 1 }));
}

#[test]
fn index_mut_assignment() {
    let mut v = Value::from(vec![1, 2]);
    v[0] = Value::from("x");
    assert_eq!(v.encode_as_string().unwrap(), r#"["x",2]"#);
}

#[test]
fn consuming_forms_leave_original_shape_in_copy() {
    let original = Value::from(vec![1, 2, 3]);
    let replaced = original.clone().with_index(0, Value::from(9)).unwrap();
    let shortened = original.clone().without_index(2).unwrap();
    assert_eq!(original, Value::from(vec![1, 2, 3]));
    assert_eq!(replaced, Value::from(vec![9, 2, 3]));
    assert_eq!(shortened, Value::from(vec![1, 2]));
}

#[test]
#[should_panic]
fn index_out_of_range_panics() {
    let v = Value::from(vec![1]);
    let _ = &v[5];
}

#[test]
#[should_panic]
fn missing_key_path_panics() {
    let v = doc();
    let _ = &v["derp.nope"];
}
