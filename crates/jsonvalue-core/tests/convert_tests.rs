/// Native coercion tests: scalars, strings, dates and collections in both
/// directions through `FromJson` / `ToJson`.
use chrono::{DateTime, FixedOffset, TimeZone, Timelike, Utc};
use indexmap::IndexMap;
use jsonvalue_core::{from_str, FromJson, Jsonable, NumericKind, ToJson, Value};
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// Integers
// ============================================================================

#[test]
fn out_of_range_element_fails_small_integer_array() {
    let v = from_str("[987,45,1235]").unwrap();
    assert_eq!(v.coerce::<Vec<i8>>(), None);
    assert_eq!(v.coerce::<Vec<i16>>(), Some(vec![987, 45, 1235]));
}

#[test]
fn integral_fraction_is_accepted_as_integer() {
    let v = from_str("[987,45,1235.0]").unwrap();
    assert_eq!(v.coerce::<Vec<i64>>(), Some(vec![987, 45, 1235]));
}

#[test]
fn fraction_with_remainder_is_not_an_integer() {
    let v = from_str("[987,45,1235.1]").unwrap();
    assert_eq!(v.coerce::<Vec<i64>>(), None);
    assert_eq!(v.coerce::<Vec<f64>>(), Some(vec![987.0, 45.0, 1235.1]));
}

#[test]
fn numeric_string_coerces_to_integer() {
    assert_eq!(Value::from("1").coerce::<i64>(), Some(1));
    assert_eq!(Value::from("-42").coerce::<i32>(), Some(-42));
    assert_eq!(Value::from("1.5").coerce::<i64>(), None);
    assert_eq!(Value::from("one").coerce::<i64>(), None);
}

#[test]
fn integer_to_json_keeps_integer_kind() {
    assert_eq!(42i32.to_json(), Value::Number(NumericKind::Integer(42)));
    assert_eq!(7usize.to_json(), Value::Number(NumericKind::Integer(7)));
}

// ============================================================================
// Floats
// ============================================================================

#[test]
fn numeric_string_coerces_to_float() {
    assert_eq!(Value::from("1").coerce::<f64>(), Some(1.0));
    assert_eq!(Value::from("2.5").coerce::<f64>(), Some(2.5));
    assert_eq!(Value::from("nope").coerce::<f64>(), None);
}

#[test]
fn any_number_coerces_to_float() {
    assert_eq!(Value::from(3).coerce::<f64>(), Some(3.0));
    assert_eq!(Value::from(0.25).coerce::<f32>(), Some(0.25));
}

#[test]
fn float_to_json_is_fraction() {
    assert_eq!(1.0f64.to_json().encode_as_string().unwrap(), "1.0");
    assert_eq!(0.5f32.to_json(), Value::Number(NumericKind::Fraction(0.5)));
}

// ============================================================================
// Strings and booleans
// ============================================================================

#[test]
fn string_only_from_string() {
    assert_eq!(Value::from("derp").coerce::<String>(), Some("derp".into()));
    assert_eq!(Value::from(1).coerce::<String>(), None);
    assert_eq!("x".to_json(), Value::from("x"));
}

#[test]
fn bool_from_bool_and_zero_one() {
    assert_eq!(Value::Bool(true).coerce::<bool>(), Some(true));
    assert_eq!(Value::from(0).coerce::<bool>(), Some(false));
    assert_eq!(Value::from(5).coerce::<bool>(), None);
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn date_without_fraction() {
    let dt = Value::from("2017-02-01T05:33:40Z")
        .coerce::<DateTime<Utc>>()
        .unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2017, 2, 1, 5, 33, 40).unwrap());
    assert_eq!(dt.to_json(), Value::from("2017-02-01T05:33:40Z"));
}

#[test]
fn date_with_milliseconds() {
    let dt = Value::from("2017-02-01T05:33:40.111Z")
        .coerce::<DateTime<Utc>>()
        .unwrap();
    assert_eq!(dt.nanosecond(), 111_000_000);
    assert_eq!(dt.to_json(), Value::from("2017-02-01T05:33:40.111Z"));
}

#[test]
fn date_with_offset_keeps_offset() {
    let dt = Value::from("2017-02-01T05:33:40+02:00")
        .coerce::<DateTime<FixedOffset>>()
        .unwrap();
    assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
    assert_eq!(dt.to_json(), Value::from("2017-02-01T05:33:40+02:00"));
}

#[test]
fn malformed_date_is_absent() {
    assert_eq!(Value::from("2017-02-01").coerce::<DateTime<Utc>>(), None);
    assert_eq!(Value::from(1485927220).coerce::<DateTime<Utc>>(), None);
}

// ============================================================================
// Collections
// ============================================================================

#[test]
fn nested_vec_of_strings() {
    let v = from_str(r#"{"derp":{"blerp":["a","b"]}}"#).unwrap();
    let blerp = v.get("derp.blerp").unwrap().coerce::<Vec<String>>();
    assert_eq!(blerp, Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn mixed_array_fails_typed_vec() {
    let v = from_str(r#"["a",1]"#).unwrap();
    assert_eq!(v.coerce::<Vec<String>>(), None);
    assert_eq!(v.coerce::<Vec<Value>>().map(|items| items.len()), Some(2));
}

#[test]
fn object_into_maps() {
    let v = from_str(r#"{"b":2,"a":1}"#).unwrap();
    let hash: HashMap<String, i64> = v.coerce().unwrap();
    assert_eq!(hash["a"], 1);
    let btree: BTreeMap<String, i64> = v.coerce().unwrap();
    assert_eq!(btree.keys().collect::<Vec<_>>(), ["a", "b"]);
    let ordered: IndexMap<String, i64> = v.coerce().unwrap();
    assert_eq!(ordered.keys().collect::<Vec<_>>(), ["b", "a"]);
}

#[test]
fn object_with_bad_value_fails_map() {
    let v = from_str(r#"{"a":1,"b":"x"}"#).unwrap();
    assert_eq!(v.coerce::<BTreeMap<String, i64>>(), None);
}

#[test]
fn option_elements_accept_null() {
    let v = from_str("[1,null,3]").unwrap();
    assert_eq!(v.coerce::<Vec<Option<i32>>>(), Some(vec![Some(1), None, Some(3)]));
    assert_eq!(v.coerce::<Vec<i32>>(), None);
}

#[test]
fn collections_to_json() {
    let mut map = IndexMap::new();
    map.insert("z".to_string(), vec![1, 2]);
    map.insert("a".to_string(), vec![]);
    assert_eq!(map.to_json().encode_as_string().unwrap(), r#"{"z":[1,2],"a":[]}"#);

    let opt: Option<String> = None;
    assert_eq!(opt.to_json(), Value::Null);
}

// ============================================================================
// Jsonable
// ============================================================================

fn through<T: Jsonable>(native: T) -> Option<T> {
    T::from_json(&native.to_json())
}

#[test]
fn jsonable_types_come_back_unchanged() {
    assert_eq!(through(17u16), Some(17));
    assert_eq!(through(-2.5f64), Some(-2.5));
    assert_eq!(through("s".to_string()), Some("s".to_string()));
    assert_eq!(through(vec![Some(true), None]), Some(vec![Some(true), None]));
    let dt = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(through(dt), Some(dt));
}

#[test]
fn value_itself_is_jsonable() {
    let v = from_str(r#"{"a":[1,2.0]}"#).unwrap();
    assert_eq!(Value::from_json(&v), Some(v.clone()));
    assert_eq!(v.to_json(), v);
}
