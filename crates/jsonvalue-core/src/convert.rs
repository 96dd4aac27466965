//! Coercion between [`Value`] and native Rust types.
//!
//! Every supported native type implements [`FromJson`] (fallible, returns
//! `None` on mismatch so callers can try another type) and [`ToJson`]
//! (total). Rules per target:
//!
//! | target                    | accepted                                                        |
//! |---------------------------|-----------------------------------------------------------------|
//! | `bool`                    | `Bool`; `Integer(0)` → false, `Integer(1)` → true                |
//! | integers (`i8`..`u64`)    | `Integer` in range; `Fraction` with no remainder; numeric `String` |
//! | `f64`                     | any `Number`; float-parsable `String`                            |
//! | `f32`                     | as `f64`, failing when a finite number overflows `f32`           |
//! | `String`                  | `String` only                                                    |
//! | `DateTime<Utc>` / `<FixedOffset>` | RFC 3339 `String`, fractional seconds optional           |
//! | `()`                      | `Null` only                                                      |
//! | `Option<T>`               | `Null` → `None`, otherwise `T`                                   |
//! | `Vec<T>`                  | `Array` whose every element converts                             |
//! | `HashMap`/`BTreeMap`/`IndexMap<String, T>` | `Object` whose every value converts             |
//!
//! Collections are all-or-nothing: one bad element makes the whole
//! conversion `None`.
//!
//! `u64` and `usize` values above `i64::MAX` have no `Integer` form and are
//! written as a `Fraction`, which holds them exactly only up to 2^53. Larger
//! values come back as the nearest `f64`, and values rounding to 2^64 do not
//! come back at all.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use indexmap::IndexMap;
use tracing::trace;

use crate::number::{fraction_to_i64, fraction_to_u64, NumericKind};
use crate::value::{Map, Value};

/// Best-effort conversion out of a [`Value`].
pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Option<Self>;
}

/// Total conversion into a [`Value`].
pub trait ToJson {
    fn to_json(&self) -> Value;
}

/// Types convertible in both directions.
pub trait Jsonable: FromJson + ToJson {}

impl<T: FromJson + ToJson> Jsonable for T {}

impl Value {
    /// Coerce this value into `T`; see the module docs for the rules.
    ///
    /// ```
    /// use jsonvalue_core::Value;
    ///
    /// assert_eq!(Value::from("1").coerce::<i64>(), Some(1));
    /// assert_eq!(Value::from(1235.0).coerce::<i64>(), Some(1235));
    /// assert_eq!(Value::from(1235.1).coerce::<i64>(), None);
    /// ```
    pub fn coerce<T: FromJson>(&self) -> Option<T> {
        T::from_json(self)
    }
}

impl FromJson for Value {
    fn from_json(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl ToJson for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl FromJson for bool {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(NumericKind::Integer(0)) => Some(false),
            Value::Number(NumericKind::Integer(1)) => Some(true),
            _ => None,
        }
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

fn integer_from_json<T>(value: &Value) -> Option<T>
where
    T: TryFrom<i64> + TryFrom<u64> + FromStr,
{
    match value {
        Value::Number(NumericKind::Integer(i)) => T::try_from(*i).ok(),
        Value::Number(NumericKind::Fraction(f)) => {
            // Non-negative fractions reach up to 2^64 for the unsigned types.
            let exact = if *f >= 0.0 {
                fraction_to_u64(*f).and_then(|u| T::try_from(u).ok())
            } else {
                fraction_to_i64(*f).and_then(|i| T::try_from(i).ok())
            };
            trace!(fraction = *f, accepted = exact.is_some(), "integer coerced from fraction");
            exact
        }
        Value::String(s) => {
            let parsed = s.parse::<T>().ok();
            trace!(text = %s, accepted = parsed.is_some(), "integer coerced from string");
            parsed
        }
        _ => None,
    }
}

macro_rules! jsonable_integer {
    ($($ty:ty),*) => {
        $(
            impl FromJson for $ty {
                fn from_json(value: &Value) -> Option<Self> {
                    integer_from_json(value)
                }
            }

            impl ToJson for $ty {
                /// Values beyond `i64` fall back to the nearest `Fraction`.
                #[allow(unreachable_patterns)]
                fn to_json(&self) -> Value {
                    match i64::try_from(*self) {
                        Ok(i) => Value::Number(NumericKind::Integer(i)),
                        Err(_) => Value::Number(NumericKind::Fraction(*self as f64)),
                    }
                }
            }
        )*
    };
}

jsonable_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromJson for f64 {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(n.as_f64()),
            Value::String(s) => {
                let parsed = s.parse::<f64>().ok();
                trace!(text = %s, accepted = parsed.is_some(), "float coerced from string");
                parsed
            }
            _ => None,
        }
    }
}

impl ToJson for f64 {
    fn to_json(&self) -> Value {
        Value::Number(NumericKind::Fraction(*self))
    }
}

/// Narrow to `f32`, refusing finite values that would overflow to infinity.
fn narrow_f32(f: f64) -> Option<f32> {
    let narrowed = f as f32;
    if f.is_finite() && !narrowed.is_finite() {
        trace!(value = f, "float out of f32 range");
        return None;
    }
    Some(narrowed)
}

impl FromJson for f32 {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => narrow_f32(n.as_f64()),
            Value::String(s) => {
                let parsed = s.parse::<f32>().ok()?;
                if parsed.is_infinite() && s.parse::<f64>().is_ok_and(f64::is_finite) {
                    trace!(text = %s, "float out of f32 range");
                    return None;
                }
                Some(parsed)
            }
            _ => None,
        }
    }
}

impl ToJson for f32 {
    fn to_json(&self) -> Value {
        Value::Number(NumericKind::Fraction(f64::from(*self)))
    }
}

/// Numbers pass through with their kind; numeric strings are parsed as an
/// integer first and as a fraction otherwise.
impl FromJson for NumericKind {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(*n),
            Value::String(s) => s
                .parse::<i64>()
                .map(NumericKind::Integer)
                .or_else(|_| s.parse::<f64>().map(NumericKind::Fraction))
                .ok(),
            _ => None,
        }
    }
}

impl ToJson for NumericKind {
    fn to_json(&self) -> Value {
        Value::Number(*self)
    }
}

impl FromJson for String {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToJson for str {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromJson for DateTime<Utc> {
    fn from_json(value: &Value) -> Option<Self> {
        DateTime::<FixedOffset>::from_json(value).map(|dt| dt.with_timezone(&Utc))
    }
}

impl ToJson for DateTime<Utc> {
    /// `2017-02-01T05:33:40Z`, or with as many fractional digits as needed
    /// (`2017-02-01T05:33:40.111Z`).
    fn to_json(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromJson for DateTime<FixedOffset> {
    fn from_json(value: &Value) -> Option<Self> {
        let text = value.as_str()?;
        let parsed = DateTime::parse_from_rfc3339(text);
        if let Err(err) = &parsed {
            trace!(text = %text, error = %err, "date coercion failed");
        }
        parsed.ok()
    }
}

impl ToJson for DateTime<FixedOffset> {
    fn to_json(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// The null marker.
impl FromJson for () {
    fn from_json(value: &Value) -> Option<Self> {
        value.is_null().then_some(())
    }
}

impl ToJson for () {
    fn to_json(&self) -> Value {
        Value::Null
    }
}

/// `Some(None)` for `Null`; otherwise the inner conversion wrapped in `Some`.
impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_json(other).map(Some),
        }
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToJson::to_json)
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match T::from_json(item) {
                Some(converted) => out.push(converted),
                None => {
                    trace!(index = index, found = item.type_name(), "array element failed coercion");
                    return None;
                }
            }
        }
        Some(out)
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

/// Convert every object entry, stopping at the first failure.
fn entries_from_json<T, C>(value: &Value) -> Option<C>
where
    T: FromJson,
    C: FromIterator<(String, T)>,
{
    let map = value.as_object()?;
    map.iter()
        .map(|(key, item)| {
            let converted = T::from_json(item);
            if converted.is_none() {
                trace!(key = %key, found = item.type_name(), "object value failed coercion");
            }
            converted.map(|c| (key.clone(), c))
        })
        .collect()
}

fn entries_to_json<'a, T, I>(entries: I) -> Value
where
    T: ToJson + 'a,
    I: IntoIterator<Item = (&'a String, &'a T)>,
{
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<Map>(),
    )
}

impl<T: FromJson, S: BuildHasher + Default> FromJson for HashMap<String, T, S> {
    fn from_json(value: &Value) -> Option<Self> {
        entries_from_json(value)
    }
}

impl<T: ToJson, S: BuildHasher> ToJson for HashMap<String, T, S> {
    fn to_json(&self) -> Value {
        entries_to_json(self)
    }
}

impl<T: FromJson> FromJson for BTreeMap<String, T> {
    fn from_json(value: &Value) -> Option<Self> {
        entries_from_json(value)
    }
}

impl<T: ToJson> ToJson for BTreeMap<String, T> {
    fn to_json(&self) -> Value {
        entries_to_json(self)
    }
}

impl<T: FromJson, S: BuildHasher + Default> FromJson for IndexMap<String, T, S> {
    fn from_json(value: &Value) -> Option<Self> {
        entries_from_json(value)
    }
}

impl<T: ToJson, S: BuildHasher> ToJson for IndexMap<String, T, S> {
    fn to_json(&self) -> Value {
        entries_to_json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_from_zero_and_one_only() {
        assert_eq!(bool::from_json(&Value::from(0)), Some(false));
        assert_eq!(bool::from_json(&Value::from(1)), Some(true));
        assert_eq!(bool::from_json(&Value::from(2)), None);
        assert_eq!(bool::from_json(&Value::from(1.0)), None);
        assert_eq!(bool::from_json(&Value::from("true")), None);
    }

    #[test]
    fn integer_range_is_checked() {
        assert_eq!(i8::from_json(&Value::from(127)), Some(127));
        assert_eq!(i8::from_json(&Value::from(128)), None);
        assert_eq!(u8::from_json(&Value::from(-1)), None);
        assert_eq!(u8::from_json(&Value::from("300")), None);
    }

    #[test]
    fn u64_beyond_i64_encodes_as_fraction() {
        assert!(matches!(
            u64::MAX.to_json(),
            Value::Number(NumericKind::Fraction(_))
        ));
        assert_eq!(7u64.to_json(), Value::from(7));
    }

    #[test]
    fn u64_beyond_i64_comes_back() {
        let half = 1u64 << 63;
        assert_eq!(u64::from_json(&half.to_json()), Some(half));
        let top = u64::MAX - 2047;
        assert_eq!(u64::from_json(&top.to_json()), Some(top));
        assert_eq!(i64::from_json(&half.to_json()), None);
        // Rounds to 2^64, which no u64 holds.
        assert_eq!(u64::from_json(&u64::MAX.to_json()), None);
    }

    #[test]
    fn f32_overflow_is_refused() {
        assert_eq!(f32::from_json(&Value::from(1e300)), None);
        assert_eq!(f32::from_json(&Value::from("1e300")), None);
        assert_eq!(f32::from_json(&Value::from(-1e39)), None);
        assert_eq!(f32::from_json(&Value::from(1e-300)), Some(0.0));
        assert_eq!(f32::from_json(&Value::from(i64::MAX)), Some(i64::MAX as f32));
    }

    #[test]
    fn numeric_kind_from_string_prefers_integer() {
        assert_eq!(
            NumericKind::from_json(&Value::from("12")),
            Some(NumericKind::Integer(12))
        );
        assert_eq!(
            NumericKind::from_json(&Value::from("12.5")),
            Some(NumericKind::Fraction(12.5))
        );
        assert_eq!(NumericKind::from_json(&Value::from("x")), None);
    }

    #[test]
    fn null_marker() {
        assert_eq!(<()>::from_json(&Value::Null), Some(()));
        assert_eq!(<()>::from_json(&Value::from(0)), None);
        assert_eq!(().to_json(), Value::Null);
    }

    #[test]
    fn option_distinguishes_null_from_mismatch() {
        assert_eq!(Option::<i32>::from_json(&Value::Null), Some(None));
        assert_eq!(Option::<i32>::from_json(&Value::from(3)), Some(Some(3)));
        assert_eq!(Option::<i32>::from_json(&Value::from("x")), None);
    }
}
