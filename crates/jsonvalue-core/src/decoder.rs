//! JSON text → [`Value`].
//!
//! Tokenizing is delegated to `serde_json`; this module only decides how each
//! parsed node becomes a variant. The integer/fraction distinction follows
//! the source text:
//!
//! - integer literals (`30`, `-7`) → `Number(Integer)`
//! - literals with a fraction or exponent (`1.0`, `5.51`, `1e3`) → `Number(Fraction)`
//! - unsigned literals above `i64::MAX` → `Number(Fraction)` at the nearest `f64`
//!
//! The same visitor backs `Deserialize for Value`, so any serde format can
//! produce a `Value`.

use std::fmt;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::{JsonError, Result};
use crate::number::NumericKind;
use crate::value::{Map, Value};

/// Parse JSON text into a [`Value`].
pub fn from_str(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Parse UTF-8 JSON bytes into a [`Value`].
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

impl FromStr for Value {
    type Err = JsonError;

    fn from_str(text: &str) -> Result<Value> {
        crate::decoder::from_str(text)
    }
}

fn from_u64(u: u64) -> Value {
    match i64::try_from(u) {
        Ok(i) => Value::Number(NumericKind::Integer(i)),
        Err(_) => Value::Number(NumericKind::Fraction(u as f64)),
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
        Ok(Value::Number(NumericKind::Integer(value)))
    }

    fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
        Ok(from_u64(value))
    }

    fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
        Ok(Value::Number(NumericKind::Fraction(value)))
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            // Later duplicates win, matching serde_json's own Value.
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(NumericKind::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    from_u64(u)
                } else {
                    // Without arbitrary_precision every other Number is an f64.
                    Value::Number(NumericKind::Fraction(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Hand a value back to heterogeneous native code as a `serde_json::Value`.
///
/// `Integer` maps to an integer `Number` and `Fraction` to a float `Number`,
/// so the distinction survives. Non-finite fractions cannot be represented
/// and fail with [`JsonError::Encoding`].
impl TryFrom<&Value> for serde_json::Value {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(NumericKind::Integer(i)) => serde_json::Value::from(*i),
            Value::Number(NumericKind::Fraction(f)) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    JsonError::Encoding(format!("non-finite number {} has no JSON representation", f))
                })?,
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), serde_json::Value::try_from(v)?);
                }
                serde_json::Value::Object(out)
            }
        })
    }
}

impl Value {
    /// Convert into a `serde_json::Value` (see the `TryFrom` impl).
    pub fn to_serde_json(&self) -> Result<serde_json::Value> {
        serde_json::Value::try_from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_kind_follows_source_text() {
        let v = from_str("[30, -7, 1.0, 5.51, 1e3]").unwrap();
        let items = v.as_array().unwrap();
        assert_eq!(items[0], Value::Number(NumericKind::Integer(30)));
        assert_eq!(items[1], Value::Number(NumericKind::Integer(-7)));
        assert_eq!(items[2], Value::Number(NumericKind::Fraction(1.0)));
        assert_eq!(items[3], Value::Number(NumericKind::Fraction(5.51)));
        assert_eq!(items[4], Value::Number(NumericKind::Fraction(1000.0)));
    }

    #[test]
    fn huge_unsigned_becomes_fraction() {
        let v = from_str("18446744073709551615").unwrap();
        assert!(matches!(v, Value::Number(NumericKind::Fraction(_))));
    }

    #[test]
    fn invalid_text_is_parse_error() {
        assert!(matches!(from_str("{\"a\":"), Err(JsonError::Parse(_))));
        assert!(matches!(from_slice(b"[1,]"), Err(JsonError::Parse(_))));
    }

    #[test]
    fn serde_json_bridge_keeps_kinds() {
        let sj: serde_json::Value = serde_json::from_str(r#"{"a":1,"b":1.5}"#).unwrap();
        let v = Value::from(sj.clone());
        assert_eq!(v.get("a"), Some(&Value::from(1)));
        assert_eq!(v.get("b"), Some(&Value::from(1.5)));
        assert_eq!(v.to_serde_json().unwrap(), sj);
    }

    #[test]
    fn non_finite_cannot_become_serde_json() {
        let v = Value::from(f64::INFINITY);
        assert!(matches!(v.to_serde_json(), Err(JsonError::Encoding(_))));
    }
}
