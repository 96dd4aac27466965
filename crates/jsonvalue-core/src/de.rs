//! Structured decode: [`Value`] → any `Deserialize` type.
//!
//! The target's derived `Deserialize` impl is the structure description: it
//! names the fields and their expected shapes. Decoding walks the value
//! against it and fails the whole call on the first problem:
//!
//! - a required field absent from the object → [`JsonError::MissingField`]
//! - a field whose variant does not fit → [`JsonError::TypeMismatch`]
//!
//! Both carry the [`FieldPath`](crate::FieldPath) of the offending field,
//! assembled as the error unwinds through arrays and objects.
//!
//! Integer fields accept an integral `Fraction` (`30.0`), matching the
//! integer coercion rule. Numeric strings are *not* coerced here; typed
//! fields are strict.

use std::fmt;

use serde::de::value::BorrowedStrDeserializer;
use serde::de::{
    self, Deserialize, DeserializeOwned, DeserializeSeed, EnumAccess, Expected, MapAccess,
    SeqAccess, Unexpected, VariantAccess, Visitor,
};
use serde::forward_to_deserialize_any;
use tracing::debug;

use crate::error::{FieldPath, JsonError, Result};
use crate::number::NumericKind;
use crate::value::Value;

/// Decode a value into `T`, borrowing strings from `value` where `T` allows.
pub fn from_value<'de, T>(value: &'de Value) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(value).inspect_err(|err| match err.path() {
        Some(path) => debug!(path = %path, error = %err, "structured decode failed"),
        None => debug!(error = %err, "structured decode failed"),
    })
}

impl Value {
    /// Decode this value into an owned `T`.
    ///
    /// ```
    /// use jsonvalue_core::Value;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Friend {
    ///     id: u32,
    ///     name: String,
    /// }
    ///
    /// let v: Value = r#"[{"id":0,"name":"Gail"}]"#.parse().unwrap();
    /// let friends: Vec<Friend> = v.decode().unwrap();
    /// assert_eq!(friends[0].name, "Gail");
    /// ```
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        from_value(self)
    }
}

impl de::Error for JsonError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        JsonError::Message {
            path: FieldPath::root(),
            message: msg.to_string(),
        }
    }

    fn invalid_type(unexp: Unexpected, exp: &dyn Expected) -> Self {
        JsonError::TypeMismatch {
            path: FieldPath::root(),
            expected: exp.to_string(),
            found: unexp.to_string(),
        }
    }

    fn invalid_value(unexp: Unexpected, exp: &dyn Expected) -> Self {
        Self::invalid_type(unexp, exp)
    }

    fn invalid_length(len: usize, exp: &dyn Expected) -> Self {
        JsonError::TypeMismatch {
            path: FieldPath::root(),
            expected: exp.to_string(),
            found: format!("{} elements", len),
        }
    }

    fn missing_field(field: &'static str) -> Self {
        JsonError::MissingField {
            path: FieldPath::root(),
            field: field.to_string(),
        }
    }
}

impl<'de> de::Deserializer<'de> for &'de Value {
    type Error = JsonError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Number(NumericKind::Integer(i)) => visitor.visit_i64(*i),
            Value::Number(NumericKind::Fraction(f)) => visitor.visit_f64(*f),
            Value::String(s) => visitor.visit_borrowed_str(s),
            Value::Array(items) => visit_array(items, visitor),
            Value::Object(map) => {
                let mut access = MapDeserializer {
                    iter: map.iter(),
                    pending: None,
                };
                visitor.visit_map(&mut access)
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(variant) => {
                visitor.visit_enum(BorrowedStrDeserializer::<JsonError>::new(variant))
            }
            Value::Object(map) if map.len() == 1 => {
                let Some((variant, value)) = map.iter().next() else {
                    return Err(de::Error::invalid_length(0, &"exactly one key"));
                };
                visitor.visit_enum(EnumDeserializer { variant, value })
            }
            other => Err(de::Error::invalid_type(unexpected(other), &"string or single-key object")),
        }
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        deserialize_integer(self, visitor)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        deserialize_integer(self, visitor)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        deserialize_integer(self, visitor)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        deserialize_integer(self, visitor)
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        deserialize_integer(self, visitor)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        deserialize_integer(self, visitor)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        deserialize_integer(self, visitor)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        deserialize_integer(self, visitor)
    }

    forward_to_deserialize_any! {
        bool i128 u128 f32 f64 char str string bytes byte_buf unit unit_struct
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

/// Integer hints take an exactly integral fraction as an integer.
fn deserialize_integer<'de, V>(value: &'de Value, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    match value {
        Value::Number(NumericKind::Fraction(f)) => match NumericKind::Fraction(*f).as_i64() {
            Some(i) => visitor.visit_i64(i),
            None => visitor.visit_f64(*f),
        },
        _ => de::Deserializer::deserialize_any(value, visitor),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(NumericKind::Integer(i)) => Unexpected::Signed(*i),
        Value::Number(NumericKind::Fraction(f)) => Unexpected::Float(*f),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

fn visit_array<'de, V>(items: &'de [Value], visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let len = items.len();
    let mut access = SeqDeserializer {
        iter: items.iter(),
        index: 0,
    };
    let out = visitor.visit_seq(&mut access)?;
    if access.iter.len() == 0 {
        Ok(out)
    } else {
        Err(de::Error::invalid_length(len, &"fewer elements in array"))
    }
}

struct SeqDeserializer<'de> {
    iter: std::slice::Iter<'de, Value>,
    index: usize,
}

impl<'de> SeqAccess<'de> for SeqDeserializer<'de> {
    type Error = JsonError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        let Some(item) = self.iter.next() else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;
        seed.deserialize(item)
            .map(Some)
            .map_err(|err| err.within_index(index))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer<'de> {
    iter: indexmap::map::Iter<'de, String, Value>,
    pending: Option<(&'de str, &'de Value)>,
}

impl<'de> MapAccess<'de> for MapDeserializer<'de> {
    type Error = JsonError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        let Some((key, value)) = self.iter.next() else {
            return Ok(None);
        };
        self.pending = Some((key.as_str(), value));
        seed.deserialize(BorrowedStrDeserializer::new(key.as_str()))
            .map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let Some((key, value)) = self.pending.take() else {
            return Err(de::Error::custom("value requested before key"));
        };
        seed.deserialize(value).map_err(|err| err.within_key(key))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer<'de> {
    variant: &'de String,
    value: &'de Value,
}

impl<'de> EnumAccess<'de> for EnumDeserializer<'de> {
    type Error = JsonError;
    type Variant = VariantDeserializer<'de>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, VariantDeserializer<'de>)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(BorrowedStrDeserializer::<JsonError>::new(self.variant.as_str()))?;
        Ok((
            variant,
            VariantDeserializer {
                name: self.variant.as_str(),
                value: self.value,
            },
        ))
    }
}

struct VariantDeserializer<'de> {
    name: &'de str,
    value: &'de Value,
}

impl<'de> VariantAccess<'de> for VariantDeserializer<'de> {
    type Error = JsonError;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            other => Err(de::Error::invalid_type(unexpected(other), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(self.value)
            .map_err(|err| err.within_key(self.name))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Array(items) => {
                visit_array(items, visitor).map_err(|err| err.within_key(self.name))
            }
            other => Err(de::Error::invalid_type(unexpected(other), &"tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Object(_) => de::Deserializer::deserialize_any(self.value, visitor)
                .map_err(|err| err.within_key(self.name)),
            other => Err(de::Error::invalid_type(unexpected(other), &"struct variant")),
        }
    }
}
