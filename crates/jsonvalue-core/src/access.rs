//! Key-path lookup on objects and index get/set/remove on arrays.
//!
//! # Key paths
//!
//! [`Value::get`] first tries the whole string as one literal key. Only if that
//! key is absent does it split on `.` and walk nested objects component by
//! component. Hitting `null` part-way through ends the walk and returns that
//! `null` (a present-but-empty answer), while a missing component anywhere
//! else returns `None`.
//!
//! # Index mutation
//!
//! `set_index(i, Some(v))` replaces when `i < len` and appends when `i == len`;
//! larger indices are rejected with [`JsonError::IndexOutOfBounds`] rather than
//! padded. `set_index(i, None)` removes element `i` and shifts the tail down.
//! Mutation needs `&mut self`, i.e. exclusive ownership; the consuming
//! `with_index` / `without_index` forms return the new tree instead.

use std::ops::{Index, IndexMut};

use crate::error::{FieldPath, JsonError, Result};
use crate::value::Value;

impl Value {
    /// Look up a key or dotted key path on an object.
    ///
    /// ```
    /// use jsonvalue_core::Value;
    ///
    /// let v: Value = r#"{"derp":{"blerp":["a","b"]}}"#.parse().unwrap();
    /// assert_eq!(v.get("derp.blerp").unwrap().to_string(), r#"["a","b"]"#);
    /// assert!(v.get("herp").is_none());
    /// ```
    pub fn get(&self, key: &str) -> Option<&Value> {
        let map = self.as_object()?;
        if let Some(found) = map.get(key) {
            return Some(found);
        }
        if !key.contains('.') {
            return None;
        }

        let mut current = self;
        for component in key.split('.') {
            match current {
                Value::Null => return Some(current),
                Value::Object(map) => current = map.get(component)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Literal single-key lookup, with no path splitting.
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    pub fn get_key_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.as_object_mut()?.get_mut(key)
    }

    /// Insert or replace a key on an object, returning the previous value.
    ///
    /// Fails with `TypeMismatch` when `self` is not an object.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        match self {
            Value::Object(map) => Ok(map.insert(key.into(), value)),
            other => Err(not_a("object", other)),
        }
    }

    /// Remove a key from an object, keeping the order of the remaining keys.
    pub fn remove_key(&mut self, key: &str) -> Option<Value> {
        self.as_object_mut()?.shift_remove(key)
    }

    /// Element `index` of an array, or `None` when out of range or not an array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array()?.get(index)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.as_array_mut()?.get_mut(index)
    }

    /// Replace, append or remove an array element.
    ///
    /// - `Some(v)` with `index < len` replaces, with `index == len` appends.
    /// - `None` removes the element at `index` and shifts later elements down.
    ///
    /// Returns the replaced or removed element, if there was one.
    pub fn set_index(&mut self, index: usize, value: Option<Value>) -> Result<Option<Value>> {
        let Some(value) = value else {
            return self.remove_index(index).map(Some);
        };
        let items = array_mut(self)?;
        let len = items.len();
        if index < len {
            Ok(Some(std::mem::replace(&mut items[index], value)))
        } else if index == len {
            items.push(value);
            Ok(None)
        } else {
            Err(JsonError::IndexOutOfBounds { index, len })
        }
    }

    /// Remove and return element `index` of an array, shifting later elements down.
    pub fn remove_index(&mut self, index: usize) -> Result<Value> {
        let items = array_mut(self)?;
        if index < items.len() {
            Ok(items.remove(index))
        } else {
            Err(JsonError::IndexOutOfBounds {
                index,
                len: items.len(),
            })
        }
    }

    /// Consuming form of [`set_index`](Self::set_index) with a value.
    pub fn with_index(mut self, index: usize, value: Value) -> Result<Value> {
        self.set_index(index, Some(value))?;
        Ok(self)
    }

    /// Consuming form of [`remove_index`](Self::remove_index).
    pub fn without_index(mut self, index: usize) -> Result<Value> {
        self.set_index(index, None)?;
        Ok(self)
    }
}

fn array_mut(value: &mut Value) -> Result<&mut Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(not_a("array", other)),
    }
}

fn not_a(expected: &str, found: &Value) -> JsonError {
    JsonError::TypeMismatch {
        path: FieldPath::root(),
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

/// `value[i]` panics like slice indexing when `i` is out of range or `value`
/// is not an array. Use [`Value::get_index`] for a checked lookup.
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self {
            Value::Array(items) => &items[index],
            other => panic!("cannot index {} with usize", other.type_name()),
        }
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        match self {
            Value::Array(items) => &mut items[index],
            other => panic!("cannot index {} with usize", other.type_name()),
        }
    }
}

/// `value["a.b"]` resolves a key path like [`Value::get`] and panics when it
/// is absent.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(found) => found,
            None => panic!("no value at key path `{}`", key),
        }
    }
}
