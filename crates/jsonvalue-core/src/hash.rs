//! Structural equality and a deterministic hash over the value tree.
//!
//! Equality is variant-strict: `Integer(1) != Fraction(1.0)`, `Bool(false) != Null`.
//! Objects compare as key/value sets, ignoring insertion order.
//!
//! The hash is a fixed combinator (not `std`'s randomly keyed SipHash) so
//! [`Value::content_hash`] is stable across runs and processes. Each variant
//! seeds the combinator with its own tag before folding in its contents, which
//! keeps `Null`, `false`, `0`, `0.0`, `""` and `"\0"` apart. Arrays fold their
//! elements in order. Objects hash each key together with its value and sum
//! the pair hashes, so the result ignores insertion order but changes when a
//! key is paired with a different value.

use std::hash::{Hash, Hasher};

use crate::number::NumericKind;
use crate::value::Value;

const TAG_NULL: u64 = 0x6e75_6c6c_0000_0001;
const TAG_BOOL: u64 = 0x626f_6f6c_0000_0002;
const TAG_INTEGER: u64 = 0x696e_7467_0000_0003;
const TAG_FRACTION: u64 = 0x6672_6163_0000_0004;
const TAG_STRING: u64 = 0x7374_7269_0000_0005;
const TAG_ARRAY: u64 = 0x6172_7279_0000_0006;
const TAG_OBJECT: u64 = 0x6f62_6a74_0000_0007;
const TAG_PAIR: u64 = 0x7061_6972_0000_0008;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Mix `value` into `seed` (64-bit variant of boost's `hash_combine`).
fn combine(seed: u64, value: u64) -> u64 {
    seed ^ value
        .wrapping_add(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// Final avalanche so nearby inputs spread over the whole range.
fn finish(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}

fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut h = FNV_OFFSET;
    for &b in bytes {
        h ^= u64::from(b);
        h = h.wrapping_mul(FNV_PRIME);
    }
    // Length is folded in so "\0" and "" differ.
    combine(h, bytes.len() as u64)
}

/// Bits of an `f64` such that values comparing equal share the same bits.
fn canonical_bits(f: f64) -> u64 {
    if f == 0.0 {
        0.0f64.to_bits()
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

impl NumericKind {
    /// Deterministic hash of this number, distinct between kinds.
    pub fn content_hash(&self) -> u64 {
        match *self {
            NumericKind::Integer(i) => finish(combine(TAG_INTEGER, i as u64)),
            NumericKind::Fraction(f) => finish(combine(TAG_FRACTION, canonical_bits(f))),
        }
    }
}

impl Value {
    /// Deterministic structural hash of the whole tree.
    ///
    /// Equal values always produce equal hashes; the result does not depend on
    /// process, platform or object insertion order.
    pub fn content_hash(&self) -> u64 {
        let h = match self {
            Value::Null => TAG_NULL,
            Value::Bool(b) => combine(TAG_BOOL, u64::from(*b)),
            Value::Number(n) => n.content_hash(),
            Value::String(s) => combine(TAG_STRING, hash_bytes(s.as_bytes())),
            Value::Array(items) => {
                let folded = items
                    .iter()
                    .fold(TAG_ARRAY, |acc, item| combine(acc, item.content_hash()));
                combine(folded, items.len() as u64)
            }
            Value::Object(map) => {
                let pairs = map.iter().fold(0u64, |acc, (key, value)| {
                    let pair = combine(
                        combine(TAG_PAIR, hash_bytes(key.as_bytes())),
                        value.content_hash(),
                    );
                    acc.wrapping_add(finish(pair))
                });
                combine(combine(TAG_OBJECT, pairs), map.len() as u64)
            }
        };
        finish(h)
    }
}

impl PartialEq for NumericKind {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (NumericKind::Integer(a), NumericKind::Integer(b)) => a == b,
            // NaN equals NaN so that `Eq` stays reflexive.
            (NumericKind::Fraction(a), NumericKind::Fraction(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            _ => false,
        }
    }
}

impl Eq for NumericKind {}

impl Hash for NumericKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash());
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            // IndexMap equality is order-insensitive.
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash());
    }
}
