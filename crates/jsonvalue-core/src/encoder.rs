//! Compact JSON text encoder.
//!
//! Output has no inserted whitespace. Strings are escaped beyond the JSON
//! minimum:
//!
//! - `"` → `\"`, `\` → `\\`, and `/` → `\/` (always, not only after `<`)
//! - newline, carriage return, tab → `\n`, `\r`, `\t`
//! - every other control character below U+0020 → `\u00XX`
//! - everything else, including multi-byte text such as emoji, is written
//!   literally
//!
//! Objects are written in insertion order (or sorted with
//! [`EncodeOptions::sort_keys`]), arrays in sequence order. `Integer` numbers
//! never carry a decimal point; `Fraction` numbers use the shortest text that
//! parses back to the same `f64` and always carry one (`1.0`, `1.0e20`).
//!
//! # Example
//! ```
//! use jsonvalue_core::{encode_str, Value};
//!
//! let v: Value = r#"{"path":"a/b","n":1.0}"#.parse().unwrap();
//! assert_eq!(v.encode_as_string().unwrap(), r#"{"path":"a\/b","n":1.0}"#);
//! assert_eq!(encode_str("👍"), "\"👍\"");
//! ```

use std::fmt::{self, Write};

use crate::error::{JsonError, Result};
use crate::number::NumericKind;
use crate::value::{Map, Value};

/// Knobs for text encoding. The default is the canonical wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Emit object keys in byte order at every depth instead of insertion order.
    pub sort_keys: bool,
    /// Escape `/` as `\/`.
    pub escape_slash: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            sort_keys: false,
            escape_slash: true,
        }
    }
}

impl EncodeOptions {
    pub fn sort_keys(mut self, yes: bool) -> Self {
        self.sort_keys = yes;
        self
    }

    pub fn escape_slash(mut self, yes: bool) -> Self {
        self.escape_slash = yes;
        self
    }
}

/// What to do with a `Fraction` that JSON text cannot represent.
#[derive(Clone, Copy, PartialEq)]
enum NonFinite {
    Reject,
    WriteNull,
}

impl Value {
    /// Encode to compact JSON text in the canonical wire format.
    ///
    /// Fails with [`JsonError::Encoding`] if the tree holds a NaN or infinite
    /// fraction; everything else encodes.
    pub fn encode_as_string(&self) -> Result<String> {
        self.encode_with(&EncodeOptions::default())
    }

    /// Encode with explicit [`EncodeOptions`].
    pub fn encode_with(&self, options: &EncodeOptions) -> Result<String> {
        let mut out = String::new();
        encode_value(self, options, NonFinite::Reject, &mut out)?;
        Ok(out)
    }
}

/// Encode a single string as a quoted JSON string literal.
pub fn encode_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    encode_string(s, true, &mut out);
    out
}

/// Human-facing rendering: same text as [`Value::encode_as_string`], except a
/// non-finite fraction is written as `null` instead of failing.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        encode_value(self, &EncodeOptions::default(), NonFinite::WriteNull, &mut out)
            .map_err(|_| fmt::Error)?;
        f.write_str(&out)
    }
}

fn encode_value(
    value: &Value,
    options: &EncodeOptions,
    non_finite: NonFinite,
    out: &mut String,
) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => encode_number(n, non_finite, out)?,
        Value::String(s) => encode_string(s, options.escape_slash, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_value(item, options, non_finite, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => encode_object(map, options, non_finite, out)?,
    }
    Ok(())
}

fn encode_object(
    map: &Map,
    options: &EncodeOptions,
    non_finite: NonFinite,
    out: &mut String,
) -> Result<()> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    if options.sort_keys {
        entries.sort_by(|a, b| a.0.cmp(b.0));
    }
    out.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        encode_string(key, options.escape_slash, out);
        out.push(':');
        encode_value(value, options, non_finite, out)?;
    }
    out.push('}');
    Ok(())
}

fn encode_number(n: &NumericKind, non_finite: NonFinite, out: &mut String) -> Result<()> {
    if !n.is_finite() {
        return match non_finite {
            NonFinite::Reject => Err(JsonError::Encoding(format!(
                "non-finite number {} has no JSON representation",
                n
            ))),
            NonFinite::WriteNull => {
                out.push_str("null");
                Ok(())
            }
        };
    }
    // Display already picks `1` vs `1.0`; writing to a String cannot fail.
    let _ = write!(out, "{}", n);
    Ok(())
}

fn encode_string(s: &str, escape_slash: bool, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' if escape_slash => out.push_str("\\/"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{20}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_characters_use_unicode_escapes() {
        assert_eq!(encode_str("\u{0}"), "\"\\u0000\"");
        assert_eq!(encode_str("\u{8}"), "\"\\u0008\"");
        assert_eq!(encode_str("\u{1f}"), "\"\\u001f\"");
    }

    #[test]
    fn delete_is_not_a_control_escape() {
        assert_eq!(encode_str("\u{7f}"), "\"\u{7f}\"");
    }

    #[test]
    fn non_finite_rejected_but_displayed_as_null() {
        let v = Value::Array(vec![Value::from(f64::NAN)]);
        assert!(matches!(v.encode_as_string(), Err(JsonError::Encoding(_))));
        assert_eq!(v.to_string(), "[null]");
    }

    #[test]
    fn options_builder() {
        let opts = EncodeOptions::default().sort_keys(true).escape_slash(false);
        assert!(opts.sort_keys);
        assert!(!opts.escape_slash);
    }
}
