//! Numeric kind: remembers whether a JSON number was produced as an integer or a fraction.
//!
//! `Integer(1)` and `Fraction(1.0)` are different values. They print differently
//! (`1` vs `1.0`), compare unequal and hash differently. The coercion layer bridges
//! them explicitly where a caller asks for it (see [`crate::convert`]).

use std::fmt;

/// A JSON number tagged with how it was produced.
#[derive(Debug, Clone, Copy)]
pub enum NumericKind {
    Integer(i64),
    Fraction(f64),
}

impl NumericKind {
    pub fn is_integer(&self) -> bool {
        matches!(self, NumericKind::Integer(_))
    }

    pub fn is_fraction(&self) -> bool {
        matches!(self, NumericKind::Fraction(_))
    }

    /// The number as an `f64`. Integers beyond 2^53 lose precision.
    pub fn as_f64(&self) -> f64 {
        match *self {
            NumericKind::Integer(i) => i as f64,
            NumericKind::Fraction(f) => f,
        }
    }

    /// The number as an `i64`, only when the value is exactly integral.
    ///
    /// A `Fraction` qualifies when it has no fractional remainder and lies in
    /// `i64` range, so `1235.0` yields `Some(1235)` and `1235.1` yields `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            NumericKind::Integer(i) => Some(i),
            NumericKind::Fraction(f) => fraction_to_i64(f),
        }
    }

    /// Whether the value is a finite number that JSON text can represent.
    pub fn is_finite(&self) -> bool {
        match *self {
            NumericKind::Integer(_) => true,
            NumericKind::Fraction(f) => f.is_finite(),
        }
    }
}

/// Exact conversion of an integral `f64` into `i64`.
pub(crate) fn fraction_to_i64(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; i64::MAX as f64 rounds up to it.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && f >= -LIMIT && f < LIMIT {
        Some(f as i64)
    } else {
        None
    }
}

/// Exact conversion of a non-negative integral `f64` into `u64`.
pub(crate) fn fraction_to_u64(f: f64) -> Option<u64> {
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;
    if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f < LIMIT {
        Some(f as u64)
    } else {
        None
    }
}

impl fmt::Display for NumericKind {
    /// `Integer` never prints a decimal point. `Fraction` always does, using
    /// the shortest form that parses back to the same `f64`: `1.0`, `5.51`,
    /// and `1.0e20` where the exponent form has a bare mantissa.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NumericKind::Integer(i) => write!(f, "{}", i),
            NumericKind::Fraction(x) => {
                let text = format!("{:?}", x);
                match text.find('e') {
                    Some(at) if !text[..at].contains('.') => {
                        write!(f, "{}.0{}", &text[..at], &text[at..])
                    }
                    _ => f.write_str(&text),
                }
            }
        }
    }
}

impl From<i64> for NumericKind {
    fn from(i: i64) -> Self {
        NumericKind::Integer(i)
    }
}

impl From<f64> for NumericKind {
    fn from(f: f64) -> Self {
        NumericKind::Fraction(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printing_integer_has_no_decimal_point() {
        assert_eq!(NumericKind::Integer(1).to_string(), "1");
        assert_eq!(NumericKind::Integer(-42).to_string(), "-42");
    }

    #[test]
    fn printing_fraction_always_has_decimal_point() {
        assert_eq!(NumericKind::Fraction(1.0).to_string(), "1.0");
        assert_eq!(NumericKind::Fraction(5.51).to_string(), "5.51");
        assert_eq!(NumericKind::Fraction(-0.5).to_string(), "-0.5");
    }

    #[test]
    fn printing_exponent_fraction_keeps_decimal_point() {
        assert_eq!(NumericKind::Fraction(1e20).to_string(), "1.0e20");
        assert_eq!(NumericKind::Fraction(-3e-7).to_string(), "-3.0e-7");
        assert_eq!(NumericKind::Fraction(1.5e300).to_string(), "1.5e300");
    }

    #[test]
    fn exact_unsigned_fraction() {
        assert_eq!(fraction_to_u64(9_223_372_036_854_775_808.0), Some(1 << 63));
        assert_eq!(fraction_to_u64(18_446_744_073_709_549_568.0), Some(u64::MAX - 2047));
        assert_eq!(fraction_to_u64(18_446_744_073_709_551_616.0), None);
        assert_eq!(fraction_to_u64(-1.0), None);
        assert_eq!(fraction_to_u64(0.5), None);
    }

    #[test]
    fn exact_integral_fraction() {
        assert_eq!(NumericKind::Fraction(1235.0).as_i64(), Some(1235));
        assert_eq!(NumericKind::Fraction(1235.1).as_i64(), None);
        assert_eq!(NumericKind::Fraction(f64::NAN).as_i64(), None);
        assert_eq!(NumericKind::Fraction(1e19).as_i64(), None);
        assert_eq!(
            NumericKind::Fraction(-9_223_372_036_854_775_808.0).as_i64(),
            Some(i64::MIN)
        );
    }

    #[test]
    fn as_f64_widens_integers() {
        assert_eq!(NumericKind::Integer(3).as_f64(), 3.0);
        assert_eq!(NumericKind::Fraction(2.5).as_f64(), 2.5);
    }
}
