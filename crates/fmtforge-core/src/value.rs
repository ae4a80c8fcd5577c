//! Argument value model.
//!
//! Arguments are polymorphic over a small capability set: fixed-width
//! integer, arbitrary-precision integer, float, and string. Directives pick
//! the capability they need through the fallible `as_*` conversions below;
//! an argument that cannot satisfy a capability makes the whole render call
//! fail with `InvalidArgumentType`.

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive};

/// One formatting argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Fixed-width signed integer.
    Int(i64),
    /// Arbitrary-precision integer.
    Big(BigInt),
    /// Floating-point number.
    Float(f64),
    /// Text.
    Str(String),
}

/// Integer representation chosen for an integer conversion: fixed-width when
/// the value fits, arbitrary-precision otherwise.
#[derive(Debug, Clone)]
pub(crate) enum IntRepr {
    Fixed(i64),
    Big(BigInt),
}

impl Value {
    /// Coerce to an integer for the `%d`-family conversions.
    ///
    /// Floats are truncated toward zero; strings are parsed as integer
    /// literals with radix prefixes (`0x`, `0b`, `0o`, leading-`0` octal)
    /// and `_` separators, an unparsable string reading as zero. Returns
    /// `None` for non-finite floats.
    pub(crate) fn as_integer(&self) -> Option<IntRepr> {
        match self {
            Value::Int(v) => Some(IntRepr::Fixed(*v)),
            Value::Big(b) => Some(IntRepr::Big(b.clone())),
            Value::Float(f) => {
                if !f.is_finite() {
                    return None;
                }
                BigInt::from_f64(f.trunc()).map(narrow)
            }
            Value::Str(s) => Some(narrow(parse_integer_literal(s))),
        }
    }

    /// Coerce to a character code for `%c`: the integer value's low 8 bits.
    ///
    /// Strings do not coerce; arbitrary-precision values must fit a fixed
    /// integer.
    pub(crate) fn as_char_code(&self) -> Option<u8> {
        let v = match self {
            Value::Int(v) => *v,
            Value::Big(b) => b.to_i64()?,
            Value::Float(f) => float_to_i64(*f)?,
            Value::Str(_) => return None,
        };
        Some((v & 0xff) as u8)
    }

    /// Coerce to a fixed integer for argument-supplied width/precision.
    pub(crate) fn as_width_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Big(b) => b.to_i64(),
            Value::Float(f) => float_to_i64(*f),
            Value::Str(_) => None,
        }
    }

    /// Coerce to a float for the `%f`-family conversions.
    ///
    /// Arbitrary-precision values outside the f64 range saturate to the
    /// signed infinity; strings parse their longest leading float literal,
    /// reading as zero when there is none.
    pub(crate) fn as_float(&self) -> f64 {
        match self {
            Value::Int(v) => *v as f64,
            Value::Big(b) => b.to_f64().unwrap_or(if b.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }),
            Value::Float(f) => *f,
            Value::Str(s) => parse_float_literal(s),
        }
    }

    /// Display text for `%s`.
    pub(crate) fn as_text(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Big(b) => b.to_string(),
            Value::Float(f) => float_text(*f),
            Value::Str(s) => s.clone(),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::Big(v)
    }
}

fn narrow(big: BigInt) -> IntRepr {
    match big.to_i64() {
        Some(v) => IntRepr::Fixed(v),
        None => IntRepr::Big(big),
    }
}

fn float_to_i64(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    let t = f.trunc();
    if t >= i64::MIN as f64 && t <= i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_owned();
    }
    if f.is_infinite() {
        return if f < 0.0 { "-Infinity" } else { "Infinity" }.to_owned();
    }
    let mut s = format!("{f}");
    // Integral floats still display a decimal point.
    if !s.contains(['.', 'e', 'E']) {
        s.push_str(".0");
    }
    s
}

/// Parse an integer literal with auto-detected radix.
///
/// Accepts optional leading whitespace, a sign, a radix prefix (`0x`/`0X`,
/// `0b`/`0B`, `0o`/`0O`, or a bare leading `0` for octal), digits with `_`
/// separators, and stops at the first invalid character. No digits at all
/// reads as zero.
fn parse_integer_literal(s: &str) -> BigInt {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut i = 0;

    let mut negative = false;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        negative = bytes[i] == b'-';
        i += 1;
    }

    let mut radix = 10u32;
    if i + 1 < bytes.len() && bytes[i] == b'0' {
        match bytes[i + 1].to_ascii_lowercase() {
            b'x' => {
                radix = 16;
                i += 2;
            }
            b'b' => {
                radix = 2;
                i += 2;
            }
            b'o' => {
                radix = 8;
                i += 2;
            }
            b'0'..=b'7' | b'_' => {
                radix = 8;
                i += 1;
            }
            _ => {}
        }
    }

    let mut acc = BigInt::from(0);
    let radix_big = BigInt::from(radix);
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'_' {
            i += 1;
            continue;
        }
        match (b as char).to_digit(radix) {
            Some(d) => {
                acc = acc * &radix_big + BigInt::from(d);
                i += 1;
            }
            None => break,
        }
    }

    if negative { -acc } else { acc }
}

/// Parse the longest leading float literal, strtod-style.
///
/// Leading whitespace is skipped; an empty or invalid prefix reads as zero.
fn parse_float_literal(s: &str) -> f64 {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mant_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    // At least one mantissa digit is required.
    if !t[mant_start..i].bytes().any(|b| b.is_ascii_digit()) {
        return 0.0;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    t[..i].parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_coercion_identity() {
        assert!(matches!(
            Value::Int(42).as_integer(),
            Some(IntRepr::Fixed(42))
        ));
    }

    #[test]
    fn test_float_truncates_toward_zero() {
        assert!(matches!(
            Value::Float(-3.9).as_integer(),
            Some(IntRepr::Fixed(-3))
        ));
        assert!(Value::Float(f64::NAN).as_integer().is_none());
    }

    #[test]
    fn test_big_arguments_stay_big() {
        let big = BigInt::from(7) << 100u32;
        assert!(matches!(
            Value::Big(big).as_integer(),
            Some(IntRepr::Big(_))
        ));
        assert!(matches!(
            Value::Big(BigInt::from(-5)).as_integer(),
            Some(IntRepr::Big(_))
        ));
    }

    #[test]
    fn test_string_radix_prefixes() {
        let as_fixed = |s: &str| match Value::from(s).as_integer() {
            Some(IntRepr::Fixed(v)) => v,
            other => panic!("expected fixed integer, got {other:?}"),
        };
        assert_eq!(as_fixed("0x1f"), 31);
        assert_eq!(as_fixed("0b101"), 5);
        assert_eq!(as_fixed("0o17"), 15);
        assert_eq!(as_fixed("017"), 15);
        assert_eq!(as_fixed("-42"), -42);
        assert_eq!(as_fixed("1_000"), 1000);
        assert_eq!(as_fixed("12abc"), 12);
        assert_eq!(as_fixed("abc"), 0);
    }

    #[test]
    fn test_char_code_low_byte() {
        assert_eq!(Value::Int(65).as_char_code(), Some(b'A'));
        assert_eq!(Value::Int(0x141).as_char_code(), Some(0x41));
        assert_eq!(Value::from("A").as_char_code(), None);
    }

    #[test]
    fn test_float_literal_prefix() {
        assert_eq!(Value::from("3.14xyz").as_float(), 3.14);
        assert_eq!(Value::from("  -2.5e2").as_float(), -250.0);
        assert_eq!(Value::from("1e").as_float(), 1.0);
        assert_eq!(Value::from("junk").as_float(), 0.0);
    }

    #[test]
    fn test_text_display() {
        assert_eq!(Value::Int(-7).as_text(), "-7");
        assert_eq!(Value::Float(3.0).as_text(), "3.0");
        assert_eq!(Value::Float(3.25).as_text(), "3.25");
        assert_eq!(Value::from("plain").as_text(), "plain");
    }
}
