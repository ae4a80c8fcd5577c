//! Integer rendering.
//!
//! Converts an integer argument into base-specific text per a directive,
//! then pads it into the output buffer. The exacting part is the negative
//! convention for non-decimal bases: instead of a minus sign, a negative
//! value renders as infinite-width two's complement, written as `..`
//! followed by the complemented magnitude normalized to lead with the
//! base's all-ones digit (`f`, `7`, or `1`). Padding of these "dotted"
//! strings also uses `.`, with the run beyond the `..` marker rewritten to
//! the all-ones digit once the field is assembled, so the infinite leading
//! digit illusion survives zero-padding and precision.

pub mod float;

use num_bigint::BigUint;
use num_traits::Signed;

use crate::buffer::OutBuf;
use crate::directive::{Directive, Flags};
use crate::error::FormatError;
use crate::value::{IntRepr, Value};

/// Render one integer argument per the directive's conversion, flags,
/// width, and precision.
pub(crate) fn format_integer(
    value: &Value,
    dir: &Directive,
    out: &mut OutBuf,
) -> Result<(), FormatError> {
    let conv = dir.conversion;
    let base: u32 = match conv {
        b'x' | b'X' => 16,
        b'o' => 8,
        b'b' => 2,
        _ => 10,
    };
    // Decimal conversions always carry a sign when negative; non-decimal
    // ones only render signed when `+` or space asks for it, and otherwise
    // use the two's-complement convention for negatives.
    let signed = base == 10 || dir.flags.force_sign || dir.flags.space_sign;
    let prefix: &'static [u8] = if dir.flags.alt_form {
        match conv {
            b'o' => b"0",
            b'x' => b"0x",
            b'X' => b"0X",
            b'b' => b"0b",
            _ => b"",
        }
    } else {
        b""
    };

    let repr = value
        .as_integer()
        .ok_or(FormatError::InvalidArgumentType {
            conversion: conv as char,
            expected: "integer",
        })?;

    let (sign, mut digits) = match repr {
        IntRepr::Fixed(v) => {
            if signed {
                let (sign, magnitude) = split_sign(v, dir.flags);
                (sign, render_u64(magnitude, base))
            } else if v < 0 {
                (None, dotted_complement(&BigUint::from(v.unsigned_abs()), base))
            } else {
                (None, render_u64(v as u64, base))
            }
        }
        IntRepr::Big(b) => {
            if signed {
                let sign = if b.is_negative() {
                    Some(b'-')
                } else if dir.flags.force_sign {
                    Some(b'+')
                } else if dir.flags.space_sign {
                    Some(b' ')
                } else {
                    None
                };
                (sign, b.magnitude().to_str_radix(base))
            } else if b.is_negative() {
                (None, dotted_complement(b.magnitude(), base))
            } else {
                (None, b.magnitude().to_str_radix(base))
            }
        }
    };

    if conv == b'X' {
        digits.make_ascii_uppercase();
    }
    emit_padded(out, dir, sign, prefix, &digits, base);
    Ok(())
}

/// Pick the sign character for a signed rendering and return the magnitude.
fn split_sign(v: i64, flags: Flags) -> (Option<u8>, u64) {
    if v < 0 {
        (Some(b'-'), v.unsigned_abs())
    } else if flags.force_sign {
        (Some(b'+'), v as u64)
    } else if flags.space_sign {
        (Some(b' '), v as u64)
    } else {
        (None, v as u64)
    }
}

/// Render a magnitude in the given base, lowercase digits.
fn render_u64(mut value: u64, base: u32) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut buf = [0u8; 64];
    let mut pos = 64;
    let base = u64::from(base);
    while value > 0 {
        pos -= 1;
        let digit = (value % base) as u8;
        buf[pos] = if digit < 10 {
            b'0' + digit
        } else {
            b'a' + (digit - 10)
        };
        value /= base;
    }
    String::from_utf8_lossy(&buf[pos..]).into_owned()
}

/// The base's all-ones digit, used for sign extension.
fn ones_digit(base: u32) -> char {
    match base {
        16 => 'f',
        8 => '7',
        _ => '1',
    }
}

/// Infinite two's-complement text for a negative value of magnitude `m`.
///
/// For an n-digit magnitude, renders `base^n - m` zero-padded to n digits,
/// strips all leading all-ones digits, and puts a single all-ones digit
/// back in front, behind the `..` marker. Examples in hex: 1 -> `..f`,
/// 16 -> `..f0`, 17 -> `..fef`.
fn dotted_complement(m: &BigUint, base: u32) -> String {
    let magnitude = m.to_str_radix(base);
    let ones = ones_digit(base);
    let complement = BigUint::from(base).pow(magnitude.len() as u32) - m;
    let body = complement.to_str_radix(base);

    let mut padded = String::with_capacity(magnitude.len());
    for _ in body.len()..magnitude.len() {
        padded.push('0');
    }
    padded.push_str(&body);

    let trimmed = padded.trim_start_matches(ones);
    let mut out = String::with_capacity(trimmed.len() + 3);
    out.push_str("..");
    out.push(ones);
    out.push_str(trimmed);
    out
}

/// Pad the digit text into the buffer per flags/width/precision.
///
/// Width bookkeeping deliberately runs in i64 so an absent width (-1) and
/// the sign/prefix/precision deductions can drive it negative, after which
/// every pad loop is a no-op. Precision is a minimum digit count; width
/// padding happens after precision padding. Dotted strings pad with `.`
/// when right-justified and get the pad run rewritten to the all-ones
/// digit at the end.
fn emit_padded(
    out: &mut OutBuf,
    dir: &Directive,
    sign: Option<u8>,
    prefix: &'static [u8],
    digits: &str,
    base: u32,
) {
    let flags = dir.flags;
    let s = digits.as_bytes();
    let dotted = s.first() == Some(&b'.');
    let len = s.len() as i64;

    let mut width = dir.width.unwrap_or(-1);
    width -= prefix.len() as i64;
    if sign.is_some() {
        width -= 1;
    }

    let has_prec = dir.precision.is_some();
    let mut prec = dir.precision.unwrap_or(-1);
    if prec < len {
        prec = len;
    }
    // Saturating: a parser-saturated precision must not wrap the counter.
    width = width.saturating_sub(prec);

    let mut dot_pos: Option<usize> = None;

    // Space padding goes before the sign; everything else after it.
    if !flags.zero_pad && !flags.left_justify && !dotted {
        pad_width(out, b' ', &mut width);
    }
    if let Some(sign) = sign {
        out.push(sign);
    }
    out.append(prefix);
    if !flags.left_justify {
        let fill = if dotted {
            // Rewrite the fill beyond the `..` marker later; when precision
            // exceeds the digit count the whole padded run is rewritten and
            // the marker disappears.
            dot_pos = Some(if has_prec && prec > len {
                out.len()
            } else {
                out.len() + 2
            });
            b'.'
        } else if flags.zero_pad {
            b'0'
        } else {
            b' '
        };
        pad_width(out, fill, &mut width);
    }
    let mut prec_fill = prec - len;
    pad_width(out, if dotted { b'.' } else { b'0' }, &mut prec_fill);
    out.append(s);
    pad_width(out, b' ', &mut width);

    if let Some(pos) = dot_pos {
        let ones = if dir.conversion == b'X' {
            b'F'
        } else {
            ones_digit(base) as u8
        };
        out.rewrite_dot_run(pos, ones);
    }
}

/// Emit `count` fill bytes if positive and exhaust the counter.
fn pad_width(out: &mut OutBuf, byte: u8, count: &mut i64) {
    if *count > 0 {
        out.pad(byte, *count as usize);
    }
    *count = -1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn dir(conversion: u8) -> Directive {
        Directive {
            flags: Flags::default(),
            width: None,
            precision: None,
            conversion,
        }
    }

    fn run(value: Value, d: &Directive) -> String {
        let mut out = OutBuf::new();
        format_integer(&value, d, &mut out).unwrap();
        out.finish()
    }

    #[test]
    fn test_render_u64_bases() {
        assert_eq!(render_u64(255, 16), "ff");
        assert_eq!(render_u64(255, 8), "377");
        assert_eq!(render_u64(5, 2), "101");
        assert_eq!(render_u64(0, 10), "0");
    }

    #[test]
    fn test_render_u64_round_trip() {
        for base in [2u32, 8, 10, 16] {
            for n in [0u64, 1, 7, 42, 4096, u64::from(u32::MAX), u64::MAX] {
                let text = render_u64(n, base);
                assert_eq!(u64::from_str_radix(&text, base), Ok(n));
            }
        }
    }

    #[test]
    fn test_dotted_complement_hex() {
        assert_eq!(dotted_complement(&BigUint::from(1u32), 16), "..f");
        assert_eq!(dotted_complement(&BigUint::from(2u32), 16), "..fe");
        assert_eq!(dotted_complement(&BigUint::from(5u32), 16), "..fb");
        assert_eq!(dotted_complement(&BigUint::from(16u32), 16), "..f0");
        assert_eq!(dotted_complement(&BigUint::from(17u32), 16), "..fef");
        assert_eq!(dotted_complement(&BigUint::from(256u32), 16), "..f00");
    }

    #[test]
    fn test_dotted_complement_octal_and_binary() {
        assert_eq!(dotted_complement(&BigUint::from(1u32), 8), "..7");
        assert_eq!(dotted_complement(&BigUint::from(8u32), 8), "..70");
        assert_eq!(dotted_complement(&BigUint::from(9u32), 8), "..767");
        assert_eq!(dotted_complement(&BigUint::from(1u32), 2), "..1");
        assert_eq!(dotted_complement(&BigUint::from(5u32), 2), "..1011");
    }

    #[test]
    fn test_signed_decimal_basic() {
        assert_eq!(run(Value::Int(42), &dir(b'd')), "42");
        assert_eq!(run(Value::Int(-42), &dir(b'd')), "-42");
        assert_eq!(run(Value::Int(i64::MIN), &dir(b'd')), "-9223372036854775808");
    }

    #[test]
    fn test_negative_hex_is_dotted() {
        assert_eq!(run(Value::Int(-1), &dir(b'x')), "..f");
        assert_eq!(run(Value::Int(-1), &dir(b'X')), "..F");
        assert_eq!(run(Value::Int(-1), &dir(b'o')), "..7");
        assert_eq!(run(Value::Int(-1), &dir(b'b')), "..1");
    }

    #[test]
    fn test_plus_flag_suppresses_dotted() {
        let mut d = dir(b'x');
        d.flags.force_sign = true;
        assert_eq!(run(Value::Int(-1), &d), "-1");
        assert_eq!(run(Value::Int(26), &d), "+1a");
    }

    #[test]
    fn test_unsigned_decimal_negative_like_signed() {
        assert_eq!(run(Value::Int(-7), &dir(b'u')), "-7");
    }

    #[test]
    fn test_zero_padded_dotted_rewrites_fill() {
        let mut d = dir(b'x');
        d.flags.zero_pad = true;
        d.width = Some(10);
        assert_eq!(run(Value::Int(-1), &d), "..ffffffff");
    }

    #[test]
    fn test_right_justified_dotted_pads_with_sign_digit() {
        let mut d = dir(b'x');
        d.width = Some(6);
        assert_eq!(run(Value::Int(-1), &d), "..ffff");
    }

    #[test]
    fn test_precision_fill_replaces_dotted_marker() {
        let mut d = dir(b'x');
        d.precision = Some(5);
        assert_eq!(run(Value::Int(-1), &d), "fffff");
    }

    #[test]
    fn test_precision_minimum_digits() {
        let mut d = dir(b'd');
        d.precision = Some(5);
        assert_eq!(run(Value::Int(42), &d), "00042");
    }

    #[test]
    fn test_alt_form_prefixes() {
        let mut d = dir(b'x');
        d.flags.alt_form = true;
        assert_eq!(run(Value::Int(255), &d), "0xff");
        let mut d = dir(b'o');
        d.flags.alt_form = true;
        assert_eq!(run(Value::Int(8), &d), "010");
        assert_eq!(run(Value::Int(0), &d), "00");
        let mut d = dir(b'b');
        d.flags.alt_form = true;
        assert_eq!(run(Value::Int(5), &d), "0b101");
    }

    #[test]
    fn test_alt_form_zero_pad_width() {
        let mut d = dir(b'x');
        d.flags.alt_form = true;
        d.flags.zero_pad = true;
        d.width = Some(10);
        assert_eq!(run(Value::Int(255), &d), "0x000000ff");
    }

    #[test]
    fn test_sign_placement_with_zero_pad() {
        let mut d = dir(b'd');
        d.flags.zero_pad = true;
        d.width = Some(5);
        assert_eq!(run(Value::Int(-42), &d), "-0042");
        d.flags.force_sign = true;
        assert_eq!(run(Value::Int(42), &d), "+0042");
    }

    #[test]
    fn test_space_pad_goes_before_sign() {
        let mut d = dir(b'd');
        d.flags.force_sign = true;
        d.width = Some(5);
        assert_eq!(run(Value::Int(42), &d), "  +42");
    }

    #[test]
    fn test_bignum_decimal_and_hex() {
        let big: BigInt = BigInt::from(10).pow(25);
        assert_eq!(
            run(Value::Big(big.clone()), &dir(b'd')),
            "10000000000000000000000000"
        );
        let neg = -BigInt::from(1) - (BigInt::from(1) << 64u32);
        // -(2^64 + 1): complement of the 17-digit hex magnitude, renormalized
        // to lead with the all-ones digit.
        assert_eq!(run(Value::Big(neg), &dir(b'x')), "..feffffffffffffffff");
    }

    #[test]
    fn test_bignum_negative_decimal() {
        let neg = -(BigInt::from(10).pow(21));
        assert_eq!(run(Value::Big(neg), &dir(b'd')), "-1000000000000000000000");
    }

    #[test]
    fn test_float_argument_truncates() {
        assert_eq!(run(Value::Float(3.9), &dir(b'd')), "3");
        assert_eq!(run(Value::Float(-3.9), &dir(b'd')), "-3");
    }

    #[test]
    fn test_string_argument_parses_radix() {
        assert_eq!(run(Value::from("0x1f"), &dir(b'd')), "31");
    }

    #[test]
    fn test_nan_is_invalid_argument() {
        let mut out = OutBuf::new();
        let err = format_integer(&Value::Float(f64::NAN), &dir(b'd'), &mut out).unwrap_err();
        assert!(matches!(err, FormatError::InvalidArgumentType { conversion: 'd', .. }));
    }
}
