//! Floating-point rendering.
//!
//! The engine's stand-in for a standard numeric-to-text routine: `%f`,
//! `%e`/`%E`, and `%g`/`%G` conversions with sign/width/flag handling.
//! Digit generation delegates to Rust's `format!` machinery; exactness
//! beyond that delegation is explicitly not guaranteed.

use crate::buffer::OutBuf;
use crate::directive::Directive;

/// Default precision when the directive does not specify one.
const DEFAULT_PRECISION: usize = 6;

/// Fixed safety margin for output-size estimates (sign, point, exponent).
const ESTIMATE_MARGIN: i64 = 20;

/// Estimate the rendered length for a float conversion, used to pre-size
/// the output buffer before the write.
///
/// Integer-part digits are estimated from the binary exponent via
/// `bits * 146 / 485 + 1` (146/485 approximates log10(2)).
pub(crate) fn estimate_len(value: f64, dir: &Directive) -> usize {
    let mut need: i64 = 0;
    if !matches!(dir.conversion, b'e' | b'E') && value.is_finite() && value != 0.0 {
        let bits = value.abs().log2().floor() as i64 + 1;
        if bits > 0 {
            need = bits * 146 / 485 + 1;
        }
    }
    need += dir.precision.unwrap_or(DEFAULT_PRECISION as i64).max(0);
    if let Some(width) = dir.width {
        if need < width {
            need = width;
        }
    }
    (need + ESTIMATE_MARGIN).max(0) as usize
}

/// Render a float per the directive's conversion, flags, width, precision.
pub(crate) fn format_float(value: f64, dir: &Directive, out: &mut OutBuf) {
    let flags = dir.flags;
    let precision = dir
        .precision
        .map(|p| p.max(0) as usize)
        .unwrap_or(DEFAULT_PRECISION);
    let uppercase = dir.conversion.is_ascii_uppercase();

    if value.is_nan() {
        let text: &[u8] = if uppercase { b"NAN" } else { b"nan" };
        return emit_special(text, dir, out);
    }
    if value.is_infinite() {
        let text: &[u8] = match (uppercase, value > 0.0) {
            (true, true) => b"INF",
            (true, false) => b"-INF",
            (false, true) => b"inf",
            (false, false) => b"-inf",
        };
        return emit_special(text, dir, out);
    }

    let negative = value.is_sign_negative();
    let abs = value.abs();

    let body = match dir.conversion.to_ascii_lowercase() {
        b'e' => format_e(abs, precision, uppercase),
        b'g' => format_g(abs, precision, uppercase, flags.alt_form),
        _ => format_f(abs, precision, flags.alt_form),
    };

    let sign = if negative {
        Some(b'-')
    } else if flags.force_sign {
        Some(b'+')
    } else if flags.space_sign {
        Some(b' ')
    } else {
        None
    };

    let content_len = usize::from(sign.is_some()) + body.len();
    let width = dir.width.unwrap_or(0).max(0) as usize;
    let pad_total = width.saturating_sub(content_len);

    if !flags.left_justify && !flags.zero_pad {
        out.pad(b' ', pad_total);
    }
    if let Some(sign) = sign {
        out.push(sign);
    }
    if !flags.left_justify && flags.zero_pad {
        out.pad(b'0', pad_total);
    }
    out.append(body.as_bytes());
    if flags.left_justify {
        out.pad(b' ', pad_total);
    }
}

/// nan/inf with width applied; zero-padding does not apply to specials.
fn emit_special(text: &[u8], dir: &Directive, out: &mut OutBuf) {
    let width = dir.width.unwrap_or(0).max(0) as usize;
    let pad_total = width.saturating_sub(text.len());
    if !dir.flags.left_justify {
        out.pad(b' ', pad_total);
    }
    out.append(text);
    if dir.flags.left_justify {
        out.pad(b' ', pad_total);
    }
}

/// `%f`: fixed-point decimal.
fn format_f(value: f64, precision: usize, alt_form: bool) -> String {
    let mut s = format!("{value:.precision$}");
    if precision == 0 && alt_form {
        s.push('.');
    }
    s
}

/// `%e` / `%E`: scientific notation with a two-digit minimum exponent.
fn format_e(value: f64, precision: usize, uppercase: bool) -> String {
    let e_char = if uppercase { 'E' } else { 'e' };
    if value == 0.0 {
        return if precision == 0 {
            format!("0{e_char}+00")
        } else {
            format!("0.{}{e_char}+00", "0".repeat(precision))
        };
    }

    let mut exp = value.log10().floor() as i32;
    let mut mantissa = value / 10f64.powi(exp);
    let mut mant_str = format!("{mantissa:.precision$}");
    // Rounding can push the mantissa to 10.0; renormalize.
    if mant_str.starts_with("10") {
        exp += 1;
        mantissa = value / 10f64.powi(exp);
        mant_str = format!("{mantissa:.precision$}");
    }

    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mant_str}{e_char}{sign}{:02}", exp.unsigned_abs())
}

/// `%g` / `%G`: `%f` or `%e` style, whichever suits the exponent, with
/// trailing zeros stripped unless `#` keeps them.
fn format_g(value: f64, precision: usize, uppercase: bool, alt_form: bool) -> String {
    let p = precision.max(1);

    if value == 0.0 {
        if alt_form {
            return if p <= 1 {
                "0.".to_owned()
            } else {
                format!("0.{}", "0".repeat(p - 1))
            };
        }
        return "0".to_owned();
    }

    let exp = value.log10().floor() as i32;
    if exp >= -4 && exp < p as i32 {
        let frac_digits = (p as i32 - 1 - exp).max(0) as usize;
        let mut s = format!("{value:.frac_digits$}");
        if !alt_form {
            strip_trailing_zeros(&mut s);
        }
        s
    } else {
        let mut s = format_e(value, p - 1, uppercase);
        if !alt_form {
            // Strip within the mantissa only.
            if let Some(e_pos) = s.bytes().position(|b| b == b'e' || b == b'E') {
                let mut mantissa = s[..e_pos].to_owned();
                let exponent = s[e_pos..].to_owned();
                strip_trailing_zeros(&mut mantissa);
                s = format!("{mantissa}{exponent}");
            }
        }
        s
    }
}

/// Remove trailing zeros after the decimal point, and a bare point.
fn strip_trailing_zeros(s: &mut String) {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
}
