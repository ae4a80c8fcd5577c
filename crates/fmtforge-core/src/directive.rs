//! Directive parsing.
//!
//! A directive is one `%`-introduced formatting instruction:
//!
//! ```text
//! "%" {flag} [index "$"] [width] ["." precision] conv
//! ```
//!
//! Flags may appear in any order and repetition. A digit run followed by
//! `$` rebases argument fetches for the current directive only; a digit run
//! alone sets width. `*` takes width (or precision, after `.`) from an
//! argument, itself optionally positional via `*N$`. Because `*` pulls
//! arguments mid-parse, parsing and argument fetching are interleaved, so
//! the parser borrows the directive's argument fetcher.

use crate::args::DirectiveArgs;
use crate::error::FormatError;

/// Flags parsed from a format directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub alt_form: bool,     // '#'
    pub left_justify: bool, // '-'
    pub force_sign: bool,   // '+'
    pub space_sign: bool,   // ' '
    pub zero_pad: bool,     // '0'
}

/// A parsed format directive. Transient: built, applied, discarded within
/// one iteration of the driver loop.
#[derive(Debug, Clone)]
pub struct Directive {
    pub flags: Flags,
    /// Resolved width; argument-supplied widths are already fetched.
    /// Negative `*` widths have been normalized to left-justify.
    pub width: Option<i64>,
    /// Resolved precision; `None` when absent or cancelled by a negative
    /// argument-supplied value.
    pub precision: Option<i64>,
    /// Conversion character.
    pub conversion: u8,
}

/// Result of parsing one directive.
#[derive(Debug)]
pub(crate) enum Token {
    /// Emit a literal `%` (from `%%`, `%<newline>`, or a trailing `%`).
    Percent,
    /// A full conversion directive.
    Directive(Directive),
}

/// Parse one directive. `pos` points at the first byte after `%` and is
/// advanced past everything the directive consumed.
pub(crate) fn parse_directive(
    template: &[u8],
    pos: &mut usize,
    args: &mut DirectiveArgs<'_, '_>,
) -> Result<Token, FormatError> {
    let len = template.len();
    let mut flags = Flags::default();
    let mut width: Option<i64> = None;
    let mut precision: Option<i64> = None;
    let mut has_width = false;
    let mut has_prec = false;

    loop {
        let ch = if *pos < len { template[*pos] } else { b'\0' };
        match ch {
            b' ' => {
                flags.space_sign = true;
                *pos += 1;
            }
            b'#' => {
                flags.alt_form = true;
                *pos += 1;
            }
            b'+' => {
                flags.force_sign = true;
                *pos += 1;
            }
            b'-' => {
                flags.left_justify = true;
                *pos += 1;
            }
            b'0' => {
                flags.zero_pad = true;
                *pos += 1;
            }
            b'1'..=b'9' => {
                let (n, after) = scan_number(template, *pos);
                if after >= len {
                    return Err(FormatError::malformed("malformed format string - %[0-9]"));
                }
                if template[after] == b'$' {
                    args.rebase(n as usize);
                    *pos = after + 1;
                } else {
                    width = Some(n);
                    has_width = true;
                    *pos = after;
                }
            }
            b'*' => {
                if has_width {
                    return Err(FormatError::malformed("width given twice"));
                }
                has_width = true;
                let mut w = aster_value(template, pos, args)?;
                if w < 0 {
                    flags.left_justify = true;
                    w = w.checked_neg().unwrap_or(i64::MAX);
                }
                width = Some(w);
            }
            b'.' => {
                if has_prec {
                    return Err(FormatError::malformed("precision given twice"));
                }
                has_prec = true;
                *pos += 1;
                if *pos < len && template[*pos] == b'*' {
                    let p = aster_value(template, pos, args)?;
                    if p < 0 {
                        // Negative precision is ignored, not an error.
                        has_prec = false;
                        precision = None;
                    } else {
                        precision = Some(p);
                    }
                } else {
                    let (n, after) = scan_number(template, *pos);
                    if after >= len {
                        return Err(FormatError::malformed("malformed format string - %.[0-9]"));
                    }
                    precision = Some(n);
                    *pos = after;
                }
            }
            b'\n' | b'\0' | b'%' => {
                if flags != Flags::default() || has_width || has_prec {
                    return Err(FormatError::malformed("illegal format character - %"));
                }
                // A newline stays behind and is copied as a literal; a real
                // `%` (or embedded NUL) is consumed.
                if ch != b'\n' && *pos < len {
                    *pos += 1;
                }
                return Ok(Token::Percent);
            }
            b'c' | b's' | b'd' | b'i' | b'o' | b'x' | b'X' | b'b' | b'u' | b'f' | b'e' | b'E'
            | b'g' | b'G' => {
                *pos += 1;
                return Ok(Token::Directive(Directive {
                    flags,
                    width,
                    precision,
                    conversion: ch,
                }));
            }
            other => {
                // A space never reaches here: the flag arm consumes it.
                return Err(if other.is_ascii_graphic() {
                    FormatError::MalformedTemplate(format!(
                        "malformed format string - %{}",
                        other as char
                    ))
                } else {
                    FormatError::malformed("malformed format string")
                });
            }
        }
    }
}

/// Scan a decimal digit run starting at `start`; returns the (saturating)
/// value and the position of the first non-digit.
fn scan_number(template: &[u8], start: usize) -> (i64, usize) {
    let mut n: i64 = 0;
    let mut i = start;
    while i < template.len() && template[i].is_ascii_digit() {
        n = n
            .saturating_mul(10)
            .saturating_add(i64::from(template[i] - b'0'));
        i += 1;
    }
    (n, i)
}

/// Resolve a `*` width/precision. `pos` points at the `*`.
///
/// `*N$` fetches argument N positionally. A bare `*` consumes the next
/// sequential argument; any digits that happened to follow the `*` are left
/// for the modifier loop to re-read (where they overwrite the width, as a
/// plain digit run would).
fn aster_value(
    template: &[u8],
    pos: &mut usize,
    args: &mut DirectiveArgs<'_, '_>,
) -> Result<i64, FormatError> {
    let digit_start = *pos + 1;
    let (n, after) = scan_number(template, digit_start);
    if after >= template.len() {
        return Err(FormatError::malformed("malformed format string - %*[0-9]"));
    }
    let value = if template[after] == b'$' {
        *pos = after + 1;
        args.at(n as usize)?
    } else {
        *pos = digit_start;
        args.fetch()?
    };
    value
        .as_width_int()
        .ok_or(FormatError::InvalidArgumentType {
            conversion: '*',
            expected: "integer",
        })
}
