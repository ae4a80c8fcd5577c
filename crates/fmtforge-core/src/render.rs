//! The rendering driver.
//!
//! Scans the template left to right: literal byte runs are bulk-copied to
//! the output buffer; each `%` hands off to the directive parser, whose
//! result is dispatched to the integer, float, string, or char path. The
//! whole call either completes or fails with the first fault encountered.

use crate::args::{ArgCursor, DirectiveArgs};
use crate::buffer::OutBuf;
use crate::directive::{self, Directive, Token};
use crate::error::FormatError;
use crate::num;
use crate::num::float;
use crate::value::Value;

/// Render `template` against `args`.
///
/// ```
/// use fmtforge_core::{render, Value};
///
/// let out = render("%05d bottles of %s", &[Value::Int(99), Value::from("beer")]).unwrap();
/// assert_eq!(out, "00099 bottles of beer");
/// ```
pub fn render(template: &str, args: &[Value]) -> Result<String, FormatError> {
    let tpl = template.as_bytes();
    let mut out = OutBuf::new();
    let mut cursor = ArgCursor::new(args);
    let mut pos = 0;

    while pos < tpl.len() {
        match tpl[pos..].iter().position(|&b| b == b'%') {
            Some(offset) => {
                out.append(&tpl[pos..pos + offset]);
                pos += offset + 1;
            }
            None => {
                out.append(&tpl[pos..]);
                break;
            }
        }

        let mut fetch = DirectiveArgs::new(&mut cursor);
        match directive::parse_directive(tpl, &mut pos, &mut fetch)? {
            Token::Percent => out.push(b'%'),
            Token::Directive(dir) => apply(&dir, &mut fetch, &mut out)?,
        }
    }

    Ok(out.finish())
}

/// Apply one parsed directive: fetch its value argument and write the
/// padded rendering.
fn apply(
    dir: &Directive,
    args: &mut DirectiveArgs<'_, '_>,
    out: &mut OutBuf,
) -> Result<(), FormatError> {
    match dir.conversion {
        b'c' => {
            let value = args.fetch()?;
            let code = value
                .as_char_code()
                .ok_or(FormatError::InvalidArgumentType {
                    conversion: 'c',
                    expected: "character code",
                })?;
            let width = dir.width.unwrap_or(0);
            let pad = (width - 1).max(0) as usize;
            if !dir.flags.left_justify {
                out.pad(b' ', pad);
            }
            out.push(code);
            if dir.flags.left_justify {
                out.pad(b' ', pad);
            }
            Ok(())
        }
        b's' => {
            let value = args.fetch()?;
            let text = value.as_text();
            let bytes = text.as_bytes();
            let mut take = bytes.len();
            if let Some(precision) = dir.precision {
                take = take.min(precision.max(0) as usize);
            }
            let width = dir.width.unwrap_or(-1);
            let pad = (width - take as i64).max(0) as usize;
            if !dir.flags.left_justify {
                out.pad(b' ', pad);
            }
            out.append(&bytes[..take]);
            if dir.flags.left_justify {
                out.pad(b' ', pad);
            }
            Ok(())
        }
        b'd' | b'i' | b'o' | b'x' | b'X' | b'b' | b'u' => {
            let value = args.fetch()?;
            num::format_integer(value, dir, out)
        }
        b'f' | b'e' | b'E' | b'g' | b'G' => {
            let value = args.fetch()?;
            let fval = value.as_float();
            out.reserve(float::estimate_len(fval, dir));
            float::format_float(fval, dir, out);
            Ok(())
        }
        other => Err(FormatError::MalformedTemplate(format!(
            "malformed format string - %{}",
            other as char
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(template: &str, args: &[Value]) -> String {
        render(template, args).unwrap()
    }

    #[test]
    fn test_literal_pass_through() {
        assert_eq!(ok("no directives here", &[]), "no directives here");
        assert_eq!(ok("", &[]), "");
    }

    #[test]
    fn test_percent_escape() {
        assert_eq!(ok("100%%", &[]), "100%");
        assert_eq!(ok("%%%%", &[]), "%%");
    }

    #[test]
    fn test_trailing_percent_is_literal() {
        assert_eq!(ok("abc%", &[]), "abc%");
    }

    #[test]
    fn test_percent_newline_passes_through() {
        assert_eq!(ok("a%\nb", &[]), "a%\nb");
    }

    #[test]
    fn test_mixed_directives() {
        assert_eq!(
            ok("%s is %d years old", &[Value::from("pat"), Value::Int(7)]),
            "pat is 7 years old"
        );
    }

    #[test]
    fn test_char_width() {
        assert_eq!(ok("%5c", &[Value::Int(65)]), "    A");
        assert_eq!(ok("%-5c|", &[Value::Int(65)]), "A    |");
        assert_eq!(ok("%c", &[Value::Int(0x141)]), "A");
    }

    #[test]
    fn test_string_precision_truncates() {
        assert_eq!(ok("%.3s", &[Value::from("hello")]), "hel");
        assert_eq!(ok("%7.3s", &[Value::from("hello")]), "    hel");
        assert_eq!(ok("%-7.3s|", &[Value::from("hello")]), "hel    |");
    }

    #[test]
    fn test_width_from_argument_chain() {
        // The aster width is consumed before the value argument.
        assert_eq!(ok("%*d", &[Value::Int(5), Value::Int(42)]), "   42");
        assert_eq!(ok("%.*f", &[Value::Int(2), Value::Float(3.14159)]), "3.14");
    }

    #[test]
    fn test_positional_reordering() {
        assert_eq!(
            ok("%2$s %1$s", &[Value::from("a"), Value::from("b")]),
            "b a"
        );
    }

    #[test]
    fn test_positional_then_sequential() {
        // Positional fetches never disturb sequential consumption.
        assert_eq!(
            ok("%2$s %s", &[Value::from("first"), Value::from("second")]),
            "second first"
        );
    }

    #[test]
    fn test_underflow() {
        assert_eq!(
            render("%s", &[]).unwrap_err(),
            FormatError::ArgumentUnderflow
        );
        assert_eq!(
            render("%d %d", &[Value::Int(1)]).unwrap_err(),
            FormatError::ArgumentUnderflow
        );
    }

    #[test]
    fn test_trailing_arguments_accepted() {
        assert_eq!(ok("%d", &[Value::Int(1), Value::Int(2)]), "1");
    }

    #[test]
    fn test_rendering_is_stateless() {
        let args = [Value::Int(3)];
        assert_eq!(ok("x=%d", &args), ok("x=%d", &args));
    }
}
