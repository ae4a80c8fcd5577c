//! Fixture loading and management.

use std::path::Path;
use std::str::FromStr;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::HarnessError;
use fmtforge_core::Value;

/// A formatting argument in fixture form.
///
/// Plain JSON numbers and strings map directly; arbitrary-precision
/// integers are written as `{"big": "<decimal>"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgSpec {
    Int(i64),
    Float(f64),
    Str(String),
    Big { big: String },
}

impl ArgSpec {
    /// Convert to an engine value.
    pub fn to_value(&self) -> Result<Value, HarnessError> {
        match self {
            ArgSpec::Int(v) => Ok(Value::Int(*v)),
            ArgSpec::Float(v) => Ok(Value::Float(*v)),
            ArgSpec::Str(s) => Ok(Value::Str(s.clone())),
            ArgSpec::Big { big } => BigInt::from_str(big)
                .map(Value::Big)
                .map_err(|e| HarnessError::BadFixture(format!("bad bignum {big:?}: {e}"))),
        }
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Format template under test.
    pub template: String,
    /// Arguments passed to the engine.
    #[serde(default)]
    pub args: Vec<ArgSpec>,
    /// Expected rendered output (for success cases).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    /// Expected error message (for fault cases).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<String>,
}

/// A collection of fixture cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Suite name.
    pub suite: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Write fixture set to a file path.
    pub fn to_file(&self, path: &Path) -> Result<(), HarnessError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn pass(name: &str, template: &str, args: Vec<ArgSpec>, expected: &str) -> FixtureCase {
    FixtureCase {
        name: name.to_owned(),
        template: template.to_owned(),
        args,
        expected_output: Some(expected.to_owned()),
        expected_error: None,
    }
}

fn fault(name: &str, template: &str, args: Vec<ArgSpec>, message: &str) -> FixtureCase {
    FixtureCase {
        name: name.to_owned(),
        template: template.to_owned(),
        args,
        expected_output: None,
        expected_error: Some(message.to_owned()),
    }
}

/// The curated built-in conformance suite.
pub fn builtin_suite() -> FixtureSet {
    use ArgSpec::{Big, Float, Int, Str};
    let s = |v: &str| Str(v.to_owned());

    FixtureSet {
        version: "1".to_owned(),
        suite: "sprintf-conformance".to_owned(),
        cases: vec![
            pass("literal_identity", "no directives", vec![], "no directives"),
            pass("percent_escape", "100%%", vec![], "100%"),
            pass("width_right", "%5d", vec![Int(42)], "   42"),
            pass("width_left", "%-5d", vec![Int(42)], "42   "),
            pass("width_zero", "%05d", vec![Int(42)], "00042"),
            pass("force_sign", "%+d", vec![Int(42)], "+42"),
            pass("space_sign", "% d", vec![Int(42)], " 42"),
            pass("negative_sign", "%+d", vec![Int(-42)], "-42"),
            pass("hex_lower", "%x", vec![Int(255)], "ff"),
            pass("hex_upper_alt", "%#X", vec![Int(255)], "0XFF"),
            pass("octal_alt", "%#o", vec![Int(8)], "010"),
            pass("binary", "%b", vec![Int(5)], "101"),
            pass("dotted_hex", "%x", vec![Int(-1)], "..f"),
            pass("dotted_hex_wide", "%010x", vec![Int(-1)], "..ffffffff"),
            pass("dotted_octal", "%o", vec![Int(-9)], "..767"),
            pass("dotted_binary", "%b", vec![Int(-5)], "..1011"),
            pass("dotted_precision", "%.5x", vec![Int(-1)], "fffff"),
            pass(
                "bignum_decimal",
                "%d",
                vec![Big {
                    big: "340282366920938463463374607431768211456".to_owned(),
                }],
                "340282366920938463463374607431768211456",
            ),
            pass(
                "bignum_negative_hex",
                "%x",
                vec![Big {
                    big: "-18446744073709551616".to_owned(),
                }],
                "..f0000000000000000",
            ),
            pass(
                "positional_reorder",
                "%2$s %1$s",
                vec![s("a"), s("b")],
                "b a",
            ),
            pass(
                "positional_keeps_sequence",
                "%2$s %s",
                vec![s("x"), s("y")],
                "y x",
            ),
            pass(
                "star_precision",
                "%.*f",
                vec![Int(2), Float(3.14159)],
                "3.14",
            ),
            pass("star_width", "%*d", vec![Int(5), Int(42)], "   42"),
            pass(
                "negative_star_width",
                "%*d",
                vec![Int(-5), Int(42)],
                "42   ",
            ),
            pass(
                "digit_width_overwrites_star",
                "%*5d",
                vec![Int(99), Int(42)],
                "   42",
            ),
            pass("float_default", "%f", vec![Float(3.5)], "3.500000"),
            pass("float_exp", "%.2e", vec![Float(12345.0)], "1.23e+04"),
            pass("float_general", "%g", vec![Float(100.0)], "100"),
            pass("char_width", "%5c", vec![Int(65)], "    A"),
            pass("string_truncate", "%.3s", vec![s("hello")], "hel"),
            pass("string_of_int", "%s", vec![Int(12)], "12"),
            pass("int_of_string_radix", "%d", vec![s("0x1f")], "31"),
            pass("int_of_float", "%d", vec![Float(3.9)], "3"),
            fault("underflow", "%s", vec![], "too few arguments"),
            fault(
                "unknown_conversion",
                "%q",
                vec![Int(1)],
                "malformed format string - %q",
            ),
            fault(
                "truncated_width",
                "%5",
                vec![Int(1)],
                "malformed format string - %[0-9]",
            ),
            fault(
                "char_of_string",
                "%c",
                vec![s("nope")],
                "invalid argument type for %c: expected character code",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_suite_round_trips_through_json() {
        let suite = builtin_suite();
        let json = suite.to_json().unwrap();
        let back = FixtureSet::from_json(&json).unwrap();
        assert_eq!(back.cases.len(), suite.cases.len());
        assert_eq!(back.suite, suite.suite);
    }

    #[test]
    fn test_arg_spec_conversions() {
        assert_eq!(ArgSpec::Int(3).to_value().unwrap(), Value::Int(3));
        assert_eq!(
            ArgSpec::Str("x".into()).to_value().unwrap(),
            Value::from("x")
        );
        let big = ArgSpec::Big {
            big: "123456789012345678901234567890".into(),
        };
        assert!(matches!(big.to_value().unwrap(), Value::Big(_)));
        let bad = ArgSpec::Big { big: "12x".into() };
        assert!(bad.to_value().is_err());
    }
}
