//! Fixture execution engine.

use crate::fixtures::{FixtureCase, FixtureSet};
use fmtforge_core::{Value, render};

/// Outcome of one verified fixture case.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    pub diff: Option<String>,
}

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set.cases.iter().map(execute_case).collect()
    }
}

fn execute_case(case: &FixtureCase) -> VerificationResult {
    let expected = match (&case.expected_output, &case.expected_error) {
        (Some(out), _) => out.clone(),
        (None, Some(err)) => format!("error: {err}"),
        (None, None) => "error: fixture has no expectation".to_owned(),
    };

    let actual = match decode_args(case) {
        Ok(args) => match render(&case.template, &args) {
            Ok(out) => out,
            Err(err) => format!("error: {err}"),
        },
        Err(err) => format!("error: {err}"),
    };

    let passed = actual == expected;
    VerificationResult {
        case_name: case.name.clone(),
        passed,
        diff: if passed {
            None
        } else {
            Some(render_diff(&expected, &actual))
        },
        expected,
        actual,
    }
}

fn decode_args(case: &FixtureCase) -> Result<Vec<Value>, crate::HarnessError> {
    case.args.iter().map(|arg| arg.to_value()).collect()
}

/// Two-line expected/actual diff for failure output.
pub fn render_diff(expected: &str, actual: &str) -> String {
    format!("- {expected:?}\n+ {actual:?}")
}
