//! Markdown conformance report generation.

use crate::runner::VerificationResult;
use std::fmt::Write as _;

/// Render a markdown report for a completed campaign.
#[must_use]
pub fn render_report(campaign: &str, results: &[VerificationResult]) -> String {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = total - passed;

    let mut out = String::new();
    let _ = writeln!(out, "# Conformance report: {campaign}");
    let _ = writeln!(out);
    let _ = writeln!(out, "- total: {total}");
    let _ = writeln!(out, "- passed: {passed}");
    let _ = writeln!(out, "- failed: {failed}");
    let _ = writeln!(out);
    let _ = writeln!(out, "| case | status |");
    let _ = writeln!(out, "|------|--------|");
    for result in results {
        let status = if result.passed { "pass" } else { "FAIL" };
        let _ = writeln!(out, "| {} | {} |", result.case_name, status);
    }

    let failures: Vec<_> = results.iter().filter(|r| !r.passed).collect();
    if !failures.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "## Failures");
        for result in &failures {
            let _ = writeln!(out);
            let _ = writeln!(out, "### {}", result.case_name);
            let _ = writeln!(out);
            let _ = writeln!(out, "```");
            if let Some(diff) = &result.diff {
                let _ = writeln!(out, "{diff}");
            }
            let _ = writeln!(out, "```");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> VerificationResult {
        VerificationResult {
            case_name: name.to_owned(),
            passed,
            expected: "a".to_owned(),
            actual: if passed { "a" } else { "b" }.to_owned(),
            diff: if passed {
                None
            } else {
                Some("- \"a\"\n+ \"b\"".to_owned())
            },
        }
    }

    #[test]
    fn test_report_counts() {
        let report = render_report("demo", &[result("ok", true), result("bad", false)]);
        assert!(report.contains("- total: 2"));
        assert!(report.contains("- passed: 1"));
        assert!(report.contains("- failed: 1"));
        assert!(report.contains("| bad | FAIL |"));
        assert!(report.contains("### bad"));
    }

    #[test]
    fn test_clean_report_has_no_failure_section() {
        let report = render_report("demo", &[result("ok", true)]);
        assert!(!report.contains("## Failures"));
    }
}
