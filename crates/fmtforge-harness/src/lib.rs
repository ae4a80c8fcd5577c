//! Conformance testing harness for fmtforge.
//!
//! This crate provides:
//! - Fixture management: format templates + arguments + expected output
//!   as JSON reference data
//! - A runner that renders each case through `fmtforge-core` and collects
//!   verification results
//! - Report generation: human-readable markdown conformance reports

#![forbid(unsafe_code)]

pub mod fixtures;
pub mod report;
pub mod runner;

pub use fixtures::{ArgSpec, FixtureCase, FixtureSet};
pub use runner::{TestRunner, VerificationResult};

use thiserror::Error;

/// Harness-level failures (fixture I/O and decoding).
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("fixture I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bad fixture: {0}")]
    BadFixture(String),
}
