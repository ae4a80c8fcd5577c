//! CLI entrypoint for the fmtforge conformance harness.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use fmtforge_harness::fixtures::{FixtureSet, builtin_suite};
use fmtforge_harness::report::render_report;
use fmtforge_harness::runner::TestRunner;

/// Conformance tooling for fmtforge.
#[derive(Debug, Parser)]
#[command(name = "fmtforge-harness")]
#[command(about = "Conformance testing harness for fmtforge")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the built-in fixture suite as a JSON file.
    Capture {
        /// Output path for the fixture JSON file.
        #[arg(long)]
        output: PathBuf,
    },
    /// Verify the rendering engine against a fixture file.
    Verify {
        /// Fixture JSON file (omit to use the built-in suite).
        #[arg(long)]
        fixture: Option<PathBuf>,
        /// Output report path (markdown). Prints to stdout when omitted.
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Capture { output } => {
            let suite = builtin_suite();
            suite.to_file(&output)?;
            eprintln!(
                "Wrote {} cases to {}",
                suite.cases.len(),
                output.display()
            );
        }
        Command::Verify { fixture, report } => {
            let suite = match fixture {
                Some(path) => {
                    eprintln!("Verifying against fixtures in {}", path.display());
                    FixtureSet::from_file(&path)?
                }
                None => {
                    eprintln!("Verifying against the built-in suite");
                    builtin_suite()
                }
            };

            let runner = TestRunner::new(suite.suite.clone());
            let results = runner.run(&suite);
            let failed = results.iter().filter(|r| !r.passed).count();

            let rendered = render_report(&suite.suite, &results);
            match report {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    eprintln!("Wrote report to {}", path.display());
                }
                None => println!("{rendered}"),
            }

            eprintln!("{} / {} cases passed", results.len() - failed, results.len());
            if failed > 0 {
                process::exit(1);
            }
        }
    }

    Ok(())
}
