//! # Documentation Aggregation CLI
//!
//! This is the binary entry point for the `docs-aggregate` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments and action inputs using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Reporting top-level failures, including as a GitHub Actions annotation
//!   when running inside a workflow.
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
        .inspect_err(|err| docs_aggregate::actions::report_error(&format!("{:#}", err)))
}
