//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Docs Aggregate - Merge documentation navigation from several repositories
#[derive(Parser, Debug)]
#[command(name = "docs-aggregate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    ///
    /// `RUST_LOG`, when set, takes precedence.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone the listed repositories, merge their navigation into docs.json, commit and push
    Run(commands::run::RunArgs),

    /// Merge local docs.json files without touching git
    Merge(commands::merge::MergeArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Run(args) => commands::run::execute(args),
            Commands::Merge(args) => commands::merge::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Send log records to stderr, filtered by `RUST_LOG` or `level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second initialization (tests calling execute twice) is harmless
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
