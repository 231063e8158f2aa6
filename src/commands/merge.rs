//! # Merge Command Implementation
//!
//! This module implements the `merge` subcommand, which runs the navigation
//! merge on local files. It performs the same fold as `run` but involves no
//! git at all, which makes it useful for previewing the aggregated
//! navigation or for wiring the merge into another pipeline.
//!
//! ```bash
//! docs-aggregate merge --main docs.json \
//!     --sub lenders-api=../lenders-api/docs/docs.json \
//!     --sub borrowers-api=../borrowers-api/docs.json
//! ```
//!
//! Subsidiaries are merged in the order they are given.

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::path::PathBuf;

use docs_aggregate::defaults::DOCS_CONFIG_FILE;
use docs_aggregate::docs;
use docs_aggregate::merge::merge_all;

/// Merge local docs.json files without touching git
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Main configuration the other navigations are appended to
    #[arg(short, long, value_name = "FILE", default_value = DOCS_CONFIG_FILE)]
    pub main: PathBuf,

    /// Subsidiary configuration and the namespace its pages move under; repeatable
    #[arg(short, long = "sub", value_name = "NAMESPACE=FILE", value_parser = parse_sub)]
    pub subs: Vec<(String, PathBuf)>,

    /// Write the merged configuration here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

fn parse_sub(value: &str) -> std::result::Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((namespace, path)) if !path.is_empty() => {
            Ok((namespace.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAMESPACE=FILE, got '{}'", value)),
    }
}

/// Execute the `merge` command.
pub fn execute(args: MergeArgs) -> Result<()> {
    let main = docs::read_config(&args.main)
        .with_context(|| format!("Failed to load main configuration {}", args.main.display()))?;

    let mut subs = Vec::with_capacity(args.subs.len());
    for (namespace, path) in &args.subs {
        let sub = docs::read_config(path)
            .with_context(|| format!("Failed to load configuration for '{}'", namespace))?;
        subs.push((namespace.as_str(), sub));
    }

    let merged = merge_all(main, subs.iter().map(|(ns, sub)| (*ns, sub)))?;

    match &args.output {
        Some(output) => {
            docs::write_config(output, &merged)?;
            info!("Wrote merged configuration to {}", output.display());
        }
        None => print!("{}", docs::render_config(&merged)?),
    }

    Ok(())
}
