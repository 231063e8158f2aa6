//! Default values for docs-aggregate configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Name of the documentation configuration file in every checkout.
pub const DOCS_CONFIG_FILE: &str = "docs.json";

/// Host subsidiary repositories are cloned from.
///
/// Overridden by `--server-url` or `GITHUB_SERVER_URL`.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Commit message for the aggregated `docs.json`.
pub const DEFAULT_COMMIT_MESSAGE: &str = "update";

/// Identity the aggregation commit is authored with.
pub const DEFAULT_AUTHOR_NAME: &str = "docs-aggregate[bot]";

/// Email the aggregation commit is authored with.
pub const DEFAULT_AUTHOR_EMAIL: &str = "docs-aggregate@users.noreply.github.com";

/// Scratch directory used while hoisting a subdirectory out of a clone.
pub const RELOCATION_DIR: &str = "temporary-docs-dir";
