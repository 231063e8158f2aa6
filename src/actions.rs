//! # GitHub Actions Integration
//!
//! When the tool runs as a workflow step, a few things are reported through
//! workflow commands printed to stdout:
//!
//! - secrets derived at runtime are registered with `::add-mask::` so the
//!   runner redacts them from the log
//! - a failed run is annotated with `::error::`
//!
//! Outside of Actions (`GITHUB_ACTIONS` unset) these are no-ops, so local
//! runs keep a clean stdout.

use std::env;

/// Whether the process runs inside a GitHub Actions job.
pub fn is_github_actions() -> bool {
    env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Ask the runner to redact `secret` from the job log.
pub fn add_mask(secret: &str) {
    if is_github_actions() && !secret.is_empty() {
        println!("{}", mask_command(secret));
    }
}

/// Annotate the job with an error.
pub fn report_error(message: &str) {
    if is_github_actions() {
        println!("{}", error_command(message));
    }
}

/// The `::add-mask::` workflow command for `secret`.
pub fn mask_command(secret: &str) -> String {
    format!("::add-mask::{}", escape_data(secret))
}

/// The `::error::` workflow command for `message`.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Escape a workflow command payload; line breaks would end the command.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
