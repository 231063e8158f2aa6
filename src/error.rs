//! # Error Handling
//!
//! This module defines the centralized error type for the `docs-aggregate`
//! library. It uses `thiserror` to describe every failure the aggregation
//! can run into, from a malformed navigation tree to a failed `git push`.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failure modes. Each variant carries enough
//!   context (a location inside the configuration, the git command that
//!   failed, a redacted clone URL) to diagnose the problem from CI logs.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The binary wraps these errors with `anyhow` at the command layer.

use thiserror::Error;

/// Main error type for docs-aggregate operations
#[derive(Error, Debug)]
pub enum Error {
    /// The navigation tree of a configuration does not have the expected
    /// shape (a `pages` entry that is not a string, `tabs` that is not an
    /// array of objects, and so on).
    ///
    /// `location` is a dotted path such as `navigation.tabs[1].pages[0]`.
    #[error("Malformed configuration at {location}: {message}")]
    MalformedConfig { location: String, message: String },

    /// An action input or the repository list could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the input
        hint: Option<String>,
    },

    /// A git command could not be started or exited unsuccessfully.
    #[error("Git command failed: git {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// Cloning a subsidiary repository failed.
    ///
    /// The URL never carries credentials.
    #[error("Git clone error for {url}@{r#ref}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        r#ref: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A checkout could not be rearranged on disk.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a [`Error::MalformedConfig`] at `location`.
    pub fn malformed(location: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedConfig {
            location: location.into(),
            message: message.into(),
        }
    }
}
