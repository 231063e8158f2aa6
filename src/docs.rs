//! Reading and writing `docs.json`
//!
//! The configuration is handled as an untyped JSON value so that fields the
//! merge does not know about survive a read/merge/write cycle unchanged. Key
//! order is preserved (`serde_json`'s `preserve_order` feature), which keeps
//! the diff of the committed file limited to the navigation.

use std::fs;
use std::path::Path;

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

/// Read a documentation configuration from disk.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read and `Error::ConfigParse`
/// if it is not valid JSON.
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<JsonValue> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    parse_config(&content).map_err(|err| Error::ConfigParse {
        message: format!("Failed to parse {}: {}", path.display(), err),
        hint: None,
    })
}

/// Parse a documentation configuration from a string.
pub fn parse_config(content: &str) -> Result<JsonValue> {
    Ok(serde_json::from_str(content)?)
}

/// Render a configuration as 2-space indented JSON with a trailing newline.
pub fn render_config(config: &JsonValue) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(config)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Write a configuration to disk, replacing any existing file.
pub fn write_config<P: AsRef<Path>>(path: P, config: &JsonValue) -> Result<()> {
    fs::write(path, render_config(config)?)?;
    Ok(())
}
