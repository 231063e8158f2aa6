//! Navigation merge for documentation site configurations
//!
//! This module folds the navigation of subsidiary `docs.json` configurations
//! into a main configuration. The main configuration is authoritative: its
//! top-level fields and existing tabs are kept verbatim, and the subsidiary's
//! tabs are appended after every page reference in them has been moved under
//! a per-repository namespace.
//!
//! ## Example
//!
//! ```
//! use docs_aggregate::merge::merge_configs;
//! use serde_json::json;
//!
//! let main = json!({"navigation": {"tabs": [{"pages": ["A"]}]}});
//! let sub = json!({"navigation": {"tabs": [{"pages": ["B", "docs/C"]}]}});
//!
//! let merged = merge_configs(&main, &sub, "prefix").unwrap();
//! assert_eq!(merged["navigation"]["tabs"][0]["pages"], json!(["A"]));
//! assert_eq!(
//!     merged["navigation"]["tabs"][1]["pages"],
//!     json!(["docs/prefix/B", "docs/prefix/C"])
//! );
//! ```

mod pages;

use log::debug;
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};

pub use pages::{namespace_page, prefix_pages, DOCS_ROOT};

/// Represents a segment in the location of a value inside a configuration
///
/// Locations are reported in errors as `navigation.tabs[1].groups[0].pages[2]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A named key for accessing object members
    Key(String),
    /// A numeric index for accessing array elements
    Index(usize),
}

/// Render a location as dotted/bracket notation.
///
/// An empty location renders as `<root>`.
pub fn format_location(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }

    let mut rendered = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !rendered.is_empty() {
                    rendered.push('.');
                }
                rendered.push_str(key);
            }
            PathSegment::Index(idx) => {
                rendered.push_str(&format!("[{}]", idx));
            }
        }
    }
    rendered
}

/// Name of a JSON value's type, used in diagnostics.
pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Merge the navigation of `sub` into `main`.
///
/// The result is a freshly built configuration:
/// - every top-level field of `main`, in `main`'s order; none of `sub`'s
///   fields other than its tabs survive
/// - `navigation` holds `main.navigation`'s fields, with `tabs` replaced by
///   `main`'s tabs followed by `sub`'s tabs, the latter rewritten by
///   [`prefix_pages`] under `namespace`
///
/// A missing or `null` `navigation`/`tabs` on either side counts as no tabs,
/// and a `null` `main` counts as an empty object.
///
/// # Errors
///
/// Returns `Error::MalformedConfig` if either configuration is not an object,
/// if `navigation` is not an object, if `tabs` is not an array of objects, or
/// if a `pages` entry in `sub` is not a string.
pub fn merge_configs(main: &JsonValue, sub: &JsonValue, namespace: &str) -> Result<JsonValue> {
    let mut merged = match main {
        JsonValue::Object(map) => map.clone(),
        JsonValue::Null => Map::new(),
        other => {
            return Err(Error::malformed(
                "<root>",
                format!("main configuration must be an object, found {}", json_kind(other)),
            ))
        }
    };
    if !(sub.is_object() || sub.is_null()) {
        return Err(Error::malformed(
            "<root>",
            format!(
                "configuration for '{}' must be an object, found {}",
                namespace,
                json_kind(sub)
            ),
        ));
    }

    let sub_subject = format!("configuration for '{}'", namespace);
    let main_tabs = navigation_tabs(main).map_err(|e| within(e, "main configuration"))?;
    let sub_tabs = navigation_tabs(sub).map_err(|e| within(e, &sub_subject))?;

    let mut tabs = Vec::with_capacity(main_tabs.len() + sub_tabs.len());
    tabs.extend(main_tabs.iter().cloned());

    let mut location = vec![
        PathSegment::Key("navigation".to_string()),
        PathSegment::Key("tabs".to_string()),
    ];
    for (idx, tab) in sub_tabs.iter().enumerate() {
        location.push(PathSegment::Index(idx));
        let tab = pages::prefix_node(tab, namespace, &mut location)
            .map_err(|e| within(e, &sub_subject))?;
        tabs.push(tab);
        location.pop();
    }

    debug!(
        "Merged {} tab(s) under namespace '{}' after {} existing tab(s)",
        sub_tabs.len(),
        namespace,
        main_tabs.len()
    );

    let mut navigation = match main.get("navigation") {
        Some(JsonValue::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    navigation.insert("tabs".to_string(), JsonValue::Array(tabs));
    merged.insert("navigation".to_string(), JsonValue::Object(navigation));

    Ok(JsonValue::Object(merged))
}

/// Fold a sequence of `(namespace, configuration)` pairs into `main`.
///
/// Each merge's output is the next merge's main input, strictly in iteration
/// order, so the final tab list is `main`'s tabs followed by each
/// subsidiary's tabs in turn. The first malformed configuration aborts the
/// whole fold; no partially merged result is returned.
pub fn merge_all<'a, I>(main: JsonValue, subs: I) -> Result<JsonValue>
where
    I: IntoIterator<Item = (&'a str, &'a JsonValue)>,
{
    subs.into_iter()
        .try_fold(main, |acc, (namespace, sub)| merge_configs(&acc, sub, namespace))
}

/// Number of tabs in a configuration's navigation.
///
/// # Errors
///
/// Fails on the same shape problems as [`merge_configs`].
pub fn tab_count(config: &JsonValue) -> Result<usize> {
    navigation_tabs(config).map(|tabs| tabs.len())
}

/// Name the configuration a shape error was found in.
fn within(err: Error, subject: &str) -> Error {
    match err {
        Error::MalformedConfig { location, message } => Error::MalformedConfig {
            location,
            message: format!("{} (in {})", message, subject),
        },
        other => other,
    }
}

/// Borrow the tabs of a configuration, checking their shape.
fn navigation_tabs(config: &JsonValue) -> Result<&[JsonValue]> {
    let navigation = match config.get("navigation") {
        None | Some(JsonValue::Null) => return Ok(&[]),
        Some(JsonValue::Object(map)) => map,
        Some(other) => {
            return Err(Error::malformed(
                "navigation",
                format!("expected an object, found {}", json_kind(other)),
            ))
        }
    };

    let tabs = match navigation.get("tabs") {
        None | Some(JsonValue::Null) => return Ok(&[]),
        Some(JsonValue::Array(tabs)) => tabs,
        Some(other) => {
            return Err(Error::malformed(
                "navigation.tabs",
                format!("expected an array of tabs, found {}", json_kind(other)),
            ))
        }
    };

    if let Some((idx, tab)) = tabs.iter().enumerate().find(|(_, tab)| !tab.is_object()) {
        return Err(Error::malformed(
            format!("navigation.tabs[{}]", idx),
            format!("expected a tab object, found {}", json_kind(tab)),
        ));
    }

    Ok(tabs)
}
