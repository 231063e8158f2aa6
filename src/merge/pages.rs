//! Page reference rewriting
//!
//! Walks a navigation subtree and moves every entry of every `pages` array
//! under `docs/<namespace>/`. The walk descends into all object and array
//! values, not only `groups`, so nesting shapes the merge does not know about
//! are still covered. Only `pages` arrays are rewritten.

use serde_json::{Map, Value as JsonValue};

use super::{format_location, json_kind, PathSegment};
use crate::error::{Error, Result};

/// Root segment every namespaced page reference starts with.
pub const DOCS_ROOT: &str = "docs";

/// Move a single page reference under `namespace`.
///
/// One leading `docs/` is stripped before the prefix is added, so `"x"` and
/// `"docs/x"` both become `"docs/<namespace>/x"`. Slashes around the
/// namespace are ignored, and an empty namespace adds no segment.
///
/// # Examples
///
/// ```
/// use docs_aggregate::merge::namespace_page;
///
/// assert_eq!(namespace_page("guides/setup", "api"), "docs/api/guides/setup");
/// assert_eq!(namespace_page("docs/guides/setup", "api"), "docs/api/guides/setup");
/// ```
pub fn namespace_page(page: &str, namespace: &str) -> String {
    let rest = page
        .strip_prefix(DOCS_ROOT)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(page);
    let namespace = namespace.trim_matches('/');

    if namespace.is_empty() {
        format!("{}/{}", DOCS_ROOT, rest)
    } else {
        format!("{}/{}/{}", DOCS_ROOT, namespace, rest)
    }
}

/// Return a copy of `node` with every page reference namespaced.
///
/// `node` is typically one tab. Error locations are relative to `node`.
///
/// # Errors
///
/// Returns `Error::MalformedConfig` when a `pages` value is neither an array
/// nor `null`, or when one of its entries is not a string.
pub fn prefix_pages(node: &JsonValue, namespace: &str) -> Result<JsonValue> {
    let mut location = Vec::new();
    prefix_node(node, namespace, &mut location)
}

pub(super) fn prefix_node(
    node: &JsonValue,
    namespace: &str,
    location: &mut Vec<PathSegment>,
) -> Result<JsonValue> {
    match node {
        JsonValue::Object(map) => {
            let mut rewritten = Map::with_capacity(map.len());
            for (key, value) in map {
                location.push(PathSegment::Key(key.clone()));
                let value = if key == "pages" {
                    prefix_page_list(value, namespace, location)?
                } else {
                    prefix_node(value, namespace, location)?
                };
                location.pop();
                rewritten.insert(key.clone(), value);
            }
            Ok(JsonValue::Object(rewritten))
        }
        JsonValue::Array(items) => {
            let mut rewritten = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                location.push(PathSegment::Index(idx));
                rewritten.push(prefix_node(item, namespace, location)?);
                location.pop();
            }
            Ok(JsonValue::Array(rewritten))
        }
        scalar => Ok(scalar.clone()),
    }
}

fn prefix_page_list(
    pages: &JsonValue,
    namespace: &str,
    location: &mut Vec<PathSegment>,
) -> Result<JsonValue> {
    let entries = match pages {
        JsonValue::Null => return Ok(JsonValue::Null),
        JsonValue::Array(entries) => entries,
        other => {
            return Err(Error::malformed(
                format_location(location),
                format!("expected an array of page paths, found {}", json_kind(other)),
            ))
        }
    };

    let mut rewritten = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match entry {
            JsonValue::String(page) => {
                rewritten.push(JsonValue::String(namespace_page(page, namespace)));
            }
            other => {
                location.push(PathSegment::Index(idx));
                let err = Error::malformed(
                    format_location(location),
                    format!("expected a page path string, found {}", json_kind(other)),
                );
                location.pop();
                return Err(err);
            }
        }
    }
    Ok(JsonValue::Array(rewritten))
}
