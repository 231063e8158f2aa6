//! # Action Inputs and Repository List
//!
//! This module defines the repository descriptors the aggregation works
//! through, and the parsing rules for the inputs the CI step receives.
//!
//! ## Repository List
//!
//! The `repos` input is a YAML sequence. Each entry names a GitHub-style
//! repository and, optionally, the ref to clone and the subdirectory of the
//! clone that holds its `docs.json`:
//!
//! ```yaml
//! - owner: acme
//!   repo: lenders-api
//!   ref: v2
//!   subdirectory: docs
//! - owner: acme
//!   repo: borrowers-api
//! ```
//!
//! Entries are processed in the order they appear, which is also the order
//! their tabs are appended to the navigation.
//!
//! ## Boolean Inputs
//!
//! Boolean inputs follow the YAML 1.2 core schema spelling used by GitHub
//! Actions: `true`, `True`, `TRUE`, `false`, `False`, `FALSE`.

use crate::defaults::{DOCS_CONFIG_FILE, RELOCATION_DIR};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// A subsidiary repository whose documentation is merged into the main site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepoSpec {
    /// Account or organization that owns the repository.
    pub owner: String,
    /// Repository name. Also used as the checkout directory and as the
    /// namespace its pages are moved under.
    pub repo: String,
    /// Branch or tag to clone. The remote's default branch when omitted.
    #[serde(default)]
    pub r#ref: Option<String>,
    /// Path inside the clone holding `docs.json` and the pages.
    #[serde(default)]
    pub subdirectory: Option<String>,
}

impl RepoSpec {
    /// Namespace the repository's pages are moved under.
    pub fn namespace(&self) -> &str {
        &self.repo
    }

    /// `owner/repo`, for log lines.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Check that the descriptor can be used as a clone target.
    ///
    /// `repo` becomes a directory name next to `docs.json`, so it must be a
    /// single normal path component that does not collide with `.git`,
    /// `docs.json` or the relocation scratch directory. `subdirectory` must
    /// stay inside the clone.
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() || self.repo.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: format!("Repository entry '{}' has an empty owner or repo", self.slug()),
                hint: Some("Each entry needs non-empty 'owner' and 'repo' fields".to_string()),
            });
        }

        if !is_single_component(&self.repo) {
            return Err(Error::ConfigParse {
                message: format!("Repository name '{}' is not a plain directory name", self.repo),
                hint: Some("Put the owner in 'owner' and the path in 'subdirectory'".to_string()),
            });
        }

        if RESERVED_NAMES
            .iter()
            .any(|reserved| self.repo.eq_ignore_ascii_case(reserved))
        {
            return Err(Error::ConfigParse {
                message: format!(
                    "Repository name '{}' collides with a path the run manages",
                    self.repo
                ),
                hint: Some(format!(
                    "The clone directory may not be named any of: {}",
                    RESERVED_NAMES.join(", ")
                )),
            });
        }

        if let Some(subdirectory) = &self.subdirectory {
            let escapes = Path::new(subdirectory)
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
            if escapes {
                return Err(Error::ConfigParse {
                    message: format!(
                        "Subdirectory '{}' of {} must be a relative path inside the repository",
                        subdirectory,
                        self.slug()
                    ),
                    hint: None,
                });
            }
        }

        Ok(())
    }
}

/// Entries of the working directory a clone must never replace.
const RESERVED_NAMES: [&str; 3] = [".git", DOCS_CONFIG_FILE, RELOCATION_DIR];

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Parse the YAML repository list.
///
/// An empty input or an explicit `null` yields an empty list.
///
/// # Examples
///
/// ```
/// use docs_aggregate::config::parse_repos;
///
/// let repos = parse_repos("- owner: acme\n  repo: api-docs\n  ref: main").unwrap();
/// assert_eq!(repos.len(), 1);
/// assert_eq!(repos[0].r#ref.as_deref(), Some("main"));
/// ```
pub fn parse_repos(yaml_content: &str) -> Result<Vec<RepoSpec>> {
    if yaml_content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let repos: Option<Vec<RepoSpec>> =
        serde_yaml::from_str(yaml_content).map_err(|err| Error::ConfigParse {
            message: format!("Invalid repository list: {}", err),
            hint: Some(
                "Expected a YAML sequence of entries with 'owner', 'repo' and optional \
                 'ref' and 'subdirectory'"
                    .to_string(),
            ),
        })?;
    let repos = repos.unwrap_or_default();

    for repo in &repos {
        repo.validate()?;
    }

    Ok(repos)
}

/// Read and parse a repository list from a file.
pub fn repos_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<RepoSpec>> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse_repos(&content)
}

/// Parse a boolean action input.
///
/// # Errors
///
/// Returns `Error::ConfigParse` for anything outside the six accepted
/// spellings.
pub fn parse_bool_input(name: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(Error::ConfigParse {
            message: format!("Input '{}' does not meet YAML 1.2 core schema: '{}'", name, other),
            hint: Some("Use one of: true | True | TRUE | false | False | FALSE".to_string()),
        }),
    }
}
