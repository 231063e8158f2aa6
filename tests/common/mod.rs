//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and macros
//! to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_docs_config(configs::MAIN);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::git;
    pub use super::TestFixture;
}

/// Common docs.json snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Main site configuration with a single tab.
    pub const MAIN: &str = r#"{
  "name": "Developer Docs",
  "theme": "mint",
  "navigation": {
    "tabs": [
      {"tab": "Home", "groups": [{"group": "Start", "pages": ["docs/index"]}]}
    ]
  }
}
"#;

    /// Subsidiary configuration whose pages already carry the `docs/` prefix.
    pub const LENDERS: &str = r#"{
  "name": "Lenders API",
  "navigation": {
    "tabs": [
      {"tab": "Lenders", "groups": [{"group": "Guides", "pages": ["docs/intro", "docs/auth"]}]}
    ]
  }
}
"#;

    /// Subsidiary configuration with bare page paths.
    pub const BORROWERS: &str = r#"{
  "navigation": {
    "tabs": [
      {"tab": "Borrowers", "pages": ["overview"]}
    ]
  }
}
"#;

    /// Subsidiary configuration with a numeric page entry.
    pub const NUMERIC_PAGE: &str = r#"{
  "navigation": {"tabs": [{"tab": "Broken", "pages": ["ok", 7]}]}
}
"#;

    /// Not JSON at all.
    pub const INVALID_JSON: &str = "{ navigation: ";
}

/// A test fixture that provides a temporary directory with optional config.
///
/// This struct simplifies the common pattern of creating a temp directory
/// and populating it with a `docs.json` file.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_docs_config(configs::MAIN)
///     .with_file("lenders.json", configs::LENDERS);
///
/// fixture.command()
///     .args(["merge", "--sub", "lenders-api=lenders.json"])
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `docs.json` file with the given content.
    pub fn with_docs_config(self, content: &str) -> Self {
        self.with_file("docs.json", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the docs.json file.
    pub fn docs_path(&self) -> PathBuf {
        self.temp_dir.path().join("docs.json")
    }

    /// Parse a JSON file inside the fixture.
    #[allow(dead_code)]
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        let content = std::fs::read_to_string(self.path().join(path)).expect("Failed to read file");
        serde_json::from_str(&content).expect("File should contain valid JSON")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("docs-aggregate");
        cmd.current_dir(self.path());
        cmd.env_remove("GITHUB_ACTIONS");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Helpers for building local git repositories the `run` command can clone.
#[allow(dead_code)]
pub mod git {
    use super::*;

    /// Run git in `dir`, panicking with its stderr on failure.
    pub fn run(dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_AUTHOR_NAME", "Test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Create a repository at `dir` with `files` committed on `main`.
    pub fn init_repo(dir: &Path, files: &[(&str, &str)]) {
        std::fs::create_dir_all(dir).expect("Failed to create repository directory");
        run(dir, &["init", "-q", "-b", "main"]);
        for (path, content) in files {
            let file = dir.join(path);
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create parent directory");
            }
            std::fs::write(file, content).expect("Failed to write file");
        }
        run(dir, &["add", "-A"]);
        run(dir, &["commit", "-q", "-m", "initial"]);
    }

    /// Publish `source` as a bare repository at `server/<owner>/<repo>`.
    pub fn publish(source: &Path, server: &Path, owner: &str, repo: &str) -> PathBuf {
        let owner_dir = server.join(owner);
        std::fs::create_dir_all(&owner_dir).expect("Failed to create owner directory");
        let bare = owner_dir.join(repo);
        run(
            &owner_dir,
            &[
                "clone",
                "-q",
                "--bare",
                source.to_str().expect("utf-8 path"),
                repo,
            ],
        );
        bare
    }

    /// The `file://` URL the `run` command uses as its server.
    pub fn server_url(server: &Path) -> String {
        format!("file://{}", server.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_docs_config() {
        let fixture = TestFixture::new().with_docs_config(configs::MAIN);
        assert!(fixture.docs_path().exists());
    }

    #[test]
    fn test_configs_are_valid_json() {
        for config in [
            configs::MAIN,
            configs::LENDERS,
            configs::BORROWERS,
            configs::NUMERIC_PAGE,
        ] {
            serde_json::from_str::<serde_json::Value>(config).expect("Config should be valid JSON");
        }
    }

    #[test]
    fn test_invalid_json_is_actually_invalid() {
        assert!(serde_json::from_str::<serde_json::Value>(configs::INVALID_JSON).is_err());
    }
}
