//! # Documentation Aggregation Library
//!
//! This library merges the documentation navigation of several repositories
//! into one `docs.json`. It is designed to be used by the `docs-aggregate`
//! command-line tool, typically as a CI step in the repository that hosts the
//! combined documentation site.
//!
//! ## Quick Example
//!
//! ```
//! use docs_aggregate::merge::merge_all;
//! use serde_json::json;
//!
//! let main = json!({
//!     "name": "Developer Docs",
//!     "navigation": {"tabs": [{"tab": "Home", "pages": ["docs/index"]}]}
//! });
//! let api = json!({"navigation": {"tabs": [{"tab": "API", "pages": ["docs/auth"]}]}});
//! let sdk = json!({"navigation": {"tabs": [{"tab": "SDK", "pages": ["install"]}]}});
//!
//! let merged = merge_all(main, [("api", &api), ("sdk", &sdk)]).unwrap();
//! let tabs = merged["navigation"]["tabs"].as_array().unwrap();
//! assert_eq!(tabs.len(), 3);
//! assert_eq!(tabs[1]["pages"][0], "docs/api/auth");
//! assert_eq!(tabs[2]["pages"][0], "docs/sdk/install");
//! ```
//!
//! ## Core Concepts
//!
//! - **Navigation merge (`merge`)**: The pure transformation at the heart of
//!   the tool. Main configuration fields win; subsidiary tabs are appended with
//!   every page reference moved under `docs/<repository>/`.
//! - **Inputs (`config`)**: The repository list and action input parsing.
//! - **Checkouts (`git`, `workspace`)**: Cloning subsidiaries, rearranging the
//!   clones on disk, committing and pushing the result.
//! - **Run (`pipeline`)**: The end-to-end orchestration.
//!
//! ## Execution Flow
//!
//! 1.  **Checkout**: Switch to the target branch and read the main `docs.json`.
//! 2.  **Fetch**: Clone every subsidiary repository and read its `docs.json`.
//! 3.  **Merge**: Fold the subsidiary configurations into the main one, in order.
//! 4.  **Publish**: Write `docs.json`, then commit and push if it changed.

pub mod actions;
pub mod config;
pub mod defaults;
pub mod docs;
pub mod error;
pub mod git;
pub mod merge;
pub mod pipeline;
pub mod workspace;

#[cfg(test)]
mod merge_proptest;
