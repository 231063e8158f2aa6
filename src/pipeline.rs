//! Orchestrator for the complete aggregation run
//!
//! This module coordinates git, the checkout layout and the navigation merge
//! into the single operation the CI step performs:
//!
//! 1. Check out the target branch
//! 2. Read the main `docs.json`
//! 3. Install the access token for pushing
//! 4. Clone each subsidiary repository, rearrange it and read its `docs.json`
//! 5. Fold every subsidiary configuration into the main one, in list order
//! 6. Write `docs.json`
//! 7. Commit and push, if anything changed
//!
//! Nothing is written before step 5 has succeeded for every repository, so a
//! malformed subsidiary configuration never produces a half-merged file.

use std::path::{Path, PathBuf};

use log::info;
use serde_json::Value as JsonValue;

use crate::config::RepoSpec;
use crate::defaults::{
    DEFAULT_AUTHOR_EMAIL, DEFAULT_AUTHOR_NAME, DEFAULT_COMMIT_MESSAGE, DEFAULT_SERVER_URL,
    DOCS_CONFIG_FILE,
};
use crate::docs;
use crate::error::Result;
use crate::git::{clone_url, CommitOptions, Git};
use crate::merge::{merge_all, tab_count};
use crate::workspace::{prepare_checkout, remove_dir_if_exists};

/// Everything a run needs, resolved from CLI flags and action inputs
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Access token used for cloning and pushing.
    pub token: String,
    /// Subsidiary repositories, in merge order.
    pub repos: Vec<RepoSpec>,
    /// Branch the aggregated configuration is committed to.
    pub target_branch: String,
    /// Directory holding the main `docs.json`; clones land here too.
    pub work_dir: PathBuf,
    /// Push with `--force`.
    pub force: bool,
    /// Host subsidiary repositories are cloned from.
    pub server_url: String,
    pub commit_message: String,
    pub author_name: String,
    pub author_email: String,
    /// Merge and write `docs.json`, but leave git history alone.
    pub dry_run: bool,
}

impl RunConfig {
    /// A configuration with every optional setting at its default.
    pub fn new(
        token: impl Into<String>,
        target_branch: impl Into<String>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            token: token.into(),
            repos: Vec::new(),
            target_branch: target_branch.into(),
            work_dir: work_dir.into(),
            force: false,
            server_url: DEFAULT_SERVER_URL.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            author_name: DEFAULT_AUTHOR_NAME.to_string(),
            author_email: DEFAULT_AUTHOR_EMAIL.to_string(),
            dry_run: false,
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Number of subsidiary repositories merged.
    pub repositories: usize,
    /// Number of tabs in the written navigation.
    pub tabs: usize,
    /// Whether a commit was pushed.
    pub pushed: bool,
}

/// Execute the complete aggregation run.
pub fn run(config: &RunConfig) -> Result<RunOutcome> {
    for spec in &config.repos {
        spec.validate()?;
    }

    info!("Working directory: {}", config.work_dir.display());
    let git = Git::new(&config.work_dir);

    git.checkout_branch(&config.target_branch)?;

    let docs_path = config.work_dir.join(DOCS_CONFIG_FILE);
    let main = docs::read_config(&docs_path)?;

    let token_guard = if config.dry_run {
        None
    } else {
        Some(git.install_token(&config.server_url, &config.token)?)
    };

    let mut subs = Vec::with_capacity(config.repos.len());
    for spec in &config.repos {
        let sub = fetch_subsidiary(&git, config, spec)?;
        subs.push((spec, sub));
    }

    let merged = merge_subsidiaries(main, &subs)?;
    let tabs = tab_count(&merged)?;

    info!("Writing updated {}", DOCS_CONFIG_FILE);
    docs::write_config(&docs_path, &merged)?;

    let pushed = if config.dry_run {
        info!("Dry run, skipping commit and push");
        false
    } else {
        git.commit_and_push(&CommitOptions {
            target_branch: &config.target_branch,
            force: config.force,
            message: &config.commit_message,
            author_name: &config.author_name,
            author_email: &config.author_email,
        })?
    };

    if let Some(guard) = token_guard {
        guard.remove()?;
    }

    Ok(RunOutcome {
        repositories: subs.len(),
        tabs,
        pushed,
    })
}

/// Clone one subsidiary repository and read its configuration.
fn fetch_subsidiary(git: &Git, config: &RunConfig, spec: &RepoSpec) -> Result<JsonValue> {
    info!("Processing repository: {}", spec.slug());
    remove_dir_if_exists(&git.work_dir().join(&spec.repo))?;

    let url = clone_url(
        &config.server_url,
        &spec.owner,
        &spec.repo,
        Some(&config.token),
    )?;
    git.clone_shallow(&url, spec.r#ref.as_deref(), &spec.repo)?;

    let checkout = prepare_checkout(git.work_dir(), &spec.repo, spec.subdirectory.as_deref())?;
    read_subsidiary_config(&checkout)
}

/// Read the `docs.json` of a prepared checkout.
pub fn read_subsidiary_config(checkout: &Path) -> Result<JsonValue> {
    let config = docs::read_config(checkout.join(DOCS_CONFIG_FILE))?;
    info!(
        "Read configuration of {}, merging navigation...",
        checkout.display()
    );
    Ok(config)
}

/// Fold subsidiary configurations into `main`, namespaced by repository.
pub fn merge_subsidiaries(main: JsonValue, subs: &[(&RepoSpec, JsonValue)]) -> Result<JsonValue> {
    merge_all(
        main,
        subs.iter().map(|(spec, sub)| (spec.namespace(), sub)),
    )
}
