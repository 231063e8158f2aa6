//! Run command implementation
//!
//! The run command is the CI step itself:
//! 1. Check out the target branch in the working directory
//! 2. Clone each listed repository and read its docs.json
//! 3. Merge every subsidiary navigation into the main docs.json, in order
//! 4. Write docs.json, then commit and push if it changed
//!
//! Every input can come from a flag or from the matching `INPUT_*`
//! environment variable GitHub Actions sets for action inputs.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use docs_aggregate::config::{self, parse_bool_input};
use docs_aggregate::defaults::{
    DEFAULT_AUTHOR_EMAIL, DEFAULT_AUTHOR_NAME, DEFAULT_COMMIT_MESSAGE, DEFAULT_SERVER_URL,
    DOCS_CONFIG_FILE,
};
use docs_aggregate::pipeline::{self, RunConfig};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Access token used to clone the repositories and push the result
    #[arg(long, value_name = "TOKEN", env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// YAML list of repositories (owner, repo, optional ref and subdirectory)
    #[arg(long, value_name = "YAML", env = "INPUT_REPOS", allow_hyphen_values = true)]
    pub repos: Option<String>,

    /// File containing the YAML list of repositories; takes precedence over --repos
    #[arg(long, value_name = "FILE")]
    pub repos_file: Option<PathBuf>,

    /// Branch the merged docs.json is committed to
    #[arg(long, value_name = "BRANCH", env = "INPUT_TARGET-BRANCH")]
    pub target_branch: String,

    /// Directory holding the main docs.json
    #[arg(long, value_name = "DIR", env = "INPUT_SUBDIRECTORY", default_value = ".")]
    pub subdirectory: PathBuf,

    /// Force push (true | True | TRUE | false | False | FALSE)
    #[arg(
        long,
        value_name = "BOOL",
        env = "INPUT_FORCE",
        default_value = "false",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_force
    )]
    pub force: bool,

    /// Host the repositories are cloned from
    #[arg(long, value_name = "URL", env = "GITHUB_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Message of the aggregation commit
    #[arg(long, value_name = "MESSAGE", default_value = DEFAULT_COMMIT_MESSAGE)]
    pub commit_message: String,

    /// Author name of the aggregation commit
    #[arg(long, value_name = "NAME", default_value = DEFAULT_AUTHOR_NAME)]
    pub author_name: String,

    /// Author email of the aggregation commit
    #[arg(long, value_name = "EMAIL", default_value = DEFAULT_AUTHOR_EMAIL)]
    pub author_email: String,

    /// Merge and write docs.json without committing or pushing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_force(value: &str) -> std::result::Result<bool, String> {
    parse_bool_input("force", value).map_err(|e| e.to_string())
}

impl RunArgs {
    /// Resolve the arguments into a pipeline configuration.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let repos = match (&self.repos_file, &self.repos) {
            (Some(path), _) => config::repos_from_file(path)
                .with_context(|| format!("Failed to load repositories from {}", path.display()))?,
            (None, Some(yaml)) => config::parse_repos(yaml)?,
            (None, None) => bail!("No repositories given; use --repos, --repos-file or INPUT_REPOS"),
        };

        let token = match self.token.filter(|t| !t.is_empty()) {
            Some(token) => token,
            None if self.dry_run => String::new(),
            None => bail!("An access token is required; use --token or INPUT_TOKEN"),
        };

        Ok(RunConfig {
            token,
            repos,
            target_branch: self.target_branch,
            work_dir: self.subdirectory,
            force: self.force,
            server_url: self.server_url,
            commit_message: self.commit_message,
            author_name: self.author_name,
            author_email: self.author_email,
            dry_run: self.dry_run,
        })
    }
}

/// Execute the run command
pub fn execute(args: RunArgs) -> Result<()> {
    let quiet = args.quiet;
    let config = args.into_run_config()?;

    if !config.work_dir.join(DOCS_CONFIG_FILE).exists() {
        bail!(
            "{} not found in {}",
            DOCS_CONFIG_FILE,
            config.work_dir.display()
        );
    }

    let outcome = pipeline::run(&config)?;

    if !quiet {
        println!(
            "Merged {} repositories into {} ({} tabs){}",
            outcome.repositories,
            DOCS_CONFIG_FILE,
            outcome.tabs,
            if outcome.pushed {
                format!(", pushed to {}", config.target_branch)
            } else {
                String::new()
            }
        );
    }

    Ok(())
}
