//! Git operations for the aggregation run
//!
//! Everything here shells out to the system `git` binary, which already
//! handles transports, credential helpers and `.gitconfig`. Commands run in
//! the working directory that holds `docs.json`.
//!
//! Credentials are handled in two places:
//! - subsidiary clones embed `oauth2:<token>` in the clone URL, and that URL
//!   is only ever logged with the password removed
//! - pushes to the main repository use an `http.<server>/.extraheader`
//!   basic-auth header installed by [`Git::install_token`]; the header is
//!   written through a placeholder so the secret never appears on a command
//!   line, and it is removed again when the returned guard is dropped

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{debug, info, warn};
use url::Url;

use crate::actions;
use crate::error::{Error, Result};

/// Value written to `.git/config` before the real header is substituted.
pub const EXTRA_HEADER_PLACEHOLDER: &str = "Authorization: basic ***";

/// Identity and target of the aggregation commit
#[derive(Debug, Clone)]
pub struct CommitOptions<'a> {
    /// Branch pushed to on `origin`.
    pub target_branch: &'a str,
    /// Push with `--force`.
    pub force: bool,
    pub message: &'a str,
    pub author_name: &'a str,
    pub author_email: &'a str,
}

/// A git working copy commands are run in
#[derive(Debug, Clone)]
pub struct Git {
    work_dir: PathBuf,
}

impl Git {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn output(&self, args: &[&str], display: &str) -> Result<Output> {
        debug!("Executing command: git {}", display);
        Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|e| Error::GitCommand {
                command: display.to_string(),
                stderr: e.to_string(),
            })
    }

    fn run_displayed(&self, args: &[&str], display: &str) -> Result<String> {
        let output = self.output(args, display)?;
        if !output.status.success() {
            return Err(Error::GitCommand {
                command: display.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a git command, failing on a non-zero exit.
    ///
    /// Returns the command's stdout.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        self.run_displayed(args, &args.join(" "))
    }

    /// Run a git command and report whether it exited successfully.
    ///
    /// Only a failure to start git is an error.
    pub fn succeeds(&self, args: &[&str]) -> Result<bool> {
        Ok(self.output(args, &args.join(" "))?.status.success())
    }

    /// Switch to `branch`, creating it locally when the remote lacks it.
    ///
    /// When `origin` has the branch, it is fetched and `HEAD` is pointed at
    /// it without touching the working tree.
    pub fn checkout_branch(&self, branch: &str) -> Result<()> {
        info!("Checking out branch: {}", branch);

        let remote = self
            .succeeds(&["ls-remote", "--heads", "--exit-code", "origin", branch])
            .and_then(|exists| {
                if !exists {
                    return Ok(false);
                }
                let refspec = format!("{}:{}", branch, branch);
                self.run(&["fetch", "-u", "origin", &refspec])?;
                let head = format!("refs/heads/{}", branch);
                self.run(&["symbolic-ref", "HEAD", &head])?;
                Ok(true)
            });

        match remote {
            Ok(true) => Ok(()),
            Ok(false) => {
                debug!("Branch {} not found on origin", branch);
                self.run(&["checkout", "-b", branch]).map(|_| ())
            }
            Err(err) => {
                warn!("Could not use remote branch {}: {}", branch, err);
                self.run(&["checkout", "-b", branch]).map(|_| ())
            }
        }
    }

    /// Path of the repository's git directory.
    pub fn git_dir(&self) -> Result<PathBuf> {
        let stdout = self.run(&["rev-parse", "--git-dir"])?;
        Ok(self.work_dir.join(stdout.trim()))
    }

    /// Install `token` as a basic-auth header for `server_url`.
    ///
    /// The header stays configured until the returned guard is dropped or
    /// [`TokenGuard::remove`] is called.
    pub fn install_token(&self, server_url: &str, token: &str) -> Result<TokenGuard<'_>> {
        info!("Setting access token");
        let encoded = BASE64.encode(format!("x-access-token:{}", token));
        actions::add_mask(&encoded);

        let key = extra_header_key(server_url);
        self.run(&["config", "--local", &key, EXTRA_HEADER_PLACEHOLDER])?;
        let guard = TokenGuard {
            git: self,
            key,
            armed: true,
        };

        let config_path = self.git_dir()?.join("config");
        let config = fs::read_to_string(&config_path)?;
        let header = format!("Authorization: basic {}", encoded);
        fs::write(&config_path, config.replace(EXTRA_HEADER_PLACEHOLDER, &header))?;

        Ok(guard)
    }

    /// Shallow clone `url` into `dest`, relative to the working directory.
    ///
    /// `url` may carry credentials; they are stripped from logs and errors.
    pub fn clone_shallow(&self, url: &Url, ref_name: Option<&str>, dest: &str) -> Result<()> {
        let url_string = url.to_string();
        let shown_url = redact_url(url);

        let mut args = vec!["clone", "--depth=1"];
        if let Some(ref_name) = ref_name {
            args.extend(["--branch", ref_name]);
        }
        let display = format!("{} {} {}", args.join(" "), shown_url, dest);
        args.extend([url_string.as_str(), dest]);

        info!("Cloning {}", shown_url);
        let output = self.output(&args, &display).map_err(|e| Error::GitClone {
            url: shown_url.clone(),
            r#ref: ref_name.unwrap_or("HEAD").to_string(),
            message: e.to_string(),
            hint: None,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).replace(&url_string, &shown_url);
            let hint = if stderr.contains("Authentication failed")
                || stderr.contains("Permission denied")
                || stderr.contains("could not read Username")
                || stderr.contains("Repository not found")
            {
                Some("Make sure the token has read access to the repository".to_string())
            } else if stderr.contains("Remote branch") {
                Some("Check the 'ref' of this repository entry".to_string())
            } else {
                None
            };

            return Err(Error::GitClone {
                url: shown_url,
                r#ref: ref_name.unwrap_or("HEAD").to_string(),
                message: stderr.trim().to_string(),
                hint,
            });
        }

        Ok(())
    }

    /// Whether the index differs from `HEAD`.
    pub fn staged_changes_exist(&self) -> Result<bool> {
        let clean = self.succeeds(&["diff-index", "--quiet", "--cached", "HEAD", "--"])?;
        Ok(!clean)
    }

    /// Stage everything, then commit and push if anything changed.
    ///
    /// Returns whether a commit was pushed.
    pub fn commit_and_push(&self, options: &CommitOptions<'_>) -> Result<bool> {
        info!("Committing changes...");
        self.run(&["add", "."])?;

        if !self.staged_changes_exist()? {
            info!("No changes detected, skipping commit...");
            return Ok(false);
        }

        self.run(&["config", "user.name", options.author_name])?;
        self.run(&["config", "user.email", options.author_email])?;
        self.run(&["commit", "-m", options.message])?;

        let mut push = vec!["push"];
        if options.force {
            push.push("--force");
        }
        push.extend(["origin", options.target_branch]);
        info!("Pushing changes...");
        self.run(&push)?;

        Ok(true)
    }
}

/// Removes the extra header installed by [`Git::install_token`]
#[derive(Debug)]
pub struct TokenGuard<'a> {
    git: &'a Git,
    key: String,
    armed: bool,
}

impl TokenGuard<'_> {
    /// Remove the header now, reporting failure.
    pub fn remove(mut self) -> Result<()> {
        self.armed = false;
        self.git
            .run(&["config", "--local", "--unset-all", &self.key])
            .map(|_| ())
    }
}

impl Drop for TokenGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(err) = self.git.run(&["config", "--local", "--unset-all", &self.key]) {
                warn!("Failed to remove access token from git config: {}", err);
            }
        }
    }
}

/// Git config key of the extra header sent to `server_url`.
///
/// # Examples
///
/// ```
/// use docs_aggregate::git::extra_header_key;
///
/// assert_eq!(
///     extra_header_key("https://github.com"),
///     "http.https://github.com/.extraheader"
/// );
/// ```
pub fn extra_header_key(server_url: &str) -> String {
    format!("http.{}/.extraheader", server_url.trim_end_matches('/'))
}

/// Build the clone URL of `owner/repo` on `server_url`.
///
/// For http(s) servers the token is embedded as `oauth2:<token>`; other
/// schemes (such as `file://`) are used as they are.
pub fn clone_url(server_url: &str, owner: &str, repo: &str, token: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(&format!(
        "{}/{}/{}",
        server_url.trim_end_matches('/'),
        owner,
        repo
    ))?;

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        if matches!(url.scheme(), "http" | "https") {
            // Only fails for cannot-be-a-base URLs, which http(s) never are
            let _ = url.set_username("oauth2");
            let _ = url.set_password(Some(token));
        }
    }

    Ok(url)
}

/// Render a URL without its password.
pub fn redact_url(url: &Url) -> String {
    let mut shown = url.clone();
    if shown.password().is_some() {
        let _ = shown.set_password(None);
    }
    shown.to_string()
}
