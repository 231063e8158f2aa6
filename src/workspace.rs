//! Checkout layout on disk
//!
//! Subsidiary repositories are cloned next to the main `docs.json`, into a
//! directory named after the repository. Before their configuration is read,
//! each clone is turned into plain files of the outer repository:
//!
//! - with a subdirectory, only that subdirectory is kept and it takes the
//!   place of the clone (`<repo>/<subdirectory>/*` becomes `<repo>/*`)
//! - without one, the clone's `.git` directory is removed
//!
//! This keeps page paths in the subsidiary's `docs.json` valid relative to
//! `<repo>/`, which is what the `docs/<repo>/` namespace points at.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, info};

use crate::defaults::RELOCATION_DIR;
use crate::error::{Error, Result};

/// Remove a file or directory tree if it exists.
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Rearrange a fresh clone at `work_dir/<repo>` and return its path.
///
/// # Errors
///
/// Returns `Error::Filesystem` if `subdirectory` does not exist in the clone,
/// and `Error::Io` for any failed move or removal.
pub fn prepare_checkout(work_dir: &Path, repo: &str, subdirectory: Option<&str>) -> Result<PathBuf> {
    let checkout = work_dir.join(repo);
    let subdirectory = subdirectory.map(normalize_subdirectory).filter(|s| !s.as_os_str().is_empty());

    match subdirectory {
        Some(subdirectory) => {
            info!("Looking in subdirectory: {}", subdirectory.display());
            let source = checkout.join(&subdirectory);
            if !source.is_dir() {
                return Err(Error::Filesystem {
                    message: format!(
                        "subdirectory '{}' not found in {}",
                        subdirectory.display(),
                        repo
                    ),
                });
            }

            let scratch = work_dir.join(RELOCATION_DIR);
            remove_dir_if_exists(&scratch)?;
            debug!("Moving {} to {}", source.display(), scratch.display());
            fs::rename(&source, &scratch)?;
            remove_dir_if_exists(&checkout)?;
            fs::rename(&scratch, &checkout)?;
        }
        None => {
            info!("No subdirectory specified");
            remove_dir_if_exists(&checkout.join(".git"))?;
        }
    }

    Ok(checkout)
}

/// Drop `.` components so `./docs` and `docs/.` name the same directory.
fn normalize_subdirectory(subdirectory: &str) -> PathBuf {
    Path::new(subdirectory)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}
