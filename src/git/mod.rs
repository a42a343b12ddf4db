//! Git operations for change detection
//!
//! This module handles:
//! - Opening the workspace repository
//! - Fetching a branch from another repository (forks, mirrors)
//! - Resolving refs to commits
//! - Listing the paths changed between two refs
//!
//! Authentication is described in [`auth`].

pub mod auth;
pub mod changes;
pub mod refs;

use std::path::{Path, PathBuf};

use git2::{ErrorClass, FetchOptions, RemoteCallbacks, Repository};
use tracing::{debug, info};

use crate::error::{Result, git};

pub use changes::changed_charts;

/// Namespace for refs fetched from explicit repository URLs
const FETCH_NAMESPACE: &str = "refs/chart-ci";

/// Interpret a git2 error and provide a more user-friendly message
fn interpret_git_error(err: &git2::Error) -> String {
    let class = err.class();
    let message = err.message().to_lowercase();

    if message.contains("not found") || message.contains("404") {
        "Repository not found".to_string()
    } else if message.contains("authentication") || message.contains("credentials") {
        "Authentication failed".to_string()
    } else if message.contains("permission denied") || message.contains("access denied") {
        "Permission denied".to_string()
    } else if message.contains("connection")
        || message.contains("network")
        || message.contains("timed out")
    {
        "Network error".to_string()
    } else if class == ErrorClass::Ssh {
        format!("SSH error: {}", err.message())
    } else {
        err.message().to_string()
    }
}

/// Open the repository containing `path`
pub fn open(path: &Path) -> Result<Repository> {
    Repository::discover(path)
        .map_err(|e| git::open_failed(path.display().to_string(), e.message()))
}

/// Fetch `branch` from `url` and return the local ref it was stored under
///
/// `slot` keeps the base and compare fetches apart when both come from
/// explicit URLs.
pub fn fetch_branch(
    repo: &Repository,
    url: &str,
    branch: &str,
    slot: &str,
    token: Option<&str>,
) -> Result<String> {
    let local_ref = format!("{FETCH_NAMESPACE}/{slot}/{branch}");
    let refspec = format!("+refs/heads/{branch}:{local_ref}");
    info!(url, branch, "fetching branch for change detection");

    let mut callbacks = RemoteCallbacks::new();
    auth::setup_auth_callbacks(&mut callbacks, token);
    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let mut remote = repo
        .remote_anonymous(url)
        .map_err(|e| git::fetch_failed(url, branch, interpret_git_error(&e)))?;
    remote
        .fetch(&[refspec.as_str()], Some(&mut fetch_options), None)
        .map_err(|e| git::fetch_failed(url, branch, interpret_git_error(&e)))?;

    debug!(local_ref, "fetched");
    Ok(local_ref)
}

/// Paths (relative to the repository root) touched between `base` and `compare`
///
/// Uses the merge base of the two as the starting point, so commits that
/// landed on `base` after `compare` branched off are not counted.
pub fn changed_paths(repo: &Repository, base: &str, compare: &str) -> Result<Vec<PathBuf>> {
    let base_commit = refs::resolve_commit(repo, base)?;
    let compare_commit = refs::resolve_commit(repo, compare)?;

    let merge_base = repo
        .merge_base(base_commit.id(), compare_commit.id())
        .map_err(|e| {
            git::operation_failed(format!(
                "no common ancestor between '{base}' and '{compare}': {}",
                e.message()
            ))
        })?;
    debug!(%merge_base, compare = %compare_commit.id(), "diffing");

    let old_tree = repo.find_commit(merge_base)?.tree()?;
    let new_tree = compare_commit.tree()?;
    let diff = repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)?;

    let mut paths = Vec::new();
    for delta in diff.deltas() {
        for file in [delta.old_file(), delta.new_file()] {
            if let Some(path) = file.path() {
                if !paths.iter().any(|p: &PathBuf| p == path) {
                    paths.push(path.to_path_buf());
                }
            }
        }
    }
    Ok(paths)
}
