//! Changed-set computation
//!
//! Maps the paths touched between the base and compare branches onto the
//! charts of the listing.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{debug, info};

use crate::config::ChangeDetection;
use crate::domain::ChartEntry;
use crate::error::{Result, git};

/// Ids of the charts touched by `paths`
pub fn charts_touched_by(paths: &[PathBuf], charts: &[ChartEntry]) -> HashSet<String> {
    charts
        .iter()
        .filter(|chart| paths.iter().any(|path| chart.contains(path)))
        .map(|chart| chart.id.clone())
        .collect()
}

/// Location of `workspace_root` inside the repository work tree
///
/// Empty when the workspace is the work tree itself.
fn workspace_prefix(repo: &Repository, workspace_root: &Path) -> Result<PathBuf> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| git::operation_failed("repository has no work tree"))?;
    let canonical = |path: &Path| {
        path.canonicalize().map_err(|e| {
            git::open_failed(path.display().to_string(), e.to_string())
        })
    };
    let workdir = canonical(workdir)?;
    let workspace = canonical(workspace_root)?;
    Ok(workspace
        .strip_prefix(&workdir)
        .map(Path::to_path_buf)
        .unwrap_or_default())
}

/// Re-root repository-relative `paths` at `prefix`, dropping paths outside it
fn relative_to_workspace(paths: Vec<PathBuf>, prefix: &Path) -> Vec<PathBuf> {
    if prefix.as_os_str().is_empty() {
        return paths;
    }
    paths
        .into_iter()
        .filter_map(|path| path.strip_prefix(prefix).ok().map(Path::to_path_buf))
        .collect()
}

/// Compute the changed-set for the repository at `workspace_root`
///
/// Branches coming from an explicit repository URL are fetched first; the
/// others are resolved locally. The workspace may be a subdirectory of the
/// repository; changes outside it never select a chart.
pub fn changed_charts(
    workspace_root: &Path,
    detection: &ChangeDetection,
    charts: &[ChartEntry],
) -> Result<HashSet<String>> {
    let repo = super::open(workspace_root)?;
    let prefix = workspace_prefix(&repo, workspace_root)?;
    let token = detection.token.as_deref();

    let base = match &detection.target_repo {
        Some(url) => super::fetch_branch(&repo, url, &detection.base, "target", token)?,
        None => detection.base.clone(),
    };
    let compare = match &detection.source_repo {
        Some(url) => super::fetch_branch(&repo, url, &detection.compare, "source", token)?,
        None => detection.compare.clone(),
    };

    let paths = super::changed_paths(&repo, &base, &compare)?;
    debug!(files = paths.len(), %base, %compare, "changed files");
    let paths = relative_to_workspace(paths, &prefix);

    let changed = charts_touched_by(&paths, charts);
    info!(
        changed = changed.len(),
        total = charts.len(),
        "change detection complete"
    );
    Ok(changed)
}
