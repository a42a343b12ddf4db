//! Run configuration resolved from CLI flags and environment variables

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::listing::DEFAULT_LISTING_FILE;
use crate::error::{Result, config};

/// How the per-chart work is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One chart at a time, in listing order
    Sequential,
    /// Every chart at once, joined before reporting
    Parallel,
}

/// Inputs for computing the changed-set from git
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDetection {
    /// Branch the change is measured against
    pub base: String,
    /// Branch (or ref) holding the change
    pub compare: String,
    /// Repository the compare branch lives in, when it is not `origin`
    pub source_repo: Option<String>,
    /// Repository the base branch lives in, when it is not `origin`
    pub target_repo: Option<String>,
    /// Token for HTTPS fetches from the repositories above
    pub token: Option<String>,
}

/// Everything a chart run needs to know about its environment
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub workspace_root: PathBuf,
    pub listing_path: PathBuf,
    /// `None` when every listed chart is processed
    pub change_detection: Option<ChangeDetection>,
    pub mode: ExecutionMode,
    pub helm_bin: PathBuf,
    /// Job summary file; the report goes to stdout when unset
    pub summary_file: Option<PathBuf>,
    pub json_summary: Option<PathBuf>,
}

impl RunConfig {
    /// Resolve the run configuration from parsed CLI arguments
    ///
    /// The workspace root is checked first; nothing else is looked at when
    /// it is missing or empty.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let workspace_root = cli
            .workspace_root()
            .ok_or_else(|| config::missing_input("workspace root (--workspace / GITHUB_WORKSPACE)"))?;

        let listing_path = match cli.listing_path() {
            Some(path) if path.is_absolute() => path,
            Some(path) => workspace_root.join(path),
            None => workspace_root.join(DEFAULT_LISTING_FILE),
        };

        let change_detection = cli.changed_only.then(|| ChangeDetection {
            base: cli.base.clone(),
            compare: cli.compare.clone(),
            source_repo: non_empty(cli.source_repo.as_deref()),
            target_repo: non_empty(cli.target_repo.as_deref()),
            token: non_empty(cli.token.as_deref()),
        });

        if let Some(detection) = &change_detection {
            if detection.base.trim().is_empty() {
                return Err(config::missing_input("base branch (--base)"));
            }
            if detection.compare.trim().is_empty() {
                return Err(config::missing_input("compare branch (--compare)"));
            }
        }

        let mode = if cli.sequential {
            ExecutionMode::Sequential
        } else {
            ExecutionMode::Parallel
        };

        Ok(Self {
            workspace_root,
            listing_path,
            change_detection,
            mode,
            helm_bin: cli.helm.clone(),
            summary_file: cli.summary_path(),
            json_summary: cli.json_summary.clone(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
