//! External chart tool invocation
//!
//! This module handles:
//! - The [`ChartTool`] seam the runner talks to
//! - [`HelmCli`], which runs the `helm` binary as a subprocess
//!
//! The tool is constructed once per run and shared by reference between
//! all chart tasks, so implementations must be `Send + Sync`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::domain::Functionality;
use crate::error::{Result, tool};

/// Exit code reported for `test` when a chart has no test suite
///
/// Taken from `EX_CONFIG` in sysexits.h; `helm unittest` itself never exits
/// with it.
pub const NO_TESTS_EXIT_CODE: i32 = 78;

/// Directory `helm unittest` reads test suites from
const TESTS_DIR: &str = "tests";

/// Captured outcome of one tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    #[cfg(test)]
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn exit(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Most useful failure text: stderr, then stdout
    pub fn failure_text(&self) -> Option<&str> {
        [self.stderr.trim(), self.stdout.trim()]
            .into_iter()
            .find(|text| !text.is_empty())
    }
}

/// Something that can run a functionality against a chart directory
pub trait ChartTool: Send + Sync {
    /// Run once; `Err` only when the tool could not be started at all
    fn invoke(
        &self,
        chart_id: &str,
        chart_dir: &Path,
        functionality: Functionality,
        flags: &[String],
    ) -> Result<ToolOutput>;
}

/// Runs the `helm` binary
#[derive(Debug, Clone)]
pub struct HelmCli {
    binary: PathBuf,
}

impl HelmCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments for one invocation, chart directory included
    fn args(chart_dir: &Path, functionality: Functionality, flags: &[String]) -> Vec<String> {
        let dir = chart_dir.display().to_string();
        let mut args: Vec<String> = match functionality {
            Functionality::Validate => vec!["template".into(), dir],
            Functionality::DependencyUpdate => vec!["dependency".into(), "update".into(), dir],
            Functionality::Test => vec!["unittest".into(), dir],
        };
        args.extend(flags.iter().cloned());
        args
    }
}

impl ChartTool for HelmCli {
    fn invoke(
        &self,
        chart_id: &str,
        chart_dir: &Path,
        functionality: Functionality,
        flags: &[String],
    ) -> Result<ToolOutput> {
        if functionality == Functionality::Test && !chart_dir.join(TESTS_DIR).is_dir() {
            debug!(chart = chart_id, "no tests directory, not running helm unittest");
            return Ok(ToolOutput::exit(NO_TESTS_EXIT_CODE, "", ""));
        }

        let args = Self::args(chart_dir, functionality, flags);
        debug!(chart = chart_id, helm = %self.binary.display(), ?args, "running helm");

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| {
                tool::launch_failed(self.binary.display().to_string(), chart_id, e.to_string())
            })?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartCiError;
    use tempfile::TempDir;

    #[test]
    fn test_args_validate_with_flags() {
        let args = HelmCli::args(
            Path::new("/ws/charts/app"),
            Functionality::Validate,
            &["--skip-crds".to_string()],
        );
        assert_eq!(args, vec!["template", "/ws/charts/app", "--skip-crds"]);
    }

    #[test]
    fn test_args_dependency_update() {
        let args = HelmCli::args(Path::new("/c"), Functionality::DependencyUpdate, &[]);
        assert_eq!(args, vec!["dependency", "update", "/c"]);
    }

    #[test]
    fn test_args_unittest() {
        let args = HelmCli::args(
            Path::new("/c"),
            Functionality::Test,
            &["--update-snapshot".to_string()],
        );
        assert_eq!(args, vec!["unittest", "/c", "--update-snapshot"]);
    }

    #[test]
    fn test_failure_text_prefers_stderr() {
        assert_eq!(
            ToolOutput::exit(1, "out", "err\n").failure_text(),
            Some("err")
        );
        assert_eq!(ToolOutput::exit(1, "out", "  ").failure_text(), Some("out"));
        assert_eq!(ToolOutput::exit(1, "", "").failure_text(), None);
    }

    #[test]
    fn test_missing_tests_dir_reports_sentinel_without_spawning() {
        let temp = TempDir::new().unwrap();
        let helm = HelmCli::new(temp.path().join("no-such-helm"));
        let output = helm
            .invoke("app", temp.path(), Functionality::Test, &[])
            .unwrap();
        assert_eq!(output.code, Some(NO_TESTS_EXIT_CODE));
    }

    #[test]
    fn test_missing_binary_is_launch_failure() {
        let temp = TempDir::new().unwrap();
        let helm = HelmCli::new(temp.path().join("no-such-helm"));
        let err = helm
            .invoke("app", temp.path(), Functionality::Validate, &[])
            .unwrap_err();
        assert!(matches!(err, ChartCiError::ToolLaunchFailed { .. }));
        assert!(err.to_string().contains("app"));
    }
}
