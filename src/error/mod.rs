//! Error types and handling for chart-ci
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Run configuration and per-chart configuration errors
//! - [`listing`]: Chart listing errors
//! - [`git`]: Git operation errors (change detection)
//! - [`tool`]: External chart tool errors
//! - [`report`]: Report writing errors
//!
//! Per-chart tool failures (non-zero exit codes) are not errors: they are
//! recorded as [`crate::domain::ChartStatus::Failed`] results. Everything in
//! this enum aborts the run.

pub mod config;
pub mod git;
pub mod listing;
pub mod report;
pub mod tool;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for chart-ci operations
#[derive(Error, Diagnostic, Debug)]
pub enum ChartCiError {
    // Configuration errors
    #[error("Missing required input: {name}")]
    #[diagnostic(
        code(chart_ci::config::missing_input),
        help("Set the corresponding flag or environment variable to a non-empty value")
    )]
    MissingInput { name: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(chart_ci::config::invalid))]
    ConfigInvalid { message: String },

    // Listing errors
    #[error("Failed to read chart listing: {path}: {reason}")]
    #[diagnostic(
        code(chart_ci::listing::read_failed),
        help("Run 'chart-ci discover' to generate the listing file")
    )]
    ListingReadFailed { path: String, reason: String },

    #[error("Failed to parse chart listing: {path}: {reason}")]
    #[diagnostic(code(chart_ci::listing::parse_failed))]
    ListingParseFailed { path: String, reason: String },

    #[error("Invalid chart listing: {message}")]
    #[diagnostic(code(chart_ci::listing::invalid))]
    ListingInvalid { message: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(chart_ci::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Failed to open repository at '{path}': {reason}")]
    #[diagnostic(
        code(chart_ci::git::open_failed),
        help("Change detection requires the workspace to be a git checkout")
    )]
    GitOpenFailed { path: String, reason: String },

    #[error("Failed to fetch '{git_ref}' from {url}: {reason}")]
    #[diagnostic(
        code(chart_ci::git::fetch_failed),
        help("Check the repository URL and that the access token can read it")
    )]
    GitFetchFailed {
        url: String,
        git_ref: String,
        reason: String,
    },

    #[error("Failed to resolve git ref '{git_ref}': {reason}")]
    #[diagnostic(
        code(chart_ci::git::ref_resolve_failed),
        help("Make sure the branch is fetched (actions/checkout with fetch-depth: 0)")
    )]
    GitRefResolveFailed { git_ref: String, reason: String },

    // Tool errors
    #[error("Failed to launch '{tool}' for chart '{chart}': {reason}")]
    #[diagnostic(
        code(chart_ci::tool::launch_failed),
        help("Check that helm is installed and on PATH, or pass --helm")
    )]
    ToolLaunchFailed {
        tool: String,
        chart: String,
        reason: String,
    },

    // Report errors
    #[error("Failed to write report to {path}: {reason}")]
    #[diagnostic(code(chart_ci::report::write_failed))]
    SummaryWriteFailed { path: String, reason: String },

    /// Verdict of a complete run: at least one chart failed
    #[error("Charts failed: {charts}")]
    #[diagnostic(
        code(chart_ci::run::charts_failed),
        help("See the job summary for the failure reason of each chart")
    )]
    ChartsFailed { charts: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(chart_ci::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for ChartCiError {
    fn from(err: std::io::Error) -> Self {
        ChartCiError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ChartCiError {
    fn from(err: serde_yaml::Error) -> Self {
        ChartCiError::ListingParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ChartCiError {
    fn from(err: serde_json::Error) -> Self {
        ChartCiError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<git2::Error> for ChartCiError {
    fn from(err: git2::Error) -> Self {
        ChartCiError::GitOperationFailed {
            message: err.message().to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ChartCiError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_code() {
        let err = config::missing_input("GITHUB_WORKSPACE");
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("chart_ci::config::missing_input".to_string())
        );
    }

    test_error_contains!(
        test_missing_input_names_input,
        config::missing_input("GITHUB_WORKSPACE"),
        "Missing required input",
        "GITHUB_WORKSPACE"
    );

    test_error_contains!(
        test_charts_failed_lists_charts,
        ChartCiError::ChartsFailed {
            charts: "chart-a, chart-b".to_string()
        },
        "chart-a",
        "chart-b"
    );

    test_error_contains!(
        test_tool_launch_failed_names_chart,
        tool::launch_failed("helm", "ingress", "No such file or directory"),
        "helm",
        "ingress",
        "No such file or directory"
    );

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChartCiError = io_err.into();
        assert!(matches!(err, ChartCiError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: ChartCiError = parse_result.unwrap_err().into();
        assert!(matches!(err, ChartCiError::ListingParseFailed { .. }));
    }

    #[test]
    fn test_git_error_conversion() {
        let err: ChartCiError = git2::Error::from_str("git error").into();
        assert!(matches!(err, ChartCiError::GitOperationFailed { .. }));
    }
}
