//! CLI definitions using clap derive API
//!
//! Every input can also be given through the environment so the binary can
//! run as a CI step with no arguments besides the subcommand.

use clap::builder::{Styles, styling::AnsiColor};
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

pub mod completions;
pub mod discover;

pub use completions::CompletionsArgs;
pub use discover::DiscoverArgs;

/// chart-ci - CI automation for Helm chart monorepos
#[derive(Parser, Debug)]
#[command(
    name = "chart-ci",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Validate, update dependencies and unit test Helm charts in CI",
    long_about = "chart-ci runs helm over every chart of a monorepo (or only the charts changed \
                  against a base branch), writes a summary table to the CI job summary and fails \
                  the step when any chart fails.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  chart-ci discover -o charts.yaml          \x1b[90m# Write the chart listing\x1b[0m\n   \
                  chart-ci validate                         \x1b[90m# helm template every chart\x1b[0m\n   \
                  chart-ci test --changed-only --base main  \x1b[90m# Unit test changed charts\x1b[0m\n   \
                  chart-ci update-deps --sequential         \x1b[90m# One chart at a time\x1b[0m\n"
)]
pub struct Cli {
    /// Workspace root (repository checkout)
    #[arg(long, short = 'w', global = true, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<OsString>,

    /// Chart listing file (defaults to charts.yaml in the workspace)
    #[arg(long, global = true, env = "CHART_CI_LISTING")]
    pub listing: Option<OsString>,

    /// Only process charts changed between --base and --compare
    #[arg(
        long,
        global = true,
        env = "CHART_CI_CHANGED_ONLY",
        value_parser = FalseyValueParser::new()
    )]
    pub changed_only: bool,

    /// Base branch for change detection
    #[arg(long, global = true, env = "CHART_CI_BASE_BRANCH", default_value = "main")]
    pub base: String,

    /// Branch or ref holding the changes
    #[arg(long, global = true, env = "CHART_CI_COMPARE_BRANCH", default_value = "HEAD")]
    pub compare: String,

    /// Repository URL the compare branch is fetched from (pull requests from forks)
    #[arg(long, global = true, env = "CHART_CI_SOURCE_REPO")]
    pub source_repo: Option<String>,

    /// Repository URL the base branch is fetched from
    #[arg(long, global = true, env = "CHART_CI_TARGET_REPO")]
    pub target_repo: Option<String>,

    /// Access token for fetching from the repositories above
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Process charts one at a time instead of all at once
    #[arg(
        long,
        global = true,
        env = "CHART_CI_SEQUENTIAL",
        value_parser = FalseyValueParser::new()
    )]
    pub sequential: bool,

    /// helm binary to invoke
    #[arg(long, global = true, env = "HELM_BIN", default_value = "helm")]
    pub helm: PathBuf,

    /// Markdown job summary file to append the report to (stdout when unset)
    #[arg(long, global = true, env = "GITHUB_STEP_SUMMARY")]
    pub summary_file: Option<OsString>,

    /// Also write the run summary as JSON to this file
    #[arg(long, global = true)]
    pub json_summary: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Workspace root, `None` when unset or set to an empty value
    pub fn workspace_root(&self) -> Option<PathBuf> {
        non_empty_path(self.workspace.as_ref())
    }

    /// Listing file as given, `None` when unset or empty
    pub fn listing_path(&self) -> Option<PathBuf> {
        non_empty_path(self.listing.as_ref())
    }

    /// Job summary file, `None` when unset or empty
    pub fn summary_path(&self) -> Option<PathBuf> {
        non_empty_path(self.summary_file.as_ref())
    }
}

/// CI runners export unset inputs as empty variables, so those are read as
/// raw strings and an empty value counts as absent.
fn non_empty_path(value: Option<&OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render chart manifests with helm template
    Validate,

    /// Refresh chart dependency locks with helm dependency update
    UpdateDeps,

    /// Run chart unit tests with helm unittest
    Test,

    /// Find charts in the workspace and print the chart listing
    Discover(DiscoverArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
