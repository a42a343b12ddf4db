use clap::Parser;
use std::path::PathBuf;

/// Arguments for the discover command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print the listing for the current workspace:\n    chart-ci discover\n\n\
                  Write the listing next to the charts:\n    chart-ci discover --output charts.yaml")]
pub struct DiscoverArgs {
    /// Write the listing to this file (relative to the workspace) instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
