//! Discover command implementation
//!
//! Prints (or writes) a chart listing for every chart in the workspace.

use std::path::PathBuf;

use tracing::info;

use crate::cli::DiscoverArgs;
use crate::error::{ChartCiError, Result, config};
use crate::operations::discover_charts;

/// Run discover command
pub fn run(workspace: Option<PathBuf>, args: &DiscoverArgs) -> Result<()> {
    let workspace_root = match workspace {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| ChartCiError::IoError {
            message: format!("Failed to get current directory: {e}"),
        })?,
    };
    if !workspace_root.is_dir() {
        return Err(config::invalid(format!(
            "workspace root '{}' is not a directory",
            workspace_root.display()
        )));
    }

    let listing = discover_charts(&workspace_root)?;
    let yaml = listing.to_yaml(&workspace_root)?;

    match &args.output {
        Some(output) => {
            let path = if output.is_absolute() {
                output.clone()
            } else {
                workspace_root.join(output)
            };
            std::fs::write(&path, yaml)?;
            info!(charts = listing.len(), path = %path.display(), "wrote chart listing");
        }
        None => print!("{yaml}"),
    }
    Ok(())
}
