//! Chart discovery
//!
//! Walks the workspace for `Chart.yaml` files and builds a chart listing
//! from them. Hidden directories are not entered, and a chart's own
//! subdirectories are not searched, so vendored subcharts under
//! `<chart>/charts/` never show up as charts of their own.

use std::collections::HashMap;
use std::path::{Component, Path};

use serde::Deserialize;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::ChartListing;
use crate::domain::ChartEntry;
use crate::error::{ChartCiError, Result, listing};

const CHART_FILE: &str = "Chart.yaml";

#[derive(Debug, Deserialize)]
struct ChartMetadata {
    name: String,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn relative_path(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn read_chart_name(chart_file: &Path) -> Result<String> {
    let content = std::fs::read_to_string(chart_file)?;
    let metadata: ChartMetadata = serde_yaml::from_str(&content)
        .map_err(|e| listing::invalid(format!("{}: {e}", chart_file.display())))?;
    let name = metadata.name.trim();
    if name.is_empty() {
        return Err(listing::invalid(format!(
            "{}: chart name is empty",
            chart_file.display()
        )));
    }
    Ok(name.to_string())
}

/// Find every chart under `workspace_root`, ordered by relative path
pub fn discover_charts(workspace_root: &Path) -> Result<ChartListing> {
    let mut charts: Vec<ChartEntry> = Vec::new();
    let mut walker = WalkDir::new(workspace_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| ChartCiError::IoError {
            message: e.to_string(),
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let chart_file = entry.path().join(CHART_FILE);
        if !chart_file.is_file() {
            continue;
        }

        let id = read_chart_name(&chart_file)?;
        let relative = relative_path(workspace_root, entry.path());
        debug!(chart = %id, path = %relative, "found chart");
        charts.push(ChartEntry::new(id, entry.path(), relative));
        walker.skip_current_dir();
    }

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for chart in &charts {
        if let Some(first) = seen.insert(&chart.id, &chart.relative_path) {
            return Err(listing::invalid(format!(
                "chart name '{}' is used by both '{first}' and '{}'",
                chart.id, chart.relative_path
            )));
        }
    }

    charts.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(ChartListing::new(charts))
}
