//! Chart domain types

use std::path::{Path, PathBuf};

/// A chart as listed in the chart listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    /// Unique identifier (key in the listing)
    pub id: String,

    /// Absolute path to the chart directory
    pub dir: PathBuf,

    /// Path relative to the workspace root (e.g., "charts/ingress")
    pub relative_path: String,
}

impl ChartEntry {
    pub fn new(
        id: impl Into<String>,
        dir: impl Into<PathBuf>,
        relative_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            dir: dir.into(),
            relative_path: relative_path.into(),
        }
    }

    /// Whether a repository-relative path lies inside this chart
    ///
    /// Matching is per path component, so `charts/app` does not contain
    /// `charts/app-extra/values.yaml`.
    pub fn contains(&self, repo_path: &Path) -> bool {
        let root = self
            .relative_path
            .trim_start_matches("./")
            .trim_end_matches('/');
        if root.is_empty() || root == "." {
            return true;
        }
        repo_path.starts_with(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(relative_path: &str) -> ChartEntry {
        ChartEntry::new("app", "/ws/charts/app", relative_path)
    }

    #[test]
    fn test_contains_file_in_chart() {
        let chart = entry("charts/app");
        assert!(chart.contains(Path::new("charts/app/values.yaml")));
        assert!(chart.contains(Path::new("charts/app/templates/deployment.yaml")));
    }

    #[test]
    fn test_contains_is_component_wise() {
        let chart = entry("charts/app");
        assert!(!chart.contains(Path::new("charts/app-extra/values.yaml")));
        assert!(!chart.contains(Path::new("charts/other/values.yaml")));
    }

    #[test]
    fn test_contains_normalizes_relative_prefix() {
        let chart = entry("./charts/app/");
        assert!(chart.contains(Path::new("charts/app/Chart.yaml")));
    }

    #[test]
    fn test_root_chart_contains_everything() {
        let chart = entry(".");
        assert!(chart.contains(Path::new("README.md")));
    }
}
