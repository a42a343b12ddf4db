//! Per-chart outcome of a run

use serde::Serialize;

use super::ChartEntry;

/// Outcome status of processing one chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStatus {
    /// Validation or unit tests succeeded
    Passed,
    /// Dependencies were refreshed
    Updated,
    /// The tool exited with a failure code
    Failed,
    /// Nothing to run (no test suite present)
    Skipped,
    /// Turned off in the chart's configuration
    Disabled,
}

impl ChartStatus {
    pub fn label(self) -> &'static str {
        match self {
            ChartStatus::Passed => "passed",
            ChartStatus::Updated => "updated",
            ChartStatus::Failed => "failed",
            ChartStatus::Skipped => "skipped",
            ChartStatus::Disabled => "disabled",
        }
    }
}

/// Result of running one functionality on one chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartResult {
    pub chart: String,
    pub relative_path: String,
    pub status: ChartStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ChartResult {
    fn new(chart: &ChartEntry, status: ChartStatus, reason: Option<String>) -> Self {
        Self {
            chart: chart.id.clone(),
            relative_path: chart.relative_path.clone(),
            status,
            reason,
        }
    }

    pub fn passed(chart: &ChartEntry) -> Self {
        Self::new(chart, ChartStatus::Passed, None)
    }

    pub fn updated(chart: &ChartEntry) -> Self {
        Self::new(chart, ChartStatus::Updated, None)
    }

    pub fn failed(chart: &ChartEntry, reason: impl Into<String>) -> Self {
        Self::new(chart, ChartStatus::Failed, Some(reason.into()))
    }

    pub fn skipped(chart: &ChartEntry, reason: impl Into<String>) -> Self {
        Self::new(chart, ChartStatus::Skipped, Some(reason.into()))
    }

    pub fn disabled(chart: &ChartEntry) -> Self {
        Self::new(
            chart,
            ChartStatus::Disabled,
            Some("disabled by configuration".to_string()),
        )
    }

    pub fn is_failure(&self) -> bool {
        self.status == ChartStatus::Failed
    }
}
