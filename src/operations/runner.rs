//! Runs one functionality on one chart and classifies the outcome

use tracing::{info, warn};

use crate::domain::{ChartEntry, ChartResult, Functionality};
use crate::error::Result;
use crate::helm::{ChartTool, NO_TESTS_EXIT_CODE, ToolOutput};
use crate::operations::gate::FeatureGate;

const UNKNOWN_ERROR: &str = "unknown error";

/// Processes a single chart
///
/// Holds no per-chart state, so one runner is shared by every task of a run.
pub struct ChartTaskRunner<'a> {
    tool: &'a dyn ChartTool,
    gate: FeatureGate,
    /// Whether a functionality runs for charts that do not configure it
    enabled_by_default: bool,
}

impl<'a> ChartTaskRunner<'a> {
    pub fn new(tool: &'a dyn ChartTool) -> Self {
        Self {
            tool,
            gate: FeatureGate,
            enabled_by_default: true,
        }
    }

    #[cfg(test)]
    pub fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.enabled_by_default = enabled;
        self
    }

    /// Run `functionality` for `chart`
    ///
    /// Tool failures become `Failed` results; only a tool that cannot be
    /// started returns `Err`.
    pub fn process(&self, chart: &ChartEntry, functionality: Functionality) -> Result<ChartResult> {
        if !self
            .gate
            .is_enabled(chart, functionality, self.enabled_by_default)
        {
            info!(chart = %chart.id, %functionality, "disabled by configuration");
            return Ok(ChartResult::disabled(chart));
        }
        let flags = self.gate.options(chart, functionality);

        let output = self.tool.invoke(&chart.id, &chart.dir, functionality, &flags)?;
        let result = classify(chart, functionality, &output);

        if result.is_failure() {
            warn!(chart = %chart.id, %functionality, code = ?output.code, "failed");
        } else {
            info!(chart = %chart.id, %functionality, status = result.status.label(), "done");
        }
        Ok(result)
    }
}

fn classify(chart: &ChartEntry, functionality: Functionality, output: &ToolOutput) -> ChartResult {
    match (functionality, output.code) {
        (Functionality::DependencyUpdate, Some(0)) => ChartResult::updated(chart),
        (Functionality::Validate | Functionality::Test, Some(0)) => ChartResult::passed(chart),
        (Functionality::Test, Some(NO_TESTS_EXIT_CODE)) => {
            ChartResult::skipped(chart, "no tests directory")
        }
        _ => ChartResult::failed(chart, output.failure_text().unwrap_or(UNKNOWN_ERROR)),
    }
}
