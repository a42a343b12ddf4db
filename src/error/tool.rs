//! External chart tool errors

use super::ChartCiError;

/// Creates a tool launch failed error
pub fn launch_failed(
    tool: impl Into<String>,
    chart: impl Into<String>,
    reason: impl Into<String>,
) -> ChartCiError {
    ChartCiError::ToolLaunchFailed {
        tool: tool.into(),
        chart: chart.into(),
        reason: reason.into(),
    }
}
