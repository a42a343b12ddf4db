//! Per-chart functionality switches
//!
//! Reads `.chart-ci.yaml` from the chart directory on every call; nothing is
//! cached between charts.

use crate::config::ChartConfig;
use crate::domain::{ChartEntry, Functionality};

/// Decides whether a functionality runs for a chart and with which flags
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureGate;

impl FeatureGate {
    pub fn is_enabled(
        self,
        chart: &ChartEntry,
        functionality: Functionality,
        default: bool,
    ) -> bool {
        ChartConfig::load(&chart.dir).is_enabled(functionality, default)
    }

    pub fn options(self, chart: &ChartEntry, functionality: Functionality) -> Vec<String> {
        ChartConfig::load(&chart.dir).flags(functionality)
    }
}
