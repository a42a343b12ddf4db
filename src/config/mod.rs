//! Configuration handling for chart-ci
//!
//! This module contains data structures for:
//! - The run configuration resolved from CLI flags and environment
//! - `charts.yaml` - The chart listing (id -> directory, relative path)
//! - `.chart-ci.yaml` - Per-chart functionality switches and tool options

pub mod chart;
pub mod listing;
pub mod run;

// Re-export commonly used types
pub use chart::{CHART_CONFIG_FILE, ChartConfig};
pub use listing::ChartListing;
pub use run::{ChangeDetection, ExecutionMode, RunConfig};
