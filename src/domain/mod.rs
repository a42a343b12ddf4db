//! Domain models for chart-ci
//!
//! This module contains pure domain objects shared by every stage of a run:
//! the charts being processed, the functionality being run on them, and the
//! per-chart outcome.

pub mod chart;
pub mod functionality;
pub mod result;

pub use chart::ChartEntry;
pub use functionality::Functionality;
pub use result::{ChartResult, ChartStatus};
