//! Operations that drive a chart run
//!
//! - [`pipeline::ChartRunOperation`]: the validate / update-deps / test flow
//! - [`filter`]: narrows the listing to the working set
//! - [`gate`]: per-chart enable switches and tool flags
//! - [`runner`]: one functionality on one chart
//! - [`coordinator`]: fan-out over the working set
//! - [`discover`]: builds a chart listing from the workspace

pub mod coordinator;
pub mod discover;
pub mod filter;
pub mod gate;
pub mod pipeline;
pub mod runner;

pub use discover::discover_charts;
pub use pipeline::ChartRunOperation;
