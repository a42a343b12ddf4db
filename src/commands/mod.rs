//! Command implementations for chart-ci

pub mod completions;
pub mod discover;
pub mod run;
pub mod version;
