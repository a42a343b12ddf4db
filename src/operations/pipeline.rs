//! Chart run operation
//!
//! One pipeline serves validate, update-deps and test:
//! listing -> change filter -> coordinator -> report -> sink.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::config::{ChartListing, RunConfig};
use crate::domain::Functionality;
use crate::error::{ChartCiError, Result};
use crate::git;
use crate::helm::{ChartTool, HelmCli};
use crate::operations::coordinator::ExecutionCoordinator;
use crate::operations::filter::{self, WorkingSet};
use crate::operations::runner::ChartTaskRunner;
use crate::report::{self, Report, ReportSink, Verdict};

/// High-level chart run operation
pub struct ChartRunOperation<'a> {
    config: &'a RunConfig,
}

impl<'a> ChartRunOperation<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Run `functionality` with helm and publish the report
    ///
    /// Returns [`ChartCiError::ChartsFailed`] after the report is written
    /// when any chart failed.
    pub fn execute(&self, functionality: Functionality) -> Result<()> {
        let helm = HelmCli::new(&self.config.helm_bin);
        let report = self.run_with(&helm, functionality)?;

        ReportSink::new(
            self.config.summary_file.clone(),
            self.config.json_summary.clone(),
        )
        .publish(&report)?;

        match report.verdict {
            Verdict::Success => Ok(()),
            Verdict::Failure(charts) => Err(ChartCiError::ChartsFailed {
                charts: charts.join(", "),
            }),
        }
    }

    /// Build the report for `functionality` using `tool`
    pub fn run_with(&self, tool: &dyn ChartTool, functionality: Functionality) -> Result<Report> {
        let listing = ChartListing::load(&self.config.listing_path, &self.config.workspace_root)?;
        if listing.is_empty() {
            warn!(listing = %self.config.listing_path.display(), "chart listing is empty");
        } else {
            info!(charts = listing.len(), "loaded chart listing");
        }

        let changed: Option<HashSet<String>> = match &self.config.change_detection {
            Some(detection) => Some(git::changed_charts(
                &self.config.workspace_root,
                detection,
                listing.charts(),
            )?),
            None => None,
        };

        let working_set = filter::select(listing.charts(), changed.as_ref());
        if let WorkingSet::NothingChanged { total } = working_set {
            info!(total, "no charts changed");
            return Ok(report::build(functionality, &[], working_set.scope()));
        }

        let runner = ChartTaskRunner::new(tool);
        let results = ExecutionCoordinator::new(&runner).run(
            working_set.charts(),
            functionality,
            self.config.mode,
        )?;
        Ok(report::build(functionality, &results, working_set.scope()))
    }
}
