//! Fans the chart task runner out over the working set
//!
//! Results always come back in working-set order, whatever order the
//! charts finish in, so reports do not depend on scheduling.
//!
//! Parallel mode runs every chart on its own thread of a dedicated rayon
//! pool. A chart task that returns `Err` (the tool could not be launched)
//! does not stop its siblings: every task runs to completion, then the error
//! of the first failing chart in working-set order is returned and all
//! results are dropped.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ExecutionMode;
use crate::domain::{ChartEntry, ChartResult, Functionality};
use crate::error::{Result, config};
use crate::operations::runner::ChartTaskRunner;

pub struct ExecutionCoordinator<'a> {
    runner: &'a ChartTaskRunner<'a>,
}

impl<'a> ExecutionCoordinator<'a> {
    pub fn new(runner: &'a ChartTaskRunner<'a>) -> Self {
        Self { runner }
    }

    pub fn run(
        &self,
        working_set: &[ChartEntry],
        functionality: Functionality,
        mode: ExecutionMode,
    ) -> Result<Vec<ChartResult>> {
        info!(
            charts = working_set.len(),
            %functionality,
            ?mode,
            "processing charts"
        );
        match mode {
            ExecutionMode::Sequential => self.run_sequential(working_set, functionality),
            ExecutionMode::Parallel => self.run_parallel(working_set, functionality),
        }
    }

    fn run_sequential(
        &self,
        working_set: &[ChartEntry],
        functionality: Functionality,
    ) -> Result<Vec<ChartResult>> {
        working_set
            .iter()
            .map(|chart| self.runner.process(chart, functionality))
            .collect()
    }

    fn run_parallel(
        &self,
        working_set: &[ChartEntry],
        functionality: Functionality,
    ) -> Result<Vec<ChartResult>> {
        if working_set.is_empty() {
            return Ok(Vec::new());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(working_set.len())
            .thread_name(|i| format!("chart-ci-{i}"))
            .build()
            .map_err(|e| config::invalid(format!("cannot start worker threads: {e}")))?;
        debug!(threads = working_set.len(), "started chart worker pool");

        let outcomes: Vec<Result<ChartResult>> = pool.install(|| {
            working_set
                .par_iter()
                .with_max_len(1)
                .map(|chart| self.runner.process(chart, functionality))
                .collect()
        });

        outcomes.into_iter().collect()
    }
}
