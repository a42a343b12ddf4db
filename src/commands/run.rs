//! validate / update-deps / test command implementation

use crate::cli::Cli;
use crate::config::RunConfig;
use crate::domain::Functionality;
use crate::error::Result;
use crate::operations::ChartRunOperation;

/// Run `functionality` over the charts of the workspace
pub fn run(cli: &Cli, functionality: Functionality) -> Result<()> {
    let config = RunConfig::from_cli(cli)?;
    ChartRunOperation::new(&config).execute(functionality)
}
