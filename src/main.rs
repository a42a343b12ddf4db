//! chart-ci - CI automation for Helm chart monorepos
//!
//! Runs one functionality (validation, dependency update or unit tests)
//! over the charts of a repository, publishes a status table to the CI job
//! summary and fails the step when any chart fails.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod git;
mod helm;
mod logging;
mod operations;
mod report;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use domain::Functionality;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match &cli.command {
        Commands::Validate => commands::run::run(&cli, Functionality::Validate),
        Commands::UpdateDeps => commands::run::run(&cli, Functionality::DependencyUpdate),
        Commands::Test => commands::run::run(&cli, Functionality::Test),
        Commands::Discover(args) => commands::discover::run(cli.workspace_root(), args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
