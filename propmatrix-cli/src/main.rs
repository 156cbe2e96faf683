//! propmatrix CLI entry point
//!
//! Parses arguments, initializes logging from the `[general]` config section,
//! dispatches to a command handler and maps failures to exit codes.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use propmatrix_core::config::{GeneralConfig, PropmatrixConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(&logging_config(&cli)) {
        eprintln!("{} {e}", "warning:".yellow().bold());
    }

    if let Err(e) = run(cli) {
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(e.exit_code());
    }
}

/// Logging settings from the config file, falling back to defaults when the
/// file cannot be loaded. The command itself reports any config error.
fn logging_config(cli: &Cli) -> GeneralConfig {
    let mut general = PropmatrixConfig::load_or_default(&cli.config)
        .map(|config| config.general)
        .unwrap_or_default();
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    general
}

fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    tracing::debug!(config = %cli.config.display(), "propmatrix starting");

    match cli.command {
        Commands::Scan(args) => commands::scan::execute(args, &cli.config, &writer),
        Commands::Matrix(args) => commands::matrix::execute(args, &cli.config, &writer),
        Commands::Evidence(args) => commands::evidence::execute(args, &cli.config, &writer),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer),
    }
}
