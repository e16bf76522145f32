//! spdx-builder CLI -- build SPDX 2.2 JSON documents from file lists.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use spdx_builder_core::config::GeneralConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    // Logging follows the config file when it loads; commands report config errors themselves.
    let mut general = commands::load_config_or_default(&cli.config)
        .map(|config| config.general)
        .unwrap_or_else(|_| GeneralConfig::default());
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }

    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }

    tracing::debug!(config = %cli.config.display(), "spdx-builder starting");

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.format);

    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &cli.config, &writer),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer),
    }
}
