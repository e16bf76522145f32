//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// spdx-builder -- build SPDX 2.2 JSON documents from source and build file lists.
///
/// Use `spdx-builder <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "spdx-builder", version, about, long_about = None)]
pub struct Cli {
    /// Path to the spdx-builder.toml configuration file.
    #[arg(short, long, default_value = "spdx-builder.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format for command results.
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan source and build file lists and write an SPDX JSON document.
    Generate(GenerateArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- generate ----

/// Scan both file lists and write one SPDX document.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the list of source files (one relative path per line).
    pub sources: PathBuf,

    /// Root directory for source files.
    pub srcdir: PathBuf,

    /// Path to the list of build files (one relative path per line).
    pub builds: PathBuf,

    /// Root directory for build files.
    pub builddir: PathBuf,

    /// Directory to write the SPDX JSON document into.
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Prefix for the document namespace (must not end with '/').
    #[arg(short = 'n', long)]
    pub namespace_prefix: Option<String>,

    /// Package name used for the "<name> sources" / "<name> builds" packages.
    #[arg(long)]
    pub package_name: Option<String>,

    /// Package version.
    #[arg(long)]
    pub package_version: Option<String>,

    /// Declared license expression for both packages.
    #[arg(long)]
    pub package_license: Option<String>,

    /// Package supplier (person).
    #[arg(long, conflicts_with = "supplier_org")]
    pub supplier_person: Option<String>,

    /// Package supplier (organization).
    #[arg(long)]
    pub supplier_org: Option<String>,

    /// Pretty-print the JSON document (2-space indent).
    #[arg(short, long)]
    pub pretty: bool,

    /// Include per-file details in the command summary.
    #[arg(short, long)]
    pub verbose: bool,
}

// ---- config ----

/// Manage spdx-builder configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, scanner, document, package).
        #[arg(long)]
        section: Option<String>,
    },
}
