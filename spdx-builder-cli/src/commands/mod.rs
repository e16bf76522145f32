//! Command handlers -- one module per subcommand

pub mod config;
pub mod generate;

use std::path::Path;

use tracing::debug;

use spdx_builder_core::config::SpdxBuilderConfig;
use spdx_builder_core::error::SpdxBuilderError;

/// Load the configuration for a command that can run without a config file.
///
/// A missing file falls back to defaults plus environment overrides;
/// any other load error is returned.
pub fn load_config_or_default(config_path: &Path) -> Result<SpdxBuilderConfig, SpdxBuilderError> {
    if config_path.exists() {
        SpdxBuilderConfig::load(config_path)
    } else {
        debug!(path = %config_path.display(), "config file not found, using defaults");
        SpdxBuilderConfig::from_env()
    }
}
