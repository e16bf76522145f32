//! CLI-specific error types and exit code mapping

use spdx_builder_core::error::{ConfigError, SpdxBuilderError};
use spdx_builder_scanner::ScannerError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Package scan, document assembly or document write failed.
    #[error("scan error: {0}")]
    Scan(String),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                     |
    /// |------|-----------------------------|
    /// | 0    | Success                     |
    /// | 1    | General / command error     |
    /// | 2    | Configuration error         |
    /// | 4    | Scan or document error      |
    /// | 10   | IO error                    |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Scan(_) => 4,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<SpdxBuilderError> for CliError {
    fn from(e: SpdxBuilderError) -> Self {
        match e {
            SpdxBuilderError::Config(err) => Self::Config(err.to_string()),
            SpdxBuilderError::Scan(err) => Self::Scan(err.to_string()),
            SpdxBuilderError::Io(err) => Self::Io(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<ScannerError> for CliError {
    fn from(e: ScannerError) -> Self {
        SpdxBuilderError::from(e).into()
    }
}
