//! Log setup for `spdx-builder`.
//!
//! Scan progress (per-file hashes and detected license tags at `debug`,
//! unreadable files and skipped list entries at `warn`, package and document
//! summaries at `info`) goes to stderr. Stdout stays reserved for the
//! `generate`/`config` report so `--format json` output can be piped.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use spdx_builder_core::config::GeneralConfig;

/// Install the subscriber for one `spdx-builder` run.
///
/// The level comes from `RUST_LOG` when set, otherwise from `general.log_level`
/// (already merged with `--log-level`). `general.log_format` picks `json` lines
/// for CI logs or `pretty` for a terminal; anything else is rejected.
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)
                })?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
                })?;
        }
        _ => {
            return Err(anyhow::anyhow!(
                "unknown log format '{}', expected 'json' or 'pretty'",
                config.log_format
            ));
        }
    }

    Ok(())
}
