//! Optional `tracing` subscriber for hosts that have none.
//!
//! The library only emits events under the `weft`, `weft_syntax` and
//! `weft_config` targets. An embedder that already installs a subscriber
//! should not call [`initialise`].

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use weft_config::LogFormat;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Errors encountered while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The filter directive did not parse.
    #[error("invalid log filter '{directive}': {message}")]
    Filter {
        /// The rejected directive.
        directive: String,
        /// Why it was rejected.
        message: String,
    },
    /// Another global subscriber is already installed.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Installs a stderr subscriber filtered by `filter` and written as
/// `format`.
///
/// Only the first successful call installs anything; later calls return
/// `Ok(())` without touching the global subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an invalid directive and
/// [`TelemetryError::Subscriber`] if the host installed its own subscriber
/// first.
pub fn initialise(filter: &str, format: LogFormat) -> Result<(), TelemetryError> {
    INSTALLED
        .get_or_try_init(|| install(parse_filter(filter)?, format))
        .map(|()| ())
}

fn parse_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|err| TelemetryError::Filter {
        directive: directive.to_owned(),
        message: err.to_string(),
    })
}

fn install(filter: EnvFilter, format: LogFormat) -> Result<(), TelemetryError> {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    match format {
        LogFormat::Json => tracing::subscriber::set_global_default(
            builder.json().flatten_event(true).finish(),
        )?,
        LogFormat::Compact => tracing::subscriber::set_global_default(builder.compact().finish())?,
    }
    Ok(())
}
