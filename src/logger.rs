//! Tracing subscriber setup.
//!
//! Events go to stderr so command output on stdout stays machine readable.

use std::io;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::{LogFormat, LogLevel, LoggerSettings};
use crate::{Error, Result};

/// Filter directive for `settings`: the override when present, otherwise the
/// configured level scoped to this crate.
#[must_use]
pub fn directive(settings: &LoggerSettings) -> String {
    if let Some(filter) = &settings.override_filter {
        return filter.clone();
    }
    match settings.level {
        LogLevel::Off => "off".to_string(),
        level => format!("{}={level}", env!("CARGO_CRATE_NAME")),
    }
}

/// Installs the global subscriber described by `settings`.
///
/// Does nothing when logging is disabled.
///
/// # Errors
///
/// Fails when the filter directive is invalid or a global subscriber was
/// already installed.
pub fn init(settings: &LoggerSettings) -> Result<()> {
    if !settings.enable {
        return Ok(());
    }

    let directive = directive(settings);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|err| Error::Message(format!("invalid log filter `{directive}`: {err}")))?;

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match settings.format {
        LogFormat::Compact => fmt::layer().with_writer(io::stderr).compact().boxed(),
        LogFormat::Pretty => fmt::layer().with_writer(io::stderr).pretty().boxed(),
        LogFormat::Json => fmt::layer().with_writer(io::stderr).json().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|err| Error::Message(format!("failed to install logger: {err}")))?;

    tracing::debug!(filter = %directive, "logger_initialized");
    Ok(())
}
