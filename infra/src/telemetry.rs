//! Tracing subscriber setup

use tc_shared::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, EnvFilter};

use crate::InfrastructureError;

/// Installs the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured filter. A second call
/// returns an error and leaves the first subscriber in place.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = build_filter(config)?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_target(true);

    let installed = match config.format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|e| InfrastructureError::Config(format!("Tracing already initialized: {}", e)))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, InfrastructureError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            InfrastructureError::Config(format!("Invalid log filter '{}': {}", config.filter, e))
        }),
    }
}
