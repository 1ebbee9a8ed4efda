use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggerConfig};
use crate::error::{LoggerError, Result};
use crate::sink::DIAGNOSTIC_TARGET;

/// `RUST_LOG` when set, otherwise the configured level for everything
/// including diagnostic records
pub fn env_filter(config: &LoggerConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{level},{DIAGNOSTIC_TARGET}={level}", level = config.log_level).into()
    })
}

/// Install the global subscriber for this process.
///
/// Development gets human-readable output, everything else JSON lines.
pub fn init_tracing(config: &LoggerConfig) -> Result<()> {
    let filter = env_filter(config);

    let installed = match config.format() {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .try_init(),
    };

    installed.map_err(|e| LoggerError::SubscriberInit(e.to_string()))?;
    tracing::debug!(
        mode = %config.mode,
        format = ?config.format(),
        "Diagnostic logging initialized"
    );
    Ok(())
}
