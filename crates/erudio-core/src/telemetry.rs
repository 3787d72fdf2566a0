//! Tracing subscriber initialisation.

use serde::{Deserialize, Serialize};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, one line per event.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Settings for the global tracing subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Log line format.
    #[serde(default)]
    pub format: LogFormat,

    /// Whether to include the event target.
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

fn default_filter() -> String {
    "info,erudio=debug,tower_http=debug".to_string()
}

const fn default_with_target() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
            with_target: default_with_target(),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.filter`. Calling this twice
/// returns an error instead of panicking.
#[cfg(feature = "telemetry")]
pub fn init_tracing(config: &TelemetryConfig) -> crate::ErudioResult<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(config.with_target))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(config.with_target))
            .try_init(),
    };

    result.map_err(|e| crate::ErudioError::internal(format!("Failed to initialise tracing: {e}")))?;

    tracing::info!(format = ?config.format, "Tracing initialized");
    Ok(())
}

/// No-op when the `telemetry` feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_tracing(_config: &TelemetryConfig) -> crate::ErudioResult<()> {
    Ok(())
}
