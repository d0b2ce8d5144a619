//! Structured logging setup for bikedash

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{BikedashError, Result};

/// Options for the tracing subscriber
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Log level filter (e.g. "info", "debug", "bikedash_data=trace")
    pub level: String,
    /// Whether to colorize terminal output
    pub ansi: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
        }
    }
}

/// Initialize the tracing subscriber with the given options.
///
/// An unparseable level filter falls back to "info". Fails only when a
/// global subscriber is already installed.
pub fn init_logging(options: &LogOptions) -> Result<()> {
    let env_filter =
        EnvFilter::try_new(&options.level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(options.ansi)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| BikedashError::config_with_source("Failed to initialize logging", e))
}

/// Initialize logging with default options
pub fn init_default_logging() -> Result<()> {
    init_logging(&LogOptions::default())
}
