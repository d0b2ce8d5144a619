//! Configuration management for bikedash

pub mod defaults;
pub mod loader;
pub mod schema;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::{ChartsConfig, ColorsConfig, Config, DataConfig, LoggingConfig, ReportConfig};
