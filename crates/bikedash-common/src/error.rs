//! Error types and utilities for bikedash

use thiserror::Error;

/// Result type alias for bikedash operations
pub type Result<T> = std::result::Result<T, BikedashError>;

/// Main error type for bikedash operations
#[derive(Error, Debug)]
pub enum BikedashError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Low-level CSV reader errors (the csv crate already reports positions)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed or inconsistent input data
    #[error("Data error: {message}")]
    Data {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Chart rendering errors
    #[error("Chart error: {message}")]
    Chart {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for configuration or arguments
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BikedashError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new data error with source
    pub fn data_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Data {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new chart error
    pub fn chart(msg: impl Into<String>) -> Self {
        Self::Chart {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new chart error with source
    pub fn chart_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Chart {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

// Error conversion implementations for external types

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to BikedashError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for BikedashError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::chart_with_source("Chart rendering failed", err)
    }
}
