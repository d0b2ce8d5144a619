//! Common domain types, error handling, and logging for bikedash

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{BikedashError, Result};
pub use logging::{init_default_logging, init_logging, LogOptions};
pub use types::*;
