//! JSON diagnostic logger library.
//!
//! Renders diagnostic log calls (debug/info/warn/error/verbose) as single-line
//! JSON records for log aggregation tools.

pub mod config;
pub mod driver;
pub mod error;
pub mod logger;
pub mod observability;
pub mod sink;

pub use config::schema::LoggerOptions;
pub use error::{ConfigError, LogError};
pub use logger::{DiagLogger, JsonDiagLogger, LogRecord, LogValue, Severity, SharedValue};
pub use observability::JsonDiagLayer;
