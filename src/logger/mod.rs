//! Logger subsystem.
//!
//! # Data Flow
//! ```text
//! caller
//!     → json.rs (JsonDiagLogger::log, one options snapshot per call)
//!     → routing.rs (effective severity or suppression)
//!     → render.rs (primary message + arguments, truncation)
//!     → record.rs (LogRecord, fixed field order)
//!     → sink (one line per record)
//! ```
//!
//! # Design Decisions
//! - A call either writes exactly one line or nothing
//! - Record creation is separated from writing so it can be tested without I/O
//! - Timestamps are taken when the record is built

pub mod json;
pub mod level;
pub mod record;
pub mod render;
pub mod routing;
pub mod value;

pub use json::{DiagLogger, JsonDiagLogger};
pub use level::Severity;
pub use record::LogRecord;
pub use value::{LogValue, SharedValue};
