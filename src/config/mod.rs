//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! options file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggerOptions (validated, immutable)
//!     → JsonDiagLogger::set_options
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new options
//!     → validation.rs validates
//!     → atomic swap of Arc<LoggerOptions>
//!     → the next log call observes the new options
//! ```
//!
//! # Design Decisions
//! - Options are immutable once loaded; changes replace the whole set
//! - Optional fields default to "no override"
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::{LoggerOptions, RenderLimits};
