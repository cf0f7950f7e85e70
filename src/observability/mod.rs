//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! crate internals (config reload, suppression, option changes)
//!     → logging.rs (tracing subscriber on stderr)
//!
//! application `tracing` events
//!     → layer.rs (JsonDiagLayer)
//!     → JsonDiagLogger → sink
//! ```

pub mod layer;
pub mod logging;

pub use layer::JsonDiagLayer;
