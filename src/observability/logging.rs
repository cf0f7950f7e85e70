//! Internal diagnostics.
//!
//! # Responsibilities
//! - Initialize the subscriber for the crate's own `tracing` events
//! - Keep stdout free for JSON records
//!
//! # Design Decisions
//! - Level configurable via `RUST_LOG`, falling back to the given filter
//! - Human-readable format on stderr

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "json_diag_logger=info";

pub fn init_logging(default_filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
