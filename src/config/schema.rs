//! Configuration schema definitions.
//!
//! This module defines the complete option set of the logger.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::logger::level::Severity;

/// Marker appended to a truncated message when none is configured.
pub const DEFAULT_TRUNCATION_MARKER: &str = "...[TRUNCATED]";

/// Root configuration for the logger.
///
/// Replaced as a whole on update; optional fields that are absent mean
/// "no override".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggerOptions {
    /// Written to the `logger` field of every record.
    pub logger_name: String,

    /// Written to the `serviceName` field of every record.
    pub service_name: String,

    /// Severity substituted for VERBOSE calls. `OFF` drops them.
    #[serde(default)]
    pub verbose_severity: Option<Severity>,

    /// Severity substituted for ERROR calls about failed service requests.
    #[serde(default)]
    pub service_request_error_severity: Option<Severity>,

    /// Severity substituted for ERROR calls about timeouts.
    #[serde(default)]
    pub timeout_error_severity: Option<Severity>,

    /// Text appended in place of a truncated remainder.
    #[serde(default)]
    pub truncation_marker: Option<String>,

    /// Maximum length in chars of the rendered primary message.
    #[serde(default)]
    pub truncation_limit: Option<usize>,

    /// Bounds for rendering nested arguments.
    #[serde(default)]
    pub render: RenderLimits,
}

impl LoggerOptions {
    /// Options with every override unset.
    pub fn new(logger_name: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            logger_name: logger_name.into(),
            service_name: service_name.into(),
            verbose_severity: None,
            service_request_error_severity: None,
            timeout_error_severity: None,
            truncation_marker: None,
            truncation_limit: None,
            render: RenderLimits::default(),
        }
    }

    pub fn truncation_marker(&self) -> &str {
        self.truncation_marker
            .as_deref()
            .unwrap_or(DEFAULT_TRUNCATION_MARKER)
    }
}

/// Depth and width bounds for the argument renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderLimits {
    /// Containers nested deeper than this render as `[Array]` / `[Object]`.
    pub max_depth: usize,

    /// Entries shown per container before `... N more items`.
    pub max_items: usize,

    /// Values rendered per call before the rest is elided as `[...]`.
    pub max_nodes: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_items: 100,
            max_nodes: 10_000,
        }
    }
}
