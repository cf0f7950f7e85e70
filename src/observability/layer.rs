//! Bridge from `tracing` events to a [`JsonDiagLogger`].
//!
//! The event's `message` field becomes the primary message; every other
//! field is collected into a single object argument. TRACE maps to VERBOSE,
//! so verbose routing applies to it too.

use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::logger::json::JsonDiagLogger;
use crate::logger::level::Severity;
use crate::logger::value::LogValue;
use crate::sink::Sink;

/// Events from this crate are skipped so the logger cannot feed itself.
const OWN_TARGET: &str = "json_diag_logger";

/// The crate root or one of its modules; `json_diag_logger_app` is foreign.
fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// A `tracing_subscriber` layer that writes events through a JSON logger.
#[derive(Debug)]
pub struct JsonDiagLayer<S> {
    logger: Arc<JsonDiagLogger<S>>,
}

impl<S: Sink> JsonDiagLayer<S> {
    pub fn new(logger: Arc<JsonDiagLogger<S>>) -> Self {
        Self { logger }
    }
}

impl<S, Sub> Layer<Sub> for JsonDiagLayer<S>
where
    S: Sink + 'static,
    Sub: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, Sub>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let args = if visitor.fields.is_empty() {
            Vec::new()
        } else {
            vec![LogValue::Object(visitor.fields)]
        };

        let level = Severity::from(*metadata.level());
        if let Err(e) = self.logger.log(level, &visitor.message, &args) {
            tracing::warn!(error = %e, "Failed to write bridged event");
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: LogValue,
    fields: Vec<(String, LogValue)>,
}

impl EventVisitor {
    fn put(&mut self, field: &Field, value: LogValue) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.into());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{:?}", value).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_target_matches_crate_and_modules_only() {
        assert!(is_own_target("json_diag_logger"));
        assert!(is_own_target("json_diag_logger::logger::json"));
        assert!(!is_own_target("json_diag_logger_app"));
        assert!(!is_own_target("json_diag_loggers::x"));
        assert!(!is_own_target("my_app"));
    }
}
