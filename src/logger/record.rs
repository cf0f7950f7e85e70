//! The emitted record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::logger::level::Severity;

/// One log line. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub level: Severity,
    pub logger: String,
    pub message: String,
    pub service_name: String,
    pub timestamp: String,
}

impl LogRecord {
    /// Serialize to a single JSON line without trailing newline.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2023-09-06T00:00:00.000Z`.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let instant = Utc.with_ymd_and_hms(2023, 9, 6, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(instant), "2023-09-06T00:00:00.000Z");
    }

    #[test]
    fn test_wire_field_order() {
        let record = LogRecord {
            level: Severity::Info,
            logger: "test-logger".into(),
            message: "hello".into(),
            service_name: "test-service".into(),
            timestamp: "2023-09-06T00:00:00.000Z".into(),
        };
        assert_eq!(
            record.to_json_line().unwrap(),
            r#"{"level":"INFO","logger":"test-logger","message":"hello","serviceName":"test-service","timestamp":"2023-09-06T00:00:00.000Z"}"#
        );
    }
}
