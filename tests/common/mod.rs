//! Shared helpers for integration tests.

use chrono::{DateTime, TimeZone, Utc};
use json_diag_logger::sink::MemorySink;
use json_diag_logger::{JsonDiagLogger, LoggerOptions};

pub const FIXED_TIMESTAMP: &str = "2023-09-06T00:00:00.000Z";

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 9, 6, 0, 0, 0).unwrap()
}

pub fn test_options() -> LoggerOptions {
    LoggerOptions::new("test-logger", "test-service")
}

/// Logger writing to memory with a frozen clock.
pub fn test_logger() -> JsonDiagLogger<MemorySink> {
    JsonDiagLogger::new(test_options(), MemorySink::new()).with_clock(fixed_now)
}

/// The line written for `message` with arguments `1, {"name":"myname"}`.
#[allow(dead_code)]
pub fn expected_line(message: &str, level: &str) -> String {
    format!(
        r#"{{"level":"{}","logger":"test-logger","message":"{}. Log arguments are: [1,{{\"name\":\"myname\"}}]","serviceName":"test-service","timestamp":"{}"}}"#,
        level, message, FIXED_TIMESTAMP
    )
}
