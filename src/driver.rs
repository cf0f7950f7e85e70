//! JSON-lines driver.
//!
//! Each input line describes one log call:
//!
//! ```text
//! {"level":"error","message":"Service request","args":[1,{"name":"myname"}]}
//! ```
//!
//! `message` may be any JSON value; a missing `message` is undefined.
//! `args` defaults to an empty list. Blank lines are ignored.

use std::io::BufRead;

use serde_json::Value;
use thiserror::Error;

use crate::error::LogError;
use crate::logger::json::JsonDiagLogger;
use crate::logger::level::Severity;
use crate::logger::value::LogValue;
use crate::sink::Sink;

/// A parsed input line.
#[derive(Debug, Clone)]
pub struct LogCall {
    pub level: Severity,
    pub message: LogValue,
    pub args: Vec<LogValue>,
}

#[derive(Debug, Error)]
pub enum CallError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing or invalid `level`")]
    Level,

    #[error("`args` must be an array")]
    Args,
}

/// Lines read and handled by [`run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub calls: usize,
    pub rejected: usize,
}

pub fn parse_call(line: &str) -> Result<LogCall, CallError> {
    let Value::Object(mut fields) = serde_json::from_str::<Value>(line)? else {
        return Err(CallError::NotAnObject);
    };

    let level = fields
        .get("level")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Severity>().ok())
        .ok_or(CallError::Level)?;

    let message = fields
        .remove("message")
        .map(LogValue::from)
        .unwrap_or(LogValue::Undefined);

    let args = match fields.remove("args") {
        None => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().map(LogValue::from).collect(),
        Some(_) => return Err(CallError::Args),
    };

    Ok(LogCall {
        level,
        message,
        args,
    })
}

/// Feed every line of `input` to `logger`.
///
/// Malformed lines are reported and skipped; a sink failure stops the run.
pub fn run<R, S>(input: R, logger: &JsonDiagLogger<S>) -> Result<RunSummary, LogError>
where
    R: BufRead,
    S: Sink,
{
    let mut summary = RunSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_call(&line) {
            Ok(call) => {
                logger.log(call.level, &call.message, &call.args)?;
                summary.calls += 1;
            }
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping malformed log call");
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}
