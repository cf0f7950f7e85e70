//! JSON diagnostic logger.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};

use crate::config::schema::LoggerOptions;
use crate::error::LogError;
use crate::logger::level::Severity;
use crate::logger::record::{format_timestamp, LogRecord};
use crate::logger::render::compose_message;
use crate::logger::routing::{route, Route};
use crate::logger::value::LogValue;
use crate::sink::{Sink, StdoutSink};

/// The fixed diagnostic capability set.
pub trait DiagLogger {
    fn debug(&self, message: &LogValue, args: &[LogValue]) -> Result<(), LogError>;
    fn info(&self, message: &LogValue, args: &[LogValue]) -> Result<(), LogError>;
    fn warn(&self, message: &LogValue, args: &[LogValue]) -> Result<(), LogError>;
    fn error(&self, message: &LogValue, args: &[LogValue]) -> Result<(), LogError>;
    fn verbose(&self, message: &LogValue, args: &[LogValue]) -> Result<(), LogError>;
}

/// Logger that writes each call as one JSON line to its sink.
///
/// Options live behind an [`ArcSwap`]: every call takes one snapshot, so a
/// concurrent [`set_options`](Self::set_options) is seen either entirely or
/// not at all.
#[derive(Debug)]
pub struct JsonDiagLogger<S = StdoutSink> {
    options: ArcSwap<LoggerOptions>,
    sink: S,
    clock: fn() -> DateTime<Utc>,
}

impl JsonDiagLogger<StdoutSink> {
    /// Logger writing to standard output.
    pub fn stdout(options: LoggerOptions) -> Self {
        Self::new(options, StdoutSink)
    }
}

impl<S: Sink> JsonDiagLogger<S> {
    pub fn new(options: LoggerOptions, sink: S) -> Self {
        Self {
            options: ArcSwap::from_pointee(options),
            sink,
            clock: Utc::now,
        }
    }

    /// Replace the source of record timestamps.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the active options wholesale.
    pub fn set_options(&self, options: LoggerOptions) {
        tracing::debug!(
            logger_name = %options.logger_name,
            service_name = %options.service_name,
            "Logger options replaced"
        );
        self.options.store(Arc::new(options));
    }

    /// Snapshot of the active options.
    pub fn options(&self) -> Arc<LoggerOptions> {
        self.options.load_full()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Build the record for a call without writing it.
    ///
    /// Returns `None` when routing suppresses the call.
    pub fn create_log_entry(
        &self,
        message: &LogValue,
        args: &[LogValue],
        level: Severity,
    ) -> Option<LogRecord> {
        self.create_log_entry_at(message, args, level, (self.clock)())
    }

    /// Like [`create_log_entry`](Self::create_log_entry) with a fixed instant.
    pub fn create_log_entry_at(
        &self,
        message: &LogValue,
        args: &[LogValue],
        level: Severity,
        instant: DateTime<Utc>,
    ) -> Option<LogRecord> {
        let options = self.options.load_full();
        build_record(&options, message, args, level, instant)
    }

    /// Route, format and write one call.
    pub fn log(&self, level: Severity, message: &LogValue, args: &[LogValue]) -> Result<(), LogError> {
        let options = self.options.load_full();

        let Some(record) = build_record(&options, message, args, level, (self.clock)()) else {
            tracing::trace!(requested = %level, "Log call suppressed");
            return Ok(());
        };

        let line = record.to_json_line()?;
        self.sink.write_line(&line)?;
        Ok(())
    }
}

fn build_record(
    options: &LoggerOptions,
    message: &LogValue,
    args: &[LogValue],
    level: Severity,
    instant: DateTime<Utc>,
) -> Option<LogRecord> {
    let level = match route(level, message, options) {
        Route::Emit(level) => level,
        Route::Suppress => return None,
    };

    Some(LogRecord {
        level,
        logger: options.logger_name.clone(),
        message: compose_message(message, args, options),
        service_name: options.service_name.clone(),
        timestamp: format_timestamp(instant),
    })
}

impl<S: Sink> DiagLogger for JsonDiagLogger<S> {
    fn debug(&self, message: &LogValue, args: &[LogValue]) -> Result<(), LogError> {
        self.log(Severity::Debug, message, args)
    }

    fn info(&self, message: &LogValue, args: &[LogValue]) -> Result<(), LogError> {
        self.log(Severity::Info, message, args)
    }

    fn warn(&self, message: &LogValue, args: &[LogValue]) -> Result<(), LogError> {
        self.log(Severity::Warn, message, args)
    }

    fn error(&self, message: &LogValue, args: &[LogValue]) -> Result<(), LogError> {
        self.log(Severity::Error, message, args)
    }

    fn verbose(&self, message: &LogValue, args: &[LogValue]) -> Result<(), LogError> {
        self.log(Severity::Verbose, message, args)
    }
}
