//! Severity routing.
//!
//! # Responsibilities
//! - Substitute the severity of VERBOSE calls
//! - Redirect ERROR calls about service requests or timeouts
//! - Decide when a call is suppressed
//!
//! # Precedence
//! ```text
//! VERBOSE + verbose_severity                      → substitute (OFF drops)
//! ERROR   + service request + override configured → substitute
//! ERROR   + timeout         + override configured → substitute
//! otherwise                                       → requested level
//! ```
//!
//! # Design Decisions
//! - Category checks are exclusive: a configured service request override
//!   wins over the timeout override
//! - OFF as a category override also drops the call
//! - Patterns are compiled once

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::schema::LoggerOptions;
use crate::logger::level::Severity;
use crate::logger::render::render_value;
use crate::logger::value::LogValue;

static SERVICE_REQUEST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)service request").expect("static pattern"));

static TIMEOUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(deadline[_ ]exceeded|timed? ?out)\b").expect("static pattern")
});

/// Outcome of routing one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Emit(Severity),
    Suppress,
}

pub fn is_service_request(text: &str) -> bool {
    SERVICE_REQUEST.is_match(text)
}

pub fn is_timeout(text: &str) -> bool {
    TIMEOUT.is_match(text)
}

/// Decide the effective severity for a call.
pub fn route(requested: Severity, message: &LogValue, options: &LoggerOptions) -> Route {
    let effective = match requested {
        Severity::Verbose => options.verbose_severity.unwrap_or(requested),
        Severity::Error
            if options.service_request_error_severity.is_some()
                || options.timeout_error_severity.is_some() =>
        {
            let text = message_text(message, options);
            if let Some(severity) = options
                .service_request_error_severity
                .filter(|_| is_service_request(&text))
            {
                severity
            } else if let Some(severity) =
                options.timeout_error_severity.filter(|_| is_timeout(&text))
            {
                severity
            } else {
                requested
            }
        }
        other => other,
    };

    if effective.is_off() {
        Route::Suppress
    } else {
        Route::Emit(effective)
    }
}

fn message_text<'a>(message: &'a LogValue, options: &LoggerOptions) -> Cow<'a, str> {
    match message {
        LogValue::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(render_value(other, &options.render)),
    }
}
