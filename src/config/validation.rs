//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject empty identifiers and markers
//! - Validate render bounds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerOptions → Result<(), Vec<ValidationError>>
//! - Runs before options loaded from disk are accepted; `set_options` itself
//!   accepts anything

use thiserror::Error;

use crate::config::schema::LoggerOptions;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("{0} must be at least 1")]
    ZeroBound(&'static str),
}

pub fn validate_options(options: &LoggerOptions) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if options.logger_name.trim().is_empty() {
        errors.push(ValidationError::EmptyField("logger_name"));
    }
    if options.service_name.trim().is_empty() {
        errors.push(ValidationError::EmptyField("service_name"));
    }
    if matches!(options.truncation_marker.as_deref(), Some("")) {
        errors.push(ValidationError::EmptyField("truncation_marker"));
    }
    if options.render.max_depth == 0 {
        errors.push(ValidationError::ZeroBound("render.max_depth"));
    }
    if options.render.max_items == 0 {
        errors.push(ValidationError::ZeroBound("render.max_items"));
    }
    if options.render.max_nodes == 0 {
        errors.push(ValidationError::ZeroBound("render.max_nodes"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
