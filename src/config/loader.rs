//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::LoggerOptions;
use crate::config::validation::validate_options;
use crate::error::ConfigError;

/// Load and validate options from a TOML file.
pub fn load_options(path: &Path) -> Result<LoggerOptions, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_options(&content)
}

/// Parse and validate options from TOML text.
pub fn parse_options(content: &str) -> Result<LoggerOptions, ConfigError> {
    let options: LoggerOptions = toml::from_str(content)?;

    validate_options(&options).map_err(ConfigError::Validation)?;

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_invalid() {
        let err = parse_options("logger_name = \"\"\nservice_name = \"s\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
    }

    #[test]
    fn test_parse_reports_syntax_errors() {
        let err = parse_options("logger_name = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_options(Path::new("/nonexistent/logger.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
