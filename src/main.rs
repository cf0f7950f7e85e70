//! JSON diagnostic logger CLI.
//!
//! Reads JSON-lines log calls from stdin and writes one JSON record per
//! call to stdout. Internal diagnostics go to stderr.
//!
//! ```text
//! stdin ──▶ driver ──▶ JsonDiagLogger ──▶ stdout
//!                           ▲
//!      options file ──▶ watcher (optional hot reload)
//! ```

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use clap::Parser;

use json_diag_logger::config::loader::load_options;
use json_diag_logger::config::watcher::ConfigWatcher;
use json_diag_logger::driver;
use json_diag_logger::observability::logging::{init_logging, DEFAULT_FILTER};
use json_diag_logger::{JsonDiagLogger, LoggerOptions, Severity};

#[derive(Parser, Debug)]
#[command(name = "json-diag-logger")]
#[command(about = "Render JSON-lines log calls as JSON log records", long_about = None)]
struct Cli {
    /// TOML options file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the options file when it changes.
    #[arg(short, long, requires = "config")]
    watch: bool,

    /// Overrides `logger_name`.
    #[arg(long)]
    logger_name: Option<String>,

    /// Overrides `service_name`.
    #[arg(long)]
    service_name: Option<String>,

    /// Overrides `verbose_severity` (debug, info, warn, error, off, ...).
    #[arg(long)]
    verbose_severity: Option<Severity>,

    /// Overrides `truncation_limit`.
    #[arg(long)]
    truncation_limit: Option<usize>,
}

impl Cli {
    fn apply_overrides(&self, mut options: LoggerOptions) -> LoggerOptions {
        if let Some(name) = &self.logger_name {
            options.logger_name = name.clone();
        }
        if let Some(name) = &self.service_name {
            options.service_name = name.clone();
        }
        if let Some(severity) = self.verbose_severity {
            options.verbose_severity = Some(severity);
        }
        if let Some(limit) = self.truncation_limit {
            options.truncation_limit = Some(limit);
        }
        options
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(DEFAULT_FILTER)?;

    let cli = Arc::new(Cli::parse());

    let base = match &cli.config {
        Some(path) => load_options(path)?,
        None => LoggerOptions::new("json-diag-logger", "unknown-service"),
    };
    let options = cli.apply_overrides(base.clone());

    tracing::info!(
        logger_name = %options.logger_name,
        service_name = %options.service_name,
        "Options loaded"
    );

    let logger = Arc::new(JsonDiagLogger::stdout(options));

    // Kept alive for the duration of the run.
    let _watcher = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let watcher = watcher.with_current(base).run()?;

            let logger = Arc::clone(&logger);
            let cli = Arc::clone(&cli);
            thread::spawn(move || {
                for options in updates {
                    logger.set_options(cli.apply_overrides(options));
                }
            });
            Some(watcher)
        }
        _ => None,
    };

    let summary = driver::run(io::stdin().lock(), &*logger)?;

    tracing::info!(
        calls = summary.calls,
        rejected = summary.rejected,
        "Input exhausted"
    );
    Ok(())
}
