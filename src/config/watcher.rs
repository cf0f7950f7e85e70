//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file, so editors that save
//! by writing a new file and renaming it over the old one are still seen.
//! A reload that yields the options last sent is not sent again.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::load_options;
use crate::config::schema::LoggerOptions;

/// A watcher that monitors the options file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    current: Option<LoggerOptions>,
    update_tx: mpsc::Sender<LoggerOptions>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for replacement options.
    pub fn new(path: &Path) -> (Self, mpsc::Receiver<LoggerOptions>) {
        let (update_tx, update_rx) = mpsc::channel();

        (
            Self {
                path: path.to_path_buf(),
                current: None,
                update_tx,
            },
            update_rx,
        )
    }

    /// Options already in effect; a reload producing the same set is skipped.
    pub fn with_current(mut self, options: LoggerOptions) -> Self {
        self.current = Some(options);
        self
    }

    /// Start watching the file. Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = watch_dir(&self.path);
        let mut reloader = Reloader {
            file_name: self.path.file_name().map(OsString::from),
            path: self.path.clone(),
            last: self.current,
            tx: self.update_tx,
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if (event.kind.is_modify() || event.kind.is_create()) && reloader.concerns(&event) {
                        reloader.reload();
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Options watcher started");
        Ok(watcher)
    }
}

/// `Path::parent` is empty for a bare file name.
fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

struct Reloader {
    path: PathBuf,
    file_name: Option<OsString>,
    last: Option<LoggerOptions>,
    tx: mpsc::Sender<LoggerOptions>,
}

impl Reloader {
    fn concerns(&self, event: &Event) -> bool {
        event
            .paths
            .iter()
            .any(|p| p.file_name().map(OsString::from) == self.file_name)
    }

    /// Load the file and send it if it differs from the last options sent.
    /// Returns whether anything was sent.
    fn reload(&mut self) -> bool {
        let options = match load_options(&self.path) {
            Ok(options) => options,
            Err(e) => {
                tracing::error!(
                    "Failed to reload options: {}. Keeping current options.",
                    e
                );
                return false;
            }
        };

        if self.last.as_ref() == Some(&options) {
            tracing::debug!(path = ?self.path, "Options file unchanged, skipping reload");
            return false;
        }

        tracing::info!(path = ?self.path, "Options file changed, reloading");
        if self.tx.send(options.clone()).is_err() {
            tracing::debug!("Options receiver dropped");
            return false;
        }
        self.last = Some(options);
        true
    }
}
