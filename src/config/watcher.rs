//! Rules file watcher for re-checking on change.
//!
//! # Responsibilities
//! - Notice edits to one rules file, including editor-style atomic saves
//! - Re-read and deserialize the file, forwarding it over a channel
//!
//! # Design Decisions
//! - Watches the parent directory, not the file: a rename over the file
//!   replaces its inode and would drop a file-level watch
//! - Events are filtered by file name, so sibling files are ignored
//! - A reload whose text matches the last one seen is skipped; one save
//!   usually produces several events
//! - Reloaded files are only parsed, not validated, so that the receiver
//!   can report every problem in them

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::ToolConfig;

/// A watcher that monitors a rules file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ToolConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ToolConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (Self {
            path: path.to_path_buf(),
            update_tx,
        }, update_rx)
    }

    /// Start watching in a background thread.
    ///
    /// The returned watcher must be kept alive for updates to keep arriving.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = watch_dir(&self.path);
        let mut reloader = Reloader::new(self.path.clone(), self.update_tx);

        let mut watcher = RecommendedWatcher::new(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => reloader.handle(&event),
                Err(e) => tracing::error!("Watch error: {:?}", e),
            }
        }, Config::default().with_poll_interval(Duration::from_secs(2)))?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Rules watcher started");
        Ok(watcher)
    }
}

/// Directory holding `path`; `.` for a bare file name.
fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Event-side state: which file to reload and what was last sent.
struct Reloader {
    path: PathBuf,
    file_name: Option<OsString>,
    last_content: Option<String>,
    tx: mpsc::UnboundedSender<ToolConfig>,
    closed: bool,
}

impl Reloader {
    fn new(path: PathBuf, tx: mpsc::UnboundedSender<ToolConfig>) -> Self {
        // The caller has already checked the current contents.
        let last_content = fs::read_to_string(&path).ok();
        Self {
            file_name: path.file_name().map(|name| name.to_os_string()),
            path,
            last_content,
            tx,
            closed: false,
        }
    }

    fn handle(&mut self, event: &Event) {
        if self.closed || !(event.kind.is_modify() || event.kind.is_create()) {
            return;
        }
        if !self.concerns_rules_file(event) {
            return;
        }

        if let Some(config) = self.reload() {
            if self.tx.send(config).is_err() {
                tracing::debug!(path = ?self.path, "Update receiver dropped, ignoring further changes");
                self.closed = true;
            }
        }
    }

    fn concerns_rules_file(&self, event: &Event) -> bool {
        event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == self.file_name.as_deref())
    }

    /// Read the file and deserialize it if its text changed since last time.
    fn reload(&mut self) -> Option<ToolConfig> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "Rules file missing, waiting for it to reappear");
                return None;
            }
            Err(e) => {
                tracing::error!("Failed to read rules: {}. Waiting for next change.", e);
                return None;
            }
        };

        if self.last_content.as_deref() == Some(content.as_str()) {
            tracing::trace!(path = ?self.path, "Rules file unchanged, skipping");
            return None;
        }

        tracing::info!(path = ?self.path, "Rules file change detected, reloading...");
        let result = parse_config(&content);
        self.last_content = Some(content);

        match result {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::error!("Failed to reload rules: {}. Waiting for next change.", e);
                None
            }
        }
    }
}
