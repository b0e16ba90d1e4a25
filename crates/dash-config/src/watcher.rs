//! Stylesheet Hot-Reload
//!
//! Watches the stylesheet file for changes, sending the new contents through a
//! channel for the shell to pick up between commands.

use notify::{Config as NotifyConfig, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crate::SettingsError;

/// Events emitted by the stylesheet watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetEvent {
    /// Stylesheet changed, contains the new CSS text
    Changed(String),
    /// Stylesheet changed but could not be read
    ReloadError(String),
}

/// Watches one stylesheet file for changes
pub struct StylesheetWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<StylesheetEvent>,
    path: PathBuf,
}

impl StylesheetWatcher {
    /// Watch `path` with the default debounce
    pub fn new(path: &Path) -> Result<Self, SettingsError> {
        StylesheetWatcherBuilder::new().build(path)
    }

    fn with_debounce(path: &Path, debounce: Duration) -> Result<Self, SettingsError> {
        let (tx, rx) = mpsc::channel();

        // Events carry absolute paths, and the file itself may not exist yet
        let file_name = path
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| SettingsError::WatchError(format!("{:?} names no file", path)))?;
        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent.to_path_buf(),
            None => PathBuf::from("."),
        };
        let dir = dir
            .canonicalize()
            .map_err(|e| SettingsError::WatchError(format!("{:?}: {}", dir, e)))?;
        let target = dir.join(&file_name);

        let target_clone = target.clone();
        let mut last_event: Option<Instant> = None;

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    if !event.paths.iter().any(|p| p.file_name() == target_clone.file_name()) {
                        return;
                    }

                    // Debounce
                    let now = Instant::now();
                    if let Some(last) = last_event {
                        if now.duration_since(last) < debounce {
                            return;
                        }
                    }
                    last_event = Some(now);

                    log::info!("Stylesheet changed, reloading...");
                    match std::fs::read_to_string(&target_clone) {
                        Ok(css) => {
                            let _ = tx.send(StylesheetEvent::Changed(css));
                        }
                        Err(e) => {
                            log::error!("Failed to reload stylesheet: {}", e);
                            let _ = tx.send(StylesheetEvent::ReloadError(e.to_string()));
                        }
                    }
                }
                Err(e) => {
                    log::error!("Watch error: {:?}", e);
                }
            },
            NotifyConfig::default().with_poll_interval(Duration::from_secs(1)),
        )
        .map_err(|e| SettingsError::WatchError(e.to_string()))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| SettingsError::WatchError(e.to_string()))?;
        log::info!("Watching {:?} for stylesheet changes", target);

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            path: target,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<StylesheetEvent> {
        self.receiver.try_recv().ok()
    }

    /// Get all pending events
    pub fn drain_events(&self) -> Vec<StylesheetEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Builder for creating a StylesheetWatcher with custom options
pub struct StylesheetWatcherBuilder {
    debounce_ms: u64,
}

impl Default for StylesheetWatcherBuilder {
    fn default() -> Self {
        Self { debounce_ms: 100 }
    }
}

impl StylesheetWatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set debounce duration in milliseconds
    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn build(self, path: &Path) -> Result<StylesheetWatcher, SettingsError> {
        StylesheetWatcher::with_debounce(path, Duration::from_millis(self.debounce_ms))
    }
}
