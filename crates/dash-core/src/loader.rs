//! Stylesheet loading
//!
//! The stylesheet is fetched once when a session starts. The fetch runs on a
//! helper thread and the caller waits for at most the configured timeout.
//! Loading never fails: every problem degrades to an empty registry, default
//! functional colors and a [`LoadWarning`] for the user.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use dash_theme::{ParsedStylesheet, parse_stylesheet};
use thiserror::Error;

/// Default wait for the initial stylesheet fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Fetch ended without a result")]
    Disconnected,

    #[error("Could not start fetch: {0}")]
    Spawn(#[source] io::Error),
}

/// Where the stylesheet text comes from
pub trait StylesheetSource: Send + 'static {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<String, FetchError>;
}

/// Stylesheet stored next to the dashboard
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StylesheetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, FetchError> {
        std::fs::read_to_string(&self.path).map_err(|source| FetchError::Read {
            path: self.path.clone(),
            source,
        })
    }
}

/// Non-fatal problems surfaced to the user after loading
#[derive(Error, Debug)]
pub enum LoadWarning {
    #[error("Could not load the stylesheet ({0}). You can still generate a fresh one.")]
    Fetch(#[from] FetchError),

    #[error("The stylesheet could not be parsed. You can still generate a fresh one.")]
    Unparsable,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub parsed: ParsedStylesheet,
    pub warning: Option<LoadWarning>,
}

impl LoadOutcome {
    fn degraded(warning: LoadWarning) -> Self {
        log::warn!("{}", warning);
        Self {
            parsed: ParsedStylesheet::default(),
            warning: Some(warning),
        }
    }
}

/// Fetch and parse the stylesheet, waiting at most `timeout`
pub fn load_stylesheet<S: StylesheetSource>(source: S, timeout: Duration) -> LoadOutcome {
    let location = source.describe();
    log::info!("Loading stylesheet from {}", location);

    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("stylesheet-fetch".to_string())
        .spawn(move || {
            let _ = tx.send(source.fetch());
        });
    if let Err(e) = spawned {
        return LoadOutcome::degraded(FetchError::Spawn(e).into());
    }

    let css = match rx.recv_timeout(timeout) {
        Ok(Ok(css)) => css,
        Ok(Err(e)) => return LoadOutcome::degraded(e.into()),
        Err(RecvTimeoutError::Timeout) => {
            return LoadOutcome::degraded(FetchError::Timeout(timeout).into());
        }
        Err(RecvTimeoutError::Disconnected) => {
            return LoadOutcome::degraded(FetchError::Disconnected.into());
        }
    };

    let parsed = parse_stylesheet(&css);
    if parsed.report.unparsable {
        return LoadOutcome::degraded(LoadWarning::Unparsable);
    }

    log::info!(
        "Loaded {} themes from {} (CSS v{})",
        parsed.themes.len(),
        location,
        parsed.version
    );
    LoadOutcome {
        parsed,
        warning: None,
    }
}
