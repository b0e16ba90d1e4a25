//! Downloadable export files

use std::io;
use std::path::PathBuf;

pub const STYLESHEET_FILENAME: &str = "styles.css";
pub const CONFIG_FILENAME: &str = "config.js";
pub const STYLESHEET_MIME: &str = "text/css";
pub const CONFIG_MIME: &str = "application/javascript";

/// Generated text plus what a download needs to save it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub mime: &'static str,
    pub contents: String,
}

impl Artifact {
    pub fn stylesheet(contents: String) -> Self {
        Self {
            filename: STYLESHEET_FILENAME.to_string(),
            mime: STYLESHEET_MIME,
            contents,
        }
    }

    pub fn config(contents: String) -> Self {
        Self {
            filename: CONFIG_FILENAME.to_string(),
            mime: CONFIG_MIME,
            contents,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}

/// Saves artifacts somewhere the user can pick them up
pub trait Downloader {
    /// Persist the artifact, returning where it ended up
    fn save(&self, artifact: &Artifact) -> io::Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_kinds() {
        let css = Artifact::stylesheet(":root {}".to_string());
        assert_eq!(css.filename, "styles.css");
        assert_eq!(css.mime, "text/css");

        let js = Artifact::config("const widgetConfig = {};".to_string()).with_filename("widget.js");
        assert_eq!(js.filename, "widget.js");
        assert_eq!(js.mime, "application/javascript");
    }
}
