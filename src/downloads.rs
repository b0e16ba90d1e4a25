//! Saving exported artifacts to disk

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dash_core::{Artifact, Downloader};

/// Writes artifacts into a directory, replacing files of the same name
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    directory: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Downloader for DirectoryDownloader {
    fn save(&self, artifact: &Artifact) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(&artifact.filename);
        fs::write(&path, &artifact.contents)?;
        log::info!("Saved {} ({}) to {:?}", artifact.filename, artifact.mime, path);
        Ok(path)
    }
}
