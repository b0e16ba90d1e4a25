//! Dashboard Settings
//!
//! Handles loading settings from ~/.widgetdash/config.toml, creating the file
//! with defaults on first run.

pub mod watcher;

pub use watcher::{StylesheetEvent, StylesheetWatcher, StylesheetWatcherBuilder};

use dash_theme::StylesheetWriter;
use dash_theme::generator::{DEFAULT_DASHBOARD_LABEL, DEFAULT_FONT_FAMILY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default settings directory name
const SETTINGS_DIR_NAME: &str = ".widgetdash";
/// Default settings file name
const SETTINGS_FILE_NAME: &str = "config.toml";

/// Where the stylesheet lives and how it is fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylesheetSettings {
    /// Stylesheet path, relative to the working directory unless absolute
    #[serde(default = "default_stylesheet_path")]
    pub path: PathBuf,

    /// How long the initial fetch may take before the session starts empty
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Reload when the stylesheet changes on disk
    #[serde(default = "default_watch")]
    pub watch: bool,
}

fn default_stylesheet_path() -> PathBuf {
    PathBuf::from("styles.css")
}

fn default_fetch_timeout_ms() -> u64 {
    5000
}

fn default_watch() -> bool {
    true
}

impl Default for StylesheetSettings {
    fn default() -> Self {
        Self {
            path: default_stylesheet_path(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            watch: default_watch(),
        }
    }
}

impl StylesheetSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Where exported files are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_stylesheet_name")]
    pub stylesheet_name: String,

    #[serde(default = "default_config_name")]
    pub config_name: String,
}

fn default_export_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_stylesheet_name() -> String {
    "styles.css".to_string()
}

fn default_config_name() -> String {
    "config.js".to_string()
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            stylesheet_name: default_stylesheet_name(),
            config_name: default_config_name(),
        }
    }
}

impl ExportSettings {
    /// Path of the previously exported widget configuration
    pub fn config_path(&self) -> PathBuf {
        self.directory.join(&self.config_name)
    }
}

/// Text written into generated stylesheets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Label in the stylesheet header comment
    #[serde(default = "default_dashboard_label")]
    pub dashboard_label: String,

    /// Value of `--font-family` in the `:root` block
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

fn default_dashboard_label() -> String {
    DEFAULT_DASHBOARD_LABEL.to_string()
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            dashboard_label: default_dashboard_label(),
            font_family: default_font_family(),
        }
    }
}

impl GeneratorSettings {
    pub fn writer(&self) -> StylesheetWriter {
        StylesheetWriter {
            dashboard_label: self.dashboard_label.clone(),
            font_family: self.font_family.clone(),
        }
    }
}

/// Main settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub stylesheet: StylesheetSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub generator: GeneratorSettings,
}

impl Settings {
    /// Load settings from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::settings_file_path()?;

        if !path.exists() {
            log::info!("Settings file not found, creating default at {:?}", path);
            Self::create_default(&path)?;
        }

        let settings = Self::load_from(&path)?;
        log::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::ReadError(path.to_path_buf(), e))?;

        toml::from_str(&content).map_err(|e| SettingsError::ParseError(path.to_path_buf(), e))
    }

    /// Get the settings directory path (~/.widgetdash/)
    pub fn settings_dir() -> Result<PathBuf, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::NoHomeDirectory)?;
        Ok(home.join(SETTINGS_DIR_NAME))
    }

    /// Get the settings file path (~/.widgetdash/config.toml)
    pub fn settings_file_path() -> Result<PathBuf, SettingsError> {
        Ok(Self::settings_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Write a commented default settings file at `path`
    pub fn create_default(path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| SettingsError::CreateDirError(dir.to_path_buf(), e))?;
        }

        let toml_content =
            toml::to_string_pretty(&Settings::default()).map_err(SettingsError::SerializeError)?;

        let content = format!(
            "# Widget Dashboard Settings\n\
             #\n\
             # stylesheet.path is read when a session starts; exports are written\n\
             # to export.directory.\n\
             \n\
             {toml_content}"
        );

        fs::write(path, content).map_err(|e| SettingsError::WriteError(path.to_path_buf(), e))?;

        log::info!("Created default settings at {:?}", path);
        Ok(())
    }
}

/// Settings errors
#[derive(Debug)]
pub enum SettingsError {
    /// Home directory not found
    NoHomeDirectory,
    /// Failed to read settings file
    ReadError(PathBuf, std::io::Error),
    /// Failed to parse settings file
    ParseError(PathBuf, toml::de::Error),
    /// Failed to serialize settings
    SerializeError(toml::ser::Error),
    /// Failed to write settings file
    WriteError(PathBuf, std::io::Error),
    /// Failed to create directory
    CreateDirError(PathBuf, std::io::Error),
    /// Failed to set up file watcher
    WatchError(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::NoHomeDirectory => write!(f, "Could not determine home directory"),
            SettingsError::ReadError(path, e) => write!(f, "Failed to read {:?}: {}", path, e),
            SettingsError::ParseError(path, e) => write!(f, "Failed to parse {:?}: {}", path, e),
            SettingsError::SerializeError(e) => write!(f, "Failed to serialize settings: {}", e),
            SettingsError::WriteError(path, e) => write!(f, "Failed to write {:?}: {}", path, e),
            SettingsError::CreateDirError(path, e) => {
                write!(f, "Failed to create {:?}: {}", path, e)
            }
            SettingsError::WatchError(e) => write!(f, "Failed to watch files: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.stylesheet.path, PathBuf::from("styles.css"));
        assert_eq!(settings.stylesheet.fetch_timeout(), Duration::from_secs(5));
        assert!(settings.stylesheet.watch);
        assert_eq!(settings.export.config_path(), PathBuf::from("./config.js"));
        assert_eq!(settings.generator.dashboard_label, "v4.0");
        assert_eq!(settings.generator.writer(), StylesheetWriter::default());
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = Settings::default();
        let toml_str = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_settings() {
        let partial = r#"
            [stylesheet]
            fetch_timeout_ms = 250

            [generator]
            dashboard_label = "v5.0"
        "#;
        let settings: Settings = toml::from_str(partial).unwrap();
        assert_eq!(settings.stylesheet.fetch_timeout(), Duration::from_millis(250));
        assert_eq!(settings.generator.dashboard_label, "v5.0");
        // Other fields should have defaults
        assert_eq!(settings.stylesheet.path, PathBuf::from("styles.css"));
        assert_eq!(settings.export, ExportSettings::default());
        assert_eq!(settings.generator.font_family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn test_create_default_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Settings::create_default(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Widget Dashboard Settings"));

        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_settings_report_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[stylesheet]\nfetch_timeout_ms = \"soon\"\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(..)));
        assert!(err.to_string().contains("config.toml"));
    }
}
