//! Common test utilities and harness
//!
//! Provides an isolated dashboard directory holding a stylesheet, a widget
//! configuration and settings pointing at both.

#![allow(dead_code)]

use std::path::PathBuf;

use dash_config::Settings;
use tempfile::TempDir;
use widgetdash::commands::parse_intent;
use widgetdash::downloads::DirectoryDownloader;
use widgetdash::shell::{Flow, Shell};

/// Stylesheet as shipped with the widgets
pub const SHIPPED_STYLESHEET: &str = r#"/* Widget Styles - CSS Version: 1.3 - Generated by Dashboard v4.0 */

:root {
  --font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
  --success: #28a745;
  --status-0: #dc143c;
}

/* Midnight Sapphire */
.midnight-sapphire-theme {
  --primary-bg-color: #0f1b2d;
  --primary-text-color: #e6edf7;
  --accent-color: #3d7eff;
  --secondary-bg-color: #1a2a44;
}

/* Forest Green */
.forest-green-theme {
  --primary-bg-color: #ecf0e6;
  --primary-text-color: #264639;
  --accent-color: #558269;
  --secondary-bg-color: #558269;
}
"#;

/// Test environment with an isolated dashboard directory
pub struct TestEnvironment {
    /// Temporary directory for the dashboard files
    pub temp_dir: TempDir,
    /// Path to the dashboard directory
    pub dir: PathBuf,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().to_path_buf();
        Self { temp_dir, dir }
    }

    /// Environment holding the shipped stylesheet
    pub fn with_stylesheet() -> Self {
        let env = Self::new();
        env.write_stylesheet(SHIPPED_STYLESHEET);
        env
    }

    pub fn write_stylesheet(&self, content: &str) {
        std::fs::write(self.dir.join("styles.css"), content).expect("Failed to write stylesheet");
    }

    pub fn write_widget_config(&self, content: &str) {
        std::fs::write(self.dir.join("config.js"), content).expect("Failed to write config.js");
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.join(name)).expect("Failed to read exported file")
    }

    /// Settings reading and exporting inside this environment
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.stylesheet.path = self.dir.join("styles.css");
        settings.stylesheet.fetch_timeout_ms = 2000;
        settings.stylesheet.watch = false;
        settings.export.directory = self.dir.clone();
        settings
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Run command lines through a shell, answering every confirmation with
/// `answer`, and return everything printed
pub fn run_lines(shell: &mut Shell<DirectoryDownloader>, lines: &[&str], answer: bool) -> String {
    let mut out = Vec::new();
    for line in lines {
        let intent = parse_intent(line)
            .expect("Command should parse")
            .expect("Command should not be blank");
        let flow = shell
            .execute(intent, &mut out, &mut |_| answer)
            .expect("Writing to a Vec cannot fail");
        if flow == Flow::Quit {
            break;
        }
    }
    String::from_utf8(out).expect("Output should be UTF-8")
}
