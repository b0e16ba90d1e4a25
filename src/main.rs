//! Widget Dashboard
//!
//! Loads the widget stylesheet, lets the user edit themes, selection and
//! quick links one command at a time, and exports `styles.css` and
//! `config.js` for the widgets.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use dash_config::{Settings, StylesheetWatcher};
use widgetdash::commands::parse_intent;
use widgetdash::downloads::DirectoryDownloader;
use widgetdash::shell::{Flow, Shell, open_session};

fn load_settings() -> Result<Settings> {
    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        return Settings::load_from(&path)
            .with_context(|| format!("Could not load settings from {}", path.display()));
    }

    match Settings::load() {
        Ok(settings) => Ok(settings),
        Err(e) => {
            log::warn!("{}; using default settings", e);
            Ok(Settings::default())
        }
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,widgetdash=info"),
    )
    .init();
    log::info!("Widget Dashboard starting");

    let settings = load_settings()?;
    let (store, warning) = open_session(&settings);

    let mut stdout = io::stdout();
    if let Some(warning) = warning {
        writeln!(stdout, "warning: {}", warning)?;
    }

    let watcher = if settings.stylesheet.watch {
        match StylesheetWatcher::new(&settings.stylesheet.path) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    } else {
        None
    };

    let downloader = DirectoryDownloader::new(&settings.export.directory);
    let downloader_dir = downloader.directory().to_path_buf();
    let mut shell = Shell::new(store, downloader, &settings);
    writeln!(
        stdout,
        "{} themes loaded, exports go to {}. Type 'help' for commands.",
        shell.store().themes().len(),
        downloader_dir.display()
    )?;

    let stdin = io::stdin();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read command")? == 0 {
            break;
        }

        if let Some(watcher) = &watcher {
            for event in watcher.drain_events() {
                shell.apply_external_change(event, &mut stdout)?;
            }
        }

        let intent = match parse_intent(&line) {
            Ok(Some(intent)) => intent,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "error: {}", e)?;
                continue;
            }
        };

        if shell.execute(intent, &mut stdout, &mut confirm)? == Flow::Quit {
            break;
        }
    }

    log::info!("Widget Dashboard exiting");
    Ok(())
}
