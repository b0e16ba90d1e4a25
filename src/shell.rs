//! Intent dispatcher
//!
//! Executes [`Intent`]s against the session's [`ThemeStore`]. Store errors are
//! reported to the user and never end the session; only failing to write to
//! the output does.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use dash_config::{Settings, StylesheetEvent};
use dash_core::{
    Downloader, FileSource, LoadWarning, PendingEdit, ThemeStore, WidgetConfig, load_stylesheet,
};
use dash_theme::{ColorSlot, ThemeRecord, parse_stylesheet};

use crate::commands::{HELP, Intent};

/// Whether the shell keeps reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Load the stylesheet and seed selection, alignment and links from a
/// previously exported `config.js`, if there is one.
pub fn open_session(settings: &Settings) -> (ThemeStore, Option<LoadWarning>) {
    let outcome = load_stylesheet(
        FileSource::new(&settings.stylesheet.path),
        settings.stylesheet.fetch_timeout(),
    );

    let mut store =
        ThemeStore::from_parsed(outcome.parsed).with_writer(settings.generator.writer());

    let config_path = settings.export.config_path();
    if let Ok(script) = std::fs::read_to_string(&config_path) {
        log::info!("Seeding selection from {:?}", config_path);
        store.apply_widget_config(&WidgetConfig::from_script(Some(&script)));
    }

    (store, outcome.warning)
}

pub struct Shell<D: Downloader> {
    store: ThemeStore,
    downloader: D,
    stylesheet_path: PathBuf,
    fetch_timeout: Duration,
    stylesheet_name: String,
    config_name: String,
}

impl<D: Downloader> Shell<D> {
    pub fn new(store: ThemeStore, downloader: D, settings: &Settings) -> Self {
        Self {
            store,
            downloader,
            stylesheet_path: settings.stylesheet.path.clone(),
            fetch_timeout: settings.stylesheet.fetch_timeout(),
            stylesheet_name: settings.export.stylesheet_name.clone(),
            config_name: settings.export.config_name.clone(),
        }
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    /// Run one intent. `confirm` is asked before anything destructive.
    pub fn execute<W: Write>(
        &mut self,
        intent: Intent,
        out: &mut W,
        confirm: &mut dyn FnMut(&str) -> bool,
    ) -> io::Result<Flow> {
        match intent {
            Intent::List => self.list(out)?,
            Intent::Show(id) => {
                let record = match id.as_deref() {
                    Some(id) => self.store.themes().get(id),
                    None => self.store.preview_theme(),
                };
                match record {
                    Some(record) => self.show(record, out)?,
                    None => writeln!(out, "No theme to show")?,
                }
            }
            Intent::Add(name) => match self.store.add(&name) {
                Ok(id) => writeln!(out, "Added .{}", id)?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Intent::New => {
                self.store.begin_new();
                writeln!(out, "Composing a new theme; set a name, then save")?;
            }
            Intent::Edit(id) => match self.store.begin_edit(&id) {
                Ok(edit) => writeln!(out, "Editing '{}'", edit.name)?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Intent::Name(name) => {
                if let Err(e) = self.store.edit_name(&name) {
                    writeln!(out, "error: {}", e)?;
                }
            }
            Intent::Color(slot, color) => {
                if let Err(e) = self.store.edit_color(slot, color) {
                    writeln!(out, "error: {}", e)?;
                }
            }
            Intent::Save => match self.store.save_edit() {
                Ok(id) => writeln!(out, "Saved .{}", id)?,
                Err(e) => writeln!(out, "error: {} (edit kept)", e)?,
            },
            Intent::Cancel => match self.store.cancel_edit() {
                Some(_) => writeln!(out, "Edit discarded")?,
                None => writeln!(out, "Nothing to cancel")?,
            },
            Intent::Duplicate(id) => match self.store.duplicate(&id) {
                Ok(copy) => writeln!(out, "Added .{}", copy)?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Intent::Delete(id) => self.delete(&id, out, confirm)?,
            Intent::Select(id) => match self.store.select(&id) {
                Ok(()) => writeln!(out, "Selected .{}", id)?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Intent::Align(alignment) => {
                self.store.set_alignment(alignment);
                writeln!(out, "Alignment: {}", alignment)?;
            }
            Intent::Functional(slot, color) => {
                self.store.set_functional(slot, color);
                writeln!(out, "--{}: {}", slot.name(), color)?;
            }
            Intent::LinkAdd { label, url } => {
                self.store.add_link(&label, &url);
                writeln!(out, "Added link {}", self.store.links().links.len())?;
            }
            Intent::LinkRemove(n) => {
                match n.checked_sub(1).map(|index| self.store.remove_link(index)) {
                    Some(Ok(link)) => writeln!(out, "Removed link '{}'", link.label)?,
                    _ => writeln!(out, "error: no link {}", n)?,
                }
            }
            Intent::LinksTitle(title) => self.store.set_links_title(&title),
            Intent::ExportStyles => {
                let artifact = self
                    .store
                    .export_stylesheet()
                    .with_filename(&self.stylesheet_name);
                match self.downloader.save(&artifact) {
                    Ok(path) => writeln!(
                        out,
                        "Wrote {} (CSS v{})",
                        path.display(),
                        self.store.css_version()
                    )?,
                    Err(e) => writeln!(out, "error: could not save {}: {}", artifact.filename, e)?,
                }
            }
            Intent::ExportConfig => {
                let artifact = self.store.export_config().with_filename(&self.config_name);
                match self.downloader.save(&artifact) {
                    Ok(path) => writeln!(out, "Wrote {}", path.display())?,
                    Err(e) => writeln!(out, "error: could not save {}: {}", artifact.filename, e)?,
                }
            }
            Intent::Reload => self.reload(out)?,
            Intent::Help => writeln!(out, "{}", HELP)?,
            Intent::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Apply a change to the stylesheet made outside the dashboard
    pub fn apply_external_change<W: Write>(
        &mut self,
        event: StylesheetEvent,
        out: &mut W,
    ) -> io::Result<()> {
        let css = match event {
            StylesheetEvent::Changed(css) => css,
            StylesheetEvent::ReloadError(e) => {
                return writeln!(out, "warning: stylesheet changed but could not be read: {}", e);
            }
        };

        let parsed = parse_stylesheet(&css);
        if parsed.report.unparsable {
            return writeln!(out, "warning: stylesheet changed but could not be parsed; keeping current themes");
        }

        // Our own export landing on disk
        if parsed.version == self.store.css_version()
            && parsed.functional == *self.store.functional()
            && parsed.themes == *self.store.themes()
        {
            return Ok(());
        }

        let discarded = self.store.reload(parsed);
        writeln!(
            out,
            "Stylesheet changed on disk; reloaded {} themes",
            self.store.themes().len()
        )?;
        report_discarded(discarded, out)
    }

    fn list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.store.themes().is_empty() {
            writeln!(out, "No themes")?;
        }
        let selected = self.store.selection().selected_theme.as_deref();
        for theme in self.store.themes().iter() {
            let marker = if Some(theme.id.as_str()) == selected { '*' } else { ' ' };
            writeln!(out, "{} {:<32} {}", marker, theme.id, theme.name)?;
        }
        writeln!(
            out,
            "alignment: {}, CSS v{}",
            self.store.selection().alignment,
            self.store.css_version()
        )
    }

    fn show<W: Write>(&self, record: &ThemeRecord, out: &mut W) -> io::Result<()> {
        writeln!(out, "{} (.{})", record.name, record.id)?;
        for slot in ColorSlot::ALL {
            let color = record.colors.get(slot);
            writeln!(
                out,
                "  {} {:<24} {}  {}",
                slot.index(),
                slot.property(),
                color,
                color.to_rgb_string()
            )?;
        }

        let bg = record.colors.get(ColorSlot::PrimaryBackground);
        let text = record.colors.get(ColorSlot::PrimaryText);
        writeln!(out, "  text contrast {:.1}:1", bg.contrast_ratio(&text))?;
        let accent = record.colors.get(ColorSlot::Accent);
        writeln!(out, "  text on accent {}", accent.readable_text())
    }

    fn delete<W: Write>(
        &mut self,
        id: &str,
        out: &mut W,
        confirm: &mut dyn FnMut(&str) -> bool,
    ) -> io::Result<()> {
        let Some(name) = self.store.themes().get(id).map(|t| t.name.clone()) else {
            return writeln!(out, "error: Unknown theme: {}", id);
        };

        if !confirm(&format!("Delete theme '{}'? [y/N] ", name)) {
            return writeln!(out, "Kept '{}'", name);
        }

        match self.store.remove(id) {
            Ok(_) => writeln!(out, "Deleted '{}'", name),
            Err(e) => writeln!(out, "error: {}", e),
        }
    }

    fn reload<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let outcome = load_stylesheet(FileSource::new(&self.stylesheet_path), self.fetch_timeout);
        if let Some(warning) = outcome.warning {
            return writeln!(out, "warning: {} Keeping current themes.", warning);
        }

        let dropped = outcome.parsed.report.dropped.len();
        let discarded = self.store.reload(outcome.parsed);
        writeln!(out, "Reloaded {} themes", self.store.themes().len())?;
        if dropped > 0 {
            writeln!(out, "  skipped {} incomplete theme blocks", dropped)?;
        }
        report_discarded(discarded, out)
    }
}

fn report_discarded<W: Write>(discarded: Option<PendingEdit>, out: &mut W) -> io::Result<()> {
    match discarded {
        Some(edit) => writeln!(out, "  unsaved edit of '{}' was discarded", edit.name),
        None => Ok(()),
    }
}
