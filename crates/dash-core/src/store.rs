//! Theme store
//!
//! Single owner of everything a dashboard session edits: the theme registry,
//! functional colors, selection, quick links and the in-progress edit. Built
//! from a parsed stylesheet when the session starts and dropped when it ends.
//!
//! Every mutation takes `&mut self` and runs to completion, so callers never
//! see a rename half applied.

use dash_theme::{
    ColorSlot, CssVersion, FunctionalColorTable, FunctionalSlot, HexColor, ParsedStylesheet,
    StylesheetWriter, ThemeColors, ThemeRecord, ThemeRegistry, display_name,
};
use thiserror::Error;

use crate::artifact::Artifact;
use crate::config_gen::create_config_file;
use crate::links::{LinkEntry, LinksConfig};
use crate::selection::{Alignment, SelectionState};
use crate::slug::theme_id;
use crate::widget::WidgetConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Theme name cannot be empty")]
    EmptyThemeName,

    #[error("A theme with the id '{0}' already exists")]
    DuplicateThemeName(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("No theme is being edited")]
    NoPendingEdit,

    #[error("No link at position {0}")]
    UnknownLink(usize),
}

/// Unsaved changes held while the user edits a theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    /// Record being edited; `None` while composing a new theme
    pub target: Option<String>,
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, Default)]
pub struct ThemeStore {
    css_version: CssVersion,
    functional: FunctionalColorTable,
    themes: ThemeRegistry,
    selection: SelectionState,
    links: LinksConfig,
    pending: Option<PendingEdit>,
    writer: StylesheetWriter,
}

fn derive_id(name: &str) -> Result<String, ThemeError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ThemeError::EmptyThemeName);
    }
    theme_id(name).ok_or(ThemeError::EmptyThemeName)
}

impl ThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a parsed stylesheet, selecting the first theme
    pub fn from_parsed(parsed: ParsedStylesheet) -> Self {
        let mut store = Self {
            css_version: parsed.version,
            functional: parsed.functional,
            themes: parsed.themes,
            ..Self::default()
        };
        store.reconcile_selection();
        store
    }

    pub fn with_writer(mut self, writer: StylesheetWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn css_version(&self) -> CssVersion {
        self.css_version
    }

    pub fn functional(&self) -> &FunctionalColorTable {
        &self.functional
    }

    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_theme(&self) -> Option<&ThemeRecord> {
        self.selection
            .selected_theme
            .as_deref()
            .and_then(|id| self.themes.get(id))
    }

    pub fn links(&self) -> &LinksConfig {
        &self.links
    }

    pub fn pending_edit(&self) -> Option<&PendingEdit> {
        self.pending.as_ref()
    }

    /// Theme to show in the preview: the selected one, else the first
    pub fn preview_theme(&self) -> Option<&ThemeRecord> {
        self.selected_theme().or_else(|| self.themes.first())
    }

    // === Theme mutations ===

    /// Add a theme with gray-scale colors, returning its id
    pub fn add(&mut self, name: &str) -> Result<String, ThemeError> {
        self.insert_new(name, ThemeColors::default())
    }

    fn insert_new(&mut self, name: &str, colors: ThemeColors) -> Result<String, ThemeError> {
        let name = display_name(name);
        let id = derive_id(&name)?;
        if self.themes.contains(&id) {
            return Err(ThemeError::DuplicateThemeName(id));
        }

        log::info!("Added theme '{}' as .{}", name, id);
        self.themes.insert(ThemeRecord::new(id.clone(), name, colors));
        Ok(id)
    }

    /// Save a theme under the id derived from `name`.
    ///
    /// A changed id replaces the old entry in place; the selection follows it.
    /// The name is stored the way the stylesheet will read it back.
    pub fn update(
        &mut self,
        id: &str,
        name: &str,
        colors: ThemeColors,
    ) -> Result<String, ThemeError> {
        if !self.themes.contains(id) {
            return Err(ThemeError::UnknownTheme(id.to_string()));
        }

        let name = display_name(name);
        let new_id = derive_id(&name)?;
        if new_id != id && self.themes.contains(&new_id) {
            return Err(ThemeError::DuplicateThemeName(new_id));
        }

        let record = ThemeRecord::new(new_id.clone(), name, colors);
        self.themes
            .replace(id, record)
            .ok_or_else(|| ThemeError::UnknownTheme(id.to_string()))?;

        if new_id != id {
            log::info!("Renamed theme .{} to .{}", id, new_id);
            if self.selection.selected_theme.as_deref() == Some(id) {
                self.selection.selected_theme = Some(new_id.clone());
            }
        }
        Ok(new_id)
    }

    /// Delete a theme. If it was selected, the first remaining theme (or
    /// nothing) becomes selected.
    pub fn remove(&mut self, id: &str) -> Result<ThemeRecord, ThemeError> {
        let removed = self
            .themes
            .remove(id)
            .ok_or_else(|| ThemeError::UnknownTheme(id.to_string()))?;

        if self.selection.selected_theme.as_deref() == Some(id) {
            self.selection.selected_theme = self.themes.first().map(|t| t.id.clone());
        }
        if self
            .pending
            .as_ref()
            .is_some_and(|edit| edit.target.as_deref() == Some(id))
        {
            self.pending = None;
        }

        log::info!("Removed theme .{}", id);
        Ok(removed)
    }

    /// Copy a theme as "<name> Copy", numbering further copies
    pub fn duplicate(&mut self, id: &str) -> Result<String, ThemeError> {
        let source = self
            .themes
            .get(id)
            .cloned()
            .ok_or_else(|| ThemeError::UnknownTheme(id.to_string()))?;

        let base = format!("{} Copy", source.name.trim());
        let mut name = base.clone();
        let mut n = 2;
        while self.themes.contains(&derive_id(&name)?) {
            name = format!("{} {}", base, n);
            n += 1;
        }

        self.insert_new(&name, source.colors)
    }

    pub fn select(&mut self, id: &str) -> Result<(), ThemeError> {
        if !self.themes.contains(id) {
            return Err(ThemeError::UnknownTheme(id.to_string()));
        }
        self.selection.selected_theme = Some(id.to_string());
        Ok(())
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.selection.alignment = alignment;
    }

    /// Point the selection at an existing theme if it is missing or stale
    pub fn reconcile_selection(&mut self) {
        let valid = self
            .selection
            .selected_theme
            .as_deref()
            .is_some_and(|id| self.themes.contains(id));
        if !valid {
            self.selection.selected_theme = self.themes.first().map(|t| t.id.clone());
        }
    }

    pub fn set_functional(&mut self, slot: FunctionalSlot, color: HexColor) {
        self.functional.set(slot, color);
    }

    // === Edit cursor ===

    /// Start editing an existing theme, discarding any other pending edit
    pub fn begin_edit(&mut self, id: &str) -> Result<&PendingEdit, ThemeError> {
        let record = self
            .themes
            .get(id)
            .ok_or_else(|| ThemeError::UnknownTheme(id.to_string()))?;

        let edit = PendingEdit {
            target: Some(record.id.clone()),
            name: record.name.clone(),
            colors: record.colors,
        };
        Ok(self.pending.insert(edit))
    }

    /// Start composing a theme that does not exist yet
    pub fn begin_new(&mut self) -> &PendingEdit {
        self.pending.insert(PendingEdit {
            target: None,
            name: String::new(),
            colors: ThemeColors::default(),
        })
    }

    pub fn edit_name(&mut self, name: &str) -> Result<(), ThemeError> {
        let edit = self.pending.as_mut().ok_or(ThemeError::NoPendingEdit)?;
        edit.name = name.to_string();
        Ok(())
    }

    pub fn edit_color(&mut self, slot: ColorSlot, color: HexColor) -> Result<(), ThemeError> {
        let edit = self.pending.as_mut().ok_or(ThemeError::NoPendingEdit)?;
        edit.colors.set(slot, color);
        Ok(())
    }

    /// Commit the pending edit. On failure the edit stays pending so it can
    /// be corrected and saved again.
    pub fn save_edit(&mut self) -> Result<String, ThemeError> {
        let edit = self.pending.clone().ok_or(ThemeError::NoPendingEdit)?;
        let id = match edit.target.as_deref() {
            Some(target) => self.update(target, &edit.name, edit.colors)?,
            None => self.insert_new(&edit.name, edit.colors)?,
        };
        self.pending = None;
        Ok(id)
    }

    pub fn cancel_edit(&mut self) -> Option<PendingEdit> {
        self.pending.take()
    }

    // === Links ===

    pub fn add_link(&mut self, label: &str, url: &str) {
        self.links.links.push(LinkEntry::new(label, url));
    }

    pub fn update_link(&mut self, index: usize, label: &str, url: &str) -> Result<(), ThemeError> {
        let link = self
            .links
            .links
            .get_mut(index)
            .ok_or(ThemeError::UnknownLink(index))?;
        *link = LinkEntry::new(label, url);
        Ok(())
    }

    pub fn remove_link(&mut self, index: usize) -> Result<LinkEntry, ThemeError> {
        if index >= self.links.links.len() {
            return Err(ThemeError::UnknownLink(index));
        }
        Ok(self.links.links.remove(index))
    }

    pub fn set_links_title(&mut self, title: &str) {
        self.links.title = title.to_string();
    }

    // === Session lifecycle ===

    /// Seed selection, alignment and links from an existing widget config
    pub fn apply_widget_config(&mut self, config: &WidgetConfig) {
        if self.themes.contains(&config.theme) {
            self.selection.selected_theme = Some(config.theme.clone());
        }
        self.selection.alignment = config.alignment;
        if let Some(links) = &config.links {
            self.links = links.clone();
        }
        self.reconcile_selection();
    }

    /// Replace themes and functional colors with a freshly parsed stylesheet.
    /// Selection survives if its theme still exists. A pending edit is
    /// discarded and returned.
    pub fn reload(&mut self, parsed: ParsedStylesheet) -> Option<PendingEdit> {
        self.css_version = parsed.version;
        self.functional = parsed.functional;
        self.themes = parsed.themes;
        self.reconcile_selection();
        log::info!("Reloaded {} themes", self.themes.len());

        let discarded = self.pending.take();
        if let Some(edit) = &discarded {
            log::warn!("Discarded unsaved edit of '{}' on reload", edit.name);
        }
        discarded
    }

    // === Export ===

    /// Generate the stylesheet, advancing the format version
    pub fn export_stylesheet(&mut self) -> Artifact {
        let css = self
            .writer
            .write(self.css_version, &self.functional, &self.themes);
        self.css_version = self.css_version.bumped();
        log::info!(
            "Exported stylesheet v{} with {} themes",
            self.css_version,
            self.themes.len()
        );
        Artifact::stylesheet(css)
    }

    pub fn export_config(&self) -> Artifact {
        Artifact::config(create_config_file(&self.selection, Some(&self.links)))
    }
}
