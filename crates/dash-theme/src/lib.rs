//! Dash Theme - stylesheet model, parsing and generation
//!
//! This crate provides:
//! - Hex color codec with contrast helpers
//! - Stylesheet parsing into a theme registry and functional color table
//! - Stylesheet generation that the parser can read back

pub mod color;
pub mod generator;
pub mod parser;
mod scan;

pub use color::{ColorError, HexColor};
pub use generator::{StylesheetWriter, display_name};
pub use parser::{ParseReport, ParsedStylesheet, parse_stylesheet};

use std::fmt;

use indexmap::IndexMap;

/// The four colors every theme defines, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    PrimaryBackground,
    PrimaryText,
    Accent,
    SecondaryBackground,
}

impl ColorSlot {
    pub const ALL: [ColorSlot; 4] = [
        ColorSlot::PrimaryBackground,
        ColorSlot::PrimaryText,
        ColorSlot::Accent,
        ColorSlot::SecondaryBackground,
    ];

    /// Custom property carrying this slot in a theme block
    pub fn property(self) -> &'static str {
        match self {
            ColorSlot::PrimaryBackground => "--primary-bg-color",
            ColorSlot::PrimaryText => "--primary-text-color",
            ColorSlot::Accent => "--accent-color",
            ColorSlot::SecondaryBackground => "--secondary-bg-color",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ColorSlot::PrimaryBackground => 0,
            ColorSlot::PrimaryText => 1,
            ColorSlot::Accent => 2,
            ColorSlot::SecondaryBackground => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Theme colors: background, text, accent, secondary background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors([HexColor; 4]);

impl ThemeColors {
    pub const fn new(colors: [HexColor; 4]) -> Self {
        Self(colors)
    }

    pub fn get(&self, slot: ColorSlot) -> HexColor {
        self.0[slot.index()]
    }

    pub fn set(&mut self, slot: ColorSlot, color: HexColor) {
        self.0[slot.index()] = color;
    }

    pub fn as_array(&self) -> &[HexColor; 4] {
        &self.0
    }
}

impl Default for ThemeColors {
    /// Gray-scale starting point for newly added themes
    fn default() -> Self {
        Self([
            HexColor::from_rgb(0xf4, 0xf4, 0xf4),
            HexColor::from_rgb(0x22, 0x22, 0x22),
            HexColor::from_rgb(0x88, 0x88, 0x88),
            HexColor::from_rgb(0xdd, 0xdd, 0xdd),
        ])
    }
}

impl From<[HexColor; 4]> for ThemeColors {
    fn from(colors: [HexColor; 4]) -> Self {
        Self(colors)
    }
}

/// A named theme, keyed in the registry by its class name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRecord {
    /// Class selector name, e.g. `forest-green-theme`
    pub id: String,
    /// Display name shown in the dashboard and written as the block comment
    pub name: String,
    pub colors: ThemeColors,
}

impl ThemeRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, colors: ThemeColors) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            colors,
        }
    }
}

/// Insertion-ordered collection of themes keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeRegistry {
    themes: IndexMap<String, ThemeRecord>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.themes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ThemeRecord> {
        self.themes.get(id)
    }

    pub fn first(&self) -> Option<&ThemeRecord> {
        self.themes.first().map(|(_, record)| record)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(|id| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeRecord> {
        self.themes.values()
    }

    /// Append a record. Returns false, leaving the registry untouched, if the
    /// id is already taken.
    pub fn insert(&mut self, record: ThemeRecord) -> bool {
        if self.themes.contains_key(&record.id) {
            return false;
        }
        self.themes.insert(record.id.clone(), record);
        true
    }

    /// Swap the record stored under `old_id` for `record`, keeping its
    /// position. The new id must not belong to another record.
    pub fn replace(&mut self, old_id: &str, record: ThemeRecord) -> Option<ThemeRecord> {
        let index = self.themes.get_index_of(old_id)?;
        if record.id != old_id && self.themes.contains_key(&record.id) {
            return None;
        }
        let (_, previous) = self.themes.shift_remove_index(index)?;
        self.themes.shift_insert(index, record.id.clone(), record);
        Some(previous)
    }

    pub fn remove(&mut self, id: &str) -> Option<ThemeRecord> {
        self.themes.shift_remove(id)
    }
}

/// Global status colors shared by every theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionalSlot {
    Success,
    Status0,
    Status1,
    Status2,
    Status3,
    Status4,
    Status5,
}

impl FunctionalSlot {
    pub const ALL: [FunctionalSlot; 7] = [
        FunctionalSlot::Success,
        FunctionalSlot::Status0,
        FunctionalSlot::Status1,
        FunctionalSlot::Status2,
        FunctionalSlot::Status3,
        FunctionalSlot::Status4,
        FunctionalSlot::Status5,
    ];

    /// Property name without the leading `--`
    pub fn name(self) -> &'static str {
        match self {
            FunctionalSlot::Success => "colour-success",
            FunctionalSlot::Status0 => "colour-status-0",
            FunctionalSlot::Status1 => "colour-status-1",
            FunctionalSlot::Status2 => "colour-status-2",
            FunctionalSlot::Status3 => "colour-status-3",
            FunctionalSlot::Status4 => "colour-status-4",
            FunctionalSlot::Status5 => "colour-status-5",
        }
    }

    /// Spelling used by older generated stylesheets
    pub fn legacy_name(self) -> &'static str {
        self.name().trim_start_matches("colour-")
    }

    pub fn default_color(self) -> HexColor {
        match self {
            FunctionalSlot::Success => HexColor::from_rgb(0x28, 0xa7, 0x45),
            FunctionalSlot::Status0 => HexColor::from_rgb(0xdc, 0x14, 0x3c),
            FunctionalSlot::Status1 => HexColor::from_rgb(0xff, 0x8c, 0x00),
            FunctionalSlot::Status2 => HexColor::from_rgb(0xff, 0xd7, 0x00),
            FunctionalSlot::Status3 => HexColor::from_rgb(0x32, 0xcd, 0x32),
            FunctionalSlot::Status4 => HexColor::from_rgb(0x6b, 0xab, 0xff),
            FunctionalSlot::Status5 => HexColor::from_rgb(0x00, 0xcc, 0xff),
        }
    }

    /// Look a slot up by either spelling, with or without the `--` prefix
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches("--").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|slot| slot.name() == name || slot.legacy_name() == name)
    }

    fn index(self) -> usize {
        match self {
            FunctionalSlot::Success => 0,
            FunctionalSlot::Status0 => 1,
            FunctionalSlot::Status1 => 2,
            FunctionalSlot::Status2 => 3,
            FunctionalSlot::Status3 => 4,
            FunctionalSlot::Status4 => 5,
            FunctionalSlot::Status5 => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionalColorTable {
    colors: [HexColor; 7],
}

impl FunctionalColorTable {
    pub fn get(&self, slot: FunctionalSlot) -> HexColor {
        self.colors[slot.index()]
    }

    pub fn set(&mut self, slot: FunctionalSlot, color: HexColor) {
        self.colors[slot.index()] = color;
    }

    pub fn iter(&self) -> impl Iterator<Item = (FunctionalSlot, HexColor)> + '_ {
        FunctionalSlot::ALL
            .into_iter()
            .map(|slot| (slot, self.get(slot)))
    }
}

impl Default for FunctionalColorTable {
    fn default() -> Self {
        Self {
            colors: FunctionalSlot::ALL.map(FunctionalSlot::default_color),
        }
    }
}

/// Stylesheet format version carried in the header comment
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CssVersion(f64);

impl CssVersion {
    pub const INITIAL: CssVersion = CssVersion(1.0);

    /// Versions are kept to three decimals so repeated bumps stay exact
    pub fn new(value: f64) -> Self {
        Self((value * 1000.0).round() / 1000.0)
    }

    pub fn parse(text: &str) -> Option<Self> {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(Self::new)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// The version written by the next export
    pub fn bumped(self) -> Self {
        Self::new(self.0 + 0.1)
    }
}

impl Default for CssVersion {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for CssVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.3}", self.0);
        let trimmed = fixed.trim_end_matches('0');
        if trimmed.ends_with('.') {
            write!(f, "{}0", trimmed)
        } else {
            f.write_str(trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ThemeRecord {
        ThemeRecord::new(id, id, ThemeColors::default())
    }

    #[test]
    fn test_registry_preserves_insertion_order() {
        let mut registry = ThemeRegistry::new();
        assert!(registry.insert(record("b-theme")));
        assert!(registry.insert(record("a-theme")));
        assert!(registry.insert(record("c-theme")));
        assert!(!registry.insert(record("a-theme")));

        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec!["b-theme", "a-theme", "c-theme"]);
        assert_eq!(registry.first().unwrap().id, "b-theme");
    }

    #[test]
    fn test_registry_replace_keeps_position() {
        let mut registry = ThemeRegistry::new();
        registry.insert(record("a-theme"));
        registry.insert(record("b-theme"));
        registry.insert(record("c-theme"));

        let previous = registry.replace("b-theme", record("z-theme")).unwrap();
        assert_eq!(previous.id, "b-theme");

        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec!["a-theme", "z-theme", "c-theme"]);
    }

    #[test]
    fn test_registry_replace_refuses_collision() {
        let mut registry = ThemeRegistry::new();
        registry.insert(record("a-theme"));
        registry.insert(record("b-theme"));

        assert!(registry.replace("a-theme", record("b-theme")).is_none());
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a-theme"));
    }

    #[test]
    fn test_functional_defaults() {
        let table = FunctionalColorTable::default();
        assert_eq!(table.get(FunctionalSlot::Success).to_string(), "#28a745");
        assert_eq!(table.get(FunctionalSlot::Status5).to_string(), "#00ccff");
        assert_eq!(table.iter().count(), 7);
    }

    #[test]
    fn test_functional_slot_names() {
        assert_eq!(FunctionalSlot::Status3.legacy_name(), "status-3");
        assert_eq!(FunctionalSlot::from_name("--colour-status-2"), Some(FunctionalSlot::Status2));
        assert_eq!(FunctionalSlot::from_name("success"), Some(FunctionalSlot::Success));
        assert_eq!(FunctionalSlot::from_name("status-9"), None);
    }

    #[test]
    fn test_css_version_bump_is_exact() {
        let mut version = CssVersion::default();
        for _ in 0..12 {
            version = version.bumped();
        }
        assert_eq!(version.to_string(), "2.2");
        assert_eq!(CssVersion::INITIAL.to_string(), "1.0");
        assert_eq!(CssVersion::new(10.0).to_string(), "10.0");
    }

    #[test]
    fn test_css_version_parse() {
        assert_eq!(CssVersion::parse("2.35").unwrap().to_string(), "2.35");
        assert!(CssVersion::parse("abc").is_none());
        assert!(CssVersion::parse("-1").is_none());
    }
}
