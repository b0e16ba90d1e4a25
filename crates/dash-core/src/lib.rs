//! Dash Core - theme store and export engine
//!
//! This crate provides:
//! - The theme store: registry, functional colors, selection and edit state
//! - Slug rule deriving theme ids from display names
//! - Configuration (`config.js`) generation and the widget runtime fallback
//! - Stylesheet loading with a bounded wait
//! - Downloadable artifacts

pub mod artifact;
pub mod config_gen;
pub mod links;
pub mod loader;
pub mod selection;
pub mod slug;
pub mod store;
pub mod widget;

pub use artifact::{Artifact, Downloader};
pub use config_gen::create_config_file;
pub use links::{LinkEntry, LinksConfig};
pub use loader::{FetchError, FileSource, LoadOutcome, LoadWarning, StylesheetSource, load_stylesheet};
pub use selection::{Alignment, SelectionState};
pub use slug::{slugify, theme_id};
pub use store::{PendingEdit, ThemeError, ThemeStore};
pub use widget::WidgetConfig;
