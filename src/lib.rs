//! Widget Dashboard - theme and widget configuration round-tripping
//!
//! The domain lives in the workspace crates:
//! - `dash-theme` - color codec, stylesheet parser and generator
//! - `dash-core` - theme store, configuration generator, loading
//! - `dash-config` - dashboard settings and stylesheet watching
//!
//! This crate holds the command shell driven by `main`.

pub mod commands;
pub mod downloads;
pub mod shell;

pub use commands::{Intent, ParseIntentError, parse_intent};
pub use downloads::DirectoryDownloader;
pub use shell::{Flow, Shell, open_session};
