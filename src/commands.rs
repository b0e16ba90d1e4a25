//! Intent enum for testable input handling
//!
//! Intents represent what a command line asks for without side effects.
//! [`parse_intent`] turns a line into an `Intent`; the shell executes it.

use dash_core::Alignment;
use dash_theme::{ColorError, ColorSlot, FunctionalSlot, HexColor};
use thiserror::Error;

/// Intents that can be returned by [`parse_intent`]
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    // === Browsing ===
    /// List all themes, marking the selected one
    List,
    /// Show a theme's colors (the preview theme when no id is given)
    Show(Option<String>),

    // === Theme editing ===
    /// Add a gray-scale theme with the given name
    Add(String),
    /// Start composing a theme in the editor
    New,
    /// Open an existing theme in the editor
    Edit(String),
    /// Set the name of the theme being edited
    Name(String),
    /// Set one color of the theme being edited
    Color(ColorSlot, HexColor),
    /// Commit the pending edit
    Save,
    /// Discard the pending edit
    Cancel,
    /// Copy a theme under a fresh name
    Duplicate(String),
    /// Delete a theme after confirmation
    Delete(String),

    // === Selection ===
    Select(String),
    Align(Alignment),
    /// Change a functional color
    Functional(FunctionalSlot, HexColor),

    // === Links ===
    LinkAdd { label: String, url: String },
    /// Remove a link by its 1-based position
    LinkRemove(usize),
    LinksTitle(String),

    // === Files ===
    ExportStyles,
    ExportConfig,
    /// Re-read the stylesheet from disk
    Reload,

    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseIntentError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid color: {0}")]
    Color(#[from] ColorError),

    #[error("Unknown color slot '{0}' (expected 0-3)")]
    ColorSlot(String),

    #[error("Unknown functional slot '{0}'")]
    FunctionalSlot(String),

    #[error("Unknown alignment '{0}' (expected start, center or end)")]
    Alignment(String),
}

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  list                          list themes
  show [id]                     show a theme's colors
  add <name>                    add a theme with default colors
  new                           compose a new theme in the editor
  edit <id>                     open a theme in the editor
  name <text>                   rename the theme being edited
  color <0-3> <color>           set bg / text / accent / secondary bg
  save | cancel                 finish editing
  duplicate <id>                copy a theme
  delete <id>                   delete a theme (asks first)
  select <id>                   select the widget theme
  align <start|center|end>      set widget alignment
  functional <slot> <color>     set a functional color (e.g. colour-success)
  link add <label> <url>        add a quick link
  link remove <n>               remove quick link n
  links title <text>            set the quick links title
  export styles | export config write styles.css / config.js
  reload                        re-read the stylesheet
  help | quit";

/// Parse one command line. Blank lines yield `Ok(None)`.
pub fn parse_intent(line: &str) -> Result<Option<Intent>, ParseIntentError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = split_word(line);
    let intent = match command.to_ascii_lowercase().as_str() {
        "list" | "ls" => Intent::List,
        "show" => Intent::Show(non_empty(rest).map(str::to_string)),
        "add" => Intent::Add(required(rest, "add <name>")?.to_string()),
        "new" => Intent::New,
        "edit" => Intent::Edit(required(rest, "edit <id>")?.to_string()),
        "name" => Intent::Name(required(rest, "name <text>")?.to_string()),
        "color" | "colour" => {
            let (slot, value) = split_word(required(rest, "color <0-3> <color>")?);
            let slot = slot
                .parse::<usize>()
                .ok()
                .and_then(ColorSlot::from_index)
                .ok_or_else(|| ParseIntentError::ColorSlot(slot.to_string()))?;
            Intent::Color(slot, HexColor::parse(value)?)
        }
        "save" => Intent::Save,
        "cancel" => Intent::Cancel,
        "duplicate" | "dup" => Intent::Duplicate(required(rest, "duplicate <id>")?.to_string()),
        "delete" | "rm" => Intent::Delete(required(rest, "delete <id>")?.to_string()),
        "select" => Intent::Select(required(rest, "select <id>")?.to_string()),
        "align" => {
            let value = required(rest, "align <start|center|end>")?;
            Intent::Align(
                value
                    .parse()
                    .map_err(|_| ParseIntentError::Alignment(value.to_string()))?,
            )
        }
        "functional" => {
            let (slot, value) = split_word(required(rest, "functional <slot> <color>")?);
            let slot = FunctionalSlot::from_name(slot)
                .ok_or_else(|| ParseIntentError::FunctionalSlot(slot.to_string()))?;
            Intent::Functional(slot, HexColor::parse(value)?)
        }
        "link" => parse_link(rest)?,
        "links" => match split_word(rest) {
            ("title", title) => Intent::LinksTitle(title.to_string()),
            _ => return Err(ParseIntentError::Usage("links title <text>")),
        },
        "export" => match rest {
            "styles" | "css" => Intent::ExportStyles,
            "config" | "js" => Intent::ExportConfig,
            _ => return Err(ParseIntentError::Usage("export styles | export config")),
        },
        "reload" => Intent::Reload,
        "help" | "?" => Intent::Help,
        "quit" | "exit" | "q" => Intent::Quit,
        _ => return Err(ParseIntentError::Unknown(command.to_string())),
    };
    Ok(Some(intent))
}

fn parse_link(rest: &str) -> Result<Intent, ParseIntentError> {
    const USAGE: &str = "link add <label> <url> | link remove <n>";

    match split_word(rest) {
        ("add", args) => {
            // The URL is the last word; everything before it is the label
            let (label, url) = args
                .rsplit_once(char::is_whitespace)
                .ok_or(ParseIntentError::Usage(USAGE))?;
            Ok(Intent::LinkAdd {
                label: label.trim().to_string(),
                url: url.to_string(),
            })
        }
        ("remove", n) => n
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(Intent::LinkRemove)
            .ok_or(ParseIntentError::Usage(USAGE)),
        _ => Err(ParseIntentError::Usage(USAGE)),
    }
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn non_empty(text: &str) -> Option<&str> {
    Some(text).filter(|t| !t.is_empty())
}

fn required<'a>(text: &'a str, usage: &'static str) -> Result<&'a str, ParseIntentError> {
    non_empty(text).ok_or(ParseIntentError::Usage(usage))
}
