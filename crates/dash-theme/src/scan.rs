//! Stylesheet grammar
//!
//! Recognizes the three constructs a generated stylesheet is made of: the
//! version marker, the first `:root` block, and comment + class selector +
//! declaration block triples. Anything else in the document is skipped.
//! Callers only see [`ScannedSheet`], so the regex grammar can be swapped for
//! a tokenizer without touching them.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Custom property declarations keyed by lowercase name
pub(crate) type Declarations = HashMap<String, String>;

pub(crate) struct ScannedSheet<'a> {
    pub version: Option<&'a str>,
    pub root: Option<Declarations>,
    pub blocks: Vec<ScannedBlock<'a>>,
}

/// A class block preceded by its naming comment
pub(crate) struct ScannedBlock<'a> {
    pub comment: &'a str,
    pub class: &'a str,
    pub declarations: Declarations,
    /// The comment is the document's leading version header, not a name
    pub is_header: bool,
}

fn version_regex() -> &'static Regex {
    static VERSION_REGEX: OnceLock<Regex> = OnceLock::new();
    VERSION_REGEX.get_or_init(|| {
        Regex::new(r"(?i)CSS Version:\s*([0-9]+(?:\.[0-9]+)?)").expect("Invalid version regex")
    })
}

fn root_regex() -> &'static Regex {
    static ROOT_REGEX: OnceLock<Regex> = OnceLock::new();
    ROOT_REGEX.get_or_init(|| Regex::new(r":root\s*\{([^}]*)\}").expect("Invalid root regex"))
}

fn comment_regex() -> &'static Regex {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    COMMENT_REGEX.get_or_init(|| {
        Regex::new(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/").expect("Invalid comment regex")
    })
}

fn theme_block_regex() -> &'static Regex {
    static THEME_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
    THEME_BLOCK_REGEX.get_or_init(|| {
        Regex::new(
            r"/\*([^*]*\*+(?:[^/*][^*]*\*+)*)/\s*\.([A-Za-z0-9_-]+)\s*\{([^}]*)\}",
        )
        .expect("Invalid theme block regex")
    })
}

fn declaration_regex() -> &'static Regex {
    static DECLARATION_REGEX: OnceLock<Regex> = OnceLock::new();
    DECLARATION_REGEX.get_or_init(|| {
        Regex::new(r"(--[A-Za-z0-9_-]+)\s*:\s*([^;]+?)\s*(?:;|$)")
            .expect("Invalid declaration regex")
    })
}

pub(crate) fn scan_stylesheet(css: &str) -> ScannedSheet<'_> {
    let version = version_regex()
        .captures(css)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    let root = root_regex()
        .captures(css)
        .and_then(|caps| caps.get(1))
        .map(|m| scan_declarations(m.as_str()));

    let first_comment = comment_regex().find(css).map(|m| m.start());

    let blocks = theme_block_regex()
        .captures_iter(css)
        .filter_map(|caps| {
            let raw_comment = caps.get(1)?.as_str();
            let comment = raw_comment.trim_end_matches('*').trim();
            let class = caps.get(2)?.as_str();
            let declarations = scan_declarations(caps.get(3)?.as_str());
            let is_header = first_comment == Some(caps.get(0)?.start())
                && version_regex().is_match(raw_comment);
            Some(ScannedBlock {
                comment,
                class,
                declarations,
                is_header,
            })
        })
        .collect();

    ScannedSheet {
        version,
        root,
        blocks,
    }
}

/// Collect `--name: value;` pairs from a block body, later ones winning
fn scan_declarations(body: &str) -> Declarations {
    let body = comment_regex().replace_all(body, " ");
    declaration_regex()
        .captures_iter(&body)
        .map(|caps| (caps[1].to_ascii_lowercase(), caps[2].trim().to_string()))
        .collect()
}
