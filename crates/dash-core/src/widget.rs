//! Widget runtime configuration
//!
//! Widgets read the generated `config.js` and apply the named theme class to
//! their root element. A missing or unreadable configuration falls back to
//! `midnight-sapphire-theme`, centered.

use regex::Regex;
use std::sync::OnceLock;

use crate::links::{LinkEntry, LinksConfig};
use crate::selection::Alignment;

/// Theme applied when no usable configuration exists
pub const DEFAULT_THEME_ID: &str = "midnight-sapphire-theme";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub theme: String,
    pub alignment: Alignment,
    pub links: Option<LinksConfig>,
}

impl WidgetConfig {
    pub fn fallback() -> Self {
        Self {
            theme: DEFAULT_THEME_ID.to_string(),
            alignment: Alignment::Center,
            links: None,
        }
    }

    /// Read a `config.js` body, falling back when it is absent or has no theme
    pub fn from_script(script: Option<&str>) -> Self {
        let Some(script) = script else {
            log::info!("No widget configuration, using {}", DEFAULT_THEME_ID);
            return Self::fallback();
        };

        match parse_script(script) {
            Some(config) => config,
            None => {
                log::warn!("Widget configuration has no theme, using {}", DEFAULT_THEME_ID);
                Self::fallback()
            }
        }
    }

    /// Class to put on the widget's root element
    pub fn root_class(&self) -> &str {
        if self.theme.trim().is_empty() {
            DEFAULT_THEME_ID
        } else {
            &self.theme
        }
    }
}

/// `key: 'value'` or `key: "value"` pairs, in document order
fn field_regex() -> &'static Regex {
    static FIELD_REGEX: OnceLock<Regex> = OnceLock::new();
    FIELD_REGEX.get_or_init(|| {
        Regex::new(r#"([A-Za-z_]\w*)\s*:\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#)
            .expect("Invalid config field regex")
    })
}

fn parse_script(script: &str) -> Option<WidgetConfig> {
    if !script.contains("widgetConfig") {
        return None;
    }

    let mut theme = None;
    let mut alignment = None;
    let mut title = None;
    let mut links = Vec::new();
    let mut pending_label: Option<String> = None;

    for caps in field_regex().captures_iter(script) {
        let Some(value) = caps.get(2).or_else(|| caps.get(3)) else {
            continue;
        };
        let value = unescape(value.as_str());

        match &caps[1] {
            "theme" if theme.is_none() => theme = Some(value),
            "alignment" if alignment.is_none() => alignment = Some(value),
            "title" if title.is_none() => title = Some(value),
            "label" => pending_label = Some(value),
            "url" => {
                if let Some(label) = pending_label.take() {
                    links.push(LinkEntry::new(label, value));
                }
            }
            _ => {}
        }
    }

    let theme = theme.filter(|t| !t.trim().is_empty())?;
    let alignment = alignment
        .and_then(|a| a.parse().ok())
        .unwrap_or_default();
    let links = if links.is_empty() && title.is_none() {
        None
    } else {
        Some(LinksConfig {
            title: title.unwrap_or_else(|| LinksConfig::default().title),
            links,
        })
    };

    Some(WidgetConfig {
        theme,
        alignment,
        links,
    })
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_gen::create_config_file;
    use crate::selection::SelectionState;

    const HANDWRITTEN: &str = r#"// Global widget configuration
const widgetConfig = {
  theme: 'midnight-sapphire-theme',
  alignment: 'center',

  // Used by links.html
  linksConfig: {
    title: 'Quick Links',
    links: [
      { label: 'Inbox', url: 'https://mail.example' },
      { label: 'Calendar', url: 'https://calendar.example' },
      { label: 'Repository', url: 'https://github.com' }
    ]
  }
};"#;

    #[test]
    fn test_missing_config_falls_back() {
        let config = WidgetConfig::from_script(None);
        assert_eq!(config, WidgetConfig::fallback());
        assert_eq!(config.root_class(), "midnight-sapphire-theme");
        assert_eq!(config.alignment, Alignment::Center);
    }

    #[test]
    fn test_garbage_config_falls_back() {
        assert_eq!(WidgetConfig::from_script(Some("}{ nonsense")), WidgetConfig::fallback());
        assert_eq!(
            WidgetConfig::from_script(Some("const widgetConfig = { alignment: 'end' };")),
            WidgetConfig::fallback()
        );
    }

    #[test]
    fn test_reads_handwritten_config() {
        let config = WidgetConfig::from_script(Some(HANDWRITTEN));
        assert_eq!(config.theme, "midnight-sapphire-theme");
        let links = config.links.unwrap();
        assert_eq!(links.title, "Quick Links");
        assert_eq!(links.links.len(), 3);
        assert_eq!(links.links[2], LinkEntry::new("Repository", "https://github.com"));
    }

    #[test]
    fn test_reads_generated_config() {
        let selection = SelectionState {
            selected_theme: Some("it's-theme".to_string()),
            alignment: Alignment::End,
        };
        let links = LinksConfig {
            title: "Bookmarks".to_string(),
            links: vec![LinkEntry::new("Docs", "docs.example")],
        };
        let script = create_config_file(&selection, Some(&links));

        let config = WidgetConfig::from_script(Some(&script));
        assert_eq!(config.theme, "it's-theme");
        assert_eq!(config.alignment, Alignment::End);
        let links = config.links.unwrap();
        assert_eq!(links.title, "Bookmarks");
        assert_eq!(links.links, vec![LinkEntry::new("Docs", "http://docs.example")]);
    }

    #[test]
    fn test_bad_alignment_defaults_to_center() {
        let config = WidgetConfig::from_script(Some(
            "const widgetConfig = { theme: \"ruby-radiance-theme\", alignment: 'sideways' };",
        ));
        assert_eq!(config.theme, "ruby-radiance-theme");
        assert_eq!(config.alignment, Alignment::Center);
        assert!(config.links.is_none());
    }
}
