//! Configuration Generator
//!
//! Produces the `config.js` consumed by the widget runtime. The dashboard
//! never reads this text back as part of its own state.

use crate::links::LinksConfig;
use crate::selection::SelectionState;

/// Render `const widgetConfig = { ... };` for the current selection.
///
/// `linksConfig` is only emitted when at least one complete link remains
/// after filtering.
pub fn create_config_file(selection: &SelectionState, links: Option<&LinksConfig>) -> String {
    let theme = selection.selected_theme.as_deref().unwrap_or("");
    let mut fields = vec![
        format!("  theme: {}", js_string(theme)),
        format!("  alignment: {}", js_string(selection.alignment.as_str())),
    ];

    if let Some(links) = links {
        let entries = links.exported_links();
        if !entries.is_empty() {
            let rows: Vec<String> = entries
                .iter()
                .map(|link| {
                    format!(
                        "      {{ label: {}, url: {} }}",
                        js_string(&link.label),
                        js_string(&link.url)
                    )
                })
                .collect();

            fields.push(format!(
                "  linksConfig: {{\n    title: {},\n    links: [\n{}\n    ]\n  }}",
                js_string(&links.title),
                rows.join(",\n")
            ));
        }
    }

    format!("const widgetConfig = {{\n{}\n}};", fields.join(",\n"))
}

/// Single-quoted JavaScript string literal
fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LinkEntry;
    use crate::selection::Alignment;

    fn selection(theme: &str, alignment: Alignment) -> SelectionState {
        SelectionState {
            selected_theme: Some(theme.to_string()),
            alignment,
        }
    }

    #[test]
    fn test_config_without_links() {
        let config = create_config_file(&selection("x", Alignment::Start), None);
        assert_eq!(config, "const widgetConfig = {\n  theme: 'x',\n  alignment: 'start'\n};");
    }

    #[test]
    fn test_config_with_empty_links_omits_key() {
        let links = LinksConfig {
            title: "Quick Links".to_string(),
            links: vec![LinkEntry::new("", "")],
        };
        let config = create_config_file(&selection("x", Alignment::End), Some(&links));
        assert!(!config.contains("linksConfig"));
    }

    #[test]
    fn test_config_with_links() {
        let links = LinksConfig {
            title: "Quick Links".to_string(),
            links: vec![
                LinkEntry::new("Inbox", "https://mail.example"),
                LinkEntry::new("Calendar", "calendar.example"),
            ],
        };
        let config = create_config_file(
            &selection("midnight-sapphire-theme", Alignment::Center),
            Some(&links),
        );

        assert_eq!(
            config,
            "const widgetConfig = {\n  theme: 'midnight-sapphire-theme',\n  alignment: 'center',\n  linksConfig: {\n    title: 'Quick Links',\n    links: [\n      { label: 'Inbox', url: 'https://mail.example' },\n      { label: 'Calendar', url: 'http://calendar.example' }\n    ]\n  }\n};"
        );
    }

    #[test]
    fn test_config_no_selection() {
        let config = create_config_file(&SelectionState::default(), None);
        assert!(config.contains("  theme: '',\n"));
        assert!(config.contains("  alignment: 'center'\n"));
    }

    #[test]
    fn test_js_string_escaping() {
        assert_eq!(js_string("it's"), r"'it\'s'");
        assert_eq!(js_string("a\\b"), r"'a\\b'");
        assert_eq!(js_string("line\nbreak"), r"'line\nbreak'");
    }
}
