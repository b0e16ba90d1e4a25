//! Stylesheet Parser
//!
//! Reads a generated stylesheet back into a [`ThemeRegistry`] and a
//! [`FunctionalColorTable`]. Parsing never fails: missing root slots keep
//! their defaults and theme blocks lacking one of the four colors are left
//! out of the registry.

use crate::scan::{Declarations, ScannedBlock, scan_stylesheet};
use crate::{
    ColorSlot, CssVersion, FunctionalColorTable, FunctionalSlot, HexColor, ThemeColors,
    ThemeRecord, ThemeRegistry,
};

/// Everything recovered from one stylesheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStylesheet {
    pub version: CssVersion,
    pub functional: FunctionalColorTable,
    pub themes: ThemeRegistry,
    pub report: ParseReport,
}

/// What the parser skipped while reading a stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Display names of theme blocks left out (incomplete or duplicate)
    pub dropped: Vec<String>,
    /// Non-blank input with no version marker, root block, or theme block
    pub unparsable: bool,
}

/// Parse stylesheet text into functional colors and themes
pub fn parse_stylesheet(css: &str) -> ParsedStylesheet {
    let sheet = scan_stylesheet(css);

    let version = sheet
        .version
        .and_then(CssVersion::parse)
        .unwrap_or_default();

    let mut functional = FunctionalColorTable::default();
    if let Some(root) = &sheet.root {
        apply_functional_colors(&mut functional, root);
    }

    let mut report = ParseReport {
        dropped: Vec::new(),
        unparsable: !css.trim().is_empty()
            && sheet.version.is_none()
            && sheet.root.is_none()
            && sheet.blocks.is_empty(),
    };

    let mut themes = ThemeRegistry::new();
    for block in &sheet.blocks {
        if block.is_header {
            continue;
        }

        let Some(record) = theme_from_block(block) else {
            log::debug!(
                "Dropping incomplete theme block '{}' (.{})",
                block.comment,
                block.class
            );
            report.dropped.push(block.comment.to_string());
            continue;
        };

        if !themes.insert(record) {
            log::debug!("Dropping duplicate theme block .{}", block.class);
            report.dropped.push(block.comment.to_string());
        }
    }

    log::debug!(
        "Parsed stylesheet v{}: {} themes, {} dropped",
        version,
        themes.len(),
        report.dropped.len()
    );

    ParsedStylesheet {
        version,
        functional,
        themes,
        report,
    }
}

fn apply_functional_colors(table: &mut FunctionalColorTable, root: &Declarations) {
    for slot in FunctionalSlot::ALL {
        let value = root
            .get(&format!("--{}", slot.name()))
            .or_else(|| root.get(&format!("--{}", slot.legacy_name())));

        let Some(value) = value else {
            continue;
        };

        match HexColor::parse(value) {
            Ok(color) => table.set(slot, color),
            Err(e) => log::warn!("Ignoring --{}: {}", slot.name(), e),
        }
    }
}

fn theme_from_block(block: &ScannedBlock<'_>) -> Option<ThemeRecord> {
    let mut colors = ThemeColors::default();
    for slot in ColorSlot::ALL {
        let value = block.declarations.get(slot.property())?;
        colors.set(slot, HexColor::parse(value).ok()?);
    }

    Some(ThemeRecord::new(block.class, block.comment, colors))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOREST: &str = r#"
        :root {
          --colour-success: #28a745;
        }

        /* Forest Green */
        .forest-green-theme {
          --primary-bg-color: #ecf0e6;
          --primary-text-color: #264639;
          --accent-color: #558269;
          --secondary-bg-color: #558269;
        }
    "#;

    #[test]
    fn test_parse_single_theme() {
        let parsed = parse_stylesheet(FOREST);

        assert_eq!(parsed.themes.len(), 1);
        let theme = parsed.themes.get("forest-green-theme").unwrap();
        assert_eq!(theme.name, "Forest Green");
        assert_eq!(theme.colors.get(ColorSlot::PrimaryText).to_string(), "#264639");
        assert_eq!(theme.colors.get(ColorSlot::SecondaryBackground).to_string(), "#558269");

        assert_eq!(parsed.functional.get(FunctionalSlot::Success).to_string(), "#28a745");
        for (slot, color) in parsed.functional.iter() {
            assert_eq!(color, slot.default_color());
        }
        assert_eq!(parsed.version, CssVersion::INITIAL);
        assert!(parsed.report.dropped.is_empty());
        assert!(!parsed.report.unparsable);
    }

    #[test]
    fn test_parse_version_marker() {
        let css = format!("/* Widget Styles - CSS Version: 1.7 - Generated by Dashboard v4.0 */\n{}", FOREST);
        let parsed = parse_stylesheet(&css);
        assert_eq!(parsed.version.to_string(), "1.7");
        assert_eq!(parsed.themes.len(), 1);
    }

    #[test]
    fn test_declaration_order_irrelevant() {
        let css = r#"
            /* Shuffled */
            .shuffled-theme {
              --secondary-bg-color: #444444;
              --accent-color: #333333;
              --primary-text-color: #222222;
              --primary-bg-color: #111111;
            }
        "#;
        let parsed = parse_stylesheet(css);
        let theme = parsed.themes.get("shuffled-theme").unwrap();
        assert_eq!(theme.colors.get(ColorSlot::PrimaryBackground).to_string(), "#111111");
        assert_eq!(theme.colors.get(ColorSlot::SecondaryBackground).to_string(), "#444444");
    }

    #[test]
    fn test_incomplete_block_dropped() {
        let css = format!(
            "{}\n/* Broken */\n.broken-theme {{\n  --primary-bg-color: #000000;\n  --primary-text-color: #ffffff;\n  --secondary-bg-color: #111111;\n}}\n",
            FOREST
        );
        let parsed = parse_stylesheet(&css);
        assert_eq!(parsed.themes.len(), 1);
        assert!(!parsed.themes.contains("broken-theme"));
        assert_eq!(parsed.report.dropped, vec!["Broken".to_string()]);
    }

    #[test]
    fn test_invalid_color_drops_block() {
        let css = r#"
            /* Bad */
            .bad-theme {
              --primary-bg-color: #zzzzzz;
              --primary-text-color: #ffffff;
              --accent-color: #ffffff;
              --secondary-bg-color: #ffffff;
            }
        "#;
        let parsed = parse_stylesheet(css);
        assert!(parsed.themes.is_empty());
        assert_eq!(parsed.report.dropped.len(), 1);
    }

    #[test]
    fn test_duplicate_class_first_wins() {
        let css = format!(
            "{}\n/* Forest Again */\n.forest-green-theme {{ --primary-bg-color: #000; --primary-text-color: #000; --accent-color: #000; --secondary-bg-color: #000; }}",
            FOREST
        );
        let parsed = parse_stylesheet(&css);
        assert_eq!(parsed.themes.len(), 1);
        assert_eq!(parsed.themes.get("forest-green-theme").unwrap().name, "Forest Green");
        assert_eq!(parsed.report.dropped, vec!["Forest Again".to_string()]);
    }

    #[test]
    fn test_id_is_literal_class_name() {
        let css = r#"
            /* Fresh Spring */
            .fresh-spring {
              --primary-bg-color: #24ffb6;
              --primary-text-color: #ba1285;
              --accent-color: #a18c8c;
              --secondary-bg-color: #ffffff;
            }
        "#;
        let parsed = parse_stylesheet(css);
        assert!(parsed.themes.contains("fresh-spring"));
    }

    #[test]
    fn test_header_comment_never_names_a_theme() {
        let css = r#"
            /* Widget Styles - CSS Version: 2.0 */
            .orphan-theme {
              --primary-bg-color: #111111;
              --primary-text-color: #222222;
              --accent-color: #333333;
              --secondary-bg-color: #444444;
            }
        "#;
        let parsed = parse_stylesheet(css);
        assert!(parsed.themes.is_empty());
        assert!(parsed.report.dropped.is_empty());
    }

    #[test]
    fn test_header_words_in_theme_name() {
        let css = r#"/* Widget Styles - CSS Version: 1.1 - Generated by Dashboard v4.0 */

            /* Widget Styles Dark */
            .widget-styles-dark-theme {
              --primary-bg-color: #111111;
              --primary-text-color: #eeeeee;
              --accent-color: #333333;
              --secondary-bg-color: #222222;
            }
        "#;
        let parsed = parse_stylesheet(css);
        assert_eq!(
            parsed.themes.get("widget-styles-dark-theme").unwrap().name,
            "Widget Styles Dark"
        );
        assert_eq!(parsed.version.to_string(), "1.1");
    }

    #[test]
    fn test_legacy_functional_names() {
        let css = ":root { --success: #00ff00; --status-4: navy; --colour-status-0: #010203; }";
        let parsed = parse_stylesheet(css);
        assert_eq!(parsed.functional.get(FunctionalSlot::Success).to_string(), "#00ff00");
        assert_eq!(parsed.functional.get(FunctionalSlot::Status4).to_string(), "#000080");
        assert_eq!(parsed.functional.get(FunctionalSlot::Status0).to_string(), "#010203");
    }

    #[test]
    fn test_invalid_functional_keeps_default() {
        let parsed = parse_stylesheet(":root { --colour-success: nonsense; }");
        assert_eq!(
            parsed.functional.get(FunctionalSlot::Success),
            FunctionalSlot::Success.default_color()
        );
    }

    #[test]
    fn test_unparsable_document() {
        let parsed = parse_stylesheet("<html><body>404 Not Found</body></html>");
        assert!(parsed.report.unparsable);
        assert!(parsed.themes.is_empty());
        assert_eq!(parsed.functional, FunctionalColorTable::default());

        assert!(!parse_stylesheet("   ").report.unparsable);
    }
}
