//! Stylesheet Generator
//!
//! Serializes functional colors and themes into the stylesheet format read by
//! [`crate::parse_stylesheet`].

use crate::{ColorSlot, CssVersion, FunctionalColorTable, ThemeRegistry};

/// Font stack written into the `:root` block
pub const DEFAULT_FONT_FAMILY: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif";

/// Dashboard label written into the header comment
pub const DEFAULT_DASHBOARD_LABEL: &str = "v4.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetWriter {
    pub dashboard_label: String,
    pub font_family: String,
}

impl Default for StylesheetWriter {
    fn default() -> Self {
        Self {
            dashboard_label: DEFAULT_DASHBOARD_LABEL.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

impl StylesheetWriter {
    /// Render a stylesheet. The header carries `version` bumped by one step,
    /// which is the version this export represents.
    pub fn write(
        &self,
        version: CssVersion,
        functional: &FunctionalColorTable,
        themes: &ThemeRegistry,
    ) -> String {
        let mut css = format!(
            "/* Widget Styles - CSS Version: {} - Generated by Dashboard {} */\n\n",
            version.bumped(),
            display_name(&self.dashboard_label)
        );

        css.push_str(":root {\n");
        css.push_str(&format!("  --font-family: {};\n", self.font_family));
        for (slot, color) in functional.iter() {
            css.push_str(&format!("  --{}: {};\n", slot.name(), color));
        }
        css.push_str("}\n");

        for theme in themes.iter() {
            css.push_str(&format!("\n/* {} */\n.{} {{\n", display_name(&theme.name), theme.id));
            for slot in ColorSlot::ALL {
                css.push_str(&format!("  {}: {};\n", slot.property(), theme.colors.get(slot)));
            }
            css.push_str("}\n");
        }

        css
    }
}

/// Free text as it reads back from the comment it is written into: one line,
/// no `*/`, no surrounding whitespace
pub fn display_name(text: &str) -> String {
    text.replace(['\r', '\n'], " ").replace("*/", "* /").trim().to_string()
}
