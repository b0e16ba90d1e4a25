//! Hex color codec
//!
//! Colors are held as 8-bit sRGB triples and always printed as lowercase
//! `#rrggbb`. Hex input is decoded directly; any other CSS notation is handed
//! to lightningcss and accepted if it resolves to sRGB.

use std::fmt;
use std::str::FromStr;

use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Empty color value")]
    Empty,

    #[error("Invalid color: {0}")]
    Invalid(String),

    #[error("Unsupported color notation: {0}")]
    Unsupported(String),
}

/// An opaque sRGB color stored in canonical hex form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor::from_rgb(0, 0, 0);
    pub const WHITE: HexColor = HexColor::from_rgb(255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parse a color value as typed by a user or found in a stylesheet.
    ///
    /// Accepts `#rgb`, `#rrggbb` (alpha digits of `#rgba`/`#rrggbbaa` are
    /// dropped), the same digits without `#`, and named or functional CSS
    /// colors such as `crimson` or `rgb(40, 167, 69)`.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ColorError::Empty);
        }

        let digits = value.strip_prefix('#').unwrap_or(value);
        if let Some(color) = parse_hex_digits(digits) {
            return Ok(color);
        }
        if value.starts_with('#') {
            return Err(ColorError::Invalid(value.to_string()));
        }

        parse_css_color(value)
    }

    /// WCAG 2 relative luminance in `0.0..=1.0`
    pub fn relative_luminance(&self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// WCAG 2 contrast ratio in `1.0..=21.0`
    pub fn contrast_ratio(&self, other: &HexColor) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Black or white, whichever reads better on top of this color
    pub fn readable_text(&self) -> HexColor {
        if self.contrast_ratio(&Self::BLACK) >= self.contrast_ratio(&Self::WHITE) {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }

    pub fn to_rgb_string(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_hex_digits(digits: &str) -> Option<HexColor> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 | 4 => {
            let short = |i: usize| channel(&digits[i..i + 1].repeat(2));
            Some(HexColor::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        6 | 8 => Some(HexColor::from_rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}

fn parse_css_color(value: &str) -> Result<HexColor, ColorError> {
    let parsed =
        CssColor::parse_string(value).map_err(|_| ColorError::Invalid(value.to_string()))?;

    match parsed {
        CssColor::RGBA(rgba) => Ok(HexColor::from_rgb(rgba.red, rgba.green, rgba.blue)),
        _ => Err(ColorError::Unsupported(value.to_string())),
    }
}
