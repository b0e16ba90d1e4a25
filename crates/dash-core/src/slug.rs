//! Theme id derivation
//!
//! `Forest Green` becomes `forest-green-theme`: lowercase, every run of
//! characters outside `[a-z0-9]` collapsed to one hyphen, edge hyphens
//! trimmed, then the `-theme` suffix appended.

pub const THEME_ID_SUFFIX: &str = "-theme";

/// Kebab-case form of a display name, without the suffix
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut gap = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(c);
        } else {
            gap = true;
        }
    }

    slug
}

/// Theme id for a display name, or `None` if nothing slug-worthy remains
pub fn theme_id(name: &str) -> Option<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        None
    } else {
        Some(format!("{}{}", slug, THEME_ID_SUFFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_id_basic() {
        assert_eq!(theme_id("Forest Green").as_deref(), Some("forest-green-theme"));
        assert_eq!(theme_id("Midnight Sapphire").as_deref(), Some("midnight-sapphire-theme"));
    }

    #[test]
    fn test_theme_id_collapses_punctuation() {
        assert_eq!(theme_id("My Theme!!").as_deref(), Some("my-theme-theme"));
        assert_eq!(theme_id("  --Deep   Sea__Pearl-- ").as_deref(), Some("deep-sea-pearl-theme"));
    }

    #[test]
    fn test_theme_id_non_ascii_is_a_separator() {
        assert_eq!(theme_id("Café Noir").as_deref(), Some("caf-noir-theme"));
    }

    #[test]
    fn test_theme_id_rejects_symbols_only() {
        assert_eq!(theme_id("!!!"), None);
        assert_eq!(theme_id(""), None);
    }

    #[test]
    fn test_slugify_idempotent() {
        for name in ["Ruby Radiance", "a--b", "X_Y z", "Starlight 2", "ÅÄÖ"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once);
        }
    }
}
