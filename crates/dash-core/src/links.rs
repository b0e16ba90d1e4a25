//! Quick-link list written into the widget configuration

pub const DEFAULT_LINKS_TITLE: &str = "Quick Links";

const KNOWN_SCHEMES: [&str; 4] = ["http://", "https://", "ftp://", "ftps://"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkEntry {
    pub label: String,
    pub url: String,
}

impl LinkEntry {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Both label and URL are present
    pub fn is_complete(&self) -> bool {
        !self.label.trim().is_empty() && !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinksConfig {
    pub title: String,
    pub links: Vec<LinkEntry>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_LINKS_TITLE.to_string(),
            links: Vec::new(),
        }
    }
}

impl LinksConfig {
    /// Links as they are written out: incomplete rows skipped, text trimmed,
    /// URLs given a scheme
    pub fn exported_links(&self) -> Vec<LinkEntry> {
        self.links
            .iter()
            .filter(|link| link.is_complete())
            .map(|link| LinkEntry::new(link.label.trim(), normalize_url(&link.url)))
            .collect()
    }
}

/// Prefix `http://` unless the URL already names a known scheme
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if KNOWN_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}
