use std::ops::ControlFlow;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::ConfigError;

/// Calls `visit` with the `src` of each `<img>` element in document order until it breaks.
/// Elements without `src` are skipped.
pub fn scan_img_sources<F>(html: &str, mut visit: F)
where
    F: FnMut(&str) -> ControlFlow<()>,
{
    let document = Html::parse_document(html);
    let selector = match Selector::parse("img") {
        Ok(s) => s,
        Err(_) => return,
    };
    for element in document.select(&selector) {
        if let Some(src) = element.value().attr("src") {
            if visit(src).is_break() {
                return;
            }
        }
    }
}

/// Allow-list of image file extensions, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    pub fn new(extensions: &[String]) -> Self {
        let suffixes = extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .map(|e| format!(".{}", e))
            .collect();
        ExtensionFilter { suffixes }
    }

    pub fn matches(&self, url: &str) -> bool {
        let url_lower = url.to_ascii_lowercase();
        self.suffixes.iter().any(|s| url_lower.ends_with(s.as_str()))
    }

    fn alternation(&self) -> String {
        self.suffixes
            .iter()
            .map(|s| regex::escape(&s[1..]))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Finds image URLs embedded as JSON values inside a result page, e.g.
/// `murl&quot;:&quot;https://x.com/a.png&quot;` or `murl":"https://x.com/a.png"`.
#[derive(Debug, Clone)]
pub struct EscapedUrlPattern {
    regex: Regex,
}

impl EscapedUrlPattern {
    pub fn new(key_token: &str, extensions: &ExtensionFilter) -> Result<Self, ConfigError> {
        let alternation = extensions.alternation();
        if alternation.is_empty() {
            return Err(ConfigError::Invalid("no image extensions configured".into()));
        }
        let quote = r#"(?:&quot;|")"#;
        // Entities other than &amp; end the URL, so a match never runs into the next field.
        let url_char = r#"(?:[^"&\s<>]|&amp;)"#;
        let pattern = format!(
            r#"{key}{q}:{q}(https?://{c}+?\.(?i:{ext})){q}"#,
            c = url_char,
            key = regex::escape(key_token),
            q = quote,
            ext = alternation,
        );
        let regex = Regex::new(&pattern)
            .map_err(|e| ConfigError::Invalid(format!("bad url pattern: {}", e)))?;
        Ok(EscapedUrlPattern { regex })
    }

    /// All matches in a single pass over `body`, in order of appearance.
    pub fn find_all(&self, body: &str) -> Vec<String> {
        self.regex
            .captures_iter(body)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().replace("&amp;", "&"))
            .collect()
    }
}
