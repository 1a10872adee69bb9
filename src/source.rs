use std::fmt;

use log::warn;
use serde::Serialize;

use crate::config::QUERY_PLACEHOLDER;
use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Primary,
    Fallback,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Primary => "Imgur",
            SourceKind::Fallback => "Bing",
        }
    }
}

/// Advisory message for the presentation layer when a source request fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceWarning {
    pub source: SourceKind,
    pub message: String,
}

impl SourceWarning {
    pub fn from_error(source: SourceKind, err: &FetchError) -> Self {
        SourceWarning {
            source,
            message: format!("{} error: {}", source.label(), err),
        }
    }
}

impl fmt::Display for SourceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of one fetch: a non-empty list, an empty list, or an empty list with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(Vec<String>),
    NoMatches,
    Failed(SourceWarning),
}

impl FetchOutcome {
    pub fn from_urls(urls: Vec<String>) -> Self {
        if urls.is_empty() {
            FetchOutcome::NoMatches
        } else {
            FetchOutcome::Found(urls)
        }
    }

    /// Logs the failure and wraps it as a warning.
    pub fn failed(source: SourceKind, err: &FetchError) -> Self {
        let warning = SourceWarning::from_error(source, err);
        warn!("{}", warning);
        FetchOutcome::Failed(warning)
    }

    pub fn is_empty(&self) -> bool {
        !matches!(self, FetchOutcome::Found(_))
    }

    pub fn warning(&self) -> Option<&SourceWarning> {
        match self {
            FetchOutcome::Failed(w) => Some(w),
            _ => None,
        }
    }

    pub fn into_urls(self) -> Vec<String> {
        match self {
            FetchOutcome::Found(urls) => urls,
            _ => Vec::new(),
        }
    }
}

/// One scraped search site.
pub trait SourceFetcher {
    fn kind(&self) -> SourceKind;

    /// At most `limit` classified image URLs for `query`. Never fails; see [`FetchOutcome`].
    fn fetch(&self, query: &str, limit: usize) -> FetchOutcome;
}

/// Fills `{query}` in `template` with the URL-encoded `query + suffix`.
pub fn build_search_url(template: &str, query: &str, suffix: &str) -> String {
    let full = format!("{}{}", query, suffix);
    template.replace(QUERY_PLACEHOLDER, &urlencoding::encode(&full))
}
