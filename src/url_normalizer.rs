use url::Url;

use crate::error::ConfigError;

/// Turns raw `src` attribute values into absolute URLs for one source site.
#[derive(Debug, Clone)]
pub struct UrlNormalizer {
    origin: String,
}

impl UrlNormalizer {
    /// `origin` must be an absolute http(s) URL; only its scheme, host and port are kept.
    pub fn new(origin: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(origin)
            .map_err(|e| ConfigError::Invalid(format!("bad origin '{}': {}", origin, e)))?;
        if parsed.host().is_none() {
            return Err(ConfigError::Invalid(format!("origin has no host: {}", origin)));
        }
        Ok(UrlNormalizer {
            origin: parsed.origin().ascii_serialization(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns `None` when the value is empty and so not usable.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let src = raw.trim();
        if src.is_empty() {
            return None;
        }
        if src.starts_with("//") {
            return Some(format!("https:{}", src));
        }
        if src.starts_with('/') {
            return Some(format!("{}{}", self.origin, src));
        }
        Some(src.to_string())
    }
}

/// True for an absolute http(s) URL with a host.
pub fn is_absolute_http(url: &str) -> bool {
    match Url::parse(url) {
        Ok(u) => (u.scheme() == "http" || u.scheme() == "https") && u.host().is_some(),
        Err(_) => false,
    }
}
