use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::url_normalizer::is_absolute_http;

/// Placeholder substituted with the URL-encoded query in search URL templates.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Host and keyword substrings that mark a URL as a meme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub hosts: Vec<String>,
    pub keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            hosts: ["imgur", "me.me", "imgflip", "9gag", "memedroid"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            keywords: ["meme", "funny", "humor", "caption", "template"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryConfig {
    /// Origin prepended to root-relative image sources.
    pub origin: String,
    pub search_url: String,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            origin: "https://imgur.com".to_string(),
            search_url: "https://imgur.com/search?q={query}".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub search_url: String,
    /// JSON key that precedes each escaped image URL in the result page.
    pub key_token: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.bing.com/images/search?q={query}&form=HDRSC2".to_string(),
            key_token: "murl".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemeStreamConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub result_limit: usize,
    pub ticker_limit: usize,
    /// Appended to every query before encoding.
    pub query_suffix: String,
    pub extensions: Vec<String>,
    pub classifier: ClassifierConfig,
    pub primary: PrimaryConfig,
    pub fallback: FallbackConfig,
}

impl Default for MemeStreamConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 30,
            result_limit: 50,
            ticker_limit: 15,
            query_suffix: " meme".to_string(),
            extensions: ["jpg", "jpeg", "png", "gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            classifier: ClassifierConfig::default(),
            primary: PrimaryConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl MemeStreamConfig {
    /// Load and validate a TOML config file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let cfg = Self::from_toml(&data)?;
        info!("Loaded config from {:?}", path);
        Ok(cfg)
    }

    pub fn from_toml(data: &str) -> Result<Self, ConfigError> {
        let cfg: MemeStreamConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.result_limit == 0 {
            return Err(ConfigError::Invalid("result_limit must be at least 1".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".into()));
        }
        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(ConfigError::Invalid("extensions must list at least one extension".into()));
        }
        for (name, template) in [
            ("primary.search_url", &self.primary.search_url),
            ("fallback.search_url", &self.fallback.search_url),
        ] {
            if !template.contains(QUERY_PLACEHOLDER) {
                return Err(ConfigError::Invalid(format!(
                    "{} must contain {}",
                    name, QUERY_PLACEHOLDER
                )));
            }
        }
        if self.fallback.key_token.is_empty() {
            return Err(ConfigError::Invalid("fallback.key_token must not be empty".into()));
        }
        if !is_absolute_http(&self.primary.origin) {
            return Err(ConfigError::Invalid(format!(
                "primary.origin is not an absolute http(s) URL: {}",
                self.primary.origin
            )));
        }
        Ok(())
    }
}
