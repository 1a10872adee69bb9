use crate::config::ClassifierConfig;

/// String heuristic deciding whether an image URL is likely a meme.
#[derive(Debug, Clone)]
pub struct MemeClassifier {
    hosts: Vec<String>,
    keywords: Vec<String>,
}

impl MemeClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        // Stored lower-cased so matching only has to fold the URL.
        let fold = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        };
        MemeClassifier {
            hosts: fold(&config.hosts),
            keywords: fold(&config.keywords),
        }
    }

    pub fn is_meme(&self, url: &str) -> bool {
        let url_lower = url.to_lowercase();
        self.hosts.iter().any(|h| url_lower.contains(h.as_str()))
            || self.keywords.iter().any(|k| url_lower.contains(k.as_str()))
    }
}

impl Default for MemeClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}
