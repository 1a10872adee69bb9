use log::info;

use crate::classifier::MemeClassifier;
use crate::client::PageClient;
use crate::config::MemeStreamConfig;
use crate::error::ConfigError;
use crate::extractor::{EscapedUrlPattern, ExtensionFilter};
use crate::source::{build_search_url, FetchOutcome, SourceFetcher, SourceKind};

/// Pulls image URLs out of the JSON blobs embedded in the Bing Images result page.
pub struct FallbackSource<C> {
    client: C,
    search_url: String,
    query_suffix: String,
    pattern: EscapedUrlPattern,
    classifier: MemeClassifier,
}

impl<C: PageClient> FallbackSource<C> {
    pub fn new(client: C, config: &MemeStreamConfig) -> Result<Self, ConfigError> {
        let extensions = ExtensionFilter::new(&config.extensions);
        Ok(FallbackSource {
            client,
            search_url: config.fallback.search_url.clone(),
            query_suffix: config.query_suffix.clone(),
            pattern: EscapedUrlPattern::new(&config.fallback.key_token, &extensions)?,
            classifier: MemeClassifier::new(&config.classifier),
        })
    }

    pub fn collect_memes(&self, body: &str, limit: usize) -> Vec<String> {
        self.pattern
            .find_all(body)
            .into_iter()
            .filter(|url| self.classifier.is_meme(url))
            .take(limit)
            .collect()
    }
}

impl<C: PageClient> SourceFetcher for FallbackSource<C> {
    fn kind(&self) -> SourceKind {
        SourceKind::Fallback
    }

    fn fetch(&self, query: &str, limit: usize) -> FetchOutcome {
        let url = build_search_url(&self.search_url, query, &self.query_suffix);
        info!("Searching Bing: {}", url);

        match self.client.get_page(&url) {
            Ok(body) => {
                let urls = self.collect_memes(&body, limit);
                info!("Bing returned {} meme images for '{}'", urls.len(), query);
                FetchOutcome::from_urls(urls)
            }
            Err(e) => FetchOutcome::failed(self.kind(), &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::stub::StubClient;
    use crate::error::FetchError;

    #[test]
    fn extracts_classified_urls() {
        let body = r#"
            <a m="{&quot;murl&quot;:&quot;https://x.com/funny.png&quot;}"></a>
            <a m="{&quot;murl&quot;:&quot;https://x.com/cat.png&quot;}"></a>
            <a m="{&quot;murl&quot;:&quot;https://i.imgflip.com/4t0m5.jpg&quot;}"></a>
        "#;
        let client = StubClient::body(body);
        let source = FallbackSource::new(&client, &MemeStreamConfig::default()).unwrap();

        assert_eq!(
            source.fetch("cat", 50).into_urls(),
            vec!["https://x.com/funny.png", "https://i.imgflip.com/4t0m5.jpg"]
        );
        assert_eq!(
            client.requests.borrow().as_slice(),
            ["https://www.bing.com/images/search?q=cat%20meme&form=HDRSC2"]
        );
    }

    #[test]
    fn truncates_to_limit() {
        let body: String = (0..120)
            .map(|i| format!(r#"murl":"https://x.com/meme{}.jpg" "#, i))
            .collect();
        let client = StubClient::body(&body);
        let source = FallbackSource::new(&client, &MemeStreamConfig::default()).unwrap();

        let urls = source.fetch("x", 40).into_urls();
        assert_eq!(urls.len(), 40);
        assert_eq!(urls[39], "https://x.com/meme39.jpg");
    }

    #[test]
    fn status_failure_becomes_warning() {
        let client = StubClient::failing(FetchError::Status(503));
        let source = FallbackSource::new(&client, &MemeStreamConfig::default()).unwrap();

        let outcome = source.fetch("x", 50);
        assert_eq!(outcome.warning().unwrap().message, "Bing error: HTTP 503");
    }

    #[test]
    fn unexpected_markup_is_no_matches() {
        let client = StubClient::body("<html>layout changed</html>");
        let source = FallbackSource::new(&client, &MemeStreamConfig::default()).unwrap();
        assert_eq!(source.fetch("x", 50), FetchOutcome::NoMatches);
    }
}
