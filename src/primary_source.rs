use std::ops::ControlFlow;

use log::{debug, info};

use crate::classifier::MemeClassifier;
use crate::client::PageClient;
use crate::config::MemeStreamConfig;
use crate::error::ConfigError;
use crate::extractor::{scan_img_sources, ExtensionFilter};
use crate::source::{build_search_url, FetchOutcome, SourceFetcher, SourceKind};
use crate::url_normalizer::{is_absolute_http, UrlNormalizer};

/// Scrapes `<img>` tags from the Imgur search page.
pub struct PrimarySource<C> {
    client: C,
    search_url: String,
    query_suffix: String,
    normalizer: UrlNormalizer,
    extensions: ExtensionFilter,
    classifier: MemeClassifier,
}

impl<C: PageClient> PrimarySource<C> {
    pub fn new(client: C, config: &MemeStreamConfig) -> Result<Self, ConfigError> {
        Ok(PrimarySource {
            client,
            search_url: config.primary.search_url.clone(),
            query_suffix: config.query_suffix.clone(),
            normalizer: UrlNormalizer::new(&config.primary.origin)?,
            extensions: ExtensionFilter::new(&config.extensions),
            classifier: MemeClassifier::new(&config.classifier),
        })
    }

    /// Accepted URLs from `html` in document order, stopping once `limit` are collected.
    pub fn collect_memes(&self, html: &str, limit: usize) -> Vec<String> {
        let mut image_urls = Vec::new();
        if limit == 0 {
            return image_urls;
        }
        scan_img_sources(html, |src| {
            let url = match self.normalizer.normalize(src) {
                Some(u) if is_absolute_http(&u) => u,
                _ => return ControlFlow::Continue(()),
            };
            if !self.extensions.matches(&url) || !self.classifier.is_meme(&url) {
                debug!("Skipping image: {}", url);
                return ControlFlow::Continue(());
            }
            image_urls.push(url);
            if image_urls.len() >= limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        image_urls
    }
}

impl<C: PageClient> SourceFetcher for PrimarySource<C> {
    fn kind(&self) -> SourceKind {
        SourceKind::Primary
    }

    fn fetch(&self, query: &str, limit: usize) -> FetchOutcome {
        let url = build_search_url(&self.search_url, query, &self.query_suffix);
        info!("Searching Imgur: {}", url);

        match self.client.get_page(&url) {
            Ok(html) => {
                let urls = self.collect_memes(&html, limit);
                info!("Imgur returned {} meme images for '{}'", urls.len(), query);
                FetchOutcome::from_urls(urls)
            }
            Err(e) => FetchOutcome::failed(self.kind(), &e),
        }
    }
}
