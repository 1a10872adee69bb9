use log::info;
use serde::Serialize;

use crate::client::HttpClient;
use crate::config::MemeStreamConfig;
use crate::error::ConfigError;
use crate::fallback_source::FallbackSource;
use crate::primary_source::PrimarySource;
use crate::source::{FetchOutcome, SourceFetcher, SourceKind, SourceWarning};

/// Query used for the music meme ticker.
pub const TICKER_QUERY: &str = "music memes";

/// What a search hands back to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub urls: Vec<String>,
    /// Tier that produced `urls`; `None` when nothing was found.
    pub source: Option<SourceKind>,
    pub warnings: Vec<SourceWarning>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    fn record(&mut self, kind: SourceKind, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::Found(urls) => {
                self.urls = urls;
                self.source = Some(kind);
                true
            }
            FetchOutcome::NoMatches => false,
            FetchOutcome::Failed(warning) => {
                self.warnings.push(warning);
                false
            }
        }
    }
}

/// Primary-then-fallback search. Holds no per-call state.
pub struct MemeSearch<P, F> {
    primary: P,
    fallback: F,
    limit: usize,
    ticker_limit: usize,
}

impl MemeSearch<PrimarySource<HttpClient>, FallbackSource<HttpClient>> {
    /// Both tiers over real HTTP.
    pub fn from_config(config: &MemeStreamConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = HttpClient::new(config)?;
        Ok(MemeSearch::new(
            PrimarySource::new(client.clone(), config)?,
            FallbackSource::new(client, config)?,
            config.result_limit,
            config.ticker_limit,
        ))
    }
}

impl<P: SourceFetcher, F: SourceFetcher> MemeSearch<P, F> {
    pub fn new(primary: P, fallback: F, limit: usize, ticker_limit: usize) -> Self {
        MemeSearch {
            primary,
            fallback,
            limit,
            ticker_limit,
        }
    }

    /// Same search with a different result cap.
    pub fn search_with_limit(&self, query: &str, limit: usize) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        let query = query.trim();
        if query.is_empty() {
            return outcome;
        }

        if outcome.record(self.primary.kind(), self.primary.fetch(query, limit)) {
            return outcome;
        }

        info!("Trying {} as fallback for '{}'", self.fallback.kind().label(), query);
        outcome.record(self.fallback.kind(), self.fallback.fetch(query, limit));
        if outcome.is_empty() {
            info!("No memes found for '{}'", query);
        }
        outcome
    }

    pub fn search(&self, query: &str) -> SearchOutcome {
        self.search_with_limit(query, self.limit)
    }

    /// Music memes from the primary tier only.
    pub fn ticker(&self) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        outcome.record(
            self.primary.kind(),
            self.primary.fetch(TICKER_QUERY, self.ticker_limit),
        );
        outcome
    }
}
