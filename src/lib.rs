pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fallback_source;
pub mod logger;
pub mod primary_source;
pub mod search;
pub mod session;
pub mod source;
pub mod trending;
pub mod url_normalizer;

// Exporting types for convenience
pub use classifier::MemeClassifier;
pub use client::{HttpClient, PageClient};
pub use config::MemeStreamConfig;
pub use error::{ConfigError, FetchError};
pub use fallback_source::FallbackSource;
pub use primary_source::PrimarySource;
pub use search::{MemeSearch, SearchOutcome};
pub use session::SearchSession;
pub use source::{FetchOutcome, SourceFetcher, SourceKind, SourceWarning};
pub use url_normalizer::UrlNormalizer;

/// Search over real HTTP for both tiers.
pub type HttpMemeSearch = MemeSearch<PrimarySource<HttpClient>, FallbackSource<HttpClient>>;
