use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::config::MemeStreamConfig;
use crate::error::{ConfigError, FetchError};

/// Fetches one page body. Implementations issue a single request with no retry.
pub trait PageClient {
    fn get_page(&self, url: &str) -> Result<String, FetchError>;
}

impl<C: PageClient + ?Sized> PageClient for &C {
    fn get_page(&self, url: &str) -> Result<String, FetchError> {
        (**self).get_page(url)
    }
}

/// Blocking reqwest client that identifies itself as a browser.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &MemeStreamConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        let ua = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ConfigError::Invalid(format!("bad user_agent: {}", e)))?;
        headers.insert(USER_AGENT, ua);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {}", e)))?;

        Ok(HttpClient { client })
    }
}

impl PageClient for HttpClient {
    fn get_page(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        debug!("GET {} -> {}", url, status);
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        resp.text().map_err(|e| FetchError::Body(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use std::cell::RefCell;

    use super::*;

    /// Canned response plus a log of requested URLs.
    pub struct StubClient {
        response: Result<String, FetchError>,
        pub requests: RefCell<Vec<String>>,
    }

    impl StubClient {
        pub fn body(body: &str) -> Self {
            StubClient {
                response: Ok(body.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn failing(err: FetchError) -> Self {
            StubClient {
                response: Err(err),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl PageClient for StubClient {
        fn get_page(&self, url: &str) -> Result<String, FetchError> {
            self.requests.borrow_mut().push(url.to_string());
            self.response.clone()
        }
    }
}
