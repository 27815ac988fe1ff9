//! Blocking HTTP access for every remote source
//!
//! Sources talk to the network through [`PageFetcher`] so they can be
//! exercised against canned pages.

use crate::config::SourcesConfig;
use crate::{Result, WhenToGoError};
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Fetches a URL and returns the body as text. Non-success statuses are errors.
pub trait PageFetcher: Send + Sync {
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// `reqwest` backed fetcher sending a browser-like `User-Agent`
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new client from the source settings
    pub fn new(config: &SourcesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WhenToGoError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpClient {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| WhenToGoError::fetch(url, e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Request returned status {}", status);
            return Err(WhenToGoError::fetch(url, format!("HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| WhenToGoError::fetch(url, e.without_url().to_string()))?;

        debug!(
            "Fetched {} bytes in {:.3}s",
            body.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves canned bodies by exact URL and counts every request
    #[derive(Default)]
    pub struct FakeFetcher {
        pages: HashMap<String, String>,
        calls: AtomicUsize,
        requested: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl PageFetcher for FakeFetcher {
        fn fetch_text(&self, url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| WhenToGoError::fetch(url, "HTTP 404 Not Found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::FakeFetcher;
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new(&SourcesConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_fake_fetcher_counts_calls() {
        let fetcher = FakeFetcher::new().with_page("http://a/", "body");
        assert_eq!(fetcher.fetch_text("http://a/").unwrap(), "body");
        assert!(fetcher.fetch_text("http://b/").is_err());
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(fetcher.requested(), vec!["http://a/", "http://b/"]);
    }
}
