//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made while resolving comics:
//! - Building the HTTP client with a user agent and explicit timeouts
//! - GET requests returning the page body as text
//! - Error classification into `FetchError`
//!
//! There is no retry: one request per call.

use crate::config::HttpConfig;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum number of redirects followed for one fetch
const MAX_REDIRECTS: usize = 10;

/// Source of page text for the resolver
///
/// The production implementation is [`HttpFetcher`]; tests substitute a stub
/// that serves canned pages and records the URLs it was asked for.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs one GET of `url` and returns the body text
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use xkcd_bot::config::HttpConfig;
/// use xkcd_bot::comic::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        // The random endpoint answers with a redirect to a concrete comic
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and classifies any failure
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | body text |
/// | any other status | `FetchError::Status` |
/// | timeout | `FetchError::Timeout` |
/// | connect / DNS / TLS / redirect limit | `FetchError::Network` |
/// | body read failure | `FetchError::Body` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult<String> {
    tracing::debug!("GET {}", url);

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                source: e,
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if response.url().as_str() != url {
        tracing::debug!("{} redirected to {}", url, response.url());
    }

    response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Body {
                url: url.to_string(),
                source: e,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&HttpConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_fetcher_new() {
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        assert!(format!("{:?}", fetcher).contains("HttpFetcher"));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        let config = HttpConfig {
            timeout_secs: 2,
            connect_timeout_secs: 1,
            ..HttpConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        // Port 9 (discard) on localhost is closed on any sane test machine
        let result = fetcher.fetch("http://127.0.0.1:9/").await;
        match result {
            Err(FetchError::Network { url, .. }) | Err(FetchError::Timeout { url }) => {
                assert_eq!(url, "http://127.0.0.1:9/");
            }
            other => panic!("expected a network failure, got {:?}", other),
        }
    }

    // Status and redirect handling are covered with wiremock in
    // tests/integration/resolve_tests.rs
}
