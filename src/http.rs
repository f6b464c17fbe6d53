//! # HTTP Fetcher
//!
//! The reqwest-backed [`Fetcher`] implementation, the only module in the
//! crate that performs real network I/O.

use std::time::Duration;

use anyhow::{bail, Result};
use url::Url;

use crate::provider::Fetcher;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches documents over HTTPS using a shared [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default 30 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with an explicit request timeout. The timeout
    /// bounds the whole request, connect through body download.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let client =
            reqwest::Client::builder().default_headers(headers).timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let url = Url::parse(url)?;
        let res = self.client.get(url).send().await?;
        if !res.status().is_success() {
            tracing::error!("fetch returned {}", res.status());
            bail!("unexpected response status: {}", res.status());
        }
        Ok(res.text().await?)
    }
}
