//! HTTP transport for the promotions feed.
//!
//! The pipeline only needs a status code and a body, so transport sits
//! behind the [`Fetcher`] trait. [`HttpFetcher`] is the production
//! implementation over a blocking reqwest client; tests substitute their own.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config;
use crate::error::Result;

/// Raw outcome of a single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx status codes.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a GET request and hands back the raw status and body.
///
/// Implementations own any timeout or connection policy. A connection-level
/// failure is an `Err`; a non-2xx response is still an `Ok`.
pub trait Fetcher: Send {
    fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// [`Fetcher`] backed by a blocking reqwest client.
pub struct HttpFetcher {
    timeout: Duration,
    client: OnceLock<Client>,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: OnceLock::new(),
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(config::USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(config::MAX_REDIRECTS))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(config::DEFAULT_TIMEOUT)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let resp = self.client()?.get(url).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(FetchResponse { status, body })
    }
}
