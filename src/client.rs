//! HTTP client for the Radio Browser directory API
//!
//! This module wraps the directory's search-by-name endpoint. The client
//! is stateless and performs exactly one request per call: no retries,
//! no backoff. Caching is handled by higher layers (see [`crate::cache`]).
//!
//! # Example
//!
//! ```no_run
//! use radiobrowser_skill::RadioBrowserClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RadioBrowserClient::new().await?;
//!     let stations = client.search_by_name("jazz", true).await?;
//!     println!("Found {} stations", stations.len());
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::Station;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Default Radio Browser API base URL (JSON flavor)
pub const DEFAULT_API_BASE: &str = "https://de1.api.radio-browser.info/json";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
///
/// The Radio Browser project asks clients to identify themselves.
pub const DEFAULT_USER_AGENT: &str = "radiobrowser-skill/0.1.0";

/// Radio Browser HTTP client
///
/// Provides name-substring station search against the community radio
/// directory. One blocking-await network call per invocation; transport
/// failures surface as [`Error::Http`].
#[derive(Debug, Clone)]
pub struct RadioBrowserClient {
    pub(crate) client: Client,
    api_base: String,
    timeout: Duration,
}

impl RadioBrowserClient {
    /// Create a new client with default settings
    pub async fn new() -> Result<Self> {
        Self::builder().build().await
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Get the API base URL
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Search stations by name substring
    ///
    /// # Arguments
    ///
    /// * `name` - Name substring to match; an empty string matches
    ///   broad/generic results and is valid
    /// * `hide_broken` - Ask the directory to exclude stations that
    ///   failed its own connectivity checks
    ///
    /// # Returns
    ///
    /// The raw list of matching stations, possibly empty. Order is the
    /// directory's own ranking and is preserved.
    pub async fn search_by_name(&self, name: &str, hide_broken: bool) -> Result<Vec<Station>> {
        let mut url = Url::parse(&format!("{}/stations/search", self.api_base))?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("hidebroken", if hide_broken { "true" } else { "false" });

        tracing::debug!("Searching directory: {}", url);

        let response = self.client.get(url).timeout(self.timeout).send().await?;

        if !response.status().is_success() {
            return Err(Error::ApiError(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        let stations: Vec<Station> = response.json().await?;

        tracing::debug!("Directory returned {} stations for '{}'", stations.len(), name);

        Ok(stations)
    }
}

/// Builder for configuring a RadioBrowserClient
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    api_base: String,
    timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the API base URL (e.g. a regional mirror, or a mock server)
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the client
    pub async fn build(self) -> Result<RadioBrowserClient> {
        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout);

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::other(format!("Invalid proxy: {}", e)))?;
                builder = builder.proxy(proxy);
            }

            builder.build()?
        };

        Ok(RadioBrowserClient {
            client,
            api_base: self.api_base,
            timeout: self.timeout,
        })
    }
}
