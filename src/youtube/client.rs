// YouTube Data API client — keyed JSON-over-HTTP, no SDK.
//
// Only read endpoints are used (channel video listing), so a plain reqwest
// wrapper with local serde response types is all the surface we need. The
// API key travels as a query parameter, per the Data API's simple-access
// scheme — no OAuth flow.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default YouTube Data API v3 endpoint.
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Thin HTTP client for YouTube Data API read operations.
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a client for the given base URL and API key.
    ///
    /// Pass a different base URL to point at a mock server in tests.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("lexiscope/0.1 (channel vocabulary analysis)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// GET a Data API endpoint and deserialize the JSON response.
    ///
    /// `endpoint` is the resource name (e.g. "search"); `params` are query
    /// string key-value pairs. The API key is appended automatically.
    pub async fn api_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        debug!(endpoint = endpoint, "Data API GET request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Data API request failed: {endpoint}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Data API {endpoint} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {endpoint} response"))
    }
}
