// GitHub API HTTP client.
// Unauthenticated access to public endpoints with rate limit header parsing.

use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::config::Config;
use crate::error::{ActivityError, Result};

use super::types::RateLimit;

const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client for public, unauthenticated endpoints.
pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    /// Create a new client from the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ActivityError::Other(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(ActivityError::Api)?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request to the API. The status is left for the caller to inspect.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.api_base, endpoint);
        tracing::debug!(%url, "GET");
        self.client.get(&url).send().await.map_err(ActivityError::Api)
    }
}

/// Read rate limit information from response headers.
pub fn rate_limit_from(headers: &HeaderMap) -> RateLimit {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    };

    RateLimit {
        limit: read("x-ratelimit-limit").unwrap_or_default(),
        remaining: read("x-ratelimit-remaining").unwrap_or(u64::MAX),
        reset: read("x-ratelimit-reset").unwrap_or_default(),
    }
}

/// Format a rate limit reset timestamp for display.
pub fn reset_time(rate_limit: &RateLimit) -> String {
    chrono::DateTime::from_timestamp(rate_limit.reset as i64, 0)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
