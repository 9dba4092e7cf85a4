// Runtime configuration for the activity pipeline.
// Defaults target the public GitHub API; environment variables override them.

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "github-activity";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user rendered when the caller does not name one.
pub const DEFAULT_USER: &str = "eruonen";
/// Default number of list items.
pub const DEFAULT_LIMIT: usize = 5;
/// Default cache lifetime in seconds.
pub const DEFAULT_CACHE_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash.
    pub api_base: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    /// Show a diagnostic line for unrecognized event types.
    pub diagnostics: bool,
    /// HTML-escape interpolated logins, repo names and commit messages.
    pub escape_html: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            diagnostics: false,
            escape_html: false,
        }
    }
}

impl Config {
    /// Build a config from `GITHUB_ACTIVITY_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = lookup("GITHUB_ACTIVITY_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(agent) = lookup("GITHUB_ACTIVITY_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(secs) = lookup("GITHUB_ACTIVITY_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = lookup("GITHUB_ACTIVITY_DEBUG") {
            config.diagnostics = parse_flag(&flag);
        }
        if let Some(flag) = lookup("GITHUB_ACTIVITY_ESCAPE_HTML") {
            config.escape_html = parse_flag(&flag);
        }

        config
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parameters an embedding page passes to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRequest {
    pub user: String,
    pub limit: usize,
    /// Zero disables caching for this request.
    pub cache_timeout_secs: u64,
}

impl Default for ActivityRequest {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            limit: DEFAULT_LIMIT,
            cache_timeout_secs: DEFAULT_CACHE_TIMEOUT_SECS,
        }
    }
}
