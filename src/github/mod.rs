// GitHub API module.
// Provides the client and event types for the public events feed.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::FeedSource;
pub use types::*;
