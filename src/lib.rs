// github-activity: render a GitHub user's public activity feed as HTML.
// Fetches the public events feed, caches it per user, and formats each event.

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod render;
pub mod service;

pub use cache::{ActivityCache, CacheEntry, CacheGate, FileCache, MemoryCache, SingleSlotCache};
pub use config::{ActivityRequest, Config};
pub use error::{ActivityError, Result};
pub use github::{EventKind, FetchOutcome, GitHubClient, RawEvent};
pub use render::{EventFormatter, Messages};
pub use service::{Activity, ActivityService};
