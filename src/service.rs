// Activity service.
// Fetches a user's feed through the cache gate and renders it as HTML.

use crate::cache::{ActivityCache, CacheGate};
use crate::config::{ActivityRequest, Config};
use crate::error::Result;
use crate::github::{FeedSource, FetchOutcome, GitHubClient};
use crate::render::{self, EventFormatter, Messages};

/// What a feed request produced, before it is turned into page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    /// The rendered `<ul>` list.
    Rendered(String),
    UserNotFound,
}

/// Renders public activity feeds for embedding in pages.
pub struct ActivityService<S, C> {
    source: S,
    gate: CacheGate<C>,
    formatter: EventFormatter,
}

impl<C: ActivityCache> ActivityService<GitHubClient, C> {
    /// Service talking to the API described by `config`.
    pub fn from_config(config: &Config, cache: C) -> Result<Self> {
        let client = GitHubClient::new(config)?;
        let formatter = EventFormatter::new(Messages::default())
            .with_diagnostics(config.diagnostics)
            .with_escaping(config.escape_html);
        Ok(Self::new(client, cache, formatter))
    }
}

impl<S: FeedSource, C: ActivityCache> ActivityService<S, C> {
    pub fn new(source: S, cache: C, formatter: EventFormatter) -> Self {
        Self {
            source,
            gate: CacheGate::new(cache),
            formatter,
        }
    }

    pub fn gate(&self) -> &CacheGate<C> {
        &self.gate
    }

    pub fn messages(&self) -> &Messages {
        self.formatter.messages()
    }

    /// Fetch (or reuse) `user`'s feed and render up to `limit` events.
    pub async fn try_get_activity(
        &self,
        user: &str,
        limit: usize,
        cache_timeout_secs: u64,
    ) -> Result<Activity> {
        let outcome = self
            .gate
            .get_or_fetch(user, cache_timeout_secs, || self.source.fetch(user))
            .await?;

        Ok(match outcome {
            FetchOutcome::NotFound => {
                tracing::debug!(user, "user not found");
                Activity::UserNotFound
            }
            FetchOutcome::Events(events) => {
                Activity::Rendered(render::render(&self.formatter, &events, limit))
            }
        })
    }

    /// Page text for `user`'s feed. Never fails: unknown users and fetch
    /// failures produce their messages instead of a list.
    pub async fn get_activity(&self, user: &str, limit: usize, cache_timeout_secs: u64) -> String {
        match self.try_get_activity(user, limit, cache_timeout_secs).await {
            Ok(Activity::Rendered(html)) => html,
            Ok(Activity::UserNotFound) => self.messages().user_not_found.clone(),
            Err(err) => {
                tracing::warn!(user, error = %err, "failed to fetch activity feed");
                self.messages().feed_unavailable.clone()
            }
        }
    }

    /// Page text for an embed request.
    pub async fn render_activity(&self, request: &ActivityRequest) -> String {
        self.get_activity(&request.user, request.limit, request.cache_timeout_secs)
            .await
    }
}
