// Cache gate.
// Decides whether a feed request is served from cache or fetched.

use std::future::Future;
use std::time::Duration;

use crate::error::Result;
use crate::github::FetchOutcome;

use super::{ActivityCache, CacheEntry};

/// Wraps feed fetches with a time-bound cache keyed by user.
#[derive(Debug, Default)]
pub struct CacheGate<C> {
    cache: C,
}

impl<C: ActivityCache> CacheGate<C> {
    pub fn new(cache: C) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Serve `user`'s feed from cache if an entry younger than
    /// `cache_timeout_secs` exists, otherwise call `fetch`.
    ///
    /// A timeout of zero bypasses the cache completely. Only fetched events
    /// are stored; not-found results and errors never are.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        user: &str,
        cache_timeout_secs: u64,
        fetch: F,
    ) -> Result<FetchOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<FetchOutcome>>,
    {
        if cache_timeout_secs == 0 {
            return fetch().await;
        }

        let ttl = Duration::from_secs(cache_timeout_secs);

        if let Some(entry) = self.cache.get(user) {
            if entry.is_valid_for(user, ttl) {
                tracing::debug!(user, events = entry.events.len(), "cache hit");
                return Ok(FetchOutcome::Events(entry.events));
            }
            tracing::debug!(
                user,
                cached_user = %entry.user,
                "cache entry stale or for another user"
            );
        } else {
            tracing::debug!(user, "cache miss");
        }

        let outcome = fetch().await?;
        if let FetchOutcome::Events(events) = &outcome {
            self.cache.put(user, CacheEntry::new(user, events.clone(), ttl));
        }
        Ok(outcome)
    }
}
