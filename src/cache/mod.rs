// Cache module for fetched activity feeds.
// Defines the cache abstraction, its entry type, and the stores behind it.

pub mod gate;
pub mod memory;
pub mod paths;
pub mod store;

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::github::RawEvent;

pub use gate::CacheGate;
pub use memory::{MemoryCache, SingleSlotCache};
pub use store::FileCache;

/// A user's feed as it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// User the feed belongs to.
    pub user: String,
    /// Events in the order the API delivered them.
    pub events: Vec<RawEvent>,
    /// When the feed was fetched.
    pub fetched_at: DateTime<Utc>,
    /// When the entry stops being served.
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry fetched now that lives for `ttl`.
    pub fn new(user: impl Into<String>, events: Vec<RawEvent>, ttl: Duration) -> Self {
        let fetched_at = Utc::now();
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| fetched_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            user: user.into(),
            events,
            fetched_at,
            expires_at,
        }
    }

    /// Check if the entry has outlived the lifetime it was stored with.
    pub fn is_past_expiry(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if this entry is older than `ttl` or past its own expiry.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        if self.is_past_expiry() {
            return true;
        }

        let elapsed = Utc::now()
            .signed_duration_since(self.fetched_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed > ttl
    }

    /// Check if this entry may be served for `user` under `ttl`.
    pub fn is_valid_for(&self, user: &str, ttl: Duration) -> bool {
        self.user == user && !self.is_expired(ttl)
    }
}

/// Storage for fetched feeds, keyed by user.
///
/// Stores may return an entry for another user (the single-slot store does);
/// callers check [`CacheEntry::is_valid_for`] before serving it.
pub trait ActivityCache: Send + Sync {
    fn get(&self, user: &str) -> Option<CacheEntry>;
    fn put(&self, user: &str, entry: CacheEntry);
}

impl<T: ActivityCache + ?Sized> ActivityCache for Box<T> {
    fn get(&self, user: &str) -> Option<CacheEntry> {
        (**self).get(user)
    }

    fn put(&self, user: &str, entry: CacheEntry) {
        (**self).put(user, entry)
    }
}
