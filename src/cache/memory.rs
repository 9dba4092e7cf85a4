// In-memory cache stores.
// A per-user map, plus the single shared slot embedding hosts used historically.

use dashmap::DashMap;
use parking_lot::Mutex;

use super::{ActivityCache, CacheEntry};

/// One entry per user. Entries past their expiry are dropped on every write.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry past its expiry.
    pub fn prune(&self) {
        self.entries.retain(|_, entry| !entry.is_past_expiry());
    }
}

impl ActivityCache for MemoryCache {
    fn get(&self, user: &str) -> Option<CacheEntry> {
        self.entries.remove_if(user, |_, entry| entry.is_past_expiry());
        self.entries.get(user).map(|entry| entry.value().clone())
    }

    fn put(&self, user: &str, entry: CacheEntry) {
        self.prune();
        self.entries.insert(user.to_string(), entry);
    }
}

/// A single process-wide slot, last writer wins.
///
/// Requests for different users evict each other, so every alternation
/// between two users costs a fetch. Prefer [`MemoryCache`] unless output must
/// match a host that shares one slot.
#[derive(Debug, Default)]
pub struct SingleSlotCache {
    slot: Mutex<Option<CacheEntry>>,
}

impl SingleSlotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// User whose feed currently occupies the slot.
    pub fn occupant(&self) -> Option<String> {
        self.slot.lock().as_ref().map(|entry| entry.user.clone())
    }
}

impl ActivityCache for SingleSlotCache {
    fn get(&self, _user: &str) -> Option<CacheEntry> {
        self.slot.lock().clone()
    }

    fn put(&self, _user: &str, entry: CacheEntry) {
        *self.slot.lock() = Some(entry);
    }
}
