// File-backed cache store.
// Persists one JSON entry per user so feeds survive process restarts.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::paths;
use super::{ActivityCache, CacheEntry};

/// Cache store writing `users/<user>/events.json` under a root directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store under the platform cache directory, if one can be determined.
    pub fn in_default_location() -> Option<Self> {
        paths::cache_dir().map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a user's entry, if one has been written.
    pub fn read(&self, user: &str) -> Result<Option<CacheEntry>> {
        read_json(&paths::user_events_path(&self.root, user))
    }

    /// Write a user's entry, replacing any previous one.
    pub fn write(&self, user: &str, entry: &CacheEntry) -> Result<()> {
        write_json(&paths::user_events_path(&self.root, user), entry)
    }

    /// Delete a user's entry.
    pub fn invalidate(&self, user: &str) -> Result<()> {
        delete(&paths::user_events_path(&self.root, user))
    }
}

impl ActivityCache for FileCache {
    fn get(&self, user: &str) -> Option<CacheEntry> {
        let stale = match self.read(user) {
            Ok(Some(entry)) if !entry.is_past_expiry() => return Some(entry),
            Ok(Some(_)) => {
                tracing::debug!(user, "removing expired cache entry");
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(user, error = %err, "unreadable cache entry, treating as miss");
                true
            }
        };

        if stale {
            if let Err(err) = self.invalidate(user) {
                tracing::warn!(user, error = %err, "failed to remove cache entry");
            }
        }
        None
    }

    fn put(&self, user: &str, entry: CacheEntry) {
        if let Err(err) = self.write(user, &entry) {
            tracing::warn!(user, error = %err, "failed to write cache entry");
        }
    }
}

fn read_json(path: &Path) -> Result<Option<CacheEntry>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let entry: CacheEntry = serde_json::from_str(&contents)?;
    Ok(Some(entry))
}

fn write_json(path: &Path, entry: &CacheEntry) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entry)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Delete a cached file.
fn delete(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Commit, EventKind, RawEvent};
    use chrono::{TimeDelta, Utc};
    use std::time::Duration;
    use tempfile::TempDir;

    fn entry(user: &str) -> CacheEntry {
        let events = vec![
            RawEvent::new(
                user,
                "org/repo",
                EventKind::Push {
                    git_ref: "refs/heads/main".to_string(),
                    commits: vec![Commit {
                        sha: "0123456789".to_string(),
                        message: "msg".to_string(),
                    }],
                },
            ),
            RawEvent::new(user, "org/repo", EventKind::Watch),
        ];
        CacheEntry::new(user, events, Duration::from_secs(300))
    }

    #[test]
    fn test_write_and_read_entry() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path());

        let written = entry("alice");
        cache.put("alice", written.clone());

        let read = cache.get("alice").unwrap();
        assert_eq!(read, written);
        assert!(temp_dir.path().join("users/alice/events.json").exists());
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path());

        assert!(cache.read("nobody").unwrap().is_none());
        assert!(cache.get("nobody").is_none());
    }

    #[test]
    fn test_corrupt_file_is_a_miss() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path());

        let path = paths::user_events_path(temp_dir.path(), "alice");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        assert!(cache.read("alice").is_err());
        assert!(cache.get("alice").is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_expired_file_is_deleted_on_read() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path());

        let mut stale = entry("alice");
        stale.expires_at = Utc::now() - TimeDelta::seconds(1);
        cache.put("alice", stale);

        let path = paths::user_events_path(temp_dir.path(), "alice");
        assert!(path.exists());

        assert!(cache.get("alice").is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_put_replaces_entry() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path());

        cache.put("alice", entry("alice"));
        let replacement = CacheEntry::new("alice", Vec::new(), Duration::from_secs(60));
        cache.put("alice", replacement.clone());

        assert_eq!(cache.get("alice").unwrap(), replacement);
    }
}
