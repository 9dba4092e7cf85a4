// Cache path utilities.
// Constructs filesystem paths for per-user feed files.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/github-activity on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "github-activity").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to a user's directory under `root`.
pub fn user_dir(root: &Path, user: &str) -> PathBuf {
    root.join("users").join(sanitize_name(user))
}

/// Path to a user's cached events file under `root`.
pub fn user_events_path(root: &Path, user: &str) -> PathBuf {
    user_dir(root, user).join("events.json")
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => format!("_{}", cleaned),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("eruonen"), "eruonen");
        assert_eq!(sanitize_name("../etc"), ".._etc");
        assert_eq!(sanitize_name(".."), "_..");
        assert_eq!(sanitize_name(""), "_");
    }

    #[test]
    fn test_user_events_path() {
        let path = user_events_path(Path::new("/tmp/cache"), "alice");
        assert!(path.ends_with("users/alice/events.json"));
    }
}
