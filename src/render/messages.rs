// Localizable phrases used in rendered output.
// Templates use named `{placeholder}` slots filled in a single pass.

/// Phrase table. The defaults are the English strings embedding pages expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Slots: `{user}`, `{repo}`.
    pub created_repository: String,
    /// Slots: `{user}`, `{branch}`, `{repo}`.
    pub pushed_to: String,
    /// Slots: `{user}`, `{target}`.
    pub started_following: String,
    /// Slots: `{user}`, `{repo}`.
    pub starred: String,
    /// Slots: `{user}`, `{repo}`, `{fork}`.
    pub forked: String,
    /// Prefix of the diagnostic line for unrecognized event types.
    pub unrecognized_type: String,
    pub user_not_found: String,
    pub feed_unavailable: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            created_repository: "{user} created repository {repo}".to_string(),
            pushed_to: "{user} pushed to {branch} at {repo}".to_string(),
            started_following: "{user} started following {target}".to_string(),
            starred: "{user} starred {repo}".to_string(),
            forked: "{user} forked {repo} to {fork}".to_string(),
            unrecognized_type: "Unrecognized activity type".to_string(),
            user_not_found: "User not found.".to_string(),
            feed_unavailable: "Activity feed unavailable.".to_string(),
        }
    }
}

/// Substitute `{name}` slots in `template`.
///
/// Substituted values are copied verbatim and never rescanned, so a value
/// containing `{repo}` stays as written. Unknown slots are left in place.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let replaced = after.find('}').and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });

        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
