// Event formatter.
// Maps one public event to an HTML fragment describing it.

use std::borrow::Cow;

use crate::github::{Commit, EventKind, RawEvent};

use super::messages::{Messages, fill};

const GITHUB_WEB: &str = "https://github.com";
const BRANCH_PREFIX: &str = "refs/heads/";
const SHORT_SHA_LEN: usize = 7;

/// Anchor to a user's profile.
pub fn user_link(login: &str) -> String {
    format!(
        r#"<a class="user" href="{}/{}">{}</a>"#,
        GITHUB_WEB, login, login
    )
}

/// Anchor to a repository, labeled with its `owner/name`.
pub fn repo_link(name: &str) -> String {
    format!(r#"<a class="repo" href="{}/{}">{}</a>"#, GITHUB_WEB, name, name)
}

/// Anchor to a branch tree. Only a leading `refs/heads/` is stripped.
pub fn branch_link(repo: &str, git_ref: &str) -> String {
    let branch = git_ref.strip_prefix(BRANCH_PREFIX).unwrap_or(git_ref);
    format!(
        r#"<a class="branch" href="{}/{}/tree/{}">{}</a>"#,
        GITHUB_WEB, repo, branch, branch
    )
}

/// Short SHA linked to the commit, followed by the raw message.
pub fn commit_line(repo: &str, sha: &str, message: &str) -> String {
    commit_span(repo, sha, &short_sha(sha), message)
}

fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}

fn commit_span(repo: &str, sha: &str, short: &str, message: &str) -> String {
    format!(
        r#"<span class="commit_message"><a class="sha" href="{}/{}/commit/{}">{}</a> {}</span>"#,
        GITHUB_WEB, repo, sha, short, message
    )
}

/// Anchor to a fork, using the absolute URL from the payload.
pub fn fork_link(full_name: &str, html_url: &str) -> String {
    format!(r#"<a class="repo" href="{}">{}</a>"#, html_url, full_name)
}

/// Escape text for use in HTML content and quoted attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Renders single events using a phrase table.
#[derive(Debug, Clone, Default)]
pub struct EventFormatter {
    messages: Messages,
    diagnostics: bool,
    escape: bool,
}

impl EventFormatter {
    pub fn new(messages: Messages) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// Show "Unrecognized activity type: X" instead of an empty fragment.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Escape interpolated user-controlled text. Off by default so output
    /// stays byte-compatible with existing embeds.
    pub fn with_escaping(mut self, enabled: bool) -> Self {
        self.escape = enabled;
        self
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    fn text<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        if self.escape {
            escape_html(raw)
        } else {
            Cow::Borrowed(raw)
        }
    }

    /// Describe one event. Unrecognized types yield an empty string unless
    /// diagnostics are enabled.
    pub fn format(&self, event: &RawEvent) -> String {
        let login = self.text(&event.actor.login);
        let repo = self.text(&event.repo.name);
        let user = user_link(&login);
        let repo_anchor = repo_link(&repo);

        match &event.kind {
            EventKind::Create => fill(
                &self.messages.created_repository,
                &[("user", user.as_str()), ("repo", repo_anchor.as_str())],
            ),
            EventKind::Push { git_ref, commits } => {
                let branch = branch_link(&repo, &self.text(git_ref));
                let mut html = fill(
                    &self.messages.pushed_to,
                    &[
                        ("user", user.as_str()),
                        ("branch", branch.as_str()),
                        ("repo", repo_anchor.as_str()),
                    ],
                );
                for commit in commits.iter().rev() {
                    html.push_str("<br>");
                    html.push_str(&self.commit(&repo, commit));
                }
                html
            }
            EventKind::Follow { target } => {
                let target = user_link(&self.text(&target.login));
                fill(
                    &self.messages.started_following,
                    &[("user", user.as_str()), ("target", target.as_str())],
                )
            }
            EventKind::Watch => fill(
                &self.messages.starred,
                &[("user", user.as_str()), ("repo", repo_anchor.as_str())],
            ),
            EventKind::Fork { forkee } => {
                let fork = fork_link(
                    &self.text(&forkee.full_name),
                    &self.text(&forkee.html_url),
                );
                fill(
                    &self.messages.forked,
                    &[
                        ("user", user.as_str()),
                        ("repo", repo_anchor.as_str()),
                        ("fork", fork.as_str()),
                    ],
                )
            }
            EventKind::Other { event_type, .. } => {
                if self.diagnostics {
                    format!(
                        "{}: {}",
                        self.messages.unrecognized_type,
                        self.text(event_type)
                    )
                } else {
                    String::new()
                }
            }
        }
    }

    fn commit(&self, repo: &str, commit: &Commit) -> String {
        // Shorten before escaping so an entity is never cut in half.
        let short = short_sha(&commit.sha);
        commit_span(
            repo,
            &self.text(&commit.sha),
            &self.text(&short),
            &self.text(&commit.message),
        )
    }
}
