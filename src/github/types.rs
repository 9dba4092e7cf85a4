// GitHub public events types.
// Decodes the events feed into a sum type over the recognized event kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User who performed an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub login: String,
}

/// Repository an event happened in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    #[serde(default)]
    pub name: String,
}

/// Single commit inside a push payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub message: String,
}

/// Repository created by a fork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forkee {
    pub full_name: String,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(rename = "ref")]
    git_ref: String,
    /// Decoded per item, so one odd commit does not hide the push.
    #[serde(default)]
    commits: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct FollowPayload {
    target: Actor,
}

#[derive(Debug, Deserialize)]
struct ForkPayload {
    forkee: Forkee,
}

/// Event kinds the formatter knows how to describe.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Create,
    Push { git_ref: String, commits: Vec<Commit> },
    Follow { target: Actor },
    Watch,
    Fork { forkee: Forkee },
    /// Unrecognized type, or a recognized type whose payload did not decode.
    Other { event_type: String, payload: Value },
}

impl EventKind {
    /// The wire `type` tag for this kind.
    pub fn type_name(&self) -> &str {
        match self {
            EventKind::Create => "CreateEvent",
            EventKind::Push { .. } => "PushEvent",
            EventKind::Follow { .. } => "FollowEvent",
            EventKind::Watch => "WatchEvent",
            EventKind::Fork { .. } => "ForkEvent",
            EventKind::Other { event_type, .. } => event_type,
        }
    }

    fn decode(event_type: String, payload: Value) -> Self {
        let decoded = match event_type.as_str() {
            "CreateEvent" => Some(EventKind::Create),
            "WatchEvent" => Some(EventKind::Watch),
            "PushEvent" => serde_json::from_value::<PushPayload>(payload.clone())
                .ok()
                .map(|p| EventKind::Push {
                    git_ref: p.git_ref,
                    commits: p
                        .commits
                        .into_iter()
                        .filter_map(|commit| serde_json::from_value(commit).ok())
                        .collect(),
                }),
            "FollowEvent" => serde_json::from_value::<FollowPayload>(payload.clone())
                .ok()
                .map(|p| EventKind::Follow { target: p.target }),
            "ForkEvent" => serde_json::from_value::<ForkPayload>(payload.clone())
                .ok()
                .map(|p| EventKind::Fork { forkee: p.forkee }),
            _ => None,
        };

        decoded.unwrap_or(EventKind::Other {
            event_type,
            payload,
        })
    }

    fn encode(&self) -> Value {
        match self {
            EventKind::Create | EventKind::Watch => Value::Object(Default::default()),
            EventKind::Push { git_ref, commits } => serde_json::json!({
                "ref": git_ref,
                "commits": commits,
            }),
            EventKind::Follow { target } => serde_json::json!({ "target": target }),
            EventKind::Fork { forkee } => serde_json::json!({ "forkee": forkee }),
            EventKind::Other { payload, .. } => payload.clone(),
        }
    }
}

/// One entry of the public events feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireEvent", into = "WireEvent")]
pub struct RawEvent {
    pub id: Option<String>,
    pub actor: Actor,
    pub repo: RepoRef,
    pub created_at: Option<DateTime<Utc>>,
    pub kind: EventKind,
}

impl RawEvent {
    pub fn new(actor: &str, repo: &str, kind: EventKind) -> Self {
        Self {
            id: None,
            actor: Actor {
                login: actor.to_string(),
            },
            repo: RepoRef {
                name: repo.to_string(),
            },
            created_at: None,
            kind,
        }
    }
}

/// Event as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "type", default)]
    event_type: String,
    #[serde(default)]
    actor: Actor,
    #[serde(default)]
    repo: RepoRef,
    #[serde(default)]
    payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl From<WireEvent> for RawEvent {
    fn from(wire: WireEvent) -> Self {
        Self {
            id: wire.id,
            actor: wire.actor,
            repo: wire.repo,
            created_at: wire.created_at,
            kind: EventKind::decode(wire.event_type, wire.payload),
        }
    }
}

impl From<RawEvent> for WireEvent {
    fn from(event: RawEvent) -> Self {
        Self {
            id: event.id,
            event_type: event.kind.type_name().to_string(),
            payload: event.kind.encode(),
            actor: event.actor,
            repo: event.repo,
            created_at: event.created_at,
        }
    }
}

/// Result of asking the API for a user's feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Events(Vec<RawEvent>),
    /// The API reported that the user does not exist.
    NotFound,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
