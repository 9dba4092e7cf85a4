// GitHub API endpoint functions.
// Fetches a user's public events feed and classifies the response body.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{ActivityError, Result};

use super::client::{GitHubClient, rate_limit_from, reset_time};
use super::types::{EventKind, FetchOutcome, RateLimit, RawEvent};

/// Message the API returns for a user that does not exist.
const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Anything that can produce a user's public events.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, user: &str) -> Result<FetchOutcome>;
}

impl GitHubClient {
    /// Get the first page of a user's public events, newest first.
    pub async fn get_user_events(&self, user: &str) -> Result<FetchOutcome> {
        let response = self.get(&format!("/users/{}/events/public", user)).await?;
        let status = response.status();
        let rate_limit = rate_limit_from(response.headers());
        let body = response.text().await?;

        let outcome = classify_response(status, &rate_limit, &body)?;
        if let FetchOutcome::Events(events) = &outcome {
            tracing::debug!(user, events = events.len(), "fetched public events");
        }
        Ok(outcome)
    }
}

#[async_trait]
impl FeedSource for GitHubClient {
    async fn fetch(&self, user: &str) -> Result<FetchOutcome> {
        self.get_user_events(user).await
    }
}

/// Turn a status and body into events, a not-found signal, or an error.
///
/// The not-found body wins over the status code: the API answers 404 with
/// `{"message": "Not Found"}` for unknown users.
pub(crate) fn classify_response(
    status: StatusCode,
    rate_limit: &RateLimit,
    body: &str,
) -> Result<FetchOutcome> {
    let parsed = serde_json::from_str::<Value>(body);

    if let Ok(Value::Object(map)) = &parsed {
        if map.get("message").and_then(Value::as_str) == Some(NOT_FOUND_MESSAGE) {
            return Ok(FetchOutcome::NotFound);
        }
    }

    if !status.is_success() {
        if status == StatusCode::FORBIDDEN && rate_limit.remaining == 0 {
            return Err(ActivityError::RateLimited {
                limit: rate_limit.limit,
                reset_at: reset_time(rate_limit),
            });
        }
        let message = match &parsed {
            Ok(Value::Object(map)) => map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            _ => body.trim().to_string(),
        };
        return Err(ActivityError::Http {
            status: status.as_u16(),
            message,
        });
    }

    match parsed? {
        Value::Array(items) => {
            let events = items.into_iter().map(decode_event).collect();
            Ok(FetchOutcome::Events(events))
        }
        other => Err(ActivityError::UnexpectedBody(format!(
            "expected an array of events, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decode one feed item. Items that do not fit the event shape are kept as
/// unrecognized events so the rest of the feed still renders.
fn decode_event(item: Value) -> RawEvent {
    match serde_json::from_value::<RawEvent>(item.clone()) {
        Ok(event) => event,
        Err(err) => {
            let event_type = item
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            tracing::warn!(event_type = %event_type, error = %err, "malformed event in feed");
            RawEvent::new(
                "",
                "",
                EventKind::Other {
                    event_type,
                    payload: item,
                },
            )
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GitHubClient {
        let config = Config {
            api_base: server.uri(),
            ..Config::default()
        };
        GitHubClient::new(&config).unwrap()
    }

    #[test]
    fn test_not_found_body_with_ok_status() {
        let outcome = classify_response(
            StatusCode::OK,
            &RateLimit::default(),
            r#"{"message":"Not Found"}"#,
        )
        .unwrap();
        assert_eq!(outcome, FetchOutcome::NotFound);
    }

    #[test]
    fn test_null_body_is_an_error() {
        let err = classify_response(StatusCode::OK, &RateLimit::default(), "null").unwrap_err();
        assert!(matches!(err, ActivityError::UnexpectedBody(_)));
    }

    #[test]
    fn test_garbage_body_is_a_json_error() {
        let err =
            classify_response(StatusCode::OK, &RateLimit::default(), "<html>").unwrap_err();
        assert!(matches!(err, ActivityError::Json(_)));
    }

    #[test]
    fn test_malformed_item_does_not_fail_feed() {
        let body = r#"[
            {"type": "PushEvent", "actor": "not-an-object", "repo": {"name": "x/y"}},
            {"type": "WatchEvent", "actor": {"login": "bob"}, "repo": {"name": "org/repo"}},
            42
        ]"#;
        let outcome = classify_response(StatusCode::OK, &RateLimit::default(), body).unwrap();
        let FetchOutcome::Events(events) = outcome else {
            panic!("expected events");
        };
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind.type_name(), "PushEvent");
        assert!(matches!(events[0].kind, EventKind::Other { .. }));
        assert_eq!(events[1].kind, EventKind::Watch);
        assert_eq!(events[2].kind.type_name(), "");
    }

    #[test]
    fn test_forbidden_with_exhausted_quota_is_rate_limited() {
        let rate_limit = RateLimit {
            limit: 60,
            remaining: 0,
            reset: 0,
        };
        let err = classify_response(
            StatusCode::FORBIDDEN,
            &rate_limit,
            r#"{"message":"API rate limit exceeded"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ActivityError::RateLimited { limit: 60, .. }));
        assert_eq!(
            err.to_string(),
            "Rate limit of 60 requests exceeded, resets at 00:00:00"
        );
    }

    #[test]
    fn test_server_error_carries_status() {
        let rate_limit = RateLimit {
            remaining: 10,
            ..RateLimit::default()
        };
        let err = classify_response(StatusCode::BAD_GATEWAY, &rate_limit, "upstream down")
            .unwrap_err();
        match err {
            ActivityError::Http { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_events_in_delivered_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/alice/events/public"))
            .and(header("accept", "application/vnd.github+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "type": "WatchEvent",
                    "actor": { "login": "alice" },
                    "repo": { "name": "org/new" },
                    "payload": { "action": "started" }
                },
                {
                    "type": "CreateEvent",
                    "actor": { "login": "alice" },
                    "repo": { "name": "alice/old" },
                    "payload": {}
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).fetch("alice").await.unwrap();
        let FetchOutcome::Events(events) = outcome else {
            panic!("expected events");
        };
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Watch);
        assert_eq!(events[1].repo.name, "alice/old");
    }

    #[tokio::test]
    async fn test_fetch_unknown_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/ghost-user/events/public"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).fetch("ghost-user").await.unwrap();
        assert_eq!(outcome, FetchOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch("alice").await.unwrap_err();
        assert!(matches!(err, ActivityError::Http { status: 500, .. }));
    }
}
