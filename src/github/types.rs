//! Wire types for the GitHub REST API.
//!
//! These mirror the JSON payloads the client consumes and stay separate
//! from the domain model. Fields the API may omit are `Option` with serde
//! defaults; no validation happens here beyond presence.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /user` — the authenticated identity.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerRecord {
    pub login: String,
}

/// A repository as returned by the listing and detail endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub language: Option<String>,
    pub owner: OwnerRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerRecord {
    pub login: String,
}

/// A pull request from `GET /repos/{full_name}/pulls`.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRecord {
    pub title: String,
    pub html_url: String,
    pub user: UserRecord,
    pub updated_at: DateTime<Utc>,
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub login: String,
}

/// One entry of the user events feed.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub repo: EventRepo,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    /// "owner/repo" for feed events.
    pub name: String,
}

/// Union of the payload fields the normalizer looks at. Every field is
/// optional because each event type populates a different subset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub pull_request: Option<EventPullRequest>,
    #[serde(default)]
    pub issue: Option<EventIssue>,
    #[serde(default)]
    pub comment: Option<EventComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventPullRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventIssue {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    /// Present iff the issue is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventComment {
    #[serde(default)]
    pub html_url: Option<String>,
}
