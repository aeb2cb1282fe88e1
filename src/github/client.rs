//! GitHub REST API client.
//!
//! A thin sequential client over `reqwest`: pagination, auth headers, and
//! a typed error so the pipeline can tell fatal failures (bad token, no
//! connection) from per-repository ones without matching strings.

use crate::github::types::{EventRecord, PullRecord, RepoRecord, ViewerRecord};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("ghrecap/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: usize = 100;

/// GitHub caps the events feed at ~300 entries; don't page past it.
const MAX_EVENT_PAGES: usize = 10;

/// Errors from the GitHub client.
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("authentication failed (HTTP {status}); check the token")]
    AuthFailed { status: u16 },

    #[error("cannot connect to {url}")]
    Connect { url: String },

    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("GitHub API error {status} for {path}")]
    Api { status: u16, path: String },

    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        source: reqwest::Error,
    },

    #[error("request failed: {0}")]
    Http(reqwest::Error),
}

impl GithubError {
    /// Fatal errors abort the whole run; everything else is handled per
    /// item by the caller.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GithubError::AuthFailed { .. } | GithubError::Connect { .. }
        )
    }
}

/// Sequential client for the GitHub REST API.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    timeout_seconds: u64,
    /// Lowest `x-ratelimit-remaining` seen so far, advisory only.
    lowest_remaining: Option<u64>,
}

impl GithubClient {
    /// Build a client against `api_url` (usually `https://api.github.com`).
    pub fn new(api_url: impl Into<String>, token: impl Into<String>, timeout_seconds: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout_seconds,
            lowest_remaining: None,
        }
    }

    /// The login of the authenticated user. A 401 here is fatal.
    pub async fn viewer_login(&mut self) -> Result<String, GithubError> {
        let viewer: ViewerRecord = self.get_json("/user", &[]).await?;
        Ok(viewer.login)
    }

    /// All repositories of `username`, in the API's updated-first order.
    /// Pages until a short page.
    pub async fn list_repos(&mut self, username: &str, authenticated_user: bool) -> Result<Vec<RepoRecord>, GithubError> {
        let path = if authenticated_user {
            "/user/repos".to_string()
        } else {
            format!("/users/{}/repos", username)
        };

        let mut repos = Vec::new();
        for page in 1.. {
            let page_param = page.to_string();
            let per_page = PER_PAGE.to_string();
            let mut query = vec![
                ("sort", "updated"),
                ("per_page", per_page.as_str()),
                ("page", page_param.as_str()),
            ];
            if authenticated_user {
                query.push(("type", "owner"));
            }

            let batch: Vec<RepoRecord> = self.get_json(&path, &query).await?;
            let batch_len = batch.len();
            repos.extend(batch);

            if batch_len < PER_PAGE {
                break;
            }
        }

        debug!("Listed {} repositories for {}", repos.len(), username);
        Ok(repos)
    }

    /// Full details for one repository.
    pub async fn repo_details(&mut self, full_name: &str) -> Result<RepoRecord, GithubError> {
        self.get_json(&format!("/repos/{}", full_name), &[]).await
    }

    /// The single most recently updated pull request of a repository, in
    /// any state. `None` when the repository has no PRs.
    pub async fn latest_pull_request(
        &mut self,
        full_name: &str,
    ) -> Result<Option<PullRecord>, GithubError> {
        let pulls: Vec<PullRecord> = self
            .get_json(
                &format!("/repos/{}/pulls", full_name),
                &[
                    ("state", "all"),
                    ("sort", "updated"),
                    ("direction", "desc"),
                    ("per_page", "1"),
                ],
            )
            .await?;

        Ok(pulls.into_iter().next())
    }

    /// The user's public (and token-visible private) event feed, paged up
    /// to the feed cap.
    pub async fn user_events(&mut self, username: &str) -> Result<Vec<EventRecord>, GithubError> {
        let path = format!("/users/{}/events", username);

        let mut events = Vec::new();
        for page in 1..=MAX_EVENT_PAGES {
            let page_param = page.to_string();
            let per_page = PER_PAGE.to_string();
            let batch: Vec<EventRecord> = self
                .get_json(
                    &path,
                    &[
                        ("per_page", per_page.as_str()),
                        ("page", page_param.as_str()),
                    ],
                )
                .await?;
            let batch_len = batch.len();
            events.extend(batch);

            if batch_len < PER_PAGE {
                break;
            }
        }

        debug!("Fetched {} events for {}", events.len(), username);
        Ok(events)
    }

    /// Lowest `x-ratelimit-remaining` observed across all requests so far.
    pub fn lowest_remaining(&self) -> Option<u64> {
        self.lowest_remaining
    }

    async fn get_json<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GithubError> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GithubError::Timeout {
                        seconds: self.timeout_seconds,
                    }
                } else if e.is_connect() {
                    GithubError::Connect {
                        url: self.api_url.clone(),
                    }
                } else {
                    GithubError::Http(e)
                }
            })?;

        self.note_rate_limit(&response);

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GithubError::AuthFailed {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(GithubError::Api {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response.json().await.map_err(|source| GithubError::Decode {
            path: path.to_string(),
            source,
        })
    }

    fn note_rate_limit(&mut self, response: &reqwest::Response) {
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if let Some(remaining) = remaining {
            if self.lowest_remaining.map_or(true, |low| remaining < low) {
                self.lowest_remaining = Some(remaining);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(GithubError::AuthFailed { status: 401 }.is_fatal());
        assert!(GithubError::Connect {
            url: "https://api.github.com".to_string()
        }
        .is_fatal());

        assert!(!GithubError::Timeout { seconds: 30 }.is_fatal());
        assert!(!GithubError::Api {
            status: 404,
            path: "/repos/octo/gone".to_string()
        }
        .is_fatal());
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let client = GithubClient::new("https://api.github.com/", "token", 30);
        assert_eq!(client.api_url, "https://api.github.com");
    }
}
