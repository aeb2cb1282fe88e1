//! Event normalization and activity-to-project correlation.
//!
//! Two steps: raw feed events become `Activity` records (most event types
//! are ignored), then each activity is attached to the project whose name
//! matches its repo name. Activities with no matching project are dropped.

use crate::github::types::EventRecord;
use crate::models::{Activity, ActivityKind, ProjectSummary};
use tracing::debug;

/// Turn one raw event into an `Activity`, or `None` for event types the
/// report does not cover.
///
/// Mapping:
/// - `PullRequestEvent` with `action == "opened"` → PR created. Other
///   actions (closed, reopened, synchronize) produce nothing.
/// - `IssueCommentEvent` → PR comment when the issue carries a
///   pull-request reference, issue comment otherwise.
/// - `PullRequestReviewEvent` → PR review, regardless of action.
pub fn normalize_event(event: &EventRecord) -> Option<Activity> {
    let payload = &event.payload;

    let (kind, title, url) = match event.kind.as_str() {
        "PullRequestEvent" => {
            if payload.action.as_deref() != Some("opened") {
                return None;
            }
            let pr = payload.pull_request.as_ref()?;
            (
                ActivityKind::PrCreated,
                pr.title.clone(),
                pr.html_url.clone(),
            )
        }
        "IssueCommentEvent" => {
            let issue = payload.issue.as_ref()?;
            let kind = if issue.pull_request.is_some() {
                ActivityKind::PrCommented
            } else {
                ActivityKind::IssueCommented
            };
            let url = payload
                .comment
                .as_ref()
                .and_then(|c| c.html_url.clone())
                .or_else(|| issue.html_url.clone());
            (kind, issue.title.clone(), url)
        }
        "PullRequestReviewEvent" => {
            let pr = payload.pull_request.as_ref()?;
            (
                ActivityKind::PrReviewed,
                pr.title.clone(),
                pr.html_url.clone(),
            )
        }
        _ => return None,
    };

    Some(Activity {
        kind,
        title: title.unwrap_or_default(),
        url: url.unwrap_or_default(),
        date: event.created_at,
        repo_name: event.repo.name.clone(),
    })
}

/// Attach each activity to the first project whose name matches, in
/// project order. Returns how many were attached.
///
/// A project matches when its name equals the activity's repo name
/// verbatim, or equals the last `/`-segment of it (the two source
/// endpoints disagree on "owner/repo" vs bare names). Unmatched
/// activities are dropped without being counted as errors.
pub fn attach_activities(projects: &mut [ProjectSummary], activities: Vec<Activity>) -> usize {
    let mut attached = 0;

    for activity in activities {
        let bare_name = activity
            .repo_name
            .rsplit('/')
            .next()
            .unwrap_or(&activity.repo_name);

        let target = projects
            .iter_mut()
            .find(|p| p.name == activity.repo_name || p.name == bare_name);

        match target {
            Some(project) => {
                project.add_activity(activity);
                attached += 1;
            }
            None => {
                debug!("No project matches activity repo {}", activity.repo_name);
            }
        }
    }

    attached
}
