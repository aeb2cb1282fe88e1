//! Domain model for the daily activity report.
//!
//! This module contains the core data structures: normalized activities,
//! pull requests, per-repository summaries, and the top-level `Report`
//! aggregate with its derived statistics.

use crate::window::is_yesterday;
use chrono::{DateTime, Local, Utc};
use std::fmt;

/// Placeholder used when a repository has no description.
pub const NO_DESCRIPTION: &str = "No description provided";

/// State of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrState {
    Open,
    Closed,
    Merged,
    Unknown,
}

impl PrState {
    /// Parse a wire state string. Anything unrecognized maps to `Unknown`
    /// rather than an error.
    pub fn parse(s: &str) -> Self {
        match s {
            "open" => PrState::Open,
            "closed" => PrState::Closed,
            "merged" => PrState::Merged,
            _ => PrState::Unknown,
        }
    }
}

impl fmt::Display for PrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrState::Open => write!(f, "open"),
            PrState::Closed => write!(f, "closed"),
            PrState::Merged => write!(f, "merged"),
            PrState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Kind of a normalized activity.
///
/// Event types the normalizer does not recognize are carried through
/// verbatim in `Other` instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    PrCreated,
    PrCommented,
    PrReviewed,
    IssueCommented,
    Other(String),
}

impl ActivityKind {
    /// Human-readable label. Unknown kinds display as their raw string.
    pub fn display_label(&self) -> &str {
        match self {
            ActivityKind::PrCreated => "PR created",
            ActivityKind::PrCommented => "PR comment",
            ActivityKind::PrReviewed => "PR review",
            ActivityKind::IssueCommented => "Issue comment",
            ActivityKind::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_label())
    }
}

/// The most recently updated pull request of a repository.
#[derive(Debug, Clone)]
pub struct PullRequest {
    pub title: String,
    pub url: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub state: PrState,
}

impl PullRequest {
    /// True iff the PR's update date falls in yesterday's window.
    pub fn is_from_yesterday(&self, now: DateTime<Local>) -> bool {
        is_yesterday(self.date, now)
    }

    /// Short display date, e.g. "Aug 20, 2026".
    pub fn formatted_date(&self) -> String {
        self.date
            .with_timezone(&Local)
            .format("%b %e, %Y")
            .to_string()
    }
}

/// One user-attributable GitHub event, normalized.
#[derive(Debug, Clone)]
pub struct Activity {
    pub kind: ActivityKind,
    pub title: String,
    pub url: String,
    pub date: DateTime<Utc>,
    /// Repository name as the event reported it; either "owner/repo" or
    /// a bare repo name depending on the source endpoint.
    pub repo_name: String,
}

impl Activity {
    /// True iff the activity happened in yesterday's window.
    pub fn is_from_yesterday(&self, now: DateTime<Local>) -> bool {
        is_yesterday(self.date, now)
    }

    /// Short display time, e.g. "Aug 20, 15:04".
    pub fn formatted_date(&self) -> String {
        self.date
            .with_timezone(&Local)
            .format("%b %e, %H:%M")
            .to_string()
    }
}

/// Aggregated view of one repository.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub name: String,
    pub description: String,
    pub url: String,
    pub language: Option<String>,
    pub last_pr: Option<PullRequest>,
    /// Correlated activities, in correlation order. Append-only.
    pub activities: Vec<Activity>,
}

impl ProjectSummary {
    /// Create a summary for one repository. A missing or empty description
    /// is replaced by a fixed placeholder, never stored empty.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        url: impl Into<String>,
        language: Option<String>,
    ) -> Self {
        let description = match description {
            Some(d) if !d.trim().is_empty() => d,
            _ => NO_DESCRIPTION.to_string(),
        };

        Self {
            name: name.into(),
            description,
            url: url.into(),
            language,
            last_pr: None,
            activities: Vec::new(),
        }
    }

    /// Attach the most recently updated pull request.
    pub fn set_last_pr(&mut self, pr: PullRequest) {
        self.last_pr = Some(pr);
    }

    /// Append an activity. No deduplication, no reordering.
    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    /// True iff any owned activity, or the last PR, falls in yesterday's
    /// window.
    pub fn has_yesterday_activity(&self, now: DateTime<Local>) -> bool {
        self.activities.iter().any(|a| a.is_from_yesterday(now))
            || self
                .last_pr
                .as_ref()
                .is_some_and(|pr| pr.is_from_yesterday(now))
    }

    /// The owned activities that fall in yesterday's window, in stored
    /// order. Does not mutate the summary.
    pub fn yesterday_activities(&self, now: DateTime<Local>) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| a.is_from_yesterday(now))
            .collect()
    }
}

/// One recoverable error accumulated during report generation.
#[derive(Debug, Clone)]
pub struct ReportError {
    pub message: String,
    /// The repo full name or fetch phase that produced the error.
    pub context: String,
    pub timestamp: DateTime<Utc>,
}

impl ReportError {
    pub fn new(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: context.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Derived headline counts for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutiveSummary {
    pub total_repos: usize,
    pub active_repos: usize,
    pub total_activities: usize,
    pub created_prs: usize,
    pub reviews: usize,
    pub comments: usize,
    pub error_count: usize,
}

impl ExecutiveSummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// Top-level aggregate: everything gathered during one run.
#[derive(Debug, Clone)]
pub struct Report {
    pub username: String,
    pub generated_at: DateTime<Local>,
    /// One summary per listed repository, in listing order.
    pub projects: Vec<ProjectSummary>,
    /// Set explicitly from the listing, not derived from `projects`, so a
    /// mismatch signals a partial failure.
    pub total_repos_analyzed: usize,
    pub errors: Vec<ReportError>,
}

impl Report {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            generated_at: Local::now(),
            projects: Vec::new(),
            total_repos_analyzed: 0,
            errors: Vec::new(),
        }
    }

    pub fn add_project(&mut self, project: ProjectSummary) {
        self.projects.push(project);
    }

    pub fn set_total_repos(&mut self, count: usize) {
        self.total_repos_analyzed = count;
    }

    pub fn add_error(&mut self, error: ReportError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Projects with any activity yesterday, in listing order.
    pub fn active_projects(&self, now: DateTime<Local>) -> Vec<&ProjectSummary> {
        self.projects
            .iter()
            .filter(|p| p.has_yesterday_activity(now))
            .collect()
    }

    /// All of yesterday's activities across projects, most recent first.
    ///
    /// The sort is stable, so equal timestamps keep flatten order (project
    /// listing order, then insertion order).
    pub fn all_yesterday_activities(&self, now: DateTime<Local>) -> Vec<&Activity> {
        let mut activities: Vec<&Activity> = self
            .projects
            .iter()
            .flat_map(|p| p.yesterday_activities(now))
            .collect();
        activities.sort_by(|a, b| b.date.cmp(&a.date));
        activities
    }

    /// Recompute the headline counts from current state. Pure and
    /// idempotent: no caching, repeated calls without mutation agree.
    pub fn executive_summary(&self, now: DateTime<Local>) -> ExecutiveSummary {
        let activities = self.all_yesterday_activities(now);

        let mut created_prs = 0;
        let mut reviews = 0;
        let mut comments = 0;
        for activity in &activities {
            match activity.kind {
                ActivityKind::PrCreated => created_prs += 1,
                ActivityKind::PrReviewed => reviews += 1,
                ActivityKind::PrCommented | ActivityKind::IssueCommented => comments += 1,
                ActivityKind::Other(_) => {}
            }
        }

        ExecutiveSummary {
            total_repos: self.total_repos_analyzed,
            active_repos: self.active_projects(now).len(),
            total_activities: activities.len(),
            created_prs,
            reviews,
            comments,
            error_count: self.errors.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 21, 10, 30, 0).unwrap()
    }

    fn yesterday_at(h: u32, mi: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(2026, 8, 20, h, mi, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn activity(kind: ActivityKind, repo: &str, date: DateTime<Utc>) -> Activity {
        Activity {
            kind,
            title: "test activity".to_string(),
            url: "https://github.com/test".to_string(),
            date,
            repo_name: repo.to_string(),
        }
    }

    fn project(name: &str) -> ProjectSummary {
        ProjectSummary::new(
            name,
            Some("a test repo".to_string()),
            format!("https://github.com/octo/{}", name),
            Some("Rust".to_string()),
        )
    }

    #[test]
    fn test_pr_state_parse_is_permissive() {
        assert_eq!(PrState::parse("open"), PrState::Open);
        assert_eq!(PrState::parse("closed"), PrState::Closed);
        assert_eq!(PrState::parse("merged"), PrState::Merged);
        assert_eq!(PrState::parse("draft"), PrState::Unknown);
        assert_eq!(PrState::parse(""), PrState::Unknown);
    }

    #[test]
    fn test_unknown_kind_displays_verbatim() {
        assert_eq!(ActivityKind::PrCreated.display_label(), "PR created");
        assert_eq!(
            ActivityKind::Other("WatchEvent".to_string()).display_label(),
            "WatchEvent"
        );
    }

    #[test]
    fn test_missing_description_gets_placeholder() {
        let p = ProjectSummary::new("repo", None, "url", None);
        assert_eq!(p.description, NO_DESCRIPTION);

        let p = ProjectSummary::new("repo", Some("   ".to_string()), "url", None);
        assert_eq!(p.description, NO_DESCRIPTION);

        let p = ProjectSummary::new("repo", Some("real".to_string()), "url", None);
        assert_eq!(p.description, "real");
    }

    #[test]
    fn test_activities_keep_insertion_order() {
        let mut p = project("repo");
        p.add_activity(activity(
            ActivityKind::PrReviewed,
            "repo",
            yesterday_at(12, 0),
        ));
        p.add_activity(activity(
            ActivityKind::PrCreated,
            "repo",
            yesterday_at(9, 0),
        ));

        let filtered = p.yesterday_activities(now());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].kind, ActivityKind::PrReviewed);
        assert_eq!(filtered[1].kind, ActivityKind::PrCreated);
    }

    #[test]
    fn test_last_pr_alone_marks_project_active() {
        let mut p = project("repo");
        assert!(!p.has_yesterday_activity(now()));

        p.set_last_pr(PullRequest {
            title: "fix things".to_string(),
            url: "https://github.com/octo/repo/pull/1".to_string(),
            author: "octocat".to_string(),
            date: yesterday_at(16, 45),
            state: PrState::Merged,
        });
        assert!(p.has_yesterday_activity(now()));
        assert!(p.yesterday_activities(now()).is_empty());
    }

    #[test]
    fn test_all_yesterday_activities_sorted_descending() {
        let mut report = Report::new("octocat");
        report.set_total_repos(2);

        let mut a = project("alpha");
        a.add_activity(activity(ActivityKind::PrCreated, "alpha", yesterday_at(8, 0)));
        a.add_activity(activity(
            ActivityKind::PrCommented,
            "alpha",
            yesterday_at(18, 0),
        ));
        report.add_project(a);

        let mut b = project("beta");
        b.add_activity(activity(
            ActivityKind::PrReviewed,
            "beta",
            yesterday_at(12, 0),
        ));
        report.add_project(b);

        let all = report.all_yesterday_activities(now());
        assert_eq!(all.len(), 3);
        for pair in all.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
        assert_eq!(all[0].kind, ActivityKind::PrCommented);
        assert_eq!(all[2].kind, ActivityKind::PrCreated);
    }

    #[test]
    fn test_equal_timestamps_keep_flatten_order() {
        let mut report = Report::new("octocat");
        let t = yesterday_at(12, 0);

        let mut a = project("alpha");
        a.add_activity(activity(ActivityKind::PrCreated, "alpha", t));
        report.add_project(a);

        let mut b = project("beta");
        b.add_activity(activity(ActivityKind::PrReviewed, "beta", t));
        report.add_project(b);

        let all = report.all_yesterday_activities(now());
        assert_eq!(all[0].repo_name, "alpha");
        assert_eq!(all[1].repo_name, "beta");
    }

    #[test]
    fn test_executive_summary_scenario() {
        // 3 projects, 2 active with one activity each, one idle.
        let mut report = Report::new("octocat");
        report.set_total_repos(3);

        let mut a = project("alpha");
        a.add_activity(activity(ActivityKind::PrCreated, "alpha", yesterday_at(9, 0)));
        report.add_project(a);

        let mut b = project("beta");
        b.add_activity(activity(
            ActivityKind::PrReviewed,
            "beta",
            yesterday_at(14, 0),
        ));
        report.add_project(b);

        report.add_project(project("gamma"));

        let summary = report.executive_summary(now());
        assert_eq!(summary.total_repos, 3);
        assert_eq!(summary.active_repos, 2);
        assert_eq!(summary.total_activities, 2);
        assert_eq!(summary.created_prs, 1);
        assert_eq!(summary.reviews, 1);
        assert_eq!(summary.comments, 0);
        assert!(!summary.has_errors());
    }

    #[test]
    fn test_executive_summary_is_idempotent() {
        let mut report = Report::new("octocat");
        report.set_total_repos(1);

        let mut p = project("alpha");
        p.add_activity(activity(
            ActivityKind::IssueCommented,
            "alpha",
            yesterday_at(11, 0),
        ));
        report.add_project(p);
        report.add_error(ReportError::new("boom", "octo/alpha"));

        let first = report.executive_summary(now());
        let second = report.executive_summary(now());
        assert_eq!(first, second);
        assert_eq!(first.comments, 1);
        assert_eq!(first.error_count, 1);
        assert!(first.has_errors());
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new("octocat");
        let summary = report.executive_summary(now());

        assert_eq!(summary.total_repos, 0);
        assert!(report.active_projects(now()).is_empty());
        assert!(report.all_yesterday_activities(now()).is_empty());
    }

    #[test]
    fn test_stale_activity_does_not_activate_project() {
        let mut p = project("repo");
        let last_week = Local
            .with_ymd_and_hms(2026, 8, 14, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        p.add_activity(activity(ActivityKind::PrCreated, "repo", last_week));

        assert!(!p.has_yesterday_activity(now()));
        assert!(p.yesterday_activities(now()).is_empty());
        assert_eq!(p.activities.len(), 1);
    }
}
