//! Markdown report generation.
//!
//! Pure functions from `Report` state to a markdown document, one
//! function per section. Section order is fixed: header, executive
//! summary, yesterday's activities, active projects, full repository
//! list, errors, footer. Empty sections are skipped entirely.

use crate::models::{Activity, ProjectSummary, Report};
use crate::window::yesterday_window;
use chrono::{DateTime, Local};

/// Generate the complete markdown report.
pub fn generate_markdown_report(report: &Report, now: DateTime<Local>) -> String {
    let mut output = String::new();

    output.push_str(&generate_header(report, now));
    output.push_str(&generate_summary_section(report, now));
    output.push_str(&generate_activities_section(report, now));
    output.push_str(&generate_active_projects_section(report, now));
    output.push_str(&generate_all_repos_section(report, now));
    output.push_str(&generate_errors_section(report));
    output.push_str(&generate_footer());

    output
}

/// Title and metadata header.
fn generate_header(report: &Report, now: DateTime<Local>) -> String {
    let (window_start, _) = yesterday_window(now);

    let mut section = String::new();
    section.push_str("# GitHub Activity Report\n\n");
    section.push_str(&format!("- **User:** {}\n", report.username));
    section.push_str(&format!(
        "- **Date:** {}\n",
        window_start.format("%Y-%m-%d")
    ));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    section.push('\n');

    section
}

/// Headline counts.
fn generate_summary_section(report: &Report, now: DateTime<Local>) -> String {
    let summary = report.executive_summary(now);

    let mut section = String::new();
    section.push_str("## Executive Summary\n\n");
    section.push_str(&format!(
        "- **Repositories analyzed:** {}\n",
        summary.total_repos
    ));
    section.push_str(&format!(
        "- **Active yesterday:** {}\n",
        summary.active_repos
    ));
    section.push_str(&format!(
        "- **Total activities:** {}\n",
        summary.total_activities
    ));
    section.push_str(&format!(
        "- **PRs created:** {} | **Reviews:** {} | **Comments:** {}\n",
        summary.created_prs, summary.reviews, summary.comments
    ));
    if summary.has_errors() {
        section.push_str(&format!("- **Errors:** {}\n", summary.error_count));
    }
    section.push('\n');

    section
}

/// Yesterday's activities across all projects, most recent first.
/// Empty when nothing happened.
fn generate_activities_section(report: &Report, now: DateTime<Local>) -> String {
    let activities = report.all_yesterday_activities(now);
    if activities.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Yesterday's Activities\n\n");
    for activity in activities {
        section.push_str(&format!("- {}\n", activity_line(activity)));
    }
    section.push('\n');

    section
}

fn activity_line(activity: &Activity) -> String {
    format!(
        "**{}** [{}]({}) — `{}` at {}",
        activity.kind.display_label(),
        escape_markdown(&activity.title),
        escape_link_url(&activity.url),
        activity.repo_name,
        activity.formatted_date()
    )
}

/// One block per project with any activity yesterday.
fn generate_active_projects_section(report: &Report, now: DateTime<Local>) -> String {
    let active = report.active_projects(now);
    if active.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Active Projects\n\n");
    for project in active {
        section.push_str(&generate_project_block(project, now));
    }

    section
}

fn generate_project_block(project: &ProjectSummary, now: DateTime<Local>) -> String {
    let mut block = String::new();

    block.push_str(&format!(
        "### [{}]({})\n\n",
        escape_markdown(&project.name),
        escape_link_url(&project.url)
    ));
    block.push_str(&format!("{}\n\n", project.description));

    if let Some(ref language) = project.language {
        block.push_str(&format!("- **Language:** {}\n", language));
    }
    if let Some(ref pr) = project.last_pr {
        block.push_str(&format!(
            "- **Last PR:** [{}]({}) by {} ({}, {})\n",
            escape_markdown(&pr.title),
            escape_link_url(&pr.url),
            pr.author,
            pr.state,
            pr.formatted_date()
        ));
    }

    let activities = project.yesterday_activities(now);
    if !activities.is_empty() {
        block.push_str("- **Yesterday:**\n");
        for activity in activities {
            block.push_str(&format!("  - {}\n", activity_line(activity)));
        }
    }
    block.push('\n');

    block
}

/// Full repository list with status markers. Only emitted when at least
/// one project was inactive; with everything active the active-projects
/// section already covers the list.
fn generate_all_repos_section(report: &Report, now: DateTime<Local>) -> String {
    let any_inactive = report
        .projects
        .iter()
        .any(|p| !p.has_yesterday_activity(now));
    if !any_inactive {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## All Repositories\n\n");
    for project in &report.projects {
        let marker = if project.has_yesterday_activity(now) {
            "🟢"
        } else {
            "⚪"
        };
        section.push_str(&format!(
            "- {} [{}]({}) — {}\n",
            marker,
            escape_markdown(&project.name),
            escape_link_url(&project.url),
            project.description
        ));
    }
    section.push('\n');

    section
}

/// Errors accumulated during the run, if any.
fn generate_errors_section(report: &Report) -> String {
    if !report.has_errors() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str(&format!("## Errors ({})\n\n", report.errors.len()));
    for error in &report.errors {
        section.push_str(&format!(
            "- {} (`{}`, {})\n",
            error.message,
            error.context,
            error.timestamp.format("%H:%M:%S UTC")
        ));
    }
    section.push('\n');

    section
}

fn generate_footer() -> String {
    "---\n\n*Report generated by ghrecap*\n".to_string()
}

fn escape_markdown(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

/// Parentheses inside an inline-link destination end the link early;
/// percent-encode them. Label text tolerates them as-is.
fn escape_link_url(url: &str) -> String {
    url.replace('(', "%28").replace(')', "%29")
}
