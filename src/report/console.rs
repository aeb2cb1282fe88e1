//! Console rendering of the report.
//!
//! Same section order as the markdown renderer, printed to stdout with
//! `colored`. Rendering is pure with respect to the report; color is
//! dropped automatically when stdout is not a terminal.

use crate::models::{Activity, Report};
use crate::window::yesterday_window;
use chrono::{DateTime, Local};
use colored::Colorize;

/// Print the report summary to stdout.
pub fn print_report(report: &Report, now: DateTime<Local>) {
    print!("{}", render(report, now));
}

/// Render the console report as a string.
pub fn render(report: &Report, now: DateTime<Local>) -> String {
    let mut out = String::new();
    let (window_start, _) = yesterday_window(now);
    let summary = report.executive_summary(now);

    out.push_str(&format!(
        "\n{} {} — {}\n\n",
        "GitHub Activity Report".bold(),
        report.username.cyan(),
        window_start.format("%Y-%m-%d")
    ));

    out.push_str(&format!("{}\n", "Executive Summary".bold().underline()));
    out.push_str(&format!(
        "  Repositories analyzed: {}\n",
        summary.total_repos
    ));
    out.push_str(&format!("  Active yesterday:      {}\n", summary.active_repos));
    out.push_str(&format!(
        "  Activities:            {} ({} created, {} reviews, {} comments)\n",
        summary.total_activities, summary.created_prs, summary.reviews, summary.comments
    ));

    let activities = report.all_yesterday_activities(now);
    if !activities.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            "Yesterday's Activities".bold().underline()
        ));
        for activity in &activities {
            out.push_str(&format!("  {}\n", activity_line(activity)));
        }
    }

    let active = report.active_projects(now);
    if !active.is_empty() {
        out.push_str(&format!("\n{}\n", "Active Projects".bold().underline()));
        for project in &active {
            let language = project.language.as_deref().unwrap_or("—");
            out.push_str(&format!(
                "  {} {} ({})\n",
                "●".green(),
                project.name.bold(),
                language
            ));
            if let Some(ref pr) = project.last_pr {
                out.push_str(&format!(
                    "      last PR: {} ({}, {})\n",
                    pr.title,
                    pr.state,
                    pr.formatted_date()
                ));
            }
        }
    }

    let any_inactive = report
        .projects
        .iter()
        .any(|p| !p.has_yesterday_activity(now));
    if any_inactive {
        out.push_str(&format!("\n{}\n", "All Repositories".bold().underline()));
        for project in &report.projects {
            let marker = if project.has_yesterday_activity(now) {
                "●".green()
            } else {
                "○".dimmed()
            };
            out.push_str(&format!("  {} {}\n", marker, project.name));
        }
    }

    if report.has_errors() {
        out.push_str(&format!(
            "\n{} ({})\n",
            "Errors".red().bold().underline(),
            report.errors.len()
        ));
        for error in &report.errors {
            out.push_str(&format!(
                "  {} {} ({})\n",
                "✗".red(),
                error.message,
                error.context
            ));
        }
    }

    out.push('\n');
    out
}

fn activity_line(activity: &Activity) -> String {
    format!(
        "{} {} — {} at {}",
        activity.kind.display_label().yellow(),
        activity.title,
        activity.repo_name.dimmed(),
        activity.formatted_date()
    )
}
