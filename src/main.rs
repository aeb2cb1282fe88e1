//! ghrecap - daily recap of your GitHub activity
//!
//! A CLI tool that fetches a user's GitHub activity for yesterday,
//! aggregates it per repository, and renders a console summary plus a
//! markdown report.
//!
//! Exit codes:
//!   0 - Success, including runs where some per-repository fetches failed
//!   1 - Fatal error (authentication, connection, config, report write)

mod cli;
mod config;
mod correlate;
mod github;
mod models;
mod progress;
mod report;
mod window;

use anyhow::{Context, Result};
use chrono::Local;
use cli::Args;
use config::Config;
use github::types::RepoRecord;
use github::{GithubClient, GithubError};
use models::{Activity, PrState, ProjectSummary, PullRequest, Report, ReportError};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Initialize logging
    init_logging(&args);

    info!("ghrecap v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Generate the report
    match run_recap(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Report generation failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete report workflow. Returns exit code.
async fn run_recap(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let mut client = GithubClient::new(
        &config.github.api_url,
        &args.token,
        config.github.timeout_seconds,
    );

    // Step 1: Resolve the identity to report on
    let authenticated_user = args.username.is_none();
    let username = match args.username {
        Some(ref name) => name.clone(),
        None => client
            .viewer_login()
            .await
            .context("Failed to resolve the authenticated user")?,
    };
    info!("Reporting on user: {}", username);

    let mut report = Report::new(&username);

    // Step 2: List repositories. Failure here is fatal; there is nothing
    // to report without the listing.
    let pb = progress::spinner(args.show_progress(), "Fetching repositories...");
    let repos = client
        .list_repos(&username, authenticated_user)
        .await
        .context("Failed to list repositories")?;
    pb.finish_with_message(format!("Found {} repositories", repos.len()));

    report.set_total_repos(repos.len());

    // Step 3: Sequential per-repository pass: details, then the latest PR.
    let pb = progress::spinner(args.show_progress(), "Fetching repository details...");
    let total = repos.len();
    for (i, listed) in repos.iter().enumerate() {
        pb.set_message(format!(
            "Fetching details {}/{}: {}",
            i + 1,
            total,
            listed.full_name
        ));

        let details = match client.repo_details(&listed.full_name).await {
            Err(e) if e.is_fatal() => return Err(e).context("Repository fetch aborted"),
            other => other,
        };
        let mut project = assemble_project(listed, details, &mut report);

        // A failed PR fetch (routinely a permission gap) just means no
        // last PR for this project; it is not logged or counted.
        if let Ok(Some(pull)) = client.latest_pull_request(&listed.full_name).await {
            project.set_last_pr(PullRequest {
                title: pull.title,
                url: pull.html_url,
                author: pull.user.login,
                date: pull.updated_at,
                state: PrState::parse(&pull.state),
            });
        }

        report.add_project(project);
    }
    pb.finish_with_message("Repository details fetched");

    // Step 4: Fetch the event feed and correlate activities to projects.
    let pb = progress::spinner(args.show_progress(), "Fetching activity feed...");
    match client.user_events(&username).await {
        Ok(events) => {
            let activities: Vec<Activity> =
                events.iter().filter_map(correlate::normalize_event).collect();
            let attached = correlate::attach_activities(&mut report.projects, activities);
            debug!("Correlated {} activities", attached);
        }
        Err(e) if e.is_fatal() => return Err(e).context("Activity fetch aborted"),
        Err(e) => {
            warn!("Activity fetch failed: {}", e);
            report.add_error(ReportError::new(e.to_string(), "events"));
        }
    }
    pb.finish_with_message("Activity feed fetched");

    // Advisory only: one warning when the API quota runs low.
    if let Some(note) = quota_note(
        client.lowest_remaining(),
        config.report.low_quota_threshold,
    ) {
        warn!("{}", note);
        if args.show_progress() {
            println!("⚠️  {}", note);
        }
    }

    // Step 5: Render. The markdown file is written only at the very end,
    // so an interrupted run produces no output file.
    let now = Local::now();
    if args.show_progress() {
        report::print_report(&report, now);
    }

    let markdown = report::generate_markdown_report(&report, now);
    std::fs::write(&config.report.output, &markdown)
        .with_context(|| format!("Failed to write report to {}", config.report.output))?;

    println!("✅ Report saved to: {}", config.report.output);

    Ok(0)
}

/// Build the project for one listed repository from the detail-fetch
/// result. A failed fetch is recorded on the report and the project falls
/// back to listing metadata, so it still appears in the repository list.
fn assemble_project(
    listed: &RepoRecord,
    details: Result<RepoRecord, GithubError>,
    report: &mut Report,
) -> ProjectSummary {
    match details {
        Ok(details) => ProjectSummary::new(
            details.name,
            details.description,
            details.html_url,
            details.language,
        ),
        Err(e) => {
            warn!("Detail fetch failed for {}: {}", listed.full_name, e);
            report.add_error(ReportError::new(e.to_string(), &listed.full_name));
            fallback_project(listed)
        }
    }
}

/// Console/log note shown when the remaining API quota has dropped below
/// the configured threshold.
fn quota_note(remaining: Option<u64>, threshold: u64) -> Option<String> {
    let remaining = remaining?;
    if remaining < threshold {
        Some(format!(
            "GitHub API quota is low: {} requests remaining",
            remaining
        ))
    } else {
        None
    }
}

/// Build a minimal project summary from listing metadata, used when the
/// detail fetch fails.
fn fallback_project(listed: &RepoRecord) -> ProjectSummary {
    ProjectSummary::new(
        listed.name.clone(),
        listed.description.clone(),
        listed.html_url.clone(),
        listed.language.clone(),
    )
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .ghrecap.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
