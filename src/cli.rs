//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// ghrecap - daily recap of your GitHub activity
///
/// Fetches yesterday's pull requests, reviews, and comments for a user,
/// aggregates them per repository, and writes a markdown report next to
/// a console summary.
///
/// Examples:
///   ghrecap --token ghp_xxx
///   ghrecap --token ghp_xxx --username octocat --output recap.md
///   GITHUB_TOKEN=ghp_xxx ghrecap --quiet
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// GitHub personal access token
    ///
    /// Needs repo read scope for private repositories. Can also be set
    /// via the GITHUB_TOKEN env var.
    #[arg(short, long, env = "GITHUB_TOKEN", value_name = "TOKEN")]
    pub token: String,

    /// GitHub username to report on
    ///
    /// Defaults to the identity the token authenticates as.
    #[arg(short, long, value_name = "NAME")]
    pub username: Option<String>,

    /// Output file path for the markdown report
    ///
    /// Defaults to github-report.md (or the value from .ghrecap.toml).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .ghrecap.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output, no spinners)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.token.trim().is_empty() {
            return Err("Token must not be empty (pass --token or set GITHUB_TOKEN)".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref output) = self.output {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    ));
                }
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Whether spinners and console sections should be shown.
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
