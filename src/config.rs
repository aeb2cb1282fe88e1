//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.ghrecap.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API settings.
    #[serde(default)]
    pub github: GithubConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// GitHub API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API base URL. Change for GitHub Enterprise.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Remaining-quota level below which a warning is logged.
    #[serde(default = "default_low_quota")]
    pub low_quota_threshold: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            low_quota_threshold: default_low_quota(),
        }
    }
}

fn default_output() -> String {
    "github-report.md".to_string()
}

fn default_low_quota() -> u64 {
    100
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".ghrecap.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.report.output = output.display().to_string();
        }
    }

    /// Generate a default configuration file content.
    #[allow(dead_code)] // Utility for generating example config
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.timeout_seconds, 30);
        assert_eq!(config.report.output, "github-report.md");
        assert_eq!(config.report.low_quota_threshold, 100);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[github]
api_url = "https://github.example.com/api/v3"

[report]
output = "recap.md"
low_quota_threshold = 50
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.github.api_url, "https://github.example.com/api/v3");
        assert_eq!(config.github.timeout_seconds, 30);
        assert_eq!(config.report.output, "recap.md");
        assert_eq!(config.report.low_quota_threshold, 50);
    }

    #[test]
    fn test_cli_output_wins_over_config() {
        let mut config = Config::default();
        config.report.output = "from-config.md".to_string();

        let args = crate::cli::Args {
            token: "ghp_test".to_string(),
            username: None,
            output: Some(std::path::PathBuf::from("from-cli.md")),
            config: None,
            verbose: false,
            quiet: false,
        };
        config.merge_with_args(&args);
        assert_eq!(config.report.output, "from-cli.md");

        let mut config = Config::default();
        config.report.output = "from-config.md".to_string();
        let args = crate::cli::Args {
            output: None,
            ..args
        };
        config.merge_with_args(&args);
        assert_eq!(config.report.output, "from-config.md");
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[github]"));
        assert!(toml_str.contains("[report]"));
    }
}
