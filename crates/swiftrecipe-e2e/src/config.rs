//! Runner configuration
//!
//! Mirrors the suite's declarative runner settings. Only the base URL is
//! required; everything else has a default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::result::{E2eError, E2eResult};

/// Environment variable holding the application's login URL
pub const BASE_URL_ENV: &str = "SWIFTRECIPE_URL";

/// Origin the application is served from inside the test network
pub const DEFAULT_APP_ORIGIN: &str = "http://swift-recipe:8080";

/// Default wait for locators and URL assertions (6 seconds)
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 6000;

/// Default polling interval while waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Retry counts per run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Retries {
    /// Retries of a failed scenario in headless runs
    pub run_mode: u32,
    /// Retries of a failed scenario in interactive runs
    pub open_mode: u32,
}

impl Default for Retries {
    fn default() -> Self {
        Self {
            run_mode: 1,
            open_mode: 0,
        }
    }
}

/// Browser viewport size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 2560,
            height: 1440,
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory reports are written to
    pub report_dir: PathBuf,
    /// Replace the previous report instead of numbering a new one
    pub overwrite: bool,
    /// Emit a JSON report
    pub json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("reports"),
            overwrite: true,
            json: true,
        }
    }
}

/// Video capture settings, passed through to the driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Record scenario videos
    pub enabled: bool,
    /// Compression level (CRF)
    pub compression: u32,
    /// Output directory
    pub videos_folder: PathBuf,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            compression: 32,
            videos_folder: PathBuf::from("videos"),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Scenario runner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Login page URL visited by the first step
    pub base_url: Option<String>,
    /// Origin used in URL assertions
    pub app_origin: String,
    /// Wait for locators and URL assertions
    pub default_command_timeout_ms: u64,
    /// Polling interval while waiting
    pub poll_interval_ms: u64,
    /// Scenario retries
    pub retries: Retries,
    /// Browser viewport
    pub viewport: Viewport,
    /// Feature files the suite is organised by
    pub spec_pattern: String,
    /// Report output
    pub report: ReportConfig,
    /// Video capture
    pub video: VideoConfig,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            app_origin: DEFAULT_APP_ORIGIN.to_string(),
            default_command_timeout_ms: DEFAULT_COMMAND_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            retries: Retries::default(),
            viewport: Viewport::default(),
            spec_pattern: "features/*.feature".to_string(),
            report: ReportConfig::default(),
            video: VideoConfig::default(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl RunnerConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML config
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Config`] if the YAML is malformed
    pub fn from_yaml_str(yaml: &str) -> E2eResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Loads a YAML config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> E2eResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serializes the config to YAML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_yaml(&self) -> E2eResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Applies [`BASE_URL_ENV`] from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_url(std::env::var(BASE_URL_ENV).ok())
    }

    /// Applies an environment-supplied base URL; blank values are ignored
    #[must_use]
    pub fn with_env_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = Some(url);
        }
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the application origin
    #[must_use]
    pub fn with_app_origin(mut self, origin: impl Into<String>) -> Self {
        self.app_origin = origin.into();
        self
    }

    /// Set the command timeout
    #[must_use]
    pub const fn with_command_timeout_ms(mut self, ms: u64) -> Self {
        self.default_command_timeout_ms = ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set run-mode retries
    #[must_use]
    pub const fn with_retries(mut self, run_mode: u32) -> Self {
        self.retries.run_mode = run_mode;
        self
    }

    /// Set the report directory
    #[must_use]
    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report.report_dir = dir.into();
        self
    }

    /// The base URL, or the fatal precondition error when absent
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::MissingBaseUrl`] if no base URL is configured
    pub fn require_base_url(&self) -> E2eResult<&str> {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| E2eError::MissingBaseUrl {
                var: BASE_URL_ENV.to_string(),
            })
    }

    /// Absolute URL of an application path
    #[must_use]
    pub fn app_url(&self, path: &str) -> String {
        format!("{}{path}", self.app_origin.trim_end_matches('/'))
    }

    /// Wait for locators and URL assertions
    #[must_use]
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.default_command_timeout_ms)
    }

    /// Polling interval while waiting
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Total attempts per scenario in headless runs
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.retries.run_mode.saturating_add(1)
    }
}
