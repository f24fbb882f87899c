//! Scenario and run reports.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::ReportConfig;
use crate::result::E2eResult;

/// File name used when reports overwrite each other
pub const REPORT_FILE: &str = "report.json";

/// Outcome of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// All actions succeeded
    Passed,
    /// An action failed
    Failed,
    /// Not run because an earlier step failed
    Skipped,
}

/// Result of one step in one attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Step as written, keyword included
    pub step: String,
    /// Outcome
    pub status: StepStatus,
    /// Error message if failed
    pub error: Option<String>,
    /// Time spent in milliseconds
    pub duration_ms: u64,
}

impl StepOutcome {
    /// A passed step
    #[must_use]
    pub fn passed(step: impl Into<String>, duration: Duration) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Passed,
            error: None,
            duration_ms: millis(duration),
        }
    }

    /// A failed step
    #[must_use]
    pub fn failed(step: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Failed,
            error: Some(error.into()),
            duration_ms: millis(duration),
        }
    }

    /// A step that never ran
    #[must_use]
    pub fn skipped(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Skipped,
            error: None,
            duration_ms: 0,
        }
    }
}

/// One attempt at a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptReport {
    /// 1-based attempt number
    pub attempt: u32,
    /// Step outcomes in order
    pub steps: Vec<StepOutcome>,
    /// Time spent in milliseconds
    pub duration_ms: u64,
}

impl AttemptReport {
    /// Whether every step passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.status == StepStatus::Passed)
    }

    /// First failed step
    #[must_use]
    pub fn failure(&self) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.status == StepStatus::Failed)
    }
}

/// All attempts at one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: String,
    /// Attempts in order
    pub attempts: Vec<AttemptReport>,
    /// Error that stopped the scenario before any attempt ran
    pub error: Option<String>,
}

impl ScenarioReport {
    /// Create an empty report
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attempts: Vec::new(),
            error: None,
        }
    }

    /// Whether the last attempt passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.attempts.last().is_some_and(AttemptReport::passed)
    }

    /// Number of attempts made
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    /// Whether the scenario passed only after a retry
    #[must_use]
    pub fn flaky(&self) -> bool {
        self.passed() && self.attempts.len() > 1
    }
}

/// Reports for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Scenario reports in run order
    pub scenarios: Vec<ScenarioReport>,
    /// Error that aborted the run
    pub aborted: Option<String>,
    /// Total time in milliseconds
    pub duration_ms: u64,
}

impl RunReport {
    /// Check if every scenario passed and the run was not aborted
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.aborted.is_none() && self.scenarios.iter().all(ScenarioReport::passed)
    }

    /// Count passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.scenarios.iter().filter(|s| s.passed()).count()
    }

    /// Count failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    /// Get total scenario count
    #[must_use]
    pub fn total(&self) -> usize {
        self.scenarios.len()
    }

    /// Failed scenarios
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioReport> {
        self.scenarios.iter().filter(|s| !s.passed()).collect()
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> E2eResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the JSON report into the configured directory
    ///
    /// Returns the written path, or `None` when JSON output is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written
    pub fn write_json(&self, config: &ReportConfig) -> E2eResult<Option<PathBuf>> {
        if !config.json {
            return Ok(None);
        }
        std::fs::create_dir_all(&config.report_dir)?;
        let path = if config.overwrite {
            config.report_dir.join(REPORT_FILE)
        } else {
            next_numbered(&config.report_dir)
        };
        std::fs::write(&path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "report written");
        Ok(Some(path))
    }
}

fn next_numbered(dir: &Path) -> PathBuf {
    (1_u32..)
        .map(|n| dir.join(format!("report_{n:03}.json")))
        .find(|path| !path.exists())
        .unwrap_or_else(|| dir.join(REPORT_FILE))
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn attempt(attempt: u32, steps: Vec<StepOutcome>) -> AttemptReport {
        AttemptReport {
            attempt,
            steps,
            duration_ms: 5,
        }
    }

    fn flaky_scenario() -> ScenarioReport {
        let mut report = ScenarioReport::new("Login Success");
        report.attempts.push(attempt(
            1,
            vec![
                StepOutcome::failed("Given User Visits SwiftRecipe Login Page", "refused", Duration::ZERO),
                StepOutcome::skipped("When User Clicks Sign In Button"),
            ],
        ));
        report.attempts.push(attempt(
            2,
            vec![
                StepOutcome::passed("Given User Visits SwiftRecipe Login Page", Duration::from_millis(3)),
                StepOutcome::passed("When User Clicks Sign In Button", Duration::from_millis(2)),
            ],
        ));
        report
    }

    #[test]
    fn test_scenario_passes_on_last_attempt() {
        let report = flaky_scenario();
        assert!(report.passed());
        assert!(report.flaky());
        assert_eq!(report.attempt_count(), 2);
        assert!(report.attempts[0].failure().is_some());
        assert!(report.attempts[1].failure().is_none());
    }

    #[test]
    fn test_scenario_without_attempts_fails() {
        let mut report = ScenarioReport::new("Signup");
        assert!(!report.passed());
        report.error = Some("Undefined step".to_string());
        assert!(!report.passed());
    }

    #[test]
    fn test_run_totals() {
        let run = RunReport {
            scenarios: vec![flaky_scenario(), ScenarioReport::new("Logout")],
            aborted: None,
            duration_ms: 10,
        };
        assert_eq!(run.total(), 2);
        assert_eq!(run.passed_count(), 1);
        assert_eq!(run.failed_count(), 1);
        assert_eq!(run.failures()[0].name, "Logout");
        assert!(!run.all_passed());
    }

    #[test]
    fn test_aborted_run_never_passes() {
        let run = RunReport {
            aborted: Some("Base URL is not configured".to_string()),
            ..RunReport::default()
        };
        assert!(!run.all_passed());
    }

    #[test]
    fn test_json_shape() {
        let json = StepOutcome::skipped("Then User Clicks Logout Button");
        let value = serde_json::to_value(&json).unwrap();
        assert_eq!(value["status"], "skipped");
        assert_eq!(value["duration_ms"], 0);
    }

    #[test]
    fn test_write_json_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            report_dir: dir.path().join("reports"),
            ..ReportConfig::default()
        };
        let run = RunReport {
            scenarios: vec![flaky_scenario()],
            ..RunReport::default()
        };
        let first = run.write_json(&config).unwrap().unwrap();
        let second = run.write_json(&config).unwrap().unwrap();
        assert_eq!(first, second);
        assert!(first.ends_with(REPORT_FILE));
        let parsed: RunReport =
            serde_json::from_str(&std::fs::read_to_string(first).unwrap()).unwrap();
        assert_eq!(parsed, run);
    }

    #[test]
    fn test_write_json_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            report_dir: dir.path().to_path_buf(),
            overwrite: false,
            json: true,
        };
        let run = RunReport::default();
        let first = run.write_json(&config).unwrap().unwrap();
        let second = run.write_json(&config).unwrap().unwrap();
        assert!(first.ends_with("report_001.json"));
        assert!(second.ends_with("report_002.json"));
    }

    #[test]
    fn test_write_json_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            report_dir: dir.path().to_path_buf(),
            overwrite: true,
            json: false,
        };
        assert_eq!(RunReport::default().write_json(&config).unwrap(), None);
        assert!(!dir.path().join(REPORT_FILE).exists());
    }
}
