//! Scenario runner
//!
//! Resolves every step of a scenario up front, then executes the action
//! plans in order against a [`BrowserDriver`]. The first failing step fails
//! the attempt and the remaining steps are skipped. Failed scenarios are
//! retried from the first step up to `retries.run_mode` times. A missing
//! base URL aborts the whole run before the browser is touched.

use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::config::RunnerConfig;
use crate::driver::{BrowserDriver, ElementHandle};
use crate::locator::{Action, Condition, Locator, UrlRef};
use crate::report::{AttemptReport, RunReport, ScenarioReport, StepOutcome};
use crate::result::{E2eError, E2eResult};
use crate::scenario::Scenario;
use crate::step::{ResolvedStep, StepRegistry};
use crate::steps;

/// Runs scenarios against a driver
#[derive(Debug)]
pub struct ScenarioRunner {
    config: RunnerConfig,
    registry: StepRegistry,
}

impl ScenarioRunner {
    /// Create a runner over `registry`
    #[must_use]
    pub const fn new(config: RunnerConfig, registry: StepRegistry) -> Self {
        Self { config, registry }
    }

    /// Create a runner with the built-in login, logout and signup steps
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in steps fail to register
    pub fn with_builtin_steps(config: RunnerConfig) -> E2eResult<Self> {
        Ok(Self::new(config, steps::registry()?))
    }

    /// Runner configuration
    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Step registry
    #[must_use]
    pub const fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Runs `scenarios` in order
    ///
    /// A fatal error stops the run; the scenarios run so far are kept and
    /// the error is recorded in [`RunReport::aborted`].
    pub async fn run<D: BrowserDriver>(&self, driver: &mut D, scenarios: &[Scenario]) -> RunReport {
        let start = Instant::now();
        let mut report = RunReport::default();

        for scenario in scenarios {
            match self.run_scenario(driver, scenario).await {
                Ok(scenario_report) => report.scenarios.push(scenario_report),
                Err(err) => {
                    error!(scenario = %scenario.name, error = %err, "run aborted");
                    report.aborted = Some(err.to_string());
                    break;
                }
            }
        }

        report.duration_ms = elapsed_ms(start);
        info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            aborted = report.aborted.is_some(),
            "run finished"
        );
        report
    }

    /// Runs one scenario with retries
    ///
    /// # Errors
    ///
    /// Returns only fatal errors such as a missing base URL; step failures
    /// are recorded in the report
    pub async fn run_scenario<D: BrowserDriver>(
        &self,
        driver: &mut D,
        scenario: &Scenario,
    ) -> E2eResult<ScenarioReport> {
        let mut report = ScenarioReport::new(&scenario.name);

        let resolved = match self.resolve(scenario) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(scenario = %scenario.name, error = %err, "scenario not runnable");
                report.error = Some(err.to_string());
                return Ok(report);
            }
        };

        let needs_base_url = resolved
            .iter()
            .flat_map(|step| &step.actions)
            .any(|action| matches!(action, Action::Visit(UrlRef::BaseUrl)));
        if needs_base_url {
            self.config.require_base_url()?;
        }

        let attempts = self.config.attempts();
        for attempt in 1..=attempts {
            info!(scenario = %scenario.name, attempt, "running scenario");
            let attempt_report = self.run_attempt(driver, attempt, &resolved).await?;
            let passed = attempt_report.passed();
            report.attempts.push(attempt_report);
            if passed {
                break;
            }
            if attempt < attempts {
                warn!(scenario = %scenario.name, attempt, "scenario failed, retrying");
            } else {
                warn!(scenario = %scenario.name, attempts, "scenario failed");
            }
        }
        Ok(report)
    }

    /// Resolves every step of `scenario`
    ///
    /// # Errors
    ///
    /// Returns the first undefined or ambiguous step
    pub fn resolve(&self, scenario: &Scenario) -> E2eResult<Vec<ResolvedStep>> {
        scenario
            .steps
            .iter()
            .map(|step| self.registry.resolve(step))
            .collect()
    }

    async fn run_attempt<D: BrowserDriver>(
        &self,
        driver: &mut D,
        attempt: u32,
        steps: &[ResolvedStep],
    ) -> E2eResult<AttemptReport> {
        let start = Instant::now();
        let mut outcomes = Vec::with_capacity(steps.len());
        let mut failed = false;

        for resolved in steps {
            let name = resolved.step.to_string();
            if failed {
                outcomes.push(StepOutcome::skipped(name));
                continue;
            }

            let step_start = Instant::now();
            match self.run_step(driver, resolved).await {
                Ok(()) => {
                    debug!(step = %name, "step passed");
                    outcomes.push(StepOutcome::passed(name, step_start.elapsed()));
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!(step = %name, error = %err, "step failed");
                    outcomes.push(StepOutcome::failed(name, err.to_string(), step_start.elapsed()));
                    failed = true;
                }
            }
        }

        Ok(AttemptReport {
            attempt,
            steps: outcomes,
            duration_ms: elapsed_ms(start),
        })
    }

    async fn run_step<D: BrowserDriver>(&self, driver: &mut D, step: &ResolvedStep) -> E2eResult<()> {
        for action in &step.actions {
            self.execute(driver, action).await?;
        }
        Ok(())
    }

    /// Executes one action
    ///
    /// # Errors
    ///
    /// Returns the driver's error, or [`E2eError::Timeout`] when an
    /// expectation is not met within the command timeout
    pub async fn execute<D: BrowserDriver>(&self, driver: &mut D, action: &Action) -> E2eResult<()> {
        match action {
            Action::Visit(target) => {
                let url = self.resolve_url(target)?;
                if matches!(target, UrlRef::BaseUrl) {
                    info!(url = %url, "visiting SwiftRecipe login page");
                }
                driver.visit(&url).await
            }
            Action::Expect { locator, condition } => {
                self.wait_for(driver, locator, condition).await
            }
            Action::Focus(locator) => driver.focus(locator.selector()).await,
            Action::Type { locator, text } => driver.type_text(locator.selector(), text).await,
            Action::Click(locator) => driver.click(locator.selector()).await,
            Action::ExpectUrl(target) => {
                let expected = self.resolve_url(target)?;
                self.wait_for_url(driver, &expected).await
            }
        }
    }

    /// Absolute URL for a reference
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::MissingBaseUrl`] for [`UrlRef::BaseUrl`] when no
    /// base URL is configured
    pub fn resolve_url(&self, target: &UrlRef) -> E2eResult<String> {
        match target {
            UrlRef::BaseUrl => self.config.require_base_url().map(str::to_string),
            UrlRef::AppPath(path) => Ok(self.config.app_url(path)),
            UrlRef::Absolute(url) => Ok(url.clone()),
        }
    }

    async fn wait_for<D: BrowserDriver>(
        &self,
        driver: &mut D,
        locator: &Locator,
        condition: &Condition,
    ) -> E2eResult<()> {
        let deadline = tokio::time::Instant::now() + self.config.command_timeout();
        loop {
            let elements = driver.query_all(locator.selector()).await?;
            if satisfies(&elements, condition) {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(E2eError::Timeout {
                    ms: self.config.default_command_timeout_ms,
                    waiting_for: format!("{locator} to {condition}"),
                });
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    async fn wait_for_url<D: BrowserDriver>(&self, driver: &mut D, expected: &str) -> E2eResult<()> {
        let deadline = tokio::time::Instant::now() + self.config.command_timeout();
        loop {
            let current = driver.current_url().await?;
            if current == expected {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(E2eError::Timeout {
                    ms: self.config.default_command_timeout_ms,
                    waiting_for: format!("url to equal {expected} (was {current})"),
                });
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }
}

/// Whether the matched elements meet `condition`
#[must_use]
pub fn satisfies(elements: &[ElementHandle], condition: &Condition) -> bool {
    match condition {
        Condition::Visible => elements.iter().any(|e| e.visible),
        Condition::ContainsText(text) => elements.iter().any(|e| e.visible && e.contains_text(text)),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
