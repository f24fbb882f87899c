//! SwiftRecipe end-to-end steps
//!
//! Behavioral step definitions for the login, logout and signup flows,
//! and a runner that executes them against a browser:
//!
//! - [`step`]: `{string}` patterns and the step registry
//! - [`steps`]: the built-in definitions and the selectors they use
//! - [`runner`]: auto-waiting execution with scenario retries
//! - [`fake`]: an in-memory application for running scenarios in tests
//! - `chromium` (feature `browser`): a Chromium driver over CDP
//!
//! # Example
//!
//! ```rust
//! use swiftrecipe_e2e::prelude::*;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = RunnerConfig::default().with_base_url("http://swift-recipe:8080/login");
//! let runner = ScenarioRunner::with_builtin_steps(config).unwrap();
//!
//! let mut app = FakeSwiftRecipe::default()
//!     .with_account(Account::new("Julia", "Child", "julia@example.com", "jchild", "bonappetit"));
//! let report = runner
//!     .run(&mut app, &[scenario::login_success("jchild", "bonappetit")])
//!     .await;
//! assert!(report.all_passed());
//! # });
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod driver;
pub mod fake;
pub mod locator;
pub mod logging;
pub mod report;
pub mod result;
pub mod runner;
pub mod scenario;
pub mod step;
pub mod steps;

#[cfg(feature = "browser")]
pub mod chromium;

pub use result::{E2eError, E2eResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{LogFormat, ReportConfig, Retries, RunnerConfig, Viewport, BASE_URL_ENV};
    pub use crate::driver::{BrowserDriver, ElementHandle};
    pub use crate::fake::{Account, FakeSwiftRecipe};
    pub use crate::locator::{Action, Condition, Locator, UrlRef};
    pub use crate::logging::init_tracing;
    pub use crate::report::{AttemptReport, RunReport, ScenarioReport, StepOutcome, StepStatus};
    pub use crate::result::{E2eError, E2eResult};
    pub use crate::runner::ScenarioRunner;
    pub use crate::scenario::{self, Scenario, SignupForm};
    pub use crate::step::{Keyword, Step, StepPattern, StepRegistry};

    #[cfg(feature = "browser")]
    pub use crate::chromium::{ChromiumDriver, ChromiumOptions};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let config = RunnerConfig::default();
        assert_eq!(config.attempts(), 2);
        assert_eq!(BASE_URL_ENV, "SWIFTRECIPE_URL");
        let registry = crate::steps::registry().unwrap();
        assert!(!registry.is_empty());
    }
}
