//! Built-in scenarios against the in-memory application.

#![allow(clippy::unwrap_used)]

use swiftrecipe_e2e::fake::{INVALID_CREDENTIALS_MESSAGE, LOGGED_OUT_MESSAGE};
use swiftrecipe_e2e::prelude::*;

const LOGIN_URL: &str = "http://swift-recipe:8080/login";

fn config() -> RunnerConfig {
    RunnerConfig::default()
        .with_base_url(LOGIN_URL)
        .with_command_timeout_ms(200)
        .with_poll_interval_ms(10)
}

fn runner() -> ScenarioRunner {
    ScenarioRunner::with_builtin_steps(config()).unwrap()
}

fn julia() -> Account {
    Account::new("Julia", "Child", "julia@example.com", "jchild", "bonappetit")
}

fn jacques() -> SignupForm {
    SignupForm::new("Jacques", "Pepin", "jacques@example.com", "jpepin", "omelette")
}

#[tokio::test]
async fn test_login_success() {
    let mut app = FakeSwiftRecipe::default().with_account(julia());
    let report = runner()
        .run(&mut app, &[scenario::login_success("jchild", "bonappetit")])
        .await;
    assert!(report.all_passed(), "{report:#?}");
    assert_eq!(report.scenarios[0].attempt_count(), 1);
    assert_eq!(app.session(), Some("jchild"));
}

#[tokio::test]
async fn test_login_failure_shows_banner() {
    let mut app = FakeSwiftRecipe::default().with_account(julia());
    let report = runner()
        .run(&mut app, &[scenario::login_failure("jchild", "soggy-souffle")])
        .await;
    assert!(report.all_passed(), "{report:#?}");
    let banner = app
        .query("body > div:nth-child(1) > div")
        .await
        .unwrap()
        .unwrap();
    assert!(banner.contains_text(INVALID_CREDENTIALS_MESSAGE));
}

#[tokio::test]
async fn test_login_success_steps_fail_with_wrong_password() {
    let mut app = FakeSwiftRecipe::default().with_account(julia());
    let report = runner()
        .run(&mut app, &[scenario::login_success("jchild", "soggy-souffle")])
        .await;
    assert!(!report.all_passed());
    let scenario = &report.scenarios[0];
    assert_eq!(scenario.attempt_count(), 2);
    let failure = scenario.attempts[1].failure().unwrap();
    assert_eq!(failure.step, "Then User Sees the SwiftRecipe Home Page");
    assert!(failure.error.as_deref().unwrap().contains("Timed out after 200ms"));
}

#[tokio::test]
async fn test_logout() {
    let mut app = FakeSwiftRecipe::default().with_account(julia());
    let report = runner()
        .run(
            &mut app,
            &[scenario::logout("jchild", "bonappetit", LOGGED_OUT_MESSAGE)],
        )
        .await;
    assert!(report.all_passed(), "{report:#?}");
    assert_eq!(app.session(), None);
    assert_eq!(
        app.current_url().await.unwrap(),
        "http://swift-recipe:8080/login?logout"
    );
}

#[tokio::test]
async fn test_signup_success_then_login() {
    let mut app = FakeSwiftRecipe::default();
    let report = runner()
        .run(
            &mut app,
            &[
                scenario::signup_success(&jacques()),
                scenario::login_success("jpepin", "omelette"),
            ],
        )
        .await;
    assert!(report.all_passed(), "{report:#?}");
    assert_eq!(report.passed_count(), 2);
    assert_eq!(app.accounts().len(), 1);
}

#[tokio::test]
async fn test_signup_validation_messages() {
    let cases = [
        (SignupForm { first_name: String::new(), ..jacques() }, "First name cannot be blank"),
        (SignupForm { last_name: String::new(), ..jacques() }, "Last name cannot be blank"),
        (SignupForm { email: String::new(), ..jacques() }, "Email address cannot be blank"),
        (SignupForm { email: "jacques-at-home".to_string(), ..jacques() }, "Please enter a valid email"),
        (SignupForm { email: "   ".to_string(), ..jacques() }, "Email address cannot be blank"),
        (SignupForm { email: "   ".to_string(), ..jacques() }, "Please enter a valid email"),
        (SignupForm { email: "julia@example.com".to_string(), ..jacques() }, "An account already exists with this email"),
        (SignupForm { username: String::new(), ..jacques() }, "Username cannot be blank"),
        (SignupForm { username: "jchild".to_string(), ..jacques() }, "This username is already taken"),
        (SignupForm { password: String::new(), ..jacques() }, "Password cannot be blank"),
    ];

    let runner = runner();
    for (form, message) in cases {
        let mut app = FakeSwiftRecipe::default().with_account(julia());
        let report = runner
            .run(&mut app, &[scenario::signup_validation(&form, message)])
            .await;
        assert!(report.all_passed(), "{message}: {report:#?}");
        assert_eq!(app.accounts().len(), 1, "{message}");
    }
}

#[tokio::test]
async fn test_wrong_validation_message_fails() {
    let mut app = FakeSwiftRecipe::default().with_account(julia());
    let form = SignupForm { username: String::new(), ..jacques() };
    let report = runner()
        .run(&mut app, &[scenario::signup_validation(&form, "Password cannot be blank")])
        .await;
    assert!(!report.all_passed());
}

#[tokio::test]
async fn test_missing_base_url_aborts_before_browser() {
    let runner = ScenarioRunner::with_builtin_steps(RunnerConfig::default()).unwrap();
    let mut app = FakeSwiftRecipe::default().with_account(julia());
    let report = runner
        .run(
            &mut app,
            &[
                scenario::login_success("jchild", "bonappetit"),
                scenario::logout("jchild", "bonappetit", LOGGED_OUT_MESSAGE),
            ],
        )
        .await;

    assert!(!report.all_passed());
    assert!(report.scenarios.is_empty());
    assert!(report.aborted.unwrap().contains(BASE_URL_ENV));
    assert!(app.history().is_empty());
}

#[tokio::test]
async fn test_base_url_from_environment_value() {
    let config = RunnerConfig::default()
        .with_env_url(Some(LOGIN_URL.to_string()))
        .with_command_timeout_ms(200);
    let runner = ScenarioRunner::with_builtin_steps(config).unwrap();
    let mut app = FakeSwiftRecipe::default().with_account(julia());
    let report = runner
        .run(&mut app, &[scenario::login_success("jchild", "bonappetit")])
        .await;
    assert!(report.all_passed(), "{report:#?}");
}

#[tokio::test]
async fn test_flaky_visit_passes_on_retry() {
    let mut app = FakeSwiftRecipe::default()
        .with_account(julia())
        .with_failing_visits(1);
    let report = runner()
        .run(&mut app, &[scenario::login_success("jchild", "bonappetit")])
        .await;

    assert!(report.all_passed(), "{report:#?}");
    let scenario = &report.scenarios[0];
    assert!(scenario.flaky());
    let first = &scenario.attempts[0];
    assert_eq!(first.steps[0].status, StepStatus::Failed);
    assert!(first.steps[1..].iter().all(|s| s.status == StepStatus::Skipped));
}

#[tokio::test]
async fn test_retries_exhausted() {
    let runner = ScenarioRunner::with_builtin_steps(config().with_retries(2)).unwrap();
    let mut app = FakeSwiftRecipe::default()
        .with_account(julia())
        .with_failing_visits(5);
    let report = runner
        .run(&mut app, &[scenario::login_success("jchild", "bonappetit")])
        .await;
    assert!(!report.all_passed());
    assert_eq!(report.scenarios[0].attempt_count(), 3);
    assert_eq!(app.history().len(), 3);
}

#[tokio::test]
async fn test_hidden_field_times_out() {
    let mut app = FakeSwiftRecipe::default().with_account(julia());
    app.hide("input[id='username']");
    let runner = ScenarioRunner::with_builtin_steps(config().with_retries(0)).unwrap();
    let report = runner
        .run(&mut app, &[scenario::login_success("jchild", "bonappetit")])
        .await;

    let attempt = &report.scenarios[0].attempts[0];
    let failure = attempt.failure().unwrap();
    assert_eq!(
        failure.error.as_deref(),
        Some("Timed out after 200ms waiting for input[id='username'] to be visible")
    );
    assert!(failure.duration_ms >= 200);
    assert!(!app.was_called("type:"));
}

#[tokio::test]
async fn test_scenario_from_lines() {
    let text = "
        Given User Visits SwiftRecipe Login Page
        When User Clicks the Signup Link
        Then User Sees the SwiftRecipe Signup Page
    ";
    let scenario = Scenario::from_lines("Open Signup", text).unwrap();
    let mut app = FakeSwiftRecipe::default();
    let report = runner().run(&mut app, &[scenario]).await;
    assert!(report.all_passed(), "{report:#?}");
}

#[tokio::test]
async fn test_report_written_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = config().with_report_dir(dir.path());
    let runner = ScenarioRunner::with_builtin_steps(config).unwrap();
    let mut app = FakeSwiftRecipe::default().with_account(julia());
    let report = runner
        .run(
            &mut app,
            &[
                scenario::login_success("jchild", "bonappetit"),
                scenario::login_failure("jchild", "nope"),
            ],
        )
        .await;

    let path = report
        .write_json(&runner.config().report)
        .unwrap()
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["scenarios"].as_array().unwrap().len(), 2);
    assert_eq!(json["scenarios"][0]["name"], "Successful Login");
    assert_eq!(json["scenarios"][1]["attempts"][0]["steps"][4]["status"], "passed");
}
