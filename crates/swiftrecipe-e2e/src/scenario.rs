//! Scenarios: named, ordered step sentences.
//!
//! The built-in scenarios below cover the login, logout and signup features
//! using the built-in step sentences.

use serde::{Deserialize, Serialize};

use crate::result::E2eResult;
use crate::step::{Keyword, Step};

/// A named sequence of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name
    pub name: String,
    /// Steps in order
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Create an empty scenario
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Parses one step per non-blank line
    ///
    /// # Errors
    ///
    /// Returns [`crate::E2eError::MissingKeyword`] for a line without a keyword
    pub fn from_lines(name: impl Into<String>, lines: &str) -> E2eResult<Self> {
        let steps = lines
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Step::parse)
            .collect::<E2eResult<Vec<_>>>()?;
        Ok(Self {
            name: name.into(),
            steps,
        })
    }

    /// Add a step
    #[must_use]
    pub fn step(mut self, keyword: Keyword, text: impl Into<String>) -> Self {
        self.steps.push(Step::new(keyword, text));
        self
    }

    /// Add a `Given` step
    #[must_use]
    pub fn given(self, text: impl Into<String>) -> Self {
        self.step(Keyword::Given, text)
    }

    /// Add a `When` step
    #[must_use]
    pub fn when(self, text: impl Into<String>) -> Self {
        self.step(Keyword::When, text)
    }

    /// Add a `Then` step
    #[must_use]
    pub fn then(self, text: impl Into<String>) -> Self {
        self.step(Keyword::Then, text)
    }

    /// Add an `And` step
    #[must_use]
    pub fn and(self, text: impl Into<String>) -> Self {
        self.step(Keyword::And, text)
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the scenario has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Quotes a step argument, preferring double quotes.
///
/// Single quotes are used when only `"` occurs in `arg`; with both kinds
/// present, each `"` is escaped with a backslash.
#[must_use]
pub fn quote(arg: &str) -> String {
    match (arg.contains('"'), arg.contains('\'')) {
        (true, false) => format!("'{arg}'"),
        (true, true) => format!("\"{}\"", arg.replace('"', "\\\"")),
        (false, _) => format!("\"{arg}\""),
    }
}

/// Values typed into the signup form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl SignupForm {
    /// Create a form
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

fn sign_in(name: &str, username: &str, password: &str) -> Scenario {
    Scenario::new(name)
        .given("User Visits SwiftRecipe Login Page")
        .when(format!(
            "User Navigates to Username Field and Types in {}",
            quote(username)
        ))
        .and(format!(
            "User Navigates to Password Field and Types in {}",
            quote(password)
        ))
        .and("User Clicks Sign In Button")
}

fn fill_signup(name: &str, form: &SignupForm) -> Scenario {
    Scenario::new(name)
        .given("User Visits SwiftRecipe Login Page")
        .when("User Clicks the Signup Link")
        .then("User Sees the SwiftRecipe Signup Page")
        .and(format!(
            "User Navigates to First Name Field and Types in {}",
            quote(&form.first_name)
        ))
        .and(format!(
            "User Navigates to Last Name Field and Types in {}",
            quote(&form.last_name)
        ))
        .and(format!(
            "User Navigates to Email Field and Types in {}",
            quote(&form.email)
        ))
        .and(format!(
            "User Navigates to Signup Username Field and Types in {}",
            quote(&form.username)
        ))
        .and(format!(
            "User Navigates to Signup Password Field and Types in {}",
            quote(&form.password)
        ))
        .and("User Clicks Create Account Button")
}

/// Valid credentials reach the home page
#[must_use]
pub fn login_success(username: &str, password: &str) -> Scenario {
    sign_in("Successful Login", username, password).then("User Sees the SwiftRecipe Home Page")
}

/// Wrong credentials show the invalid banner
#[must_use]
pub fn login_failure(username: &str, password: &str) -> Scenario {
    sign_in("Unsuccessful Login", username, password)
        .then("User Sees the Invalid Username or Password Banner")
}

/// A signed-in user logs out
#[must_use]
pub fn logout(username: &str, password: &str, message: &str) -> Scenario {
    sign_in("Successful Logout", username, password)
        .then("User Sees the SwiftRecipe Home Page")
        .and("User Clicks Logout Button")
        .then("User Sees the SwiftRecipe Login Page")
        .and(format!("User Sees Logout Message {}", quote(message)))
}

/// A complete form creates an account and returns to login
#[must_use]
pub fn signup_success(form: &SignupForm) -> Scenario {
    fill_signup("Successful Signup", form).then("User Sees the SwiftRecipe Signup Home Page")
}

/// An invalid form shows `message`
#[must_use]
pub fn signup_validation(form: &SignupForm, message: &str) -> Scenario {
    fill_signup("Signup Validation", form).then(format!(
        "User Sees the Validation Error Message {}",
        quote(message)
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::steps;

    #[test]
    fn test_quote() {
        assert_eq!(quote("chef"), "\"chef\"");
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("say \"hi\""), "'say \"hi\"'");
        assert_eq!(quote("it's \"x\""), r#""it's \"x\"""#);
    }

    #[test]
    fn test_password_with_both_quote_kinds_resolves() {
        let registry = steps::registry().unwrap();
        let scenario = login_success("jchild", "it's \"x\"");
        let resolved = registry.resolve(&scenario.steps[2]).unwrap();
        assert_eq!(resolved.args, vec!["it's \"x\"".to_string()]);
    }

    #[test]
    fn test_from_lines() {
        let scenario = Scenario::from_lines(
            "Logout",
            "Given User Visits SwiftRecipe Login Page\n\n  Then User Clicks Logout Button\n",
        )
        .unwrap();
        assert_eq!(scenario.len(), 2);
        assert_eq!(scenario.steps[1].keyword, Keyword::Then);
    }

    #[test]
    fn test_from_lines_rejects_bare_sentence() {
        assert!(Scenario::from_lines("Broken", "User Clicks Logout Button").is_err());
        assert!(Scenario::new("Empty").is_empty());
    }

    #[test]
    fn test_builtin_scenarios_resolve() {
        let registry = steps::registry().unwrap();
        let form = SignupForm::new("Jacques", "Pepin", "jp@example.com", "jpepin", "omelette");
        let scenarios = [
            login_success("jchild", "bonappetit"),
            login_failure("jchild", "wrong"),
            logout("jchild", "bonappetit", "You have been logged out."),
            signup_success(&form),
            signup_validation(&SignupForm::default(), "Username cannot be blank"),
        ];
        for scenario in &scenarios {
            for step in &scenario.steps {
                registry.resolve(step).unwrap();
            }
        }
    }

    #[test]
    fn test_quoted_password_survives_resolution() {
        let registry = steps::registry().unwrap();
        let scenario = login_success("jchild", "p\"w");
        let resolved = registry.resolve(&scenario.steps[2]).unwrap();
        assert_eq!(resolved.args, vec!["p\"w".to_string()]);
    }
}
