//! In-memory SwiftRecipe application
//!
//! [`FakeSwiftRecipe`] implements [`BrowserDriver`] over a model of the
//! login, home and signup pages, so the built-in steps and scenarios can
//! run without a browser or a server. It answers exactly the selectors the
//! built-in steps use, applies the same sign-in and signup rules as the
//! application, and records every call for verification.

use async_trait::async_trait;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::config::DEFAULT_APP_ORIGIN;
use crate::driver::{BrowserDriver, ElementHandle};
use crate::result::{E2eError, E2eResult};
use crate::steps::login::{LOGIN_BANNER, PASSWORD_INPUT, SIGN_IN_BUTTON, USERNAME_INPUT};
use crate::steps::logout::LOGOUT_LINK;
use crate::steps::signup::{
    CREATE_ACCOUNT_BUTTON, EMAIL_INPUT, FIRST_NAME_INPUT, LAST_NAME_INPUT, SIGNUP_LINK,
    VALIDATION_ERROR,
};

/// Banner shown after a failed sign-in
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid Username or Password";
/// Banner shown after logging out
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

/// Email format accepted at signup
const EMAIL_PATTERN: &str = r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,3}$";

fn email_regex() -> E2eResult<&'static Regex> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|err| E2eError::driver(format!("email pattern does not compile: {err}")))
}

/// URL reported before the first visit
const BLANK_URL: &str = "about:blank";

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Login name
    pub username: String,
    /// Password
    pub password: String,
}

impl Account {
    /// Create an account
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Login,
    Home,
    Signup,
}

/// In-memory application driven through [`BrowserDriver`]
#[derive(Debug)]
pub struct FakeSwiftRecipe {
    origin: String,
    page: Option<Page>,
    url: String,
    banner: Option<&'static str>,
    session: Option<String>,
    accounts: Vec<Account>,
    form: HashMap<String, String>,
    focused: Option<String>,
    errors: Vec<String>,
    hidden: HashSet<String>,
    failing_visits: u32,
    call_history: Vec<String>,
}

impl Default for FakeSwiftRecipe {
    fn default() -> Self {
        Self::new(DEFAULT_APP_ORIGIN)
    }
}

impl FakeSwiftRecipe {
    /// Create an application served from `origin` with no accounts
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            page: None,
            url: BLANK_URL.to_string(),
            banner: None,
            session: None,
            accounts: Vec::new(),
            form: HashMap::new(),
            focused: None,
            errors: Vec::new(),
            hidden: HashSet::new(),
            failing_visits: 0,
            call_history: Vec::new(),
        }
    }

    /// Add an existing account
    #[must_use]
    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.push(account);
        self
    }

    /// Make the next `count` visits fail as if the server were down
    #[must_use]
    pub const fn with_failing_visits(mut self, count: u32) -> Self {
        self.failing_visits = count;
        self
    }

    /// Render every element matching `selector` hidden
    pub fn hide(&mut self, selector: impl Into<String>) {
        self.hidden.insert(selector.into());
    }

    /// Registered accounts
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Username of the signed-in user
    #[must_use]
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Selector of the focused element
    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Recorded driver calls, e.g. `visit:<url>` or `click:<selector>`
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Check if a driver method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    fn navigate(&mut self, path: &str) -> E2eResult<()> {
        let (page, banner, path) = match path {
            "/login" => (Page::Login, None, path),
            "/login?error" => (Page::Login, Some(INVALID_CREDENTIALS_MESSAGE), path),
            "/login?logout" => (Page::Login, Some(LOGGED_OUT_MESSAGE), path),
            "/" if self.session.is_some() => (Page::Home, None, path),
            "/" => (Page::Login, None, "/login"),
            "/signup" => (Page::Signup, None, path),
            _ => {
                return Err(E2eError::NavigationFailed {
                    url: format!("{}{path}", self.origin),
                    message: "404 Not Found".to_string(),
                })
            }
        };
        self.page = Some(page);
        self.banner = banner;
        self.url = format!("{}{path}", self.origin);
        self.form.clear();
        self.focused = None;
        self.errors.clear();
        Ok(())
    }

    fn elements(&self) -> Vec<ElementHandle> {
        let input = |selector: &str| {
            let handle = ElementHandle::new(selector, "input");
            match self.form.get(selector) {
                Some(value) => handle.with_value(value.clone()),
                None => handle.with_value(""),
            }
        };

        let mut elements = Vec::new();
        match self.page {
            None => {}
            Some(Page::Login) => {
                if let Some(banner) = self.banner {
                    elements.push(ElementHandle::new(LOGIN_BANNER, "div").with_text(banner));
                }
                elements.push(input(USERNAME_INPUT));
                elements.push(input(PASSWORD_INPUT));
                elements.push(ElementHandle::new(SIGN_IN_BUTTON, "input").with_value("Sign In"));
                elements.push(ElementHandle::new(SIGNUP_LINK, "a").with_text("Sign up"));
            }
            Some(Page::Home) => {
                elements.push(ElementHandle::new(LOGOUT_LINK, "a").with_text("Logout"));
            }
            Some(Page::Signup) => {
                for selector in [
                    FIRST_NAME_INPUT,
                    LAST_NAME_INPUT,
                    EMAIL_INPUT,
                    USERNAME_INPUT,
                    PASSWORD_INPUT,
                ] {
                    elements.push(input(selector));
                }
                elements.push(
                    ElementHandle::new(CREATE_ACCOUNT_BUTTON, "input").with_value("Create Account"),
                );
                for error in &self.errors {
                    elements.push(ElementHandle::new(VALIDATION_ERROR, "p").with_text(error.clone()));
                }
            }
        }

        elements
            .into_iter()
            .map(|e| {
                let visible = !self.hidden.contains(&e.selector);
                e.with_visible(visible)
            })
            .collect()
    }

    fn find_visible(&self, selector: &str) -> E2eResult<ElementHandle> {
        self.elements()
            .into_iter()
            .find(|e| e.selector == selector && e.visible)
            .ok_or_else(|| E2eError::ElementNotFound {
                selector: selector.to_string(),
            })
    }

    fn field(&self, selector: &str) -> &str {
        self.form.get(selector).map_or("", String::as_str)
    }

    fn sign_in(&mut self) -> E2eResult<()> {
        let username = self.field(USERNAME_INPUT);
        let password = self.field(PASSWORD_INPUT);
        let user = self
            .accounts
            .iter()
            .find(|a| a.username == username && a.password == password)
            .map(|a| a.username.clone());

        match user {
            Some(user) => {
                tracing::debug!(user = %user, "signed in");
                self.session = Some(user);
                self.navigate("/")
            }
            None => self.navigate("/login?error"),
        }
    }

    /// Messages for every constraint the account violates, in form order
    fn signup_errors(&self, account: &Account) -> E2eResult<Vec<String>> {
        let mut errors = Vec::new();
        if account.first_name.trim().is_empty() {
            errors.push("First name cannot be blank");
        }
        if account.last_name.trim().is_empty() {
            errors.push("Last name cannot be blank");
        }
        if account.email.trim().is_empty() {
            errors.push("Email address cannot be blank");
        }
        // An empty value satisfies the format rule
        if !account.email.is_empty() && !email_regex()?.is_match(&account.email) {
            errors.push("Please enter a valid email");
        }
        if self
            .accounts
            .iter()
            .any(|a| a.email.eq_ignore_ascii_case(&account.email))
        {
            errors.push("An account already exists with this email");
        }
        if account.username.trim().is_empty() {
            errors.push("Username cannot be blank");
        }
        if self.accounts.iter().any(|a| a.username == account.username) {
            errors.push("This username is already taken");
        }
        if account.password.trim().is_empty() {
            errors.push("Password cannot be blank");
        }
        Ok(errors.into_iter().map(str::to_string).collect())
    }

    fn create_account(&mut self) -> E2eResult<()> {
        let account = Account::new(
            self.field(FIRST_NAME_INPUT),
            self.field(LAST_NAME_INPUT),
            self.field(EMAIL_INPUT),
            self.field(USERNAME_INPUT),
            self.field(PASSWORD_INPUT),
        );
        let errors = self.signup_errors(&account)?;
        if errors.is_empty() {
            tracing::debug!(user = %account.username, "account created");
            self.accounts.push(account);
            self.navigate("/login")
        } else {
            // Re-rendered form keeps the typed values
            self.errors = errors;
            self.focused = None;
            Ok(())
        }
    }
}

#[async_trait]
impl BrowserDriver for FakeSwiftRecipe {
    async fn visit(&mut self, url: &str) -> E2eResult<()> {
        self.call_history.push(format!("visit:{url}"));
        if self.failing_visits > 0 {
            self.failing_visits -= 1;
            return Err(E2eError::NavigationFailed {
                url: url.to_string(),
                message: "connection refused".to_string(),
            });
        }
        let path = url
            .strip_prefix(self.origin.as_str())
            .ok_or_else(|| E2eError::NavigationFailed {
                url: url.to_string(),
                message: format!("host is not {}", self.origin),
            })?;
        let path = if path.is_empty() { "/" } else { path };
        self.navigate(path)
    }

    async fn query_all(&mut self, selector: &str) -> E2eResult<Vec<ElementHandle>> {
        self.call_history.push(format!("query:{selector}"));
        Ok(self
            .elements()
            .into_iter()
            .filter(|e| e.selector == selector)
            .collect())
    }

    async fn focus(&mut self, selector: &str) -> E2eResult<()> {
        self.call_history.push(format!("focus:{selector}"));
        self.find_visible(selector)?;
        self.focused = Some(selector.to_string());
        Ok(())
    }

    async fn type_text(&mut self, selector: &str, text: &str) -> E2eResult<()> {
        self.call_history.push(format!("type:{selector}"));
        let element = self.find_visible(selector)?;
        if element.tag_name != "input" {
            return Err(E2eError::driver(format!("{selector} is not typeable")));
        }
        self.form.entry(selector.to_string()).or_default().push_str(text);
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> E2eResult<()> {
        self.call_history.push(format!("click:{selector}"));
        self.find_visible(selector)?;
        match (self.page, selector) {
            (Some(Page::Login), SIGN_IN_BUTTON) => self.sign_in(),
            (Some(Page::Login), SIGNUP_LINK) => self.navigate("/signup"),
            (Some(Page::Home), LOGOUT_LINK) => {
                self.session = None;
                self.navigate("/login?logout")
            }
            (Some(Page::Signup), CREATE_ACCOUNT_BUTTON) => self.create_account(),
            _ => Ok(()),
        }
    }

    async fn current_url(&mut self) -> E2eResult<String> {
        Ok(self.url.clone())
    }
}
