//! Login feature steps

use crate::locator::{click_visible, fill, Action, Locator, UrlRef};
use crate::result::E2eResult;
use crate::step::StepRegistry;

/// Username field on the login form
pub const USERNAME_INPUT: &str = "input[id='username']";
/// Password field on the login form
pub const PASSWORD_INPUT: &str = "input[id='password']";
/// Sign In submit button
pub const SIGN_IN_BUTTON: &str = "body > div > form > input[type=submit]:nth-child(4)";
/// Flash banner above the login form
pub const LOGIN_BANNER: &str = "body > div:nth-child(1) > div";

fn type_username(args: &[String]) -> Vec<Action> {
    fill(USERNAME_INPUT, &args[0])
}

fn type_password(args: &[String]) -> Vec<Action> {
    fill(PASSWORD_INPUT, &args[0])
}

fn click_sign_in(_: &[String]) -> Vec<Action> {
    click_visible(SIGN_IN_BUTTON)
}

fn sees_home_page(_: &[String]) -> Vec<Action> {
    vec![Action::ExpectUrl(UrlRef::AppPath("/".to_string()))]
}

fn sees_invalid_banner(_: &[String]) -> Vec<Action> {
    vec![Locator::css(LOGIN_BANNER).should_be_visible()]
}

/// Registers the login steps
///
/// # Errors
///
/// Returns an error if a pattern is already registered
pub fn register(registry: &mut StepRegistry) -> E2eResult<()> {
    registry.when(
        "User Navigates to Username Field and Types in {string}",
        type_username,
    )?;
    registry.then(
        "User Navigates to Password Field and Types in {string}",
        type_password,
    )?;
    registry.then("User Clicks Sign In Button", click_sign_in)?;
    registry.then("User Sees the SwiftRecipe Home Page", sees_home_page)?;
    registry.then(
        "User Sees the Invalid Username or Password Banner",
        sees_invalid_banner,
    )
}
