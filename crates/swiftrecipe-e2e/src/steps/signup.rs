//! Signup feature steps

use crate::locator::{click_visible, fill, Action, Locator, UrlRef};
use crate::result::E2eResult;
use crate::step::StepRegistry;

use super::login::{PASSWORD_INPUT, USERNAME_INPUT};

/// Signup link on the login page
pub const SIGNUP_LINK: &str = "a[href='/signup']";
/// First name field
pub const FIRST_NAME_INPUT: &str = "input[id='firstName']";
/// Last name field
pub const LAST_NAME_INPUT: &str = "input[id='lastName']";
/// Email field
pub const EMAIL_INPUT: &str = "input[id='email']";
/// Create Account submit button
pub const CREATE_ACCOUNT_BUTTON: &str = "body > div > form > input[type=submit]:nth-child(7)";
/// Field validation messages
pub const VALIDATION_ERROR: &str = "p[style='color: red;']";

fn click_signup_link(_: &[String]) -> Vec<Action> {
    click_visible(SIGNUP_LINK)
}

fn sees_signup_page(_: &[String]) -> Vec<Action> {
    vec![Action::ExpectUrl(UrlRef::AppPath("/signup".to_string()))]
}

fn type_first_name(args: &[String]) -> Vec<Action> {
    fill(FIRST_NAME_INPUT, &args[0])
}

fn type_last_name(args: &[String]) -> Vec<Action> {
    fill(LAST_NAME_INPUT, &args[0])
}

fn type_email(args: &[String]) -> Vec<Action> {
    fill(EMAIL_INPUT, &args[0])
}

fn type_username(args: &[String]) -> Vec<Action> {
    fill(USERNAME_INPUT, &args[0])
}

fn type_password(args: &[String]) -> Vec<Action> {
    fill(PASSWORD_INPUT, &args[0])
}

fn click_create_account(_: &[String]) -> Vec<Action> {
    click_visible(CREATE_ACCOUNT_BUTTON)
}

fn sees_login_after_signup(_: &[String]) -> Vec<Action> {
    vec![Action::ExpectUrl(UrlRef::AppPath("/login".to_string()))]
}

fn sees_validation_error(args: &[String]) -> Vec<Action> {
    let message = Locator::css(VALIDATION_ERROR);
    vec![message.should_be_visible(), message.should_contain(&args[0])]
}

/// Registers the signup steps
///
/// # Errors
///
/// Returns an error if a pattern is already registered
pub fn register(registry: &mut StepRegistry) -> E2eResult<()> {
    registry.when("User Clicks the Signup Link", click_signup_link)?;
    registry.then("User Sees the SwiftRecipe Signup Page", sees_signup_page)?;
    registry.then(
        "User Navigates to First Name Field and Types in {string}",
        type_first_name,
    )?;
    registry.then(
        "User Navigates to Last Name Field and Types in {string}",
        type_last_name,
    )?;
    registry.then(
        "User Navigates to Email Field and Types in {string}",
        type_email,
    )?;
    registry.then(
        "User Navigates to Signup Username Field and Types in {string}",
        type_username,
    )?;
    registry.then(
        "User Navigates to Signup Password Field and Types in {string}",
        type_password,
    )?;
    registry.then("User Clicks Create Account Button", click_create_account)?;
    registry.then(
        "User Sees the SwiftRecipe Signup Home Page",
        sees_login_after_signup,
    )?;
    registry.then(
        "User Sees the Validation Error Message {string}",
        sees_validation_error,
    )
}
