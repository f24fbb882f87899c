//! Logout feature steps

use crate::locator::{click_visible, Action, Locator, UrlRef};
use crate::result::E2eResult;
use crate::step::StepRegistry;

use super::login::LOGIN_BANNER;

/// Logout link in the dashboard header
pub const LOGOUT_LINK: &str = "a[href='/logout']";

fn click_logout(_: &[String]) -> Vec<Action> {
    click_visible(LOGOUT_LINK)
}

fn sees_login_page(_: &[String]) -> Vec<Action> {
    vec![Action::ExpectUrl(UrlRef::AppPath("/login?logout".to_string()))]
}

// Only the banner's presence is checked; its wording belongs to the server.
fn sees_logout_message(_: &[String]) -> Vec<Action> {
    vec![Locator::css(LOGIN_BANNER).should_be_visible()]
}

/// Registers the logout steps
///
/// # Errors
///
/// Returns an error if a pattern is already registered
pub fn register(registry: &mut StepRegistry) -> E2eResult<()> {
    registry.then("User Clicks Logout Button", click_logout)?;
    registry.then("User Sees the SwiftRecipe Login Page", sees_login_page)?;
    registry.then("User Sees Logout Message {string}", sees_logout_message)
}
