//! Steps shared by every feature

use crate::locator::{Action, UrlRef};
use crate::result::E2eResult;
use crate::step::StepRegistry;

/// Opens the login page at the configured base URL
pub const VISIT_LOGIN_PAGE: &str = "User Visits SwiftRecipe Login Page";

// The runner refuses to visit when the base URL is missing.
fn visit_login_page(_: &[String]) -> Vec<Action> {
    vec![Action::Visit(UrlRef::BaseUrl)]
}

/// Registers the common steps
///
/// # Errors
///
/// Returns an error if a pattern is already registered
pub fn register(registry: &mut StepRegistry) -> E2eResult<()> {
    registry.given(VISIT_LOGIN_PAGE, visit_login_page)
}
