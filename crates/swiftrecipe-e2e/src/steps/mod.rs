//! Built-in step definitions for the login, logout and signup features

pub mod common;
pub mod login;
pub mod logout;
pub mod signup;

use crate::result::E2eResult;
use crate::step::StepRegistry;

/// Registers every built-in step
///
/// # Errors
///
/// Returns an error if any pattern is already registered in `registry`
pub fn register_all(registry: &mut StepRegistry) -> E2eResult<()> {
    common::register(registry)?;
    login::register(registry)?;
    logout::register(registry)?;
    signup::register(registry)
}

/// A registry holding the built-in steps
///
/// # Errors
///
/// Returns an error if the built-in patterns fail to compile
pub fn registry() -> E2eResult<StepRegistry> {
    let mut registry = StepRegistry::new();
    register_all(&mut registry)?;
    Ok(registry)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::locator::{Action, Condition, Locator, UrlRef};
    use crate::result::E2eError;
    use crate::step::{Keyword, Step};

    #[test]
    fn test_builtin_registry_size() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 19);
    }

    #[test]
    fn test_register_twice_is_duplicate() {
        let mut registry = registry().unwrap();
        let err = register_all(&mut registry).unwrap_err();
        assert!(matches!(err, E2eError::DuplicateStep { .. }));
    }

    #[test]
    fn test_visit_uses_base_url() {
        let registry = registry().unwrap();
        let resolved = registry
            .resolve(&Step::new(Keyword::Given, common::VISIT_LOGIN_PAGE))
            .unwrap();
        assert_eq!(resolved.actions, vec![Action::Visit(UrlRef::BaseUrl)]);
    }

    #[test]
    fn test_signup_username_reuses_login_field() {
        let registry = registry().unwrap();
        let resolved = registry
            .resolve(&Step::new(
                Keyword::And,
                r#"User Navigates to Signup Username Field and Types in "linecook""#,
            ))
            .unwrap();
        assert_eq!(resolved.actions[2], Locator::css(login::USERNAME_INPUT).type_text("linecook"));
    }

    #[test]
    fn test_logout_message_checks_banner_only() {
        let registry = registry().unwrap();
        let resolved = registry
            .resolve(&Step::new(
                Keyword::And,
                r#"User Sees Logout Message "You have been logged out""#,
            ))
            .unwrap();
        assert_eq!(
            resolved.actions,
            vec![Locator::css(login::LOGIN_BANNER).should_be_visible()]
        );
    }

    #[test]
    fn test_validation_message_contains_argument() {
        let registry = registry().unwrap();
        let resolved = registry
            .resolve(&Step::new(
                Keyword::Then,
                r#"User Sees the Validation Error Message "Username cannot be blank""#,
            ))
            .unwrap();
        assert_eq!(resolved.actions.len(), 2);
        assert!(matches!(
            &resolved.actions[1],
            Action::Expect { condition: Condition::ContainsText(text), .. }
                if text == "Username cannot be blank"
        ));
    }

    #[test]
    fn test_home_page_urls() {
        let registry = registry().unwrap();
        let home = registry
            .resolve(&Step::new(Keyword::Then, "User Sees the SwiftRecipe Home Page"))
            .unwrap();
        assert_eq!(home.actions, vec![Action::ExpectUrl(UrlRef::AppPath("/".to_string()))]);
        let after_signup = registry
            .resolve(&Step::new(Keyword::Then, "User Sees the SwiftRecipe Signup Home Page"))
            .unwrap();
        assert_eq!(
            after_signup.actions,
            vec![Action::ExpectUrl(UrlRef::AppPath("/login".to_string()))]
        );
    }
}
