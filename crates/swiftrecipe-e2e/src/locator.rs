//! Locators, conditions and the actions a step expands to.
//!
//! A step definition does not drive the browser itself; it returns a plan
//! of [`Action`]s that the runner executes. Assertions auto-wait: the
//! runner polls until the condition holds or the command timeout expires.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A CSS selector for one element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    selector: String,
}

impl Locator {
    /// Create a locator from a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    /// The CSS selector
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Expect the element to be visible
    #[must_use]
    pub fn should_be_visible(&self) -> Action {
        Action::Expect {
            locator: self.clone(),
            condition: Condition::Visible,
        }
    }

    /// Expect the element to be visible and contain `text`
    #[must_use]
    pub fn should_contain(&self, text: impl Into<String>) -> Action {
        Action::Expect {
            locator: self.clone(),
            condition: Condition::ContainsText(text.into()),
        }
    }

    /// Focus the element
    #[must_use]
    pub fn focus(&self) -> Action {
        Action::Focus(self.clone())
    }

    /// Type into the element
    #[must_use]
    pub fn type_text(&self, text: impl Into<String>) -> Action {
        Action::Type {
            locator: self.clone(),
            text: text.into(),
        }
    }

    /// Click the element
    #[must_use]
    pub fn click(&self) -> Action {
        Action::Click(self.clone())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector)
    }
}

/// Condition an element must satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Present and rendered
    Visible,
    /// Visible and its text contains the value
    ContainsText(String),
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visible => f.write_str("be visible"),
            Self::ContainsText(text) => write!(f, "contain {text:?}"),
        }
    }
}

/// Where a URL comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlRef {
    /// The configured base URL
    BaseUrl,
    /// A path on the application origin
    AppPath(String),
    /// A literal absolute URL
    Absolute(String),
}

/// One executable unit of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Navigate
    Visit(UrlRef),
    /// Wait until an element satisfies a condition
    Expect {
        /// Target element
        locator: Locator,
        /// Condition to reach
        condition: Condition,
    },
    /// Focus an element
    Focus(Locator),
    /// Type into an element
    Type {
        /// Target element
        locator: Locator,
        /// Text to type
        text: String,
    },
    /// Click an element
    Click(Locator),
    /// Wait until the current URL equals the target
    ExpectUrl(UrlRef),
}

/// Visible-check, focus and type: the usual form field interaction
#[must_use]
pub fn fill(selector: &str, text: &str) -> Vec<Action> {
    let field = Locator::css(selector);
    vec![field.should_be_visible(), field.focus(), field.type_text(text)]
}

/// Visible-check then click
#[must_use]
pub fn click_visible(selector: &str) -> Vec<Action> {
    let target = Locator::css(selector);
    vec![target.should_be_visible(), target.click()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_display() {
        let locator = Locator::css("input[id='username']");
        assert_eq!(locator.to_string(), "input[id='username']");
        assert_eq!(locator.selector(), "input[id='username']");
    }

    #[test]
    fn test_fill_plan() {
        let plan = fill("input[id='email']", "cook@example.com");
        let field = Locator::css("input[id='email']");
        assert_eq!(
            plan,
            vec![
                Action::Expect {
                    locator: field.clone(),
                    condition: Condition::Visible
                },
                Action::Focus(field.clone()),
                Action::Type {
                    locator: field,
                    text: "cook@example.com".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_click_visible_plan() {
        let plan = click_visible("a[href='/logout']");
        assert_eq!(plan.len(), 2);
        assert!(matches!(plan[1], Action::Click(ref l) if l.selector() == "a[href='/logout']"));
    }

    #[test]
    fn test_condition_display() {
        assert_eq!(Condition::Visible.to_string(), "be visible");
        assert_eq!(
            Condition::ContainsText("Username cannot be blank".to_string()).to_string(),
            "contain \"Username cannot be blank\""
        );
    }
}
