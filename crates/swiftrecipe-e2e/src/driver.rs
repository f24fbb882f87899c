//! Browser driver contract
//!
//! Steps talk to the browser only through [`BrowserDriver`]. The
//! Chromium implementation lives behind the `browser` feature; tests use
//! [`FakeSwiftRecipe`](crate::fake::FakeSwiftRecipe).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::E2eResult;

/// Snapshot of a matched element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Selector the element was found by
    pub selector: String,
    /// Lowercase tag name
    pub tag_name: String,
    /// Text content
    pub text_content: Option<String>,
    /// Current value, for form controls
    pub value: Option<String>,
    /// Whether the element is rendered and not hidden
    pub visible: bool,
}

impl ElementHandle {
    /// Create a visible element handle
    #[must_use]
    pub fn new(selector: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            tag_name: tag_name.into(),
            text_content: None,
            value: None,
            visible: true,
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Set the value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set visibility
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Whether the text content contains `needle`
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_content
            .as_deref()
            .is_some_and(|text| text.contains(needle))
    }
}

/// Browser operations the step layer relies on
#[async_trait]
pub trait BrowserDriver: Send {
    /// Navigate to `url`
    async fn visit(&mut self, url: &str) -> E2eResult<()>;

    /// All elements matching `selector`, in document order
    async fn query_all(&mut self, selector: &str) -> E2eResult<Vec<ElementHandle>>;

    /// First element matching `selector`, if any
    async fn query(&mut self, selector: &str) -> E2eResult<Option<ElementHandle>> {
        Ok(self.query_all(selector).await?.into_iter().next())
    }

    /// Focus the element matching `selector`
    async fn focus(&mut self, selector: &str) -> E2eResult<()>;

    /// Type `text` into the element matching `selector`
    async fn type_text(&mut self, selector: &str, text: &str) -> E2eResult<()>;

    /// Click the element matching `selector`
    async fn click(&mut self, selector: &str) -> E2eResult<()>;

    /// Current page URL
    async fn current_url(&mut self) -> E2eResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_handle_builders() {
        let handle = ElementHandle::new("#banner", "div")
            .with_text("Invalid Username or Password")
            .with_visible(false);
        assert_eq!(handle.selector, "#banner");
        assert!(!handle.visible);
        assert!(handle.contains_text("Invalid"));
        assert!(!handle.contains_text("logged out"));
    }

    #[test]
    fn test_element_without_text() {
        let handle = ElementHandle::new("input[id='email']", "input").with_value("a@b.co");
        assert!(!handle.contains_text(""));
        assert_eq!(handle.value.as_deref(), Some("a@b.co"));
    }
}
