//! Result and error types for the dashboard front-end.

use thiserror::Error;

/// Result type for pager construction
pub type PagerResult<T> = Result<T, PagerError>;

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised while configuring a pager
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagerError {
    /// A page must hold at least one card
    #[error("Page size must be at least 1")]
    ZeroPageSize,
}

/// Errors raised by a view surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// A required element is not part of the document
    #[error("Required element #{id} not found")]
    MissingElement {
        /// Element ID that was looked up
        id: String,
    },

    /// The browser rejected a DOM operation
    #[error("DOM operation failed: {message}")]
    Dom {
        /// Error message
        message: String,
    },
}

impl ViewError {
    /// Creates a missing element error
    #[must_use]
    pub fn missing(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    /// Creates a DOM operation error
    #[must_use]
    pub fn dom(message: impl Into<String>) -> Self {
        Self::Dom {
            message: message.into(),
        }
    }
}
