//! Result and error types for the end-to-end layer.

use thiserror::Error;

/// Result type for end-to-end operations
pub type E2eResult<T> = Result<T, E2eError>;

/// Errors that can occur while defining or running scenarios
#[derive(Debug, Error)]
pub enum E2eError {
    /// The base URL was not configured; the run cannot start
    #[error("Base URL is not configured. Set {var} or `base_url` in the runner config")]
    MissingBaseUrl {
        /// Environment variable consulted
        var: String,
    },

    /// A step pattern could not be compiled
    #[error("Invalid step pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// Pattern source
        pattern: String,
        /// Error message
        message: String,
    },

    /// The same pattern was registered twice
    #[error("Step already defined: {pattern:?}")]
    DuplicateStep {
        /// Pattern source
        pattern: String,
    },

    /// No definition matches a step sentence
    #[error("Undefined step: {text:?}")]
    UndefinedStep {
        /// Step sentence
        text: String,
    },

    /// Several definitions match a step sentence
    #[error("Ambiguous step {text:?} matches {patterns:?}")]
    AmbiguousStep {
        /// Step sentence
        text: String,
        /// Matching pattern sources
        patterns: Vec<String>,
    },

    /// A step line does not start with a keyword
    #[error("Step {line:?} must start with Given, When, Then, And or But")]
    MissingKeyword {
        /// Offending line
        line: String,
    },

    /// Element never appeared
    #[error("Element {selector:?} not found")]
    ElementNotFound {
        /// CSS selector
        selector: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("Timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// What was awaited
        waiting_for: String,
    },

    /// Browser driver error
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Navigation failed
    #[error("Navigation to {url} failed: {message}")]
    NavigationFailed {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Configuration could not be parsed
    #[error("Invalid config: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl E2eError {
    /// Creates a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Creates an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Errors that abort the whole run instead of failing one scenario
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingBaseUrl { .. })
    }

    /// Errors a fresh attempt cannot fix
    #[must_use]
    pub const fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPattern { .. }
                | Self::DuplicateStep { .. }
                | Self::UndefinedStep { .. }
                | Self::AmbiguousStep { .. }
                | Self::MissingKeyword { .. }
        )
    }
}

impl From<serde_yaml_ng::Error> for E2eError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_base_url_is_fatal() {
        let err = E2eError::MissingBaseUrl {
            var: "SWIFTRECIPE_URL".to_string(),
        };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("SWIFTRECIPE_URL"));
    }

    #[test]
    fn test_definition_errors() {
        let err = E2eError::UndefinedStep {
            text: "User Dances".to_string(),
        };
        assert!(err.is_definition_error());
        assert!(!err.is_fatal());
        assert!(!E2eError::driver("boom").is_definition_error());
    }

    #[test]
    fn test_timeout_display() {
        let err = E2eError::Timeout {
            ms: 6000,
            waiting_for: "input[id='username'] to be visible".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Timed out after 6000ms waiting for input[id='username'] to be visible"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: E2eError = io.into();
        assert!(matches!(err, E2eError::Io(_)));
    }
}
