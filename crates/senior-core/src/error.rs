//! Site errors
//!
//! Two kinds of failure reach the user: validation errors (recovered locally,
//! shown inline) and simulated transport errors (shown as a banner or toast,
//! control re-enabled). The remaining variants cover page wiring problems
//! that are only ever logged.

use crate::toast::ToastLevel;
use std::fmt;
use thiserror::Error;

/// High-level error categories used to route an error to the right surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// User input validation errors (correctable by the user)
    Input,
    /// Simulated network failures (user must resubmit)
    Network,
    /// Page structure or DOM interop failures
    Page,
    /// Invalid configuration
    Config,
}

impl ErrorCategory {
    /// Get the toast severity for this category.
    #[must_use]
    pub fn toast_level(&self) -> ToastLevel {
        match self {
            Self::Input => ToastLevel::Info,
            Self::Network | Self::Page | Self::Config => ToastLevel::Error,
        }
    }

    /// Get a short label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Network => "Network",
            Self::Page => "Page",
            Self::Config => "Config",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Unified error type for page logic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SiteError {
    /// One or more fields failed validation.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Simulated transport failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A required element is not present on the page.
    #[error("Element not found: {0}")]
    MissingElement(String),

    /// Configuration could not be parsed or is out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A page effect failed (DOM interop).
    #[error("Page error: {0}")]
    Page(String),
}

impl SiteError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a page error
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Classify this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Input,
            Self::Transport(_) => ErrorCategory::Network,
            Self::MissingElement(_) | Self::Page(_) => ErrorCategory::Page,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for page logic.
pub type SiteResult<T> = Result<T, SiteError>;

/// Log an uncaught script error without touching the page.
pub fn report_script_error(message: &str) {
    tracing::error!(target: "senior::page", "Uncaught script error: {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = SiteError::Validation(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Validation failed: a; b");
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_transport_error_routes_to_error_toast() {
        let err = SiteError::transport("timeout");
        assert_eq!(err.to_string(), "Transport error: timeout");
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.category().toast_level(), ToastLevel::Error);
        assert_eq!(err.category().to_string(), "Network");
    }

    #[test]
    fn test_page_errors_share_category() {
        assert_eq!(
            SiteError::MissingElement("header".into()).category(),
            ErrorCategory::Page
        );
        assert_eq!(SiteError::page("append failed").category(), ErrorCategory::Page);
    }

    #[test]
    fn test_json_error_becomes_config_error() {
        let err: SiteError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.category(), ErrorCategory::Config);
    }
}
