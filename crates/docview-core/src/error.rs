use thiserror::Error;

/// Core error types for docview.
///
/// These cover configuration, manifest loading and HTTP client setup.
/// Failures of an individual page fetch are not represented here: they are
/// folded into [`LoadError`] and surfaced as state instead of being returned.
///
/// # Examples
///
/// ```
/// use docview_core::error::{DocsError, Result};
///
/// fn check_origin(origin: &str) -> Result<()> {
///     if origin.is_empty() {
///         return Err(DocsError::InvalidConfig("origin must not be empty".into()));
///     }
///     Ok(())
/// }
///
/// assert!(check_origin("").is_err());
/// ```
#[derive(Error, Debug)]
pub enum DocsError {
    #[error("failed to build HTTP client: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("navigation to {target} failed: {reason}")]
    Navigation { target: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for `Result<T, DocsError>`.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Outcome of a failed page load, shown to the reader as-is.
///
/// Every HTTP status at or above 400 is reported as [`LoadError::NotFound`];
/// anything that prevents a response from arriving is a
/// [`LoadError::TransportFailure`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadError {
    #[error("The page you requested was not found.")]
    NotFound,

    #[error("An error occurred during the process.")]
    TransportFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_messages() {
        assert_eq!(
            LoadError::NotFound.to_string(),
            "The page you requested was not found."
        );
        assert_eq!(
            LoadError::TransportFailure.to_string(),
            "An error occurred during the process."
        );
    }

    #[test]
    fn test_invalid_config_display() {
        let error = DocsError::InvalidConfig("bad origin".into());
        assert_eq!(error.to_string(), "invalid configuration: bad origin");
    }

    #[test]
    fn test_navigation_error_display() {
        let error = DocsError::Navigation {
            target: "docs-versioned".into(),
            reason: "router closed".into(),
        };
        assert_eq!(
            error.to_string(),
            "navigation to docs-versioned failed: router closed"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: DocsError = io_err.into();
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: DocsError = json_err.into();
        assert!(error.to_string().starts_with("JSON error"));
    }
}
