//! Error types for symbol resolution and comparison

use thiserror::Error;

/// Shown when fewer than two inputs were supplied
pub const MSG_EMPTY_INPUT: &str = "Add at least 2 stocks to compare.";
/// Shown when resolution left fewer than two distinct symbols
pub const MSG_INSUFFICIENT: &str = "Couldn't resolve enough symbols to compare.";
/// Shown when the backend declined without saying why
pub const MSG_BACKEND_FALLBACK: &str = "Could not compare right now.";
/// Shown when the backend could not be reached
pub const MSG_NETWORK_FALLBACK: &str = "Could not reach the backend for compare.";

/// Errors raised while resolving and comparing stocks
#[derive(Debug, Error)]
pub enum CompareError {
    /// Fewer than two non-empty inputs were supplied
    #[error("at least 2 inputs are required")]
    EmptyInput,

    /// A company-name lookup returned nothing usable
    #[error("No match for \"{input}\"")]
    NoMatch {
        input: String,
    },

    /// Fewer than two distinct symbols survived resolution
    #[error("fewer than 2 symbols resolved")]
    InsufficientResolved,

    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success HTTP status
    #[error("HTTP {status} from {endpoint}")]
    HttpStatus {
        endpoint: String,
        status: u16,
    },

    /// Backend answered `success = false`
    #[error("Backend error: {}", .0.as_deref().unwrap_or("unspecified"))]
    Backend(Option<String>),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Compare form slot out of range
    #[error("Invalid slot {0}: expected 1, 2 or 3")]
    InvalidSlot(usize),

    /// Unparseable interactive command
    #[error("Command error: {0}")]
    Command(String),
}

/// Result type alias for compare operations
pub type Result<T> = std::result::Result<T, CompareError>;

impl CompareError {
    /// Inline message shown to the user in place of a result table
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => MSG_EMPTY_INPUT.to_string(),
            Self::InsufficientResolved => MSG_INSUFFICIENT.to_string(),
            Self::Backend(Some(message)) if !message.is_empty() => message.clone(),
            Self::Backend(_) => MSG_BACKEND_FALLBACK.to_string(),
            Self::Network(_) | Self::HttpStatus { .. } | Self::Json(_) => {
                MSG_NETWORK_FALLBACK.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Whether a request that failed this way may be retried
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<watchlist_utils::ParseEnvironmentError> for CompareError {
    fn from(err: watchlist_utils::ParseEnvironmentError) -> Self {
        CompareError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompareError::NoMatch {
            input: "acme widgets".to_string(),
        };
        assert_eq!(err.to_string(), "No match for \"acme widgets\"");

        let err = CompareError::InvalidSlot(4);
        assert_eq!(err.to_string(), "Invalid slot 4: expected 1, 2 or 3");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(CompareError::EmptyInput.user_message(), MSG_EMPTY_INPUT);
        assert_eq!(
            CompareError::InsufficientResolved.user_message(),
            MSG_INSUFFICIENT
        );
        assert_eq!(
            CompareError::Backend(Some("x".to_string())).user_message(),
            "x"
        );
        assert_eq!(
            CompareError::Backend(None).user_message(),
            MSG_BACKEND_FALLBACK
        );
        assert_eq!(
            CompareError::Backend(Some(String::new())).user_message(),
            MSG_BACKEND_FALLBACK
        );

        let err = CompareError::HttpStatus {
            endpoint: "/chat/compare".to_string(),
            status: 502,
        };
        assert_eq!(err.user_message(), MSG_NETWORK_FALLBACK);
    }

    #[test]
    fn test_retryable() {
        let server_error = CompareError::HttpStatus {
            endpoint: "/search".to_string(),
            status: 503,
        };
        assert!(server_error.is_retryable());

        let rate_limited = CompareError::HttpStatus {
            endpoint: "/search".to_string(),
            status: 429,
        };
        assert!(rate_limited.is_retryable());

        let not_found = CompareError::HttpStatus {
            endpoint: "/search".to_string(),
            status: 404,
        };
        assert!(!not_found.is_retryable());
        assert!(!CompareError::EmptyInput.is_retryable());
    }

    #[test]
    fn test_environment_error_conversion() {
        let err: CompareError =
            watchlist_utils::ParseEnvironmentError("staging".to_string()).into();
        assert!(matches!(err, CompareError::Config(msg) if msg.contains("staging")));
    }
}
