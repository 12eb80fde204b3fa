//! Error definitions for path parsing and table construction.
//!
//! Lookups never fail: a missing route is an empty result, not an error.

use thiserror::Error;

/// Errors raised while turning input into routes.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Input could not be parsed as a URL, even relative to the base.
    #[error("Invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// Configured base URL is unusable.
    #[error("Invalid base URL {input:?}: {reason}")]
    InvalidBaseUrl { input: String, reason: String },

    /// The table refused a registration (empty pattern or placeholder conflict).
    #[error("Registration rejected for pattern {pattern:?}")]
    Rejected { pattern: String },
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouteError::Rejected {
            pattern: "/user/:uid".into(),
        };
        assert_eq!(err.to_string(), "Registration rejected for pattern \"/user/:uid\"");

        let err = RouteError::InvalidBaseUrl {
            input: "mailto:x".into(),
            reason: "cannot be a base".into(),
        };
        assert!(err.to_string().contains("cannot be a base"));
    }
}
