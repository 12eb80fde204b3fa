//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every pattern has at least one segment
//! - Detect duplicate patterns and empty targets
//! - Validate the base URL and log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Placeholder conflicts surface when the table is built, not here

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::path::{ParseOptions, RoutePath};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty pattern")]
    EmptyPattern { index: usize },

    #[error("route {pattern:?} has no path segments")]
    NoSegments { pattern: String },

    #[error("route {pattern:?} cannot be parsed: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("route {pattern:?} is declared more than once")]
    DuplicatePattern { pattern: String },

    #[error("route {pattern:?} has an empty target")]
    EmptyTarget { pattern: String },

    #[error("invalid base URL: {reason}")]
    InvalidBaseUrl { reason: String },

    #[error("unknown log level {level:?}")]
    UnknownLogLevel { level: String },
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel {
            level: config.observability.log_level.clone(),
        });
    }

    let options = match config.parsing.parse_options() {
        Ok(options) => options,
        Err(e) => {
            errors.push(ValidationError::InvalidBaseUrl {
                reason: e.to_string(),
            });
            ParseOptions::default().with_host_as_segment(config.parsing.host_as_segment)
        }
    };

    // Duplicates are compared on segments, so "/a/b" and "/a//b/" collide.
    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.pattern.trim().is_empty() {
            errors.push(ValidationError::EmptyPattern { index });
            continue;
        }
        if route.target.trim().is_empty() {
            errors.push(ValidationError::EmptyTarget {
                pattern: route.pattern.clone(),
            });
        }

        match RoutePath::parse_with(&route.pattern, &options) {
            Ok(path) if path.segments().is_empty() => {
                errors.push(ValidationError::NoSegments {
                    pattern: route.pattern.clone(),
                });
            }
            Ok(path) => {
                if !seen.insert(path.segments().to_vec()) {
                    errors.push(ValidationError::DuplicatePattern {
                        pattern: route.pattern.clone(),
                    });
                }
            }
            Err(e) => errors.push(ValidationError::InvalidPattern {
                pattern: route.pattern.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(pattern: &str, target: &str) -> RouteConfig {
        RouteConfig {
            pattern: pattern.into(),
            target: target.into(),
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = RouterConfig::default();
        config.routes.push(route("/user/:id", "Profile"));
        config.routes.push(route("/user/admin", "Admin"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.observability.log_level = "loud".into();
        config.routes.push(route("", "Nothing"));
        config.routes.push(route("/", "Root"));
        config.routes.push(route("/a/b", "A"));
        config.routes.push(route("/a//b/", "B"));
        config.routes.push(route("/c", " "));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownLogLevel {
                    level: "loud".into()
                },
                ValidationError::EmptyPattern { index: 0 },
                ValidationError::NoSegments {
                    pattern: "/".into()
                },
                ValidationError::DuplicatePattern {
                    pattern: "/a//b/".into()
                },
                ValidationError::EmptyTarget {
                    pattern: "/c".into()
                },
            ]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = RouterConfig::default();
        config.parsing.base_url = "mailto:nobody@example.com".into();
        config.routes.push(route("/ok", "Ok"));

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidBaseUrl { .. }));
        assert_eq!(errors.len(), 1);
    }
}
