//! Configuration schema definitions.
//!
//! This module defines the route manifest structure. All types derive Serde
//! traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::error::RouteResult;
use crate::routing::path::{ParseOptions, DEFAULT_BASE_URL};

/// Root configuration: parsing rules, logging, and the routes to register.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// How incoming links and patterns are split into segments.
    pub parsing: ParsingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions mapping patterns to destination types.
    pub routes: Vec<RouteConfig>,
}

/// URL parsing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ParsingConfig {
    /// Base URL that relative inputs (e.g. "/user/42") are joined onto.
    pub base_url: String,

    /// Use the host of absolute URLs as the first segment ("myapp://user/42").
    pub host_as_segment: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            host_as_segment: false,
        }
    }
}

impl ParsingConfig {
    pub fn parse_options(&self) -> RouteResult<ParseOptions> {
        ParseOptions::new(&self.base_url, self.host_as_segment)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// A single route: pattern plus the destination type it opens.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RouteConfig {
    /// Path pattern, e.g. "/user/:id".
    pub pattern: String,

    /// Destination type name registered in the type slot.
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert!(config.routes.is_empty());
        assert_eq!(config.parsing.base_url, DEFAULT_BASE_URL);
        assert!(!config.parsing.host_as_segment);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_minimal_toml() {
        let config: RouterConfig = toml::from_str(
            r#"
            [[routes]]
            pattern = "/user/:id"
            target = "Profile"
            "#,
        )
        .unwrap();
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].target, "Profile");
        assert_eq!(config.parsing, ParsingConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config: RouterConfig = toml::from_str(
            r#"
            [parsing]
            base_url = "https://links.example.com/"
            host_as_segment = true

            [observability]
            log_level = "debug"
            log_format = "json"
            "#,
        )
        .unwrap();
        assert!(config.parsing.host_as_segment);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert!(config.parsing.parse_options().unwrap().host_as_segment());
    }
}
