//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Select pretty or JSON output from configuration
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - Log level configurable via config and environment

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::{LogFormat, ObservabilityConfig};

/// Filter directives applied when `RUST_LOG` is not set.
pub fn default_directives(level: &str) -> String {
    format!("deeplink_router={level},deeplink={level}")
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives("debug"),
            "deeplink_router=debug,deeplink=debug"
        );
    }
}
