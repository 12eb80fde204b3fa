//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route manifest (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → routing::manifest builds a RouteTable from it
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new table built and swapped in atomically by the caller
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults to allow minimal manifests
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LogFormat, ObservabilityConfig, ParsingConfig, RouteConfig, RouterConfig};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
