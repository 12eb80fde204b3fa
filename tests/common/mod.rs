//! Shared utilities for integration tests.

use std::path::PathBuf;

use deeplink_router::{DeepLinkTable, RoutePath};

/// Parse with default options; test inputs are always valid.
pub fn path(input: &str) -> RoutePath {
    RoutePath::parse(input).unwrap()
}

/// Write a manifest to a unique file in the system temp dir.
#[allow(dead_code)]
pub fn write_manifest(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "deeplink-router-{}-{}.toml",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

/// Resolve `input` and return the target name, if any.
#[allow(dead_code)]
pub fn target_name(table: &DeepLinkTable, input: &str) -> Option<String> {
    table
        .resolve_type(&path(input))
        .target
        .map(|handle| handle.name().to_string())
}
