//! Loading route manifests from disk.

use deeplink_router::config::{load_config, ConfigError};
use deeplink_router::DeepLinkTable;

mod common;

#[test]
fn test_manifest_to_table() {
    let path = common::write_manifest(
        "valid",
        r#"
        [parsing]
        host_as_segment = true

        [observability]
        log_level = "debug"

        [[routes]]
        pattern = "/user/:id"
        target = "Profile"

        [[routes]]
        pattern = "myapp://user/admin"
        target = "Admin"
        "#,
    );

    let config = load_config(&path).unwrap();
    let table = DeepLinkTable::from_config(&config).unwrap();
    assert_eq!(table.route_count(), 2);

    let resolve = |input: &str| {
        table
            .resolve_type(&table.parse(input).unwrap())
            .target
            .map(|handle| handle.name().to_string())
    };
    assert_eq!(resolve("myapp://user/5").as_deref(), Some("Profile"));
    assert_eq!(resolve("/user/admin").as_deref(), Some("Admin"));
    assert_eq!(resolve("myapp://other/5"), None);

    std::fs::remove_file(path).unwrap_or_default();
}

#[test]
fn test_invalid_manifest_reports_every_problem() {
    let path = common::write_manifest(
        "invalid",
        r#"
        [[routes]]
        pattern = "/a"
        target = "A"

        [[routes]]
        pattern = "/a/"
        target = "Again"

        [[routes]]
        pattern = "/"
        target = "Root"
        "#,
    );

    match load_config(&path) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation error, got {:?}", other),
    }

    std::fs::remove_file(path).unwrap_or_default();
}

#[test]
fn test_default_options_table_from_empty_manifest() {
    let path = common::write_manifest("empty", "");
    let config = load_config(&path).unwrap();
    let table = DeepLinkTable::from_config(&config).unwrap();

    assert!(table.is_empty());
    assert_eq!(common::target_name(&table, "/anything"), None);

    std::fs::remove_file(path).unwrap_or_default();
}
