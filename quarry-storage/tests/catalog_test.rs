//! QueryCatalog tests: building from a mapping, lookups, degraded entries.

mod common;

use std::sync::Arc;

use quarry_core::config::CatalogConfig;
use quarry_core::errors::{CatalogError, QuarryErrorCode, QueryError};
use quarry_core::types::{FieldValue, Strictness, TypeTag};
use quarry_storage::{FsLoader, MemoryLoader, QueryCatalog, QueryMapping, SqliteDriver};

use common::fixtures_dir;

fn fixture_catalog(mapping: &str, strictness: Option<Strictness>) -> Result<QueryCatalog, CatalogError> {
    let config = CatalogConfig {
        mapping: Some(mapping.to_string()),
        search_paths: Vec::new(),
        strictness,
    };
    let loader = FsLoader::from_config(&config, &fixtures_dir());
    QueryCatalog::build(&config, &loader)
}

#[test]
fn text_matches_resource_bytes() {
    let catalog = fixture_catalog("catalog.toml", None).unwrap();
    assert_eq!(catalog.len(), 3);

    for (name, file) in [
        ("user_by_id", "sql/user_by_id.sql"),
        ("all_users", "sql/all_users.sql"),
        ("user_tags", "sql/user_tags.sql"),
    ] {
        let on_disk = std::fs::read_to_string(fixtures_dir().join(file)).unwrap();
        let shared = catalog.get(name).unwrap();
        let query = shared.lock().unwrap();
        assert_eq!(query.text(), Some(on_disk.as_str()), "text of {name}");
        assert_eq!(query.name(), name);
    }
}

#[test]
fn unknown_name_is_not_found_and_names_the_mapping() {
    let catalog = fixture_catalog("catalog.toml", None).unwrap();
    let err = catalog.get("does-not-exist").unwrap_err();
    match &err {
        CatalogError::NotFound { name, resource } => {
            assert_eq!(name, "does-not-exist");
            assert_eq!(resource, "catalog.toml");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("does-not-exist"));
    assert!(message.contains("catalog.toml"));
    assert_eq!(err.error_code(), "QUERY_NOT_FOUND");
}

#[test]
fn get_returns_the_same_query_every_time() {
    let catalog = fixture_catalog("catalog.toml", None).unwrap();
    let a = catalog.get("all_users").unwrap();
    let b = catalog.get("all_users").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn names_are_sorted_and_fixed() {
    let catalog = fixture_catalog("catalog.toml", None).unwrap();
    assert_eq!(catalog.names(), vec!["all_users", "user_by_id", "user_tags"]);
    assert!(catalog.contains("user_tags"));
    assert!(!catalog.contains("users"));
    assert_eq!(catalog.resource(), "catalog.toml");
    assert_eq!(catalog.strictness(), Strictness::Lenient);
}

#[test]
fn missing_mapping_is_a_fatal_config_load_error() {
    let err = fixture_catalog("nope.toml", None).unwrap_err();
    assert!(matches!(err, CatalogError::ConfigLoad { ref resource, .. } if resource == "nope.toml"));
    assert_eq!(err.error_code(), "CONFIG_LOAD_FAILED");
}

#[test]
fn malformed_mapping_is_a_config_load_error() {
    let loader = MemoryLoader::new()
        .with("catalog.toml", "[queries\nbroken = ")
        .unwrap();
    let err = QueryCatalog::build(&CatalogConfig::default(), &loader).unwrap_err();
    assert!(matches!(err, CatalogError::ConfigLoad { .. }));
}

#[test]
fn lenient_build_keeps_entries_whose_resource_is_missing() {
    let catalog = fixture_catalog("broken_catalog.toml", None).unwrap();
    assert_eq!(catalog.len(), 2);

    let vanished = catalog.get("vanished").unwrap();
    let query = vanished.lock().unwrap();
    assert_eq!(query.text(), None);
    assert!(matches!(query.sql(), Err(QueryError::MissingText { .. })));

    let intact = catalog.get("user_by_id").unwrap();
    assert!(intact.lock().unwrap().text().is_some());
}

#[test]
fn strict_build_fails_on_missing_resource() {
    let err = fixture_catalog("broken_catalog.toml", Some(Strictness::Strict)).unwrap_err();
    match err {
        CatalogError::ResourceLoad { name, path, .. } => {
            assert_eq!(name, "vanished");
            assert_eq!(path, "sql/does_not_exist.sql");
        }
        other => panic!("expected ResourceLoad, got {other:?}"),
    }
}

#[test]
fn queries_inherit_catalog_strictness() {
    let catalog = fixture_catalog("catalog.toml", Some(Strictness::Strict)).unwrap();
    let strictness = catalog
        .with_query("all_users", |q| q.strictness())
        .unwrap();
    assert_eq!(strictness, Strictness::Strict);
}

#[test]
fn with_query_runs_against_the_shared_instance() {
    let catalog = fixture_catalog("catalog.toml", None).unwrap();
    let len = catalog
        .with_query("all_users", |q| q.text().map(str::len))
        .unwrap();
    assert_eq!(len, Some("SELECT id, name, active FROM users ORDER BY id;\n".len()));

    let err = catalog.with_query("missing", |_| ()).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[test]
fn text_is_not_interpolated() {
    let sql = "SELECT * FROM t WHERE a = ?1 AND b = :name -- ${not_a_template}\n";
    let loader = MemoryLoader::new()
        .with("catalog.toml", "[queries]\nraw = \"raw.sql\"\n")
        .unwrap()
        .with("raw.sql", sql)
        .unwrap();
    let catalog = QueryCatalog::build(&CatalogConfig::default(), &loader).unwrap();
    let text = catalog.with_query("raw", |q| q.text().map(str::to_string)).unwrap();
    assert_eq!(text.as_deref(), Some(sql));
}

#[test]
fn empty_mapping_builds_an_empty_catalog() {
    let loader = MemoryLoader::new().with("catalog.toml", "").unwrap();
    let catalog = QueryCatalog::build(&CatalogConfig::default(), &loader).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn mapping_parses_queries_table() {
    let mapping = QueryMapping::parse(
        "inline",
        "[queries]\nb = \"b.sql\"\na = \"/a.sql\"\n",
    )
    .unwrap();
    let entries: Vec<(&str, &str)> = mapping.iter().collect();
    assert_eq!(entries, vec![("a", "/a.sql"), ("b", "b.sql")]);
}

// ---- End to end ----

#[test]
fn catalog_queries_run_against_sqlite() {
    let catalog = fixture_catalog("catalog.toml", None).unwrap();
    let driver = SqliteDriver::open_in_memory().unwrap();
    driver
        .execute_batch(
            "
            CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, active INTEGER, tags TEXT);
            INSERT INTO users VALUES (1, 'ada', 1, '[\"admin\"]');
            INSERT INTO users VALUES (2, 'brian', 0, NULL);
            ",
        )
        .unwrap();

    let shared = catalog.get("user_by_id").unwrap();
    let mut query = shared.lock().unwrap();
    {
        let mut scope = driver
            .run_scoped(&mut query, &[FieldValue::Integer(2)])
            .unwrap();
        assert_eq!(scope.column_count(), 3);
        assert!(scope.advance().unwrap());
        assert_eq!(
            scope.field("name", TypeTag::String).unwrap(),
            Some(FieldValue::Text("brian".into()))
        );
        assert_eq!(
            scope.field("active", TypeTag::Boolean).unwrap(),
            Some(FieldValue::Boolean(false))
        );
        assert!(!scope.advance().unwrap());
    }
    assert!(!query.has_cursor());
    drop(query);

    let tags = catalog
        .with_query("user_tags", |q| -> Result<_, QueryError> {
            let mut scope = driver.run_scoped(q, &[])?;
            let mut rows = Vec::new();
            while scope.advance()? {
                rows.push(scope.field(2, TypeTag::Array)?);
            }
            scope.finish()?;
            Ok(rows)
        })
        .unwrap()
        .unwrap();
    assert_eq!(
        tags,
        vec![Some(FieldValue::Array(vec![FieldValue::Text("admin".into())]))]
    );
}
