//! LazyCatalog under concurrent first access, and the process-wide slot.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use quarry_core::config::CatalogConfig;
use quarry_core::errors::CatalogError;
use quarry_storage::{
    global, install_global, LazyCatalog, MemoryLoader, QueryCatalog, SharedQuery,
};

use common::CountingLoader;

const THREADS: usize = 8;

fn memory_catalog() -> MemoryLoader {
    MemoryLoader::new()
        .with(
            "catalog.toml",
            "[queries]\nfirst = \"sql/first.sql\"\nsecond = \"sql/second.sql\"\n",
        )
        .unwrap()
        .with("sql/first.sql", "SELECT 1")
        .unwrap()
        .with("sql/second.sql", "SELECT 2")
        .unwrap()
}

#[test]
fn concurrent_first_access_builds_once() {
    let loader = Arc::new(CountingLoader::new(memory_catalog(), "catalog.toml"));
    let lazy = Arc::new(LazyCatalog::new(
        CatalogConfig::default(),
        Arc::clone(&loader),
    ));
    assert!(!lazy.is_built());

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let lazy = Arc::clone(&lazy);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let name = if i % 2 == 0 { "first" } else { "second" };
                lazy.get(name).unwrap()
            })
        })
        .collect();

    let results: Vec<SharedQuery> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(lazy.is_built());
    assert_eq!(lazy.build_count(), 1);
    assert_eq!(loader.mapping_loads(), 1);

    let first = lazy.get("first").unwrap();
    let second = lazy.get("second").unwrap();
    for (i, shared) in results.iter().enumerate() {
        let expected = if i % 2 == 0 { &first } else { &second };
        assert!(Arc::ptr_eq(shared, expected), "thread {i} saw another instance");
    }
}

#[test]
fn built_catalog_is_shared_across_threads() {
    let lazy = Arc::new(LazyCatalog::new(CatalogConfig::default(), memory_catalog()));
    let catalog = lazy.catalog().unwrap();
    let expected = catalog as *const QueryCatalog as usize;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let lazy = Arc::clone(&lazy);
            thread::spawn(move || lazy.catalog().unwrap() as *const QueryCatalog as usize)
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    assert_eq!(lazy.build_count(), 1);
}

#[test]
fn failed_build_is_retried_on_next_access() {
    let config = CatalogConfig {
        mapping: Some("missing.toml".to_string()),
        ..CatalogConfig::default()
    };
    let lazy = LazyCatalog::new(config, memory_catalog());

    let err = lazy.get("first").unwrap_err();
    assert!(matches!(err, CatalogError::ConfigLoad { .. }));
    assert!(!lazy.is_built());

    assert!(lazy.get("first").is_err());
    assert_eq!(lazy.build_count(), 2);
}

#[test]
fn executions_on_a_shared_query_are_serialized() {
    let lazy = Arc::new(LazyCatalog::new(CatalogConfig::default(), memory_catalog()));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let lazy = Arc::clone(&lazy);
            thread::spawn(move || {
                lazy.catalog()
                    .unwrap()
                    .with_query("first", |q| q.text().map(str::to_string))
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("SELECT 1"));
    }
}

// The process-wide slot is shared by every test in this binary, so all of
// its assertions live in one test.
#[test]
fn global_slot_installs_once() {
    let installed = install_global(LazyCatalog::new(
        CatalogConfig::default(),
        memory_catalog(),
    ))
    .unwrap();
    assert!(!installed.is_built());

    let again = install_global(LazyCatalog::new(
        CatalogConfig::default(),
        MemoryLoader::new(),
    ));
    assert!(matches!(again, Err(CatalogError::AlreadyInstalled)));

    let slot = global().unwrap();
    assert!(std::ptr::eq(slot, installed));
    let query = slot.get("second").unwrap();
    assert_eq!(query.lock().unwrap().text(), Some("SELECT 2"));
}
