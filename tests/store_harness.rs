//! Store reload harness.
//!
//! # What this covers
//!
//! - **Reload**: rewriting the export and calling `reload` makes the new
//!   vocabulary visible and bumps the generation.
//! - **Failed reload**: a broken export leaves the previous index serving.
//! - **Snapshot isolation**: readers holding a snapshot keep a consistent
//!   index while writers swap underneath them.
//!
//! # Running
//!
//! ```sh
//! cargo test --test store_harness
//! ```

mod common;
use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use topix_core::LoadError;

#[test]
fn reload_picks_up_a_rewritten_export() {
    let dir = tempfile::tempdir().unwrap();
    let store = poverty_store(dir.path());
    assert_eq!(store.snapshot().len(), 6);

    write_export(dir.path(), DANGLING_EXPORT);
    let fresh = store.reload().unwrap();

    assert_eq!(fresh.len(), 1);
    assert_eq!(store.snapshot().search("orphaned"), vec!["child"]);
    assert_eq!(store.generation(), 2);
}

#[test]
fn broken_export_keeps_the_previous_index() {
    let dir = tempfile::tempdir().unwrap();
    let store = poverty_store(dir.path());

    write_export(dir.path(), CYCLIC_EXPORT);
    assert!(matches!(store.reload(), Err(LoadError::Consistency(_))));

    write_export(dir.path(), "{ truncated");
    assert!(matches!(store.reload(), Err(LoadError::Parse(_))));

    assert_eq!(store.snapshot().len(), 6);
    assert_eq!(store.generation(), 1);
}

#[test]
fn readers_see_whole_indexes_during_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let store = poverty_store(dir.path());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    let index = store.snapshot();
                    assert_eq!(index.len(), 6);
                    assert_eq!(index.search("poverty"), vec!["c2", "c3", "c5"]);
                }
            })
        })
        .collect();

    for _ in 0..20 {
        store.reload().unwrap();
    }
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(store.generation(), 21);
}
