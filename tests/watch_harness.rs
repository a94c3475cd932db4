//! File-watch reload harness.
//!
//! # What this covers
//!
//! - Rewriting the export on disk swaps a new index into the store without
//!   any explicit `reload` call.
//! - A burst of writes settles into a small number of reloads, not one per
//!   filesystem event.
//!
//! Relies on the platform watcher (inotify on Linux), so assertions poll with
//! a generous deadline instead of sleeping a fixed time.
//!
//! # Running
//!
//! ```sh
//! cargo test --test watch_harness
//! ```

mod common;
use common::*;
use pretty_assertions::assert_eq;
use std::thread;
use std::time::{Duration, Instant};
use topix_server::watch::watch;

fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(50));
    }
    done()
}

#[test]
fn rewriting_the_export_swaps_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = poverty_store(dir.path());
    let _watcher = watch(store.clone()).unwrap();

    write_export(dir.path(), DANGLING_EXPORT);

    assert!(
        wait_until(|| store.snapshot().len() == 1),
        "store never picked up the rewritten export"
    );
    assert_eq!(store.snapshot().search("orphaned"), vec!["child"]);
}

#[test]
fn burst_of_writes_is_coalesced() {
    let dir = tempfile::tempdir().unwrap();
    let store = poverty_store(dir.path());
    let _watcher = watch(store.clone()).unwrap();

    for _ in 0..10 {
        write_export(dir.path(), DANGLING_EXPORT);
    }

    assert!(wait_until(|| store.snapshot().len() == 1));
    // Let any trailing burst settle before counting swaps.
    thread::sleep(Duration::from_millis(750));
    assert!(
        store.generation() <= 3,
        "ten writes caused {} swaps",
        store.generation() - 1
    );
}
