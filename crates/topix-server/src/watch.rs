//! Reload the vocabulary when its export file changes on disk.
//!
//! The parent directory is watched rather than the file itself: export tools
//! usually replace the file by rename, which drops a watch on the old inode.
//!
//! One save produces a burst of events (truncate, several writes, close).
//! Events are forwarded to a reload thread that waits until the file has been
//! quiet for a settle window and then reloads once for the whole burst.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use topix_core::VocabularyStore;
use tracing::{debug, info, warn};

/// Quiet period after the last change before a reload starts.
pub const SETTLE: Duration = Duration::from_millis(250);

/// Keeps the OS watch alive; dropping it stops reloads and ends the reload
/// thread.
pub struct VocabularyWatcher {
    _watcher: RecommendedWatcher,
}

pub fn watch(store: Arc<VocabularyStore>) -> notify::Result<VocabularyWatcher> {
    watch_with_settle(store, SETTLE)
}

pub fn watch_with_settle(
    store: Arc<VocabularyStore>,
    settle: Duration,
) -> notify::Result<VocabularyWatcher> {
    let target = store.source().file_name().map(ToOwned::to_owned);
    let dir = watch_dir(store.source());
    let (changes, pending) = mpsc::channel();

    let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| match event {
        Ok(event) if is_relevant(&event, target.as_deref()) => {
            // The receiver only goes away with the watcher itself.
            let _ = changes.send(());
        }
        Ok(_) => {}
        Err(err) => warn!(error = %err, "vocabulary watch error"),
    })?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    let reloader = Arc::clone(&store);
    thread::Builder::new()
        .name("topix-reload".into())
        .spawn(move || reload_loop(&reloader, &pending, settle))
        .map_err(notify::Error::io)?;

    info!(path = %store.source().display(), "watching vocabulary for changes");
    Ok(VocabularyWatcher { _watcher: watcher })
}

/// Reload once per burst of change notifications. Returns when the sending
/// side is dropped, after reloading for any burst still pending.
fn reload_loop(store: &VocabularyStore, pending: &Receiver<()>, settle: Duration) {
    while pending.recv().is_ok() {
        let mut events = 1usize;
        let open = loop {
            match pending.recv_timeout(settle) {
                Ok(()) => events += 1,
                Err(RecvTimeoutError::Timeout) => break true,
                Err(RecvTimeoutError::Disconnected) => break false,
            }
        };

        debug!(events, "vocabulary file settled");
        match store.reload() {
            Ok(index) => info!(concepts = index.len(), "vocabulary reloaded after file change"),
            Err(err) => warn!(error = %err, "vocabulary reload failed, keeping the current index"),
        }
        if !open {
            return;
        }
    }
}

fn watch_dir(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_relevant(event: &Event, target: Option<&OsStr>) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event.paths.iter().any(|path| path.file_name() == target)
}
