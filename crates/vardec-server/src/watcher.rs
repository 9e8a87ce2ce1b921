//! File watcher feeding the watch loop.
//!
//! Uses the `notify` crate and coalesces events that arrive within a short
//! window into one batch. Ignores `.vardec/`, `node_modules/`, `.git/`,
//! `vendor/`, and common build directories.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use vardec_core::types::LanguageId;

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("failed to create watcher: {0}")]
    Init(#[source] notify::Error),
    #[error("failed to watch {}: {source}", path.display())]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Default window for coalescing filesystem events into one batch.
pub const BATCH_WINDOW: Duration = Duration::from_millis(100);

/// Directories to ignore when watching for file changes.
const IGNORED_DIRS: &[&str] = &[
    ".vardec",
    ".git",
    "node_modules",
    "vendor",
    "target",
    "dist",
    "build",
    ".next",
];

/// Start watching `root` recursively.
///
/// Returns the watcher (dropping it stops the watch) and a receiver that
/// emits batches of changed supported files once no event has arrived for
/// `window`. Must be called inside a tokio runtime.
pub fn start_watching(
    root: &Path,
    window: Duration,
) -> Result<(RecommendedWatcher, mpsc::Receiver<Vec<PathBuf>>), WatchError> {
    let root = root.to_path_buf();
    let (event_tx, event_rx) = mpsc::channel::<PathBuf>(256);
    let (batch_tx, batch_rx) = mpsc::channel::<Vec<PathBuf>>(64);
    tokio::spawn(coalesce(event_rx, batch_tx, window));

    let filter_root = root.clone();
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "watch error");
                return;
            }
        };
        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            return;
        }
        for path in event.paths.into_iter().filter(|p| should_watch(&filter_root, p)) {
            // The receiver only goes away when the loop shuts down.
            let _ = event_tx.blocking_send(path);
        }
    })
    .map_err(WatchError::Init)?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|source| WatchError::Watch {
            path: root.clone(),
            source,
        })?;
    tracing::info!(root = %root.display(), "watching for changes");

    Ok((watcher, batch_rx))
}

/// Group paths into batches separated by at least `window` of silence.
/// Each batch lists every path once, sorted.
async fn coalesce(
    mut events: mpsc::Receiver<PathBuf>,
    batches: mpsc::Sender<Vec<PathBuf>>,
    window: Duration,
) {
    let mut pending = BTreeSet::new();
    loop {
        let next = tokio::time::timeout(window, events.recv()).await;
        let closed = matches!(next, Ok(None));
        match next {
            Ok(Some(path)) => {
                pending.insert(path);
                continue;
            }
            Ok(None) | Err(_) => {}
        }
        if !pending.is_empty() {
            let batch: Vec<PathBuf> = std::mem::take(&mut pending).into_iter().collect();
            tracing::trace!(files = batch.len(), "flushing change batch");
            if batches.send(batch).await.is_err() {
                return;
            }
        }
        if closed {
            return;
        }
    }
}

/// Whether a change to `path` should trigger re-annotation.
pub fn should_watch(root: &Path, path: &Path) -> bool {
    if LanguageId::from_path(path).is_none() {
        return false;
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    !relative.components().any(|component| match component {
        Component::Normal(name) => name.to_str().is_some_and(|n| IGNORED_DIRS.contains(&n)),
        _ => false,
    })
}
