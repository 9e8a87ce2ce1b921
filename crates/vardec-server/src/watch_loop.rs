use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use xxhash_rust::xxh64::xxh64;

use vardec_core::types::{DocumentSnapshot, LanguageId};
use vardec_engine::session::{DecorationSession, DocumentEvent, PassOutcome, Renderer};
use vardec_parsers::walker::FileWalker;

/// Drives a [`DecorationSession`] from filesystem change batches.
///
/// Each changed file is read and hashed; unchanged content is dropped,
/// changed content restarts that document's settle timer, and removed files
/// have their hints cleared. Paths the walker would skip are ignored.
pub struct WatchLoop<R: Renderer> {
    walker: FileWalker,
    session: DecorationSession<R>,
    hashes: HashMap<PathBuf, u64>,
}

impl<R: Renderer> WatchLoop<R> {
    pub fn new(root: &Path, session: DecorationSession<R>) -> Self {
        let walker = FileWalker::new(root).with_ignore_patterns(&session.config().ignore_patterns);
        Self {
            walker,
            session,
            hashes: HashMap::new(),
        }
    }

    pub fn session(&self) -> &DecorationSession<R> {
        &self.session
    }

    /// Open every supported file under the root. Returns how many were queued.
    pub fn prime(&mut self, now: Instant) -> usize {
        let mut queued = 0;
        for entry in self.walker.walk() {
            if self.observe(entry.path, DocumentEvent::Opened, now) {
                queued += 1;
            }
        }
        queued
    }

    /// Feed one batch of changed paths. Returns how many documents were
    /// scheduled for a pass.
    pub fn ingest(&mut self, paths: Vec<PathBuf>, now: Instant) -> usize {
        paths
            .into_iter()
            .filter(|path| self.observe(path.clone(), DocumentEvent::Edited, now))
            .count()
    }

    fn observe(&mut self, path: PathBuf, event: DocumentEvent, now: Instant) -> bool {
        let Some(language) = LanguageId::from_path(&path) else {
            return false;
        };
        if !self.hashes.contains_key(&path) && !self.walker.accepts(&path) {
            tracing::trace!(path = %path.display(), "ignored path");
            return false;
        }
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "removed, clearing hints");
                self.hashes.remove(&path);
                self.session.close(&path);
                return false;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read file");
                return false;
            }
        };

        let hash = xxh64(text.as_bytes(), 0);
        if self.hashes.get(&path) == Some(&hash) {
            tracing::trace!(path = %path.display(), "content unchanged");
            return false;
        }

        let snapshot = DocumentSnapshot::new(path.clone(), text, language);
        let scheduled = self.session.on_document_event(event, snapshot, now);
        if scheduled {
            self.hashes.insert(path, hash);
        }
        scheduled
    }

    /// Run every pass whose settle period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Vec<(PathBuf, PassOutcome)> {
        let outcomes = self.session.poll(now);
        for (path, outcome) in &outcomes {
            tracing::debug!(path = %path.display(), ?outcome, "pass finished");
        }
        outcomes
    }

    /// Run every pending pass regardless of its deadline.
    pub fn flush(&mut self) -> Vec<(PathBuf, PassOutcome)> {
        let horizon = Instant::now() + Duration::from_millis(self.session.config().settle_ms);
        self.tick(horizon)
    }

    /// Process batches until the channel closes, then flush pending passes,
    /// shut the session down, and hand back the renderer.
    pub async fn run(mut self, mut changes: mpsc::Receiver<Vec<PathBuf>>) -> R {
        loop {
            let deadline = self.session.next_deadline();
            tokio::select! {
                batch = changes.recv() => match batch {
                    Some(paths) => {
                        self.ingest(paths, Instant::now());
                    }
                    None => break,
                },
                _ = wait_until(deadline) => {
                    self.tick(Instant::now());
                }
            }
        }
        self.flush();
        self.session.into_renderer()
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
