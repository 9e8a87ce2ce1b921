//! Per-session decoration state.
//!
//! A [`DecorationSession`] is created once per editing surface and torn down
//! with [`DecorationSession::shutdown`]. It owns a settle timer per document,
//! the latest pending snapshot for each, and the decoration set last handed
//! to the [`Renderer`]. Passes run only from [`DecorationSession::poll`] or
//! [`DecorationSession::run_now`], always against the newest snapshot.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use vardec_core::config::VardecConfig;
use vardec_core::error::AnalysisError;
use vardec_core::types::{Decoration, DocumentSnapshot};

use crate::analyzer::{Analyzer, DocumentAnalyzer};
use crate::decorate::to_decorations;
use crate::settle::SettleTimer;

pub const FAILURE_NOTICE: &str = "decoration analysis failed for this file";

/// The rendering surface.
pub trait Renderer {
    /// Replace every decoration for `path`. An empty list clears them.
    fn apply(&mut self, path: &Path, decorations: Vec<Decoration>);

    /// Show a non-blocking notice that a pass failed.
    fn notify_failure(&mut self, path: &Path, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    Opened,
    Activated,
    Edited,
}

/// What a single pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Applied(usize),
    /// Nothing to show; decorations were cleared.
    Unparsable,
    /// The language is disabled in configuration; decorations were cleared.
    Disabled,
    Failed(String),
}

struct DocumentState {
    timer: SettleTimer,
    pending: Option<DocumentSnapshot>,
    applied: Vec<Decoration>,
}

impl DocumentState {
    fn new(period: Duration) -> Self {
        Self {
            timer: SettleTimer::new(period),
            pending: None,
            applied: Vec::new(),
        }
    }
}

pub struct DecorationSession<R: Renderer> {
    config: VardecConfig,
    renderer: R,
    analyzer: Box<dyn DocumentAnalyzer>,
    documents: BTreeMap<PathBuf, DocumentState>,
}

impl<R: Renderer> DecorationSession<R> {
    pub fn new(config: VardecConfig, renderer: R) -> Self {
        let analyzer = Analyzer::new().with_tab_size(config.tab_size);
        Self {
            config,
            renderer,
            analyzer: Box::new(analyzer),
            documents: BTreeMap::new(),
        }
    }

    /// Replace the analysis backend.
    pub fn with_analyzer(mut self, analyzer: impl DocumentAnalyzer + 'static) -> Self {
        self.analyzer = Box::new(analyzer);
        self
    }

    pub fn config(&self) -> &VardecConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn settle_period(&self) -> Duration {
        Duration::from_millis(self.config.settle_ms)
    }

    /// Record a trigger for `snapshot.path` and restart its settle timer.
    /// Returns `false` when the event is ignored: open and activate events
    /// with `auto_annotate` off, or a language disabled in configuration.
    pub fn on_document_event(
        &mut self,
        event: DocumentEvent,
        snapshot: DocumentSnapshot,
        now: Instant,
    ) -> bool {
        if !self.config.is_enabled(snapshot.language_id) {
            return false;
        }
        if event != DocumentEvent::Edited && !self.config.auto_annotate {
            tracing::trace!(path = %snapshot.path.display(), ?event, "auto annotate off");
            return false;
        }

        let period = self.settle_period();
        let state = self
            .documents
            .entry(snapshot.path.clone())
            .or_insert_with(|| DocumentState::new(period));
        state.pending = Some(snapshot);
        state.timer.trigger(now);
        true
    }

    /// Run every pass whose settle period has elapsed. Returns the outcomes
    /// in path order.
    pub fn poll(&mut self, now: Instant) -> Vec<(PathBuf, PassOutcome)> {
        let ready: Vec<DocumentSnapshot> = self
            .documents
            .values_mut()
            .filter_map(|state| {
                if state.timer.take_ready(now) {
                    state.pending.take()
                } else {
                    None
                }
            })
            .collect();

        ready
            .into_iter()
            .map(|snapshot| {
                let path = snapshot.path.clone();
                (path, self.run_now(snapshot))
            })
            .collect()
    }

    /// Earliest pending deadline across all documents.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.documents
            .values()
            .filter_map(|state| state.timer.deadline())
            .min()
    }

    /// Run a pass immediately, superseding any pending one for the same document.
    pub fn run_now(&mut self, snapshot: DocumentSnapshot) -> PassOutcome {
        let period = self.settle_period();
        let path = snapshot.path.clone();
        let state = self
            .documents
            .entry(path.clone())
            .or_insert_with(|| DocumentState::new(period));
        state.timer.cancel();
        state.pending = None;

        if !self.config.is_enabled(snapshot.language_id) {
            self.publish(&path, Vec::new());
            return PassOutcome::Disabled;
        }

        match self.analyzer.analyze(&snapshot) {
            Ok(analysis) if analysis.unparsable => {
                let reason = AnalysisError::UnparsableDocument { path: path.clone() };
                tracing::debug!(%reason, "clearing hints");
                self.publish(&path, Vec::new());
                PassOutcome::Unparsable
            }
            Ok(analysis) => {
                let decorations = to_decorations(&analysis.decisions, &self.config);
                let count = decorations.len();
                self.publish(&path, decorations);
                PassOutcome::Applied(count)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "analysis pass failed");
                self.publish(&path, Vec::new());
                if e.is_user_visible() {
                    self.renderer.notify_failure(&path, FAILURE_NOTICE);
                }
                PassOutcome::Failed(e.to_string())
            }
        }
    }

    fn publish(&mut self, path: &Path, decorations: Vec<Decoration>) {
        if let Some(state) = self.documents.get_mut(path) {
            state.applied = decorations.clone();
        }
        self.renderer.apply(path, decorations);
    }

    /// Decorations most recently applied for `path`.
    pub fn decorations(&self, path: &Path) -> Option<&[Decoration]> {
        self.documents.get(path).map(|s| s.applied.as_slice())
    }

    pub fn pending_count(&self) -> usize {
        self.documents
            .values()
            .filter(|s| s.timer.is_pending())
            .count()
    }

    /// Forget a document, clearing whatever was drawn for it.
    pub fn close(&mut self, path: &Path) {
        if let Some(state) = self.documents.remove(path) {
            if !state.applied.is_empty() {
                self.renderer.apply(path, Vec::new());
            }
        }
    }

    /// Drop every pending pass and clear every document.
    pub fn shutdown(&mut self) {
        let paths: Vec<PathBuf> = self.documents.keys().cloned().collect();
        for path in paths {
            self.close(&path);
        }
        tracing::debug!("decoration session shut down");
    }

    pub fn into_renderer(mut self) -> R {
        self.shutdown();
        self.renderer
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
