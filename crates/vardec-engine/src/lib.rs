//! Liveness engine for vardec.
//!
//! Turns a document snapshot into hints for its blank lines:
//! - `liveness`: the straddle test over a usage table and scope lookup
//! - `analyzer`: one analysis pass, dispatched to the language adapter
//! - `decorate`: decisions to render tuples
//! - `session`: per-document settle timers and the renderer lifecycle

pub mod analyzer;
pub mod decorate;
pub mod liveness;
pub mod report;
pub mod session;
pub mod settle;

pub use analyzer::{analyze_document, Analysis, Analyzer, DocumentAnalyzer};
pub use decorate::to_decorations;
pub use liveness::compute_decisions;
pub use session::{DecorationSession, DocumentEvent, PassOutcome, Renderer};
pub use settle::SettleTimer;
