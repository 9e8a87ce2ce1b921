//! Live re-annotation of a source tree.
//!
//! [`watcher::start_watching`] turns filesystem events into batches of
//! changed source files; [`watch_loop::WatchLoop`] feeds those batches into a
//! [`vardec_engine::DecorationSession`] and runs passes once they settle.

pub mod watch_loop;
pub mod watcher;

pub use watch_loop::WatchLoop;
pub use watcher::{start_watching, WatchError};
