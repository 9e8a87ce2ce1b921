pub mod annotate;
pub mod completion;
pub mod config;
pub mod watch;
