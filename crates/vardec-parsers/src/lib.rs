//! Language adapters for vardec.
//!
//! Every supported language implements [`adapter::LanguageAdapter`]: build a
//! tree from document text, collect variable usage records, and resolve the
//! enclosing scope of a line. The liveness engine only ever talks to that
//! contract.

pub mod adapter;
pub mod treesitter;
pub mod walker;

pub mod go;
pub mod typescript;
