use std::path::Path;

use vardec_core::types::{LanguageId, ScopeRange, VariableUsage};

use crate::treesitter::ParseError;

/// The capability every supported language must provide.
///
/// Each adapter is responsible for:
/// - Turning document text into its own tree representation (`Ast`).
/// - Collecting one [`VariableUsage`] per declared symbol, scope-aware.
/// - Resolving the tightest enclosing scope of any line.
///
/// The `Ast` type stays opaque to callers; the liveness engine only moves it
/// between these three operations.
pub trait LanguageAdapter: Send + Sync {
    type Ast;

    /// The language this adapter analyzes.
    fn language(&self) -> LanguageId;

    /// Build a tree for `text`.
    ///
    /// Returns `Ok(None)` when the document merely fails to parse ("cannot
    /// analyze this document"). `Err` is reserved for unrecoverable
    /// conditions such as a grammar that cannot be loaded.
    fn get_ast(&self, text: &str, path: &Path) -> Result<Option<Self::Ast>, ParseError>;

    /// Collect usage records for every declared symbol, in declaration order.
    /// Deterministic for a given tree.
    fn collect_variable_usage(&self, ast: &Self::Ast) -> Vec<VariableUsage>;

    /// Tightest enclosing scope of `line`. `None` only when the line lies
    /// outside the document; otherwise at least the whole-document range.
    fn scope_range_for_line(&self, ast: &Self::Ast, line: usize) -> Option<ScopeRange>;
}
