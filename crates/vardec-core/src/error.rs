use std::path::PathBuf;

/// Errors that can end an analysis pass.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The adapter could not build a tree. Treated as "nothing to show".
    #[error("cannot analyze {}: document does not parse", path.display())]
    UnparsableDocument { path: PathBuf },

    #[error("parser error: {0}")]
    Parser(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Whether this error should be surfaced to the user. Unparsable
    /// documents are silently cleared instead.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, AnalysisError::UnparsableDocument { .. })
    }
}
