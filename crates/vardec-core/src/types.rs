use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Source languages vardec can analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    TypeScript,
    Tsx,
    JavaScript,
    Go,
}

impl LanguageId {
    pub const ALL: [LanguageId; 4] = [
        LanguageId::TypeScript,
        LanguageId::Tsx,
        LanguageId::JavaScript,
        LanguageId::Go,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageId::TypeScript => "typescript",
            LanguageId::Tsx => "tsx",
            LanguageId::JavaScript => "javascript",
            LanguageId::Go => "go",
        }
    }

    /// Map an editor language identifier (e.g. `typescriptreact`) to a language.
    pub fn from_editor_id(id: &str) -> Option<Self> {
        match id {
            "typescript" => Some(LanguageId::TypeScript),
            "typescriptreact" | "tsx" => Some(LanguageId::Tsx),
            "javascript" | "javascriptreact" | "jsx" => Some(LanguageId::JavaScript),
            "go" => Some(LanguageId::Go),
            _ => None,
        }
    }

    /// Detect the language from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" | "mts" | "cts" => Some(LanguageId::TypeScript),
            "tsx" => Some(LanguageId::Tsx),
            "js" | "mjs" | "cjs" | "jsx" => Some(LanguageId::JavaScript),
            "go" => Some(LanguageId::Go),
            _ => None,
        }
    }

    /// Whether this language is handled by the TypeScript-family adapter.
    pub fn is_typescript_family(&self) -> bool {
        !matches!(self, LanguageId::Go)
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifetime record of one declared symbol within a single analysis pass.
///
/// `used_at` always starts with `declared_at`, stays sorted in the order the
/// collector encounters references, and never holds the same line twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableUsage {
    pub name: String,
    /// Zero-based line of the declaration.
    pub declared_at: usize,
    /// Zero-based lines where the symbol is referenced, declaration first.
    pub used_at: Vec<usize>,
}

impl VariableUsage {
    pub fn new(name: impl Into<String>, declared_at: usize) -> Self {
        Self {
            name: name.into(),
            declared_at,
            used_at: vec![declared_at],
        }
    }

    /// Record a reference on `line`. Returns `false` when the line was already
    /// recorded or precedes the declaration.
    pub fn record_use(&mut self, line: usize) -> bool {
        if line < self.declared_at || self.used_at.contains(&line) {
            return false;
        }
        self.used_at.push(line);
        true
    }

    /// Whether any use falls inside `[start, end]`.
    pub fn used_within(&self, start: usize, end: usize) -> bool {
        self.used_at.iter().any(|&l| l >= start && l <= end)
    }

    /// Number of uses inside `[start, end]`.
    pub fn uses_within(&self, start: usize, end: usize) -> usize {
        self.used_at
            .iter()
            .filter(|&&l| l >= start && l <= end)
            .count()
    }
}

/// Inclusive, zero-based line interval of a lexical scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeRange {
    pub start_line: usize,
    pub end_line: usize,
}

impl ScopeRange {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// The fallback scope covering a whole document.
    pub fn whole_document(line_count: usize) -> Self {
        Self {
            start_line: 0,
            end_line: line_count.saturating_sub(1),
        }
    }

    pub fn contains(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// A variable that straddles a blank line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveVariable {
    pub name: String,
    /// Uses strictly after the blank line, within the enclosing scope.
    pub remaining_uses: usize,
}

/// What to show on one blank line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayDecision {
    /// Zero-based blank line the hint is anchored to.
    pub line: usize,
    /// Live variables in declaration order.
    pub variables: Vec<LiveVariable>,
    /// Leading whitespace width of the next content line.
    pub indent_units: u32,
}

impl DisplayDecision {
    pub fn names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }
}

/// A render-contract tuple: draw `text` at `(line, column)` indented by `indent_units`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub indent_units: u32,
}

/// The trigger-contract payload: the latest text of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub path: PathBuf,
    pub text: String,
    pub language_id: LanguageId,
    /// Tab width reported by the editing surface, if any.
    pub tab_size: Option<u32>,
}

impl DocumentSnapshot {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>, language_id: LanguageId) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            language_id,
            tab_size: None,
        }
    }

    pub fn with_tab_size(mut self, tab_size: u32) -> Self {
        self.tab_size = Some(tab_size);
        self
    }

    /// Number of lines, counting a trailing empty line after a final newline.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}
