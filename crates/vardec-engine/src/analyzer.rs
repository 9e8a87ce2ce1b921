use std::collections::HashMap;

use vardec_core::error::AnalysisError;
use vardec_core::types::{DisplayDecision, DocumentSnapshot, LanguageId, ScopeRange};
use vardec_parsers::adapter::LanguageAdapter;
use vardec_parsers::go::GoAdapter;
use vardec_parsers::typescript::TsAdapter;

use crate::liveness::compute_decisions;

pub const DEFAULT_TAB_SIZE: u32 = 4;

/// Result of one analysis pass over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub language: LanguageId,
    pub decisions: Vec<DisplayDecision>,
    /// The adapter could not build a tree; `decisions` is empty.
    pub unparsable: bool,
}

impl Analysis {
    fn unparsable(language: LanguageId) -> Self {
        Self {
            language,
            decisions: Vec::new(),
            unparsable: true,
        }
    }
}

/// Owns one adapter per supported language.
///
/// Each adapter holds its own parser, so an `Analyzer` is cheap to share
/// across passes but serializes passes of the same language.
pub struct Analyzer {
    typescript: TsAdapter,
    tsx: TsAdapter,
    javascript: TsAdapter,
    go: GoAdapter,
    default_tab_size: u32,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            typescript: TsAdapter::new(LanguageId::TypeScript),
            tsx: TsAdapter::new(LanguageId::Tsx),
            javascript: TsAdapter::new(LanguageId::JavaScript),
            go: GoAdapter::new(),
            default_tab_size: DEFAULT_TAB_SIZE,
        }
    }

    /// Tab width used when a snapshot does not carry one.
    pub fn with_tab_size(mut self, tab_size: u32) -> Self {
        self.default_tab_size = tab_size;
        self
    }

    /// Run a full pass: parse, collect usages, resolve scopes, and compute
    /// the decisions for every blank line.
    pub fn analyze(&self, snapshot: &DocumentSnapshot) -> Result<Analysis, AnalysisError> {
        let tab_size = snapshot.tab_size.unwrap_or(self.default_tab_size);
        match snapshot.language_id {
            LanguageId::TypeScript => run_pass(&self.typescript, snapshot, tab_size),
            LanguageId::Tsx => run_pass(&self.tsx, snapshot, tab_size),
            LanguageId::JavaScript => run_pass(&self.javascript, snapshot, tab_size),
            LanguageId::Go => run_pass(&self.go, snapshot, tab_size),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that can run a pass over a snapshot.
pub trait DocumentAnalyzer: Send {
    fn analyze(&self, snapshot: &DocumentSnapshot) -> Result<Analysis, AnalysisError>;
}

impl DocumentAnalyzer for Analyzer {
    fn analyze(&self, snapshot: &DocumentSnapshot) -> Result<Analysis, AnalysisError> {
        Analyzer::analyze(self, snapshot)
    }
}

/// One-shot analysis with a fresh [`Analyzer`].
pub fn analyze_document(snapshot: &DocumentSnapshot) -> Result<Analysis, AnalysisError> {
    Analyzer::new().analyze(snapshot)
}

fn run_pass<A: LanguageAdapter>(
    adapter: &A,
    snapshot: &DocumentSnapshot,
    tab_size: u32,
) -> Result<Analysis, AnalysisError> {
    let language = adapter.language();
    let ast = adapter
        .get_ast(&snapshot.text, &snapshot.path)
        .map_err(|e| AnalysisError::Parser(e.to_string()))?;
    let Some(ast) = ast else {
        return Ok(Analysis::unparsable(language));
    };

    let usages = adapter.collect_variable_usage(&ast);
    let lines: Vec<&str> = snapshot.text.split('\n').collect();

    let mut scopes: HashMap<usize, Option<ScopeRange>> = HashMap::new();
    let mut containment_violation = None;
    let lookup = |line: usize| {
        *scopes.entry(line).or_insert_with(|| {
            let scope = adapter.scope_range_for_line(&ast, line);
            match scope {
                Some(s) if !s.contains(line) => {
                    containment_violation.get_or_insert((line, s));
                    None
                }
                other => other,
            }
        })
    };
    let decisions = compute_decisions(&lines, &usages, lookup, tab_size);

    if let Some((line, scope)) = containment_violation {
        return Err(AnalysisError::Internal(format!(
            "scope {}..={} does not contain line {line}",
            scope.start_line, scope.end_line
        )));
    }

    tracing::debug!(
        path = %snapshot.path.display(),
        language = %language,
        symbols = usages.len(),
        decisions = decisions.len(),
        "analysis pass complete"
    );
    Ok(Analysis {
        language,
        decisions,
        unparsable: false,
    })
}
