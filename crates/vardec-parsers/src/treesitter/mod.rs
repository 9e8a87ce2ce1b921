use tree_sitter::{Language, Node, Parser, Tree};

use vardec_core::types::{LanguageId, ScopeRange};

mod collector;
mod scope;

pub(crate) use collector::{collect_usages, UsageRules};
pub(crate) use scope::{innermost_scope, ScopeRules};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Parse `source` with the grammar for `language`.
    pub fn parse(&mut self, language: LanguageId, source: &str) -> Result<SyntaxTree, ParseError> {
        let lang = language_for(language);
        self.parser
            .set_language(&lang)
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        let tree = self
            .parser
            .parse(source.as_bytes(), None)
            .ok_or(ParseError::ParseFailed)?;
        Ok(SyntaxTree::new(tree, source))
    }
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("language error: {0}")]
    Language(String),
    #[error("parse failed")]
    ParseFailed,
}

/// A parsed document: the tree plus the text it was built from.
pub struct SyntaxTree {
    tree: Tree,
    source: String,
    line_count: usize,
}

impl SyntaxTree {
    fn new(tree: Tree, source: &str) -> Self {
        Self {
            tree,
            source: source.to_string(),
            line_count: source.split('\n').count(),
        }
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Whether the parser had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    pub fn text(&self, node: Node<'_>) -> &str {
        node_text(node, self.source.as_bytes())
    }
}

fn language_for(language: LanguageId) -> Language {
    match language {
        LanguageId::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        // JSX is legal in plain .js files, so JavaScript uses the TSX grammar.
        LanguageId::Tsx | LanguageId::JavaScript => tree_sitter_typescript::LANGUAGE_TSX.into(),
        LanguageId::Go => tree_sitter_go::LANGUAGE.into(),
    }
}

fn node_text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Inclusive line span of a node. A node whose end sits at column 0 of a
/// later row (it swallowed a trailing newline) ends on the previous row.
pub(crate) fn node_lines(node: Node<'_>) -> ScopeRange {
    let start = node.start_position().row;
    let end_pos = node.end_position();
    let end = if end_pos.column == 0 && end_pos.row > start {
        end_pos.row - 1
    } else {
        end_pos.row
    };
    ScopeRange::new(start, end)
}
