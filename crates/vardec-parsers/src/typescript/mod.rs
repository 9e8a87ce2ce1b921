use std::path::Path;
use std::sync::Mutex;

use tree_sitter::Node;

use vardec_core::types::{LanguageId, ScopeRange, VariableUsage};

use crate::adapter::LanguageAdapter;
use crate::treesitter::{
    collect_usages, innermost_scope, ParseError, ScopeRules, SyntaxTree, TreeSitterParser,
    UsageRules,
};

/// Adapter for TypeScript, TSX, and JavaScript, built on tree-sitter-typescript.
///
/// Documents with syntax errors are reported as unparsable rather than
/// analyzed from a recovered tree.
pub struct TsAdapter {
    language: LanguageId,
    parser: Mutex<TreeSitterParser>,
}

impl TsAdapter {
    pub fn new(language: LanguageId) -> Self {
        TsAdapter {
            language,
            parser: Mutex::new(TreeSitterParser::new()),
        }
    }

    pub fn typescript() -> Self {
        Self::new(LanguageId::TypeScript)
    }
}

impl Default for TsAdapter {
    fn default() -> Self {
        Self::typescript()
    }
}

impl LanguageAdapter for TsAdapter {
    type Ast = SyntaxTree;

    fn language(&self) -> LanguageId {
        self.language
    }

    fn get_ast(&self, text: &str, path: &Path) -> Result<Option<SyntaxTree>, ParseError> {
        let mut parser = self.parser.lock().unwrap_or_else(|e| e.into_inner());
        let tree = parser.parse(self.language, text)?;
        if tree.has_errors() {
            tracing::debug!(path = %path.display(), "syntax errors, skipping document");
            return Ok(None);
        }
        Ok(Some(tree))
    }

    fn collect_variable_usage(&self, ast: &SyntaxTree) -> Vec<VariableUsage> {
        collect_usages(ast, &TsRules)
    }

    fn scope_range_for_line(&self, ast: &SyntaxTree, line: usize) -> Option<ScopeRange> {
        innermost_scope(ast, line, &TsRules)
    }
}

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "method_definition",
];

struct TsRules;

impl UsageRules for TsRules {
    fn is_scope(&self, node: Node<'_>) -> bool {
        let kind = node.kind();
        FUNCTION_KINDS.contains(&kind)
            || matches!(
                kind,
                "statement_block" | "for_statement" | "for_in_statement" | "catch_clause" | "class_body"
            )
    }

    fn declared_identifiers<'t>(&self, node: Node<'t>, out: &mut Vec<Node<'t>>) {
        match node.kind() {
            "variable_declarator" => {
                if let Some(name) = node.child_by_field_name("name") {
                    pattern_bindings(name, out);
                }
            }
            "required_parameter" | "optional_parameter" => {
                if let Some(pattern) = node.child_by_field_name("pattern") {
                    pattern_bindings(pattern, out);
                }
            }
            // `x => ...` without parentheses
            "arrow_function" => {
                if let Some(param) = node.child_by_field_name("parameter") {
                    pattern_bindings(param, out);
                }
            }
            "catch_clause" => {
                if let Some(param) = node.child_by_field_name("parameter") {
                    pattern_bindings(param, out);
                }
            }
            // `for (const k of ks)` declares; `for (k of ks)` assigns.
            "for_in_statement" => {
                if node.child_by_field_name("kind").is_some() {
                    if let Some(left) = node.child_by_field_name("left") {
                        pattern_bindings(left, out);
                    }
                }
            }
            _ => {}
        }
    }

    fn is_reference(&self, node: Node<'_>) -> bool {
        match node.kind() {
            "shorthand_property_identifier" => true,
            "identifier" => !is_declaration_name(node),
            _ => false,
        }
    }
}

impl ScopeRules for TsRules {
    fn is_function_like(&self, kind: &str) -> bool {
        FUNCTION_KINDS.contains(&kind)
    }

    fn is_block_like(&self, kind: &str) -> bool {
        matches!(
            kind,
            "statement_block"
                | "if_statement"
                | "for_statement"
                | "for_in_statement"
                | "while_statement"
                | "do_statement"
                | "switch_statement"
                | "try_statement"
                | "class_declaration"
                | "class"
        )
    }
}

/// Collect the identifiers bound by a binding pattern, including every name
/// inside object and array destructuring. Default values are not bindings.
fn pattern_bindings<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => out.push(node),
        "pair_pattern" => {
            if let Some(value) = node.child_by_field_name("value") {
                pattern_bindings(value, out);
            }
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                pattern_bindings(left, out);
            }
        }
        "object_pattern" | "array_pattern" | "rest_pattern" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                pattern_bindings(child, out);
            }
        }
        _ => {}
    }
}

/// Function and class names are declarations of callables, not variable uses.
fn is_declaration_name(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    matches!(
        parent.kind(),
        "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "function"
            | "generator_function"
            | "class_declaration"
            | "class"
    ) && parent.child_by_field_name("name") == Some(node)
}
