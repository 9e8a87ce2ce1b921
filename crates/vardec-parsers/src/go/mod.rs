use std::path::Path;
use std::sync::Mutex;

use tree_sitter::Node;

use vardec_core::types::{LanguageId, ScopeRange, VariableUsage};

use crate::adapter::LanguageAdapter;
use crate::treesitter::{
    collect_usages, innermost_scope, ParseError, ScopeRules, SyntaxTree, TreeSitterParser,
    UsageRules,
};

mod lines;

pub use lines::LineModel;

/// Adapter for Go.
///
/// - Structural mode: tree-sitter-go with scope-stack collection.
/// - Line mode: when the file has syntax errors (typically mid-edit), a
///   regex-over-lines model keeps hints available instead of dropping them.
pub struct GoAdapter {
    parser: Mutex<TreeSitterParser>,
}

/// A Go document in whichever representation could be built.
pub enum GoAst {
    Tree(SyntaxTree),
    Lines(LineModel),
}

impl GoAst {
    pub fn is_structural(&self) -> bool {
        matches!(self, GoAst::Tree(_))
    }
}

impl GoAdapter {
    pub fn new() -> Self {
        GoAdapter {
            parser: Mutex::new(TreeSitterParser::new()),
        }
    }
}

impl Default for GoAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAdapter for GoAdapter {
    type Ast = GoAst;

    fn language(&self) -> LanguageId {
        LanguageId::Go
    }

    fn get_ast(&self, text: &str, path: &Path) -> Result<Option<GoAst>, ParseError> {
        let mut parser = self.parser.lock().unwrap_or_else(|e| e.into_inner());
        let tree = parser.parse(LanguageId::Go, text)?;
        if tree.has_errors() {
            tracing::debug!(path = %path.display(), "syntax errors, using line model");
            return Ok(Some(GoAst::Lines(LineModel::new(text))));
        }
        Ok(Some(GoAst::Tree(tree)))
    }

    fn collect_variable_usage(&self, ast: &GoAst) -> Vec<VariableUsage> {
        match ast {
            GoAst::Tree(tree) => collect_usages(tree, &GoRules),
            GoAst::Lines(model) => model.collect_usages(),
        }
    }

    fn scope_range_for_line(&self, ast: &GoAst, line: usize) -> Option<ScopeRange> {
        match ast {
            GoAst::Tree(tree) => innermost_scope(tree, line, &GoRules),
            GoAst::Lines(model) => model.scope_range_for_line(line),
        }
    }
}

const FUNCTION_KINDS: &[&str] = &["function_declaration", "method_declaration", "func_literal"];

const BLOCK_KINDS: &[&str] = &[
    "block",
    "if_statement",
    "for_statement",
    "expression_switch_statement",
    "type_switch_statement",
    "select_statement",
];

struct GoRules;

impl UsageRules for GoRules {
    fn is_scope(&self, node: Node<'_>) -> bool {
        let kind = node.kind();
        FUNCTION_KINDS.contains(&kind)
            || BLOCK_KINDS.contains(&kind)
            || matches!(
                kind,
                "expression_case" | "type_case" | "default_case" | "communication_case"
            )
    }

    fn declared_identifiers<'t>(&self, node: Node<'t>, out: &mut Vec<Node<'t>>) {
        match node.kind() {
            "var_spec" | "const_spec" | "parameter_declaration" | "variadic_parameter_declaration" => {
                let mut cursor = node.walk();
                for name in node.children_by_field_name("name", &mut cursor) {
                    push_binding(name, out);
                }
            }
            "short_var_declaration" => {
                if let Some(left) = node.child_by_field_name("left") {
                    list_bindings(left, out);
                }
            }
            // `for k, v := range m` and `case v := <-ch` declare; `=` assigns.
            "range_clause" | "receive_statement" => {
                if has_define_token(node) {
                    if let Some(left) = node.child_by_field_name("left") {
                        list_bindings(left, out);
                    }
                }
            }
            "type_switch_statement" => {
                if let Some(alias) = node.child_by_field_name("alias") {
                    list_bindings(alias, out);
                }
            }
            _ => {}
        }
    }

    fn is_reference(&self, node: Node<'_>) -> bool {
        node.kind() == "identifier" && !is_function_name(node)
    }

    fn binds(&self, name: &str) -> bool {
        name != "_"
    }
}

impl ScopeRules for GoRules {
    fn is_function_like(&self, kind: &str) -> bool {
        FUNCTION_KINDS.contains(&kind)
    }

    fn is_block_like(&self, kind: &str) -> bool {
        BLOCK_KINDS.contains(&kind)
    }
}

fn push_binding<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    if node.kind() == "identifier" {
        out.push(node);
    }
}

fn list_bindings<'t>(list: Node<'t>, out: &mut Vec<Node<'t>>) {
    if list.kind() == "identifier" {
        push_binding(list, out);
        return;
    }
    let mut cursor = list.walk();
    for child in list.named_children(&mut cursor) {
        push_binding(child, out);
    }
}

fn has_define_token(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == ":=");
    found
}

fn is_function_name(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    parent.kind() == "function_declaration" && parent.child_by_field_name("name") == Some(node)
}
