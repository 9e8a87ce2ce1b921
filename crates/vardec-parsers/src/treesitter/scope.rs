use tree_sitter::Node;

use vardec_core::types::ScopeRange;

use super::{node_lines, SyntaxTree};

/// Node kinds that bound a scope range.
pub(crate) trait ScopeRules {
    fn is_function_like(&self, kind: &str) -> bool;
    fn is_block_like(&self, kind: &str) -> bool;
}

/// Tightest enclosing scope of `line`: the innermost function-like node
/// containing it, otherwise the innermost block-like node, otherwise the
/// whole document. `None` when `line` is past the end of the document.
pub(crate) fn innermost_scope<R: ScopeRules>(
    tree: &SyntaxTree,
    line: usize,
    rules: &R,
) -> Option<ScopeRange> {
    if line >= tree.line_count() {
        return None;
    }
    let mut found = Found::default();
    visit(tree.root(), line, rules, &mut found);
    Some(
        found
            .function
            .or(found.block)
            .unwrap_or_else(|| ScopeRange::whole_document(tree.line_count())),
    )
}

#[derive(Default)]
struct Found {
    function: Option<ScopeRange>,
    block: Option<ScopeRange>,
}

fn visit<R: ScopeRules>(node: Node<'_>, line: usize, rules: &R, found: &mut Found) {
    let range = node_lines(node);
    if !range.contains(line) {
        return;
    }
    let kind = node.kind();
    if rules.is_function_like(kind) {
        found.function = Some(range);
    } else if rules.is_block_like(kind) {
        found.block = Some(range);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, line, rules, found);
    }
}
