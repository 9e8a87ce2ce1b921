//! Scope-stack usage collection shared by the tree-sitter adapters.
//!
//! The tree is walked depth-first with a cursor. Every scope-introducing node
//! pushes a fresh symbol table; declarations land in the innermost table and
//! references resolve outward through the stack to the nearest declaration
//! of the same name. Two functions that both declare `x` therefore produce
//! two independent usage records.

use std::collections::{HashMap, HashSet};

use tree_sitter::Node;

use vardec_core::types::VariableUsage;

use super::SyntaxTree;

/// Per-language node classification consumed by [`collect_usages`].
pub(crate) trait UsageRules {
    /// Whether `node` opens a new lexical scope.
    fn is_scope(&self, node: Node<'_>) -> bool;

    /// Push the binding identifiers `node` introduces, if it is a declaration
    /// (variable declarator, parameter, short-form declaration, ...).
    fn declared_identifiers<'t>(&self, node: Node<'t>, out: &mut Vec<Node<'t>>);

    /// Whether `node` is an identifier that may reference a variable.
    fn is_reference(&self, node: Node<'_>) -> bool;

    /// Whether a declared `name` creates a symbol at all.
    fn binds(&self, _name: &str) -> bool {
        true
    }
}

struct Scope {
    node_id: usize,
    symbols: HashMap<String, usize>,
}

struct ScopeStackCollector<'s> {
    tree: &'s SyntaxTree,
    root_id: usize,
    usages: Vec<VariableUsage>,
    scopes: Vec<Scope>,
    declaration_sites: HashSet<usize>,
}

impl<'s> ScopeStackCollector<'s> {
    fn new(tree: &'s SyntaxTree) -> Self {
        let root_id = tree.root().id();
        Self {
            tree,
            root_id,
            usages: Vec::new(),
            scopes: vec![Scope {
                node_id: root_id,
                symbols: HashMap::new(),
            }],
            declaration_sites: HashSet::new(),
        }
    }

    fn enter<R: UsageRules>(&mut self, node: Node<'_>, rules: &R) {
        if node.id() != self.root_id && rules.is_scope(node) {
            self.scopes.push(Scope {
                node_id: node.id(),
                symbols: HashMap::new(),
            });
        }

        let tree = self.tree;
        let mut declared = Vec::new();
        rules.declared_identifiers(node, &mut declared);
        for ident in declared {
            self.declaration_sites.insert(ident.id());
            let name = tree.text(ident);
            if !name.is_empty() && rules.binds(name) {
                self.declare(name, ident.start_position().row);
            }
        }

        if rules.is_reference(node) && !self.declaration_sites.contains(&node.id()) {
            let name = tree.text(node);
            self.resolve(name, node.start_position().row);
        }
    }

    fn exit(&mut self, node: Node<'_>) {
        if self.scopes.len() > 1 && self.scopes.last().map(|s| s.node_id) == Some(node.id()) {
            self.scopes.pop();
        }
    }

    fn declare(&mut self, name: &str, line: usize) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        // A second declaration in the same scope keeps the first record.
        if scope.symbols.contains_key(name) {
            return;
        }
        scope.symbols.insert(name.to_string(), self.usages.len());
        self.usages.push(VariableUsage::new(name, line));
    }

    fn resolve(&mut self, name: &str, line: usize) {
        for scope in self.scopes.iter().rev() {
            if let Some(&idx) = scope.symbols.get(name) {
                let usage = &mut self.usages[idx];
                if line > usage.declared_at {
                    usage.record_use(line);
                }
                return;
            }
        }
    }
}

/// Walk the whole tree once and return one usage record per declared symbol,
/// in declaration order.
pub(crate) fn collect_usages<R: UsageRules>(tree: &SyntaxTree, rules: &R) -> Vec<VariableUsage> {
    let mut collector = ScopeStackCollector::new(tree);
    let mut cursor = tree.root().walk();

    'walk: loop {
        collector.enter(cursor.node(), rules);
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            collector.exit(cursor.node());
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    collector.usages
}
