//! Line-oriented Go model used when tree-sitter cannot produce a clean tree.
//!
//! Declarations and references are found with regular expressions over each
//! physical line (comments and string literals blanked first). Function
//! scopes are found by brace counting from every line that opens a `func`
//! body, and a reference is attributed to the nearest earlier declaration of
//! the same name whose scope contains the reference.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use vardec_core::types::{ScopeRange, VariableUsage};

static IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").unwrap());
static VAR_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:var|const)\s+([A-Za-z_]\w*(?:\s*,\s*[A-Za-z_]\w*)*)").unwrap()
});
static VAR_BLOCK_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:var|const)\s*\(\s*$").unwrap());
static BLOCK_SPEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z_]\w*(?:\s*,\s*[A-Za-z_]\w*)*)").unwrap());
static SHORT_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z_]\w*(?:\s*,\s*[A-Za-z_]\w*)*)\s*:=").unwrap());
static FUNC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfunc\b").unwrap());

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

pub struct LineModel {
    /// Source lines with comments and literal contents replaced by spaces.
    lines: Vec<String>,
    /// `(start, end)` of every function body, in source order.
    func_spans: Vec<(usize, usize)>,
}

impl LineModel {
    pub fn new(text: &str) -> Self {
        let lines = blank_non_code(text);
        let func_spans = find_func_spans(&lines);
        Self { lines, func_spans }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Scope of `line`: the nearest function whose body encloses it, or the
    /// whole document at package level.
    pub fn scope_range_for_line(&self, line: usize) -> Option<ScopeRange> {
        if line >= self.lines.len() {
            return None;
        }
        let scope = self
            .func_spans
            .iter()
            .filter(|(start, end)| *start <= line && line <= *end)
            .max_by_key(|(start, _)| *start)
            .map(|&(start, end)| ScopeRange::new(start, end))
            .unwrap_or_else(|| ScopeRange::whole_document(self.lines.len()));
        Some(scope)
    }

    pub fn collect_usages(&self) -> Vec<VariableUsage> {
        let mut table = LineTable::default();
        let mut in_var_block = false;

        for (i, line) in self.lines.iter().enumerate() {
            let mut declared = Vec::new();

            if in_var_block {
                if line.trim_start().starts_with(')') {
                    in_var_block = false;
                } else if let Some(caps) = BLOCK_SPEC.captures(line) {
                    if let Some(names) = caps.get(1) {
                        push_names(line, names.start(), names.end(), &mut declared);
                    }
                }
            }
            if VAR_BLOCK_OPEN.is_match(line) {
                in_var_block = true;
            }
            for caps in VAR_DECL.captures_iter(line) {
                if let Some(names) = caps.get(1) {
                    push_names(line, names.start(), names.end(), &mut declared);
                }
            }
            for caps in SHORT_DECL.captures_iter(line) {
                if let Some(names) = caps.get(1) {
                    push_names(line, names.start(), names.end(), &mut declared);
                }
            }
            func_params(line, &mut declared);

            for (name, _) in &declared {
                let scope = self.scope_range_for_line(i).unwrap_or(ScopeRange::new(i, i));
                table.declare(name, i, scope);
            }

            for m in IDENT.find_iter(line) {
                if declared.iter().any(|(_, offset)| *offset == m.start()) {
                    continue;
                }
                if !is_reference_site(line, m.start(), m.end()) {
                    continue;
                }
                table.resolve(m.as_str(), i);
            }
        }

        table.usages
    }
}

#[derive(Default)]
struct LineTable {
    usages: Vec<VariableUsage>,
    scopes: Vec<ScopeRange>,
    by_name: HashMap<String, Vec<usize>>,
}

impl LineTable {
    fn declare(&mut self, name: &str, line: usize, scope: ScopeRange) {
        let entries = self.by_name.entry(name.to_string()).or_default();
        if entries.iter().any(|&idx| self.scopes[idx] == scope) {
            return;
        }
        entries.push(self.usages.len());
        self.usages.push(VariableUsage::new(name, line));
        self.scopes.push(scope);
    }

    fn resolve(&mut self, name: &str, line: usize) {
        let Some(entries) = self.by_name.get(name) else {
            return;
        };
        let nearest = entries
            .iter()
            .rev()
            .find(|&&idx| self.usages[idx].declared_at < line && self.scopes[idx].contains(line));
        if let Some(&idx) = nearest {
            self.usages[idx].record_use(line);
        }
    }
}

/// Split a comma-separated name list at `line[start..end]` into `(name, offset)` pairs.
fn push_names(line: &str, start: usize, end: usize, out: &mut Vec<(String, usize)>) {
    for m in IDENT.find_iter(&line[start..end]) {
        push_name(m.as_str(), start + m.start(), out);
    }
}

fn push_name(name: &str, offset: usize, out: &mut Vec<(String, usize)>) {
    if name == "_" || KEYWORDS.contains(&name) {
        return;
    }
    if out.iter().any(|(_, o)| *o == offset) {
        return;
    }
    out.push((name.to_string(), offset));
}

/// An identifier is a reference unless it is a selector field (`x.field`), a
/// composite-literal key or label (`key:`), or the target of a plain
/// assignment or declaration (`x = `, `x :=`). Slice bounds (`buf[i:j]`) and
/// case expressions (`case limit:`) are references despite the colon.
fn is_reference_site(line: &str, start: usize, end: usize) -> bool {
    let before = &line[..start];
    if before.ends_with('.') || KEYWORDS.contains(&&line[start..end]) {
        return false;
    }
    let rest = line[end..].trim_start();
    if rest.starts_with(":=") {
        return false;
    }
    let assigned = rest.starts_with('=') && !rest.starts_with("==");
    let keyed = rest.starts_with(':') && !in_slice_expr(before) && !in_case_clause(before);
    !(keyed || assigned)
}

fn in_slice_expr(before: &str) -> bool {
    let open = before.matches('[').count();
    let close = before.matches(']').count();
    open > close
}

fn in_case_clause(before: &str) -> bool {
    before
        .trim_start()
        .strip_prefix("case")
        .is_some_and(|tail| tail.starts_with(char::is_whitespace))
}

/// Receiver and parameter names of every `func` signature on the line.
fn func_params(line: &str, out: &mut Vec<(String, usize)>) {
    for m in FUNC.find_iter(line) {
        let mut pos = skip_ws(line, m.end());
        let mut groups = Vec::new();

        if line[pos..].starts_with('(') {
            // Method receiver or function-literal parameters.
            let Some((inner, next)) = paren_group(line, pos, b'(', b')') else {
                continue;
            };
            groups.push(inner);
            pos = skip_ws(line, next);
        }
        if let Some(ident) = IDENT.find(&line[pos..]).filter(|i| i.start() == 0) {
            pos = skip_ws(line, pos + ident.end());
            if line[pos..].starts_with('[') {
                // Type parameters bind types, not variables.
                if let Some((_, next)) = paren_group(line, pos, b'[', b']') {
                    pos = skip_ws(line, next);
                }
            }
            if line[pos..].starts_with('(') {
                if let Some((inner, _)) = paren_group(line, pos, b'(', b')') {
                    groups.push(inner);
                }
            }
        }

        for (start, end) in groups {
            param_names(line, start, end, out);
        }
    }
}

/// Names in a parameter list. Go lists are either all named or all
/// unnamed, so bare entries only count as names when some entry has a type.
fn param_names(line: &str, start: usize, end: usize, out: &mut Vec<(String, usize)>) {
    let segments = split_top_level(line, start, end);
    let named = segments
        .iter()
        .any(|&(s, e)| line[s..e].trim().contains(char::is_whitespace));
    if !named {
        return;
    }
    for (s, e) in segments {
        let offset = skip_ws(line, s);
        if offset >= e {
            continue;
        }
        if let Some(ident) = IDENT.find(&line[offset..e]).filter(|i| i.start() == 0) {
            push_name(ident.as_str(), offset, out);
        }
    }
}

fn split_top_level(line: &str, start: usize, end: usize) -> Vec<(usize, usize)> {
    let bytes = line.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0i32;
    let mut seg_start = start;
    for i in start..end {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b',' if depth == 0 => {
                segments.push((seg_start, i));
                seg_start = i + 1;
            }
            _ => {}
        }
    }
    if line[seg_start..end].trim().is_empty() {
        return segments;
    }
    segments.push((seg_start, end));
    segments
}

/// Inner byte range of the bracket group opening at `open`, and the index
/// just past its closing bracket.
fn paren_group(line: &str, open: usize, open_ch: u8, close_ch: u8) -> Option<((usize, usize), usize)> {
    let bytes = line.as_bytes();
    let mut depth = 0i32;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if b == open_ch {
            depth += 1;
        } else if b == close_ch {
            depth -= 1;
            if depth == 0 {
                return Some(((open + 1, i), i + 1));
            }
        }
    }
    None
}

fn skip_ws(line: &str, pos: usize) -> usize {
    pos + line[pos..].len() - line[pos..].trim_start().len()
}

/// Every line that opens a function body, paired with the line where that
/// body's braces balance again. Go requires the opening brace on the
/// signature line, so `func` types without a body are ignored. An unclosed
/// body runs to the end of the document.
fn find_func_spans(lines: &[String]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    for (start, line) in lines.iter().enumerate() {
        for m in FUNC.find_iter(line) {
            let Some(brace) = line[m.end()..].find('{') else {
                continue;
            };
            let end = body_end(lines, start, m.end() + brace).unwrap_or(lines.len() - 1);
            spans.push((start, end));
        }
    }
    spans
}

fn body_end(lines: &[String], start: usize, brace_col: usize) -> Option<usize> {
    let mut depth = 0i64;
    for (offset, line) in lines[start..].iter().enumerate() {
        let from = if offset == 0 { brace_col } else { 0 };
        for ch in line[from..].chars() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(start + offset);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

#[derive(Clone, Copy, PartialEq)]
enum Lexical {
    Code,
    LineComment,
    BlockComment,
    Interpreted(char),
    Raw,
}

/// Split `text` into lines, replacing comments and the contents of string
/// and rune literals with spaces so that regexes only see code.
fn blank_non_code(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut state = Lexical::Code;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\n' {
            if state == Lexical::LineComment {
                state = Lexical::Code;
            }
            if let Lexical::Interpreted(_) = state {
                state = Lexical::Code;
            }
            lines.push(std::mem::take(&mut current).trim_end_matches('\r').to_string());
            continue;
        }
        match state {
            Lexical::Code => match ch {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = Lexical::LineComment;
                    current.push_str("  ");
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = Lexical::BlockComment;
                    current.push_str("  ");
                }
                '"' | '\'' => {
                    state = Lexical::Interpreted(ch);
                    current.push(ch);
                }
                '`' => {
                    state = Lexical::Raw;
                    current.push(ch);
                }
                _ => current.push(ch),
            },
            Lexical::LineComment => current.push(' '),
            Lexical::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = Lexical::Code;
                    current.push_str("  ");
                } else {
                    current.push(' ');
                }
            }
            Lexical::Interpreted(quote) => {
                if ch == '\\' {
                    if chars.peek().is_some_and(|c| *c != '\n') {
                        chars.next();
                        current.push(' ');
                    }
                    current.push(' ');
                } else if ch == quote {
                    state = Lexical::Code;
                    current.push(ch);
                } else {
                    current.push(' ');
                }
            }
            Lexical::Raw => {
                if ch == '`' {
                    state = Lexical::Code;
                    current.push(ch);
                } else {
                    current.push(' ');
                }
            }
        }
    }
    lines.push(current.trim_end_matches('\r').to_string());
    lines
}
