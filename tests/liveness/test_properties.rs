// Properties every pass must satisfy, checked over realistic fixtures.

use std::path::Path;

use vardec_core::types::{LanguageId, ScopeRange, VariableUsage};
use vardec_engine::liveness::is_blank;
use vardec_parsers::adapter::LanguageAdapter;
use vardec_parsers::go::GoAdapter;
use vardec_parsers::typescript::TsAdapter;

use super::common::{analyze, hinted_lines};

const PIPELINE_TS: &str = include_str!("../fixtures/sources/pipeline.ts");
const SERVER_GO: &str = include_str!("../fixtures/sources/server.go");

/// Straddle set for `line`, computed directly from the definition.
fn expected_names(usages: &[VariableUsage], scope: ScopeRange, line: usize) -> Vec<String> {
    usages
        .iter()
        .filter(|u| {
            let before = u
                .used_at
                .iter()
                .any(|&l| l >= scope.start_line && l <= line);
            let after = u.used_at.iter().any(|&l| l > line && l <= scope.end_line);
            before && after
        })
        .map(|u| u.name.clone())
        .collect()
}

fn check_against_definition<A: LanguageAdapter>(adapter: &A, source: &str, language: LanguageId) {
    let ast = adapter
        .get_ast(source, Path::new("fixture"))
        .unwrap()
        .expect("fixture should parse");
    let usages = adapter.collect_variable_usage(&ast);
    let lines: Vec<&str> = source.split('\n').collect();

    let mut expected = Vec::new();
    for line in 0..lines.len() - 1 {
        if !is_blank(lines[line]) || is_blank(lines[line + 1]) {
            continue;
        }
        let scope = adapter.scope_range_for_line(&ast, line).unwrap();
        let names = expected_names(&usages, scope, line);
        if !names.is_empty() {
            expected.push((line, names));
        }
    }

    let analysis = analyze(source, language);
    assert!(!expected.is_empty(), "fixture should produce hints");
    assert_eq!(hinted_lines(&analysis), expected);
}

#[test]
fn test_straddle_matches_definition_typescript() {
    check_against_definition(&TsAdapter::typescript(), PIPELINE_TS, LanguageId::TypeScript);
}

#[test]
fn test_straddle_matches_definition_go() {
    check_against_definition(&GoAdapter::new(), SERVER_GO, LanguageId::Go);
}

#[test]
fn test_determinism() {
    let first = analyze(PIPELINE_TS, LanguageId::TypeScript);
    let second = analyze(PIPELINE_TS, LanguageId::TypeScript);
    assert_eq!(first, second);

    let first = analyze(SERVER_GO, LanguageId::Go);
    let second = analyze(SERVER_GO, LanguageId::Go);
    assert_eq!(first, second);
}

#[test]
fn test_blank_run_collapses_to_one_hint() {
    for blanks in 1..6 {
        let source = format!("let a = 1;{}log(a);", "\n".repeat(blanks + 1));
        let analysis = analyze(&source, LanguageId::TypeScript);
        assert_eq!(analysis.decisions.len(), 1, "{blanks} blank line(s)");
        assert_eq!(analysis.decisions[0].line, blanks);
    }
}

#[test]
fn test_scope_contains_every_line() {
    let ts = TsAdapter::typescript();
    let ast = ts.get_ast(PIPELINE_TS, Path::new("p.ts")).unwrap().unwrap();
    let line_count = PIPELINE_TS.split('\n').count();
    for line in 0..line_count {
        let scope = ts.scope_range_for_line(&ast, line).unwrap();
        assert!(scope.contains(line), "line {line} outside {scope:?}");
    }
    assert_eq!(ts.scope_range_for_line(&ast, line_count), None);

    let go = GoAdapter::new();
    let ast = go.get_ast(SERVER_GO, Path::new("s.go")).unwrap().unwrap();
    let line_count = SERVER_GO.split('\n').count();
    for line in 0..line_count {
        let scope = go.scope_range_for_line(&ast, line).unwrap();
        assert!(scope.contains(line), "line {line} outside {scope:?}");
    }
    assert_eq!(go.scope_range_for_line(&ast, line_count), None);
}

#[test]
fn test_no_use_before_declaration() {
    let ts = TsAdapter::typescript();
    let ast = ts.get_ast(PIPELINE_TS, Path::new("p.ts")).unwrap().unwrap();
    let go = GoAdapter::new();
    let go_ast = go.get_ast(SERVER_GO, Path::new("s.go")).unwrap().unwrap();

    let mut usages = ts.collect_variable_usage(&ast);
    usages.extend(go.collect_variable_usage(&go_ast));
    for usage in &usages {
        assert_eq!(usage.used_at[0], usage.declared_at, "{}", usage.name);
        assert!(usage.used_at[1..].iter().all(|&l| l > usage.declared_at));
        let mut deduped = usage.used_at.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), usage.used_at.len(), "{} has duplicate lines", usage.name);
    }
}

#[test]
fn test_pipeline_hints() {
    let analysis = analyze(PIPELINE_TS, LanguageId::TypeScript);
    let lines = hinted_lines(&analysis);
    // Before the loop in `dedupe`.
    assert!(lines.contains(&(
        7,
        vec!["items".to_string(), "verbose".to_string(), "seen".to_string(), "count".to_string()]
    )));
    // Inside `Cache.get`.
    assert!(lines.contains(&(29, vec!["hit".to_string()])));
}
