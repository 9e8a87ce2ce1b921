// Canonical scenarios for blank-line hints.

use vardec_core::types::LanguageId;

use super::common::{analyze, hinted_lines};

#[test]
fn test_blank_run_anchors_on_last_blank_line() {
    let analysis = analyze("let a = 1;\n\n\nconsole.log(a);", LanguageId::TypeScript);
    assert_eq!(hinted_lines(&analysis), vec![(2, vec!["a".to_string()])]);
}

#[test]
fn test_blank_line_inside_one_function_only() {
    let source = "\
function first() {
  const x = 1;

  return x;
}
function second() {
  const x = 2;
  return x;
}";
    let analysis = analyze(source, LanguageId::TypeScript);
    assert_eq!(hinted_lines(&analysis), vec![(2, vec!["x".to_string()])]);
    assert_eq!(analysis.decisions[0].variables[0].remaining_uses, 1);
}

#[test]
fn test_same_name_does_not_leak_between_functions() {
    let source = "\
function first() {
  const x = 1;
  return x;
}

function second() {
  const x = 2;

  return x;
}";
    let analysis = analyze(source, LanguageId::TypeScript);
    assert_eq!(hinted_lines(&analysis), vec![(7, vec!["x".to_string()])]);
}

#[test]
fn test_nothing_live_means_no_hint() {
    let analysis = analyze("let a = 1;\nconsole.log(a);\n\nlet b = 2;", LanguageId::TypeScript);
    assert!(analysis.decisions.is_empty());
    assert!(!analysis.unparsable);
}

#[test]
fn test_malformed_source_yields_nothing() {
    let analysis = analyze("function broken( {\n\n  let = ;\n", LanguageId::TypeScript);
    assert!(analysis.unparsable);
    assert!(analysis.decisions.is_empty());
}

#[test]
fn test_module_level_declarations_use_whole_document() {
    let source = "const base = 2;\n\nfunction scale(n: number) {\n  return n * base;\n}";
    let analysis = analyze(source, LanguageId::TypeScript);
    assert_eq!(hinted_lines(&analysis), vec![(1, vec!["base".to_string()])]);
}

#[test]
fn test_indent_matches_next_line() {
    let source = "function f() {\n    const a = 1;\n\n    return a;\n}";
    let analysis = analyze(source, LanguageId::TypeScript);
    assert_eq!(analysis.decisions[0].indent_units, 4);

    let tabs = "function f() {\n\t\tconst a = 1;\n\n\t\treturn a;\n}";
    let analysis = analyze(tabs, LanguageId::JavaScript);
    assert_eq!(analysis.decisions[0].indent_units, 8);
}

#[test]
fn test_jsx_component() {
    let source = "\
export function Greeting({ name, excited }) {
  const mark = excited ? '!' : '.';

  return <p>{name}{mark}</p>;
}";
    let analysis = analyze(source, LanguageId::Tsx);
    assert_eq!(
        hinted_lines(&analysis),
        vec![(2, vec!["name".to_string(), "mark".to_string()])]
    );
}
