// Go passes, structural and line-model.

use vardec_core::types::LanguageId;

use super::common::{analyze, hinted_lines};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_go_short_declarations_and_params() {
    let source = "\
package main

func greet(name string, times int) {
\tmsg := \"hi \" + name

\tfor i := 0; i < times; i++ {
\t\tprintln(msg)
\t}
}
";
    let analysis = analyze(source, LanguageId::Go);
    assert_eq!(hinted_lines(&analysis), vec![(4, names(&["times", "msg"]))]);
    assert_eq!(analysis.decisions[0].indent_units, 4);
}

#[test]
fn test_go_package_level_var_spans_document() {
    let source = "\
package main

var debug = false

func main() {
\tif debug {
\t\tprintln(\"debug\")
\t}
}
";
    let analysis = analyze(source, LanguageId::Go);
    assert_eq!(hinted_lines(&analysis), vec![(3, names(&["debug"]))]);
}

#[test]
fn test_go_syntax_error_still_hints() {
    // Unbalanced call: tree-sitter recovers with errors, so the line model runs.
    let source = "\
package main

func main() {
\ttotal := 0
\tcount := 2

\tfmt.Println(total, count
}
";
    let analysis = analyze(source, LanguageId::Go);
    assert!(!analysis.unparsable);
    assert_eq!(hinted_lines(&analysis), vec![(5, names(&["total", "count"]))]);
}

#[test]
fn test_go_line_model_keeps_functions_apart() {
    let source = "\
package main

func a() {
\tx := 1

\tuse(x)
}

func b() {
\tx := 2
\tuse(x
}
";
    let analysis = analyze(source, LanguageId::Go);
    assert_eq!(hinted_lines(&analysis), vec![(4, names(&["x"]))]);
}
