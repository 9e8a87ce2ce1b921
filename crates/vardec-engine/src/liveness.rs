//! The blank-line straddle test.
//!
//! A blank line `L` is annotated only when line `L + 1` has content, so a run
//! of blank lines gets a single hint on its last line. A variable is listed
//! on `L` when it has a use in `[scope.start, L]` and another in
//! `(L, scope.end]`, where `scope` is the tightest scope around `L`.

use vardec_core::types::{DisplayDecision, LiveVariable, ScopeRange, VariableUsage};

/// Whether a line is empty or whitespace-only.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Width of a line's leading whitespace: one unit per space, `tab_size`
/// units per tab.
pub fn indent_units(line: &str, tab_size: u32) -> u32 {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { tab_size } else { 1 })
        .fold(0u32, u32::saturating_add)
}

/// Produce one decision per annotated blank line, in line order.
///
/// `scope_lookup` is asked at most once per candidate line. Lines for which
/// it returns `None` are skipped.
pub fn compute_decisions<S, F>(
    lines: &[S],
    usages: &[VariableUsage],
    mut scope_lookup: F,
    tab_size: u32,
) -> Vec<DisplayDecision>
where
    S: AsRef<str>,
    F: FnMut(usize) -> Option<ScopeRange>,
{
    let mut decisions = Vec::new();

    for line in 0..lines.len().saturating_sub(1) {
        let next = lines[line + 1].as_ref();
        if !is_blank(lines[line].as_ref()) || is_blank(next) {
            continue;
        }
        let Some(scope) = scope_lookup(line) else {
            continue;
        };

        let variables: Vec<LiveVariable> = usages
            .iter()
            .filter_map(|usage| straddle(usage, scope, line))
            .collect();
        if variables.is_empty() {
            continue;
        }

        decisions.push(DisplayDecision {
            line,
            variables,
            indent_units: indent_units(next, tab_size),
        });
    }

    decisions
}

fn straddle(usage: &VariableUsage, scope: ScopeRange, line: usize) -> Option<LiveVariable> {
    if line < scope.start_line || !usage.used_within(scope.start_line, line) {
        return None;
    }
    let remaining = usage.uses_within(line + 1, scope.end_line);
    (remaining > 0).then(|| LiveVariable {
        name: usage.name.clone(),
        remaining_uses: remaining,
    })
}
