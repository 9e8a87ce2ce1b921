use vardec_core::config::VardecConfig;
use vardec_core::types::{Decoration, DisplayDecision};

/// Hint text for one decision, e.g. `↳ a, b` or `↳ a×2, b×1`.
pub fn label(decision: &DisplayDecision, config: &VardecConfig) -> String {
    let names: Vec<String> = decision
        .variables
        .iter()
        .map(|v| {
            if config.show_use_counts {
                format!("{}×{}", v.name, v.remaining_uses)
            } else {
                v.name.clone()
            }
        })
        .collect();
    format!("{}{}", config.hint_prefix, names.join(", "))
}

/// Render tuples for a whole pass. Hints always start at column 0 and carry
/// the indentation of the line below them.
pub fn to_decorations(decisions: &[DisplayDecision], config: &VardecConfig) -> Vec<Decoration> {
    decisions
        .iter()
        .map(|d| Decoration {
            line: d.line,
            column: 0,
            text: label(d, config),
            indent_units: d.indent_units,
        })
        .collect()
}
