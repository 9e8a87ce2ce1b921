use std::collections::HashMap;

use crate::{OutputFormatter, Totals};
use vardec_engine::report::{DocumentReport, ReportStatus};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_document(&self, report: &DocumentReport) -> String {
        let path = report.path.display();
        match &report.status {
            ReportStatus::Unparsable => return format!("{path}: skipped (does not parse)\n"),
            ReportStatus::Failed { message } => return format!("{path}: error: {message}\n"),
            ReportStatus::Annotated => {}
        }
        if report.decorations.is_empty() {
            return format!("{path}: no hints\n");
        }

        let hints: HashMap<usize, String> = report
            .decorations
            .iter()
            .map(|d| (d.line, format!("{}{}", " ".repeat(d.indent_units as usize), d.text)))
            .collect();

        let lines: Vec<&str> = report.source.split('\n').collect();
        let width = lines.len().to_string().len();
        let mut out = format!("{path} ({})\n", report.language);
        for (i, line) in lines.iter().enumerate() {
            let text = hints.get(&i).map(String::as_str).unwrap_or(line.trim_end());
            if text.is_empty() {
                out.push_str(&format!("{:>width$} |\n", i + 1));
            } else {
                out.push_str(&format!("{:>width$} | {}\n", i + 1, text));
            }
        }
        out
    }

    fn format_summary(&self, reports: &[DocumentReport]) -> String {
        let mut out = String::new();
        for report in reports {
            out.push_str(&self.format_document(report));
        }
        let totals = Totals::of(reports);
        out.push_str(&format!(
            "\n{} hint(s) in {} file(s)",
            totals.hints, totals.files
        ));
        if totals.unparsable > 0 {
            out.push_str(&format!(", {} skipped", totals.unparsable));
        }
        if totals.failed > 0 {
            out.push_str(&format!(", {} failed", totals.failed));
        }
        out.push('\n');
        out
    }
}
