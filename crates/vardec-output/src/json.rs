use crate::{OutputFormatter, Totals};
use vardec_engine::report::DocumentReport;

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_document(&self, report: &DocumentReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }

    fn format_summary(&self, reports: &[DocumentReport]) -> String {
        let value = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "totals": Totals::of(reports),
            "files": reports,
        });
        serde_json::to_string_pretty(&value).unwrap_or_default()
    }
}
