//! Output formatters for vardec command results.
//!
//! - **JSON** (`--json`): machine-readable reports
//! - **Human** (default): source listings with hints drawn in place

pub mod human;
pub mod json;

use vardec_engine::report::DocumentReport;

pub trait OutputFormatter {
    fn format_document(&self, report: &DocumentReport) -> String;
    fn format_summary(&self, reports: &[DocumentReport]) -> String;
}

/// Totals across a batch of reports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Totals {
    pub files: usize,
    pub hints: usize,
    pub unparsable: usize,
    pub failed: usize,
}

impl Totals {
    pub fn of(reports: &[DocumentReport]) -> Self {
        use vardec_engine::report::ReportStatus;
        let mut totals = Totals {
            files: reports.len(),
            ..Default::default()
        };
        for report in reports {
            totals.hints += report.decorations.len();
            match report.status {
                ReportStatus::Annotated => {}
                ReportStatus::Unparsable => totals.unparsable += 1,
                ReportStatus::Failed { .. } => totals.failed += 1,
            }
        }
        totals
    }
}
