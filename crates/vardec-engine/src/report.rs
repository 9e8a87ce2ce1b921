use std::path::PathBuf;

use serde::Serialize;

use vardec_core::config::VardecConfig;
use vardec_core::error::AnalysisError;
use vardec_core::types::{Decoration, DisplayDecision, DocumentSnapshot, LanguageId};

use crate::analyzer::Analysis;
use crate::decorate::to_decorations;

/// Outcome of analyzing one file from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportStatus {
    Annotated,
    Unparsable,
    Failed { message: String },
}

/// Everything the formatters need to print one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub language: LanguageId,
    #[serde(flatten)]
    pub status: ReportStatus,
    pub hints: Vec<DisplayDecision>,
    pub decorations: Vec<Decoration>,
    #[serde(skip)]
    pub source: String,
}

impl DocumentReport {
    pub fn from_result(
        snapshot: DocumentSnapshot,
        result: Result<Analysis, AnalysisError>,
        config: &VardecConfig,
    ) -> Self {
        let (status, hints) = match result {
            Ok(analysis) if analysis.unparsable => (ReportStatus::Unparsable, Vec::new()),
            Ok(analysis) => (ReportStatus::Annotated, analysis.decisions),
            Err(e) => (
                ReportStatus::Failed {
                    message: e.to_string(),
                },
                Vec::new(),
            ),
        };
        let decorations = to_decorations(&hints, config);
        Self {
            path: snapshot.path,
            language: snapshot.language_id,
            status,
            hints,
            decorations,
            source: snapshot.text,
        }
    }

    /// A file that could not be read or analyzed at all.
    pub fn failed(path: PathBuf, language: LanguageId, error: &AnalysisError) -> Self {
        Self {
            path,
            language,
            status: ReportStatus::Failed {
                message: error.to_string(),
            },
            hints: Vec::new(),
            decorations: Vec::new(),
            source: String::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, ReportStatus::Failed { .. })
    }
}
