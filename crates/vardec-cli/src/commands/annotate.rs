//! `vardec annotate` — print hints for files and directories.

use std::path::PathBuf;

use rayon::prelude::*;

use vardec_core::config::{VardecConfig, CONFIG_DIR};
use vardec_core::error::AnalysisError;
use vardec_core::types::{DocumentSnapshot, LanguageId};
use vardec_engine::report::DocumentReport;
use vardec_engine::Analyzer;
use vardec_output::OutputFormatter;
use vardec_parsers::walker::FileWalker;

#[derive(Debug)]
struct Target {
    path: PathBuf,
    language: LanguageId,
}

pub fn run(
    formatter: &dyn OutputFormatter,
    paths: Vec<PathBuf>,
    tab_size: Option<u32>,
    counts: bool,
) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("vardec annotate: failed to get current directory: {}", e);
            return 2;
        }
    };

    let mut config = VardecConfig::load(&cwd.join(CONFIG_DIR));
    if let Some(tab_size) = tab_size {
        config.tab_size = tab_size;
    }
    if counts {
        config.show_use_counts = true;
    }

    let single_file = paths.len() == 1 && paths[0].is_file();
    let paths = if paths.is_empty() { vec![cwd] } else { paths };
    let targets = match collect_targets(&paths, &config) {
        Ok(t) => t,
        Err(msg) => {
            eprintln!("vardec annotate: {}", msg);
            return 2;
        }
    };
    if targets.is_empty() {
        eprintln!("vardec annotate: no supported source files found");
        return 2;
    }
    tracing::debug!(files = targets.len(), "annotating");

    let reports: Vec<DocumentReport> = targets
        .into_par_iter()
        .map_init(
            || Analyzer::new().with_tab_size(config.tab_size),
            |analyzer, target| annotate_file(analyzer, target, &config),
        )
        .collect();

    if single_file {
        print!("{}", formatter.format_document(&reports[0]));
    } else {
        print!("{}", formatter.format_summary(&reports));
    }

    if reports.iter().any(DocumentReport::is_failure) {
        1
    } else {
        0
    }
}

/// Expand the command-line paths into analyzable files. Directories are
/// walked and filtered by the configured languages; files named explicitly
/// must have a supported extension.
fn collect_targets(paths: &[PathBuf], config: &VardecConfig) -> Result<Vec<Target>, String> {
    let mut targets = Vec::new();
    for path in paths {
        if path.is_dir() {
            let walker = FileWalker::new(path).with_ignore_patterns(&config.ignore_patterns);
            targets.extend(
                walker
                    .walk()
                    .into_iter()
                    .filter(|e| config.is_enabled(e.language))
                    .map(|e| Target {
                        path: e.path,
                        language: e.language,
                    }),
            );
        } else if path.is_file() {
            let language = LanguageId::from_path(path).ok_or_else(|| {
                AnalysisError::UnsupportedLanguage(path.display().to_string()).to_string()
            })?;
            targets.push(Target {
                path: path.clone(),
                language,
            });
        } else {
            return Err(format!("no such file or directory: {}", path.display()));
        }
    }
    Ok(targets)
}

fn annotate_file(analyzer: &mut Analyzer, target: Target, config: &VardecConfig) -> DocumentReport {
    let text = match std::fs::read_to_string(&target.path) {
        Ok(text) => text,
        Err(source) => {
            let error = AnalysisError::Io {
                path: target.path.clone(),
                source,
            };
            tracing::warn!(error = %error, "skipping file");
            return DocumentReport::failed(target.path, target.language, &error);
        }
    };
    let snapshot = DocumentSnapshot::new(target.path, text, target.language);
    let result = analyzer.analyze(&snapshot);
    if let Err(e) = &result {
        tracing::warn!(path = %snapshot.path.display(), error = %e, "analysis failed");
    }
    DocumentReport::from_result(snapshot, result, config)
}
