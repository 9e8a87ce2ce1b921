/// Shared test helpers for all vardec integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

use vardec_core::types::{DocumentSnapshot, LanguageId};
use vardec_engine::{analyze_document, Analysis};

/// Analyze `text` as `language` and return the pass result.
#[allow(dead_code)]
pub fn analyze(text: &str, language: LanguageId) -> Analysis {
    let path = match language {
        LanguageId::TypeScript => "test.ts",
        LanguageId::Tsx => "test.tsx",
        LanguageId::JavaScript => "test.js",
        LanguageId::Go => "test.go",
    };
    analyze_document(&DocumentSnapshot::new(path, text, language)).expect("analysis failed")
}

/// Lines annotated by a pass, paired with the names shown on each.
#[allow(dead_code)]
pub fn hinted_lines(analysis: &Analysis) -> Vec<(usize, Vec<String>)> {
    analysis
        .decisions
        .iter()
        .map(|d| (d.line, d.variables.iter().map(|v| v.name.clone()).collect()))
        .collect()
}

/// Create a project directory from `(relative_path, content)` pairs.
///
/// Hold the returned TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn write_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
    }
    dir
}

/// Get path to compiled vardec binary.
///
/// Builds the binary if it doesn't exist yet.
#[allow(dead_code)]
pub fn vardec_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("vardec");
    if !path.exists() {
        let status = Command::new("cargo")
            .args(["build", "-p", "vardec-cli"])
            .status()
            .expect("Failed to build vardec");
        assert!(status.success(), "Failed to build vardec binary");
    }
    path
}
