// Tests for CLI exit code behavior.

use std::process::Command;

use super::common::{vardec_bin, write_project};

fn run(dir: &std::path::Path, args: &[&str]) -> Option<i32> {
    Command::new(vardec_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
        .status
        .code()
}

#[test]
/// Exit code 0 when every file is annotated.
fn test_exit_code_0_clean() {
    let dir = write_project(&[("a.ts", "let a = 1;\n\nf(a);\n")]);
    assert_eq!(run(dir.path(), &["annotate"]), Some(0));
}

#[test]
/// A file that does not parse is skipped, not an error.
fn test_exit_code_0_unparsable() {
    let dir = write_project(&[("a.ts", "let = ;\n")]);
    assert_eq!(run(dir.path(), &["annotate", "a.ts"]), Some(0));
}

#[test]
/// Exit code 1 when a file cannot be read.
fn test_exit_code_1_unreadable() {
    let dir = write_project(&[("a.ts", "let a = 1;\n")]);
    // Invalid UTF-8 fails `read_to_string`.
    std::fs::write(dir.path().join("b.ts"), [0xff, 0xfe, 0x00]).unwrap();
    assert_eq!(run(dir.path(), &["annotate"]), Some(1));
}

#[test]
/// Exit code 1 for an unknown config key.
fn test_exit_code_1_unknown_config_key() {
    let dir = write_project(&[]);
    assert_eq!(run(dir.path(), &["config", "nope"]), Some(1));
}

#[test]
/// Exit code 2 for usage errors.
fn test_exit_code_2_usage() {
    let dir = write_project(&[("notes.txt", "text")]);
    assert_eq!(run(dir.path(), &["annotate"]), Some(2));
    assert_eq!(run(dir.path(), &["annotate", "notes.txt"]), Some(2));
    assert_eq!(run(dir.path(), &["annotate", "missing.ts"]), Some(2));
    assert_eq!(run(dir.path(), &["annotate", "--tab-size", "0"]), Some(2));
    assert_eq!(run(dir.path(), &["completion", "tcsh"]), Some(2));
}
