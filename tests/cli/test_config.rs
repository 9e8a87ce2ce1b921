// Tests for `vardec config`.

use std::fs;
use std::process::Command;

use super::common::{vardec_bin, write_project};

#[test]
fn test_config_dump_defaults() {
    let dir = write_project(&[]);
    let out = Command::new(vardec_bin())
        .arg("config")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["tab_size"], 4);
    assert_eq!(value["settle_ms"], 500);
    assert_eq!(value["auto_annotate"], true);
    assert_eq!(value["hint_prefix"], "↳ ");
}

#[test]
fn test_config_set_then_get() {
    let dir = write_project(&[]);
    let bin = vardec_bin();

    let out = Command::new(&bin)
        .args(["config", "show_use_counts", "true"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(dir.path().join(".vardec/vardec.json").exists());

    let out = Command::new(&bin)
        .args(["config", "show_use_counts"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "true");
}

#[test]
fn test_config_set_changes_annotate_output() {
    let dir = write_project(&[("a.ts", "let a = 1;\n\nf(a);\n")]);
    let bin = vardec_bin();

    let out = Command::new(&bin)
        .args(["config", "hint_prefix", "=> "])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success());

    let out = Command::new(&bin)
        .args(["annotate", "a.ts"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&out.stdout).contains("2 | => a\n"));
}

#[test]
fn test_config_malformed_file_falls_back_to_defaults() {
    let dir = write_project(&[(".vardec/vardec.json", "{ not json")]);
    let out = Command::new(vardec_bin())
        .args(["config", "tab_size"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "4");

    // The broken file is left alone until something is set.
    let content = fs::read_to_string(dir.path().join(".vardec/vardec.json")).unwrap();
    assert_eq!(content, "{ not json");
}
