//! Integration tests for the tfbs-explorer CLI
//!
//! These drive the built binary against a small dataset written to a
//! temporary directory, which also keeps any project config out of reach.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const DATASET: &str = r#"{
    "meta": {"title": "Test signatures", "source_file": "unit.tsv", "notes": ["two TFs"]},
    "tfs": ["TF1", "TF2"],
    "tissues": ["Liver"],
    "matrix": [
        {"tissue": "Liver", "tf": "TF1", "plus": 3, "minus": 1, "unknown": 0,
         "total": 4, "score": 0.5, "imputed": false}
    ],
    "per_tf": [
        {"tf": "TF1", "plus": 3, "minus": 1, "unknown": 0, "total": 4, "score": 0.5}
    ],
    "max_total": 4
}"#;

/// Temp directory holding `data.json`
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let data = dir.path().join("data.json");
    std::fs::write(&data, DATASET).expect("Failed to write dataset");
    (dir, data)
}

fn run(args: &[&str], cwd: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tfbs-explorer"))
        .args(args)
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute tfbs-explorer")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =============================================================================
// Basic Command Tests
// =============================================================================

#[test]
fn test_help_command() {
    let (dir, _) = workspace();
    let output = run(&["--help"], dir.path());

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("tfbs-explorer"));
    assert!(out.contains("serve"));
    assert!(out.contains("render"));
    assert!(out.contains("summary"));
}

#[test]
fn test_version_command() {
    let (dir, _) = workspace();
    let output = run(&["--version"], dir.path());

    assert!(output.status.success());
    assert!(stdout(&output).contains("tfbs-explorer"));
}

// =============================================================================
// Summary
// =============================================================================

#[test]
fn test_summary_lists_top_tfs() {
    let (dir, data) = workspace();
    let output = run(&["summary", "--data", data.to_str().unwrap()], dir.path());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Test signatures"));
    assert!(out.contains("Top 2 TFs"));
    assert!(out.contains("TF1"));
    assert!(out.contains("TF2"));
}

#[test]
fn test_summary_rejects_unlisted_tf_count() {
    let (dir, data) = workspace();
    let output = run(
        &["summary", "--data", data.to_str().unwrap(), "--tf-count", "7"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not one of the allowed values"));
}

#[test]
fn test_missing_dataset_fails() {
    let (dir, _) = workspace();
    let output = run(&["summary", "--data", "nope.json"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Check the data path"));
}

#[test]
fn test_invalid_dataset_fails() {
    let (dir, _) = workspace();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{not json").unwrap();
    let output = run(&["summary", "--data", bad.to_str().unwrap()], dir.path());

    assert_eq!(output.status.code(), Some(1));
}

// =============================================================================
// Render
// =============================================================================

#[test]
fn test_render_writes_snapshot() {
    let (dir, data) = workspace();
    let out = dir.path().join("snap.html");
    let output = run(
        &[
            "render",
            "--data",
            data.to_str().unwrap(),
            "--pin",
            "Liver:TF1",
            "-o",
            out.to_str().unwrap(),
        ],
        dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let html = std::fs::read_to_string(&out).expect("snapshot written");
    assert!(html.contains("<svg"));
    assert!(html.contains("Test signatures"));
    assert!(html.contains("TF = TF1"));
    assert!(html.contains("pinned"));
}

#[test]
fn test_render_default_path() {
    let (dir, data) = workspace();
    let output = run(&["render", "--data", data.to_str().unwrap()], dir.path());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let reports: Vec<_> = std::fs::read_dir(dir.path().join("tfbs-reports"))
        .expect("report dir created")
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(reports.len(), 1);
    let name = reports[0].file_name().to_string_lossy().to_string();
    assert!(name.starts_with("tfbs_snapshot_"));
    assert!(name.ends_with(".html"));
}

#[test]
fn test_render_rejects_unknown_pin() {
    let (dir, data) = workspace();
    let output = run(
        &["render", "--data", data.to_str().unwrap(), "--pin", "Liver:NOPE"],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));

    let output = run(
        &["render", "--data", data.to_str().unwrap(), "--pin", "Liver"],
        dir.path(),
    );
    assert!(!output.status.success());
}

// =============================================================================
// Shell Completion Tests
// =============================================================================

#[test]
fn test_completion_zsh() {
    let (dir, _) = workspace();
    let output = run(&["completion", "zsh"], dir.path());

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("#compdef tfbs-explorer"));
}

#[test]
fn test_completion_bash() {
    let (dir, _) = workspace();
    let output = run(&["completion", "bash"], dir.path());

    assert!(output.status.success());
    assert!(stdout(&output).contains("tfbs-explorer"));
}
