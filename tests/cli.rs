//! Integration tests for top-level CLI behavior.

use std::process::Command;

fn run_docrun(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_docrun");
    Command::new(bin)
        .args(args)
        .env_remove("DOCRUN_RECORD")
        .output()
        .expect("failed to run docrun binary")
}

#[test]
fn help_shows_runner_flags() {
    let output = run_docrun(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--reuse-existing-virtualenvs"));
    assert!(stdout.contains("--install-only"));
    assert!(stdout.contains("--session"));
}

#[test]
fn list_shows_discovered_variants() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("tests/checkers")).unwrap();
    for file in ["tests/typing.in", "tests/constraints.in", "tests/checkers/rst.py"] {
        std::fs::write(dir.path().join(file), "").unwrap();
    }

    let root = dir.path().to_str().unwrap();
    let output = run_docrun(&["--root", root, "--list"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("- pip-compile(typing)"));
    assert!(stdout.contains("* checkers(rst) -> Run docs build checkers"));
    assert!(!stdout.contains("pip-compile(constraints)"));
}

#[test]
fn unknown_session_fails() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let output = run_docrun(&["--root", root, "docs"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Session not found: docs"));
}

#[test]
fn unknown_flag_fails() {
    let output = run_docrun(&["--frobnicate"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--frobnicate"));
}

#[test]
fn missing_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent");
    let output = run_docrun(&["--root", missing.to_str().unwrap(), "--list"]);
    assert!(!output.status.success());
}
