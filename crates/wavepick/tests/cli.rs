//! Runs the `wavepick` binary the way a shell would.

#![cfg(feature = "console")]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use wavepick_test::SCENARIO_TEXT;

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wavepick"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "wavepick_solver=debug,wavepick=info")
        .output()
        .unwrap()
}

#[test]
fn test_stdout_is_exactly_the_solution() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scenario.txt"), SCENARIO_TEXT).unwrap();

    let output = run_in(dir.path(), &["scenario.txt"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "2\n0\n1\n1\n0\n");
    // progress and summary still reach the terminal
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_output_flag_leaves_stdout_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scenario.txt"), SCENARIO_TEXT).unwrap();

    let output = run_in(
        dir.path(),
        &["scenario.txt", "--output", "wave.txt", "--strategy", "bisect-ratio"],
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("wave.txt")).unwrap(),
        "2\n0\n1\n1\n0\n"
    );
}

#[test]
fn test_malformed_default_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scenario.txt"), SCENARIO_TEXT).unwrap();
    fs::write(dir.path().join("wavepick.toml"), "epsilon = [not toml").unwrap();

    let output = run_in(dir.path(), &["scenario.txt"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.lines().filter(|l| l.starts_with("error:")).count(), 1);
    assert!(stderr.contains("Failed to load configuration"));
}

#[test]
fn test_missing_default_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scenario.txt"), SCENARIO_TEXT).unwrap();
    assert!(!dir.path().join("wavepick.toml").exists());

    let output = run_in(dir.path(), &["scenario.txt", "--strategy", "enumerate-aisles"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "2\n0\n1\n1\n0\n");
}
