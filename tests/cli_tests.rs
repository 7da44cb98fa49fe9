// LogAnalyzer - tests/cli_tests.rs
//
// Binary-level tests: argument surface, exit codes, stdout/stderr routing.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn loganalyzer() -> Command {
    let mut cmd = Command::cargo_bin("loganalyzer").unwrap();
    // Keep runs independent of any config.toml on the test machine.
    let dir = std::env::temp_dir().join("loganalyzer-cli-tests-no-config.toml");
    cmd.arg("--config").arg(dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_file_exits_with_one() {
    loganalyzer()
        .arg("/no/such/dir/app.log")
        .arg("--stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: File not found - /no/such/dir/app.log"));
}

#[test]
fn test_directory_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    loganalyzer()
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Path is not a file"));
}

#[test]
fn test_count_and_stats() {
    loganalyzer()
        .arg(fixture("app_sample.log"))
        .args(["-c", "--stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyzing: app_sample.log"))
        .stdout(predicate::str::contains("Total lines: 11"))
        .stdout(predicate::str::contains("=== Log Level Statistics ==="));
}

#[test]
fn test_invalid_granularity_is_usage_error() {
    loganalyzer()
        .arg(fixture("app_sample.log"))
        .args(["--time-stats", "weekly"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Use 'hourly' or 'daily'"));
}

#[test]
fn test_negative_top_is_usage_error() {
    loganalyzer()
        .arg(fixture("app_sample.log"))
        .args(["--top", "-3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("positive"));
}

#[test]
fn test_invalid_regex_is_fatal() {
    loganalyzer()
        .arg(fixture("app_sample.log"))
        .args(["--regex", "[unclosed"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid filter regex '[unclosed'"));
}

#[test]
fn test_bad_date_rejected_by_argument_parser() {
    loganalyzer()
        .arg(fixture("app_sample.log"))
        .args(["--from", "yesterday"])
        .assert()
        .failure();
}

#[test]
fn test_two_reports_conflict() {
    loganalyzer()
        .arg(fixture("app_sample.log"))
        .args(["--stats", "--summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_export_requires_a_report() {
    loganalyzer()
        .arg(fixture("app_sample.log"))
        .args(["--level", "error", "--export", "out.csv"])
        .assert()
        .failure();
}

#[test]
fn test_regex_listing() {
    loganalyzer()
        .arg(fixture("app_sample.log"))
        .args(["-r", "REFUSED|quota"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Line 5] "))
        .stdout(predicate::str::contains("[Line 8] "))
        .stdout(predicate::str::contains("--- Found 3 matching lines ---"));
}

#[test]
fn test_top_export_via_cli() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("top.csv");
    loganalyzer()
        .arg(fixture("app_sample.log"))
        .args(["--top", "1", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Top messages exported to:"));
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "Message,Count,Percentage\n\"Connection refused by upstream\",2,20.00%\n"
    );
}

#[test]
fn test_config_shrinks_summary_lists() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[report]\nsummary_top_dates = 2\n").unwrap();

    Command::cargo_bin("loganalyzer")
        .unwrap()
        .arg(fixture("app_sample.log"))
        .arg("--summary")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2 Busiest Dates"))
        .stdout(predicate::str::contains("2024-03-03").count(1));
}
