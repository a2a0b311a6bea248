//! End-to-end runs of the `scorecast` binary.

use assert_cmd::Command;
use indoc::indoc;
use scorecast::io::{read_portfolio, write_portfolio};
use scorecast::testkit::sample_portfolio;
use scorecast::IndicatorKey;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn scorecast(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scorecast"));
    cmd.current_dir(dir)
        .env_remove("SCORECAST_ADVISORY_COMMAND")
        .env_remove("RUST_LOG")
        .arg("--plain");
    cmd
}

fn sample_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("portfolio.json");
    write_portfolio(&path, &sample_portfolio()).unwrap();
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "scorecast failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_template_then_empty_report() {
    let dir = TempDir::new().unwrap();
    scorecast(dir.path())
        .args(["template", "portfolio.json"])
        .assert()
        .success();

    let out = stdout_of(scorecast(dir.path()).args(["report", "portfolio.json"]));
    assert!(out.contains("No scores recorded yet"), "{out}");

    scorecast(dir.path())
        .args(["template", "portfolio.json"])
        .assert()
        .failure();
}

#[test]
fn test_json_report() {
    let dir = TempDir::new().unwrap();
    let path = sample_file(&dir);

    let out = stdout_of(
        scorecast(dir.path())
            .arg("report")
            .arg(&path)
            .args(["--format", "json"]),
    );
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["tally"]["pending"], 1);
    assert_eq!(report["groupings"].as_array().unwrap().len(), 1);
    assert_eq!(report["groupings"][0]["name"], "Alpha Line");
}

#[test]
fn test_analyze_recommend_and_save_without_advisory() {
    let dir = TempDir::new().unwrap();
    let path = sample_file(&dir);

    let out = stdout_of(scorecast(dir.path()).arg("analyze").arg(&path).args([
        "--grouping",
        "alpha",
        "--indicator",
        "alpha-01",
        "--recommend",
        "--save",
    ]));
    assert!(out.contains("Target 73.54 (+0.5σ)"), "{out}");
    assert!(out.contains("values estimated"), "{out}");

    let saved = read_portfolio(&path).unwrap();
    let (_, indicator) = saved
        .indicator(&IndicatorKey::new("alpha", "alpha-01"))
        .unwrap();
    assert_eq!(indicator.recommendation().unwrap().warning_score(), 62.93);
}

#[test]
fn test_analyze_unknown_indicator_fails() {
    let dir = TempDir::new().unwrap();
    let path = sample_file(&dir);

    let output = scorecast(dir.path())
        .arg("analyze")
        .arg(&path)
        .args(["-g", "alpha", "-i", "missing"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("indicator 'missing' not found"));
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    scorecast(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".scorecast.toml").exists());

    scorecast(dir.path()).arg("init").assert().failure();
    scorecast(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_invalid_explicit_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bad.toml"),
        indoc! {r#"
            [series]
            labels = []

            [advisory]
            timeout_seconds = 0
        "#},
    )
    .unwrap();

    let output = scorecast(dir.path())
        .args(["--config", "bad.toml", "template", "portfolio.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("series.labels"), "{stderr}");
    assert!(stderr.contains("advisory.timeout_seconds"), "{stderr}");
}

#[cfg(unix)]
#[test]
fn test_advisory_command_answers_request() {
    let dir = TempDir::new().unwrap();
    let path = sample_file(&dir);
    fs::write(
        dir.path().join(".scorecast.toml"),
        indoc! {r#"
            [series]
            labels = ["Jan", "Feb", "Mar", "Apr"]

            [advisory]
            command = "sh"
            args = ["-c", "cat > /dev/null; echo '{\"recommendedScore\": 88, \"warningScore\": 64, \"difficulty\": \"Challenging\", \"reasoning\": \"Upward trend\", \"advice\": [\"a\", \"b\", \"c\"]}'"]
        "#},
    )
    .unwrap();

    let out = stdout_of(scorecast(dir.path()).arg("analyze").arg(&path).args([
        "-g",
        "alpha",
        "-i",
        "alpha-01",
        "--recommend",
        "--format",
        "json",
    ]));
    let analysis: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(analysis["recommendation"]["recommendedScore"], 88.0);
    assert_eq!(analysis["recommendation"]["difficulty"], "Challenging");
    assert_eq!(analysis["status"], "in_progress");
}
