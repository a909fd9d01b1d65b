//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = "Rivers braid through the delta each spring. Farmers time their \
planting to the flood's retreat. Market towns grew along the high ground, trading \
grain for iron and cloth. Each generation extended the levees further downstream. \
Surveyors mapped the channels after storms. Brick kilns lined the southern banks.";

fn sample_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn cmd() -> Command {
    Command::cargo_bin("beatmap").unwrap()
}

#[test]
fn renders_beat_map_for_a_file() {
    let file = sample_file();
    cmd()
        .arg(file.path())
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("DEGRADATION BEAT MAP"))
        .stdout(predicate::str::contains("Category Breakdown:"))
        .stdout(predicate::str::contains("REP:"))
        .stdout(predicate::str::contains("Key Finding:"));
}

#[test]
fn no_color_output_has_no_escape_codes() {
    let file = sample_file();
    let output = cmd()
        .arg(file.path())
        .arg("--no-color")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains('\x1b'));
}

#[test]
fn empty_file_exits_with_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"").unwrap();
    file.flush().unwrap();
    cmd()
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no analyzable words"));
}

#[test]
fn missing_file_exits_with_error() {
    cmd()
        .arg("definitely-not-a-real-file.txt")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn zero_segments_is_a_configuration_error() {
    let file = sample_file();
    cmd()
        .arg(file.path())
        .args(["--segments", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn json_output_parses_and_carries_segment_count() {
    let file = sample_file();
    let output = cmd()
        .arg(file.path())
        .args(["--segments", "4", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["effectiveSegments"], 4);
    assert_eq!(report["segments"].as_array().unwrap().len(), 4);
}

#[test]
fn html_output_goes_to_stdout() {
    let file = sample_file();
    cmd()
        .arg(file.path())
        .arg("--html")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("data-severity"));
}

#[test]
fn html_output_writes_a_file() {
    let file = sample_file();
    let dir = tempfile::TempDir::new().unwrap();
    let target = dir.path().join("map.html");
    cmd()
        .arg(file.path())
        .arg("--html")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML beat map written to"));
    let html = std::fs::read_to_string(&target).unwrap();
    assert!(html.contains("data-score"));
}

#[test]
fn reads_stdin_with_dash() {
    cmd()
        .arg("-")
        .arg("--no-color")
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("DEGRADATION BEAT MAP"));
}

#[test]
fn clamp_notice_lands_on_stderr() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"only four words here").unwrap();
    file.flush().unwrap();
    cmd()
        .arg(file.path())
        .args(["--segments", "50", "--no-color"])
        .assert()
        .success()
        .stderr(predicate::str::contains("supports only 4 segments"));
}

#[test]
fn fail_on_red_gates_degraded_content() {
    let mut file = NamedTempFile::new().unwrap();
    // six-word sentence, twenty copies: segments align with sentences and
    // the repetition category saturates Red
    let degraded = "Artificial intelligence is transforming the world. ".repeat(20);
    file.write_all(degraded.as_bytes()).unwrap();
    file.flush().unwrap();
    cmd()
        .arg(file.path())
        .args(["--no-color", "--fail-on-red"])
        .assert()
        .code(1);
}

#[test]
fn fail_on_red_passes_healthy_content() {
    let file = sample_file();
    cmd()
        .arg(file.path())
        .args(["--no-color", "--fail-on-red"])
        .assert()
        .success();
}

#[test]
fn summary_flag_appends_meeting_block() {
    let file = sample_file();
    cmd()
        .arg(file.path())
        .args(["--no-color", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("Finding:"))
        .stdout(predicate::str::contains("Action:"));
}
