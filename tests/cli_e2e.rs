//! End-to-end CLI tests for lovelog.
//!
//! These tests run the actual lovelog binary and verify:
//! - Command-line interface behavior
//! - Output format and content
//! - Error handling and messages
//!
//! Tests are organized by command:
//! - `test_analyze_*` - Analyze command tests
//! - `test_score_*` - Score command tests
//! - `test_config_*` - Config command tests
//! - `test_cli_*` - General CLI tests (flags, help, version)

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

/// Write a transcript file into a fresh temp directory.
fn create_transcript(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("chat.txt");
    fs::write(&path, content).expect("Failed to write transcript");
    (temp_dir, path)
}

/// Get the lovelog command ready for testing
fn lovelog_cmd() -> Command {
    cargo_bin_cmd!("lovelog")
}

// =============================================================================
// Sample Test Data
// =============================================================================

const SAMPLE_CHAT: &str = "\
[01/01/25, 09:00:00 AM] Alice: hey love you!! \u{2764}\u{FE0F}
[01/01/25, 09:02:00 AM] Bob: haha same \u{1F602}
[01/01/25, 09:05:00 AM] Alice: good morning
[01/01/25, 09:06:00 AM] Bob: breakfast plans?
[01/01/25, 09:07:00 AM] Alice: pancakes obviously \u{1F95E}";

const NOISY_CHAT: &str = "\
Messages and calls are end-to-end encrypted.
[01/01/25, 09:00:00 AM] Alice: \u{200E}image omitted
[01/01/25, 09:01:00 AM] Alice: look at this
[01/01/25, 09:03:00 AM] Bob: haha nice";

// =============================================================================
// Analyze Command Tests
// =============================================================================

#[test]
fn test_analyze_text_report() {
    let (_tmp, path) = create_transcript(SAMPLE_CHAT);

    lovelog_cmd()
        .arg("analyze")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Chat Analysis"))
        .stdout(predicate::str::contains("Alice, Bob"))
        .stdout(predicate::str::contains("Love score:"))
        .stdout(predicate::str::contains("Hourly activity"));
}

#[test]
fn test_analyze_json_output() {
    let (_tmp, path) = create_transcript(SAMPLE_CHAT);

    let output = lovelog_cmd()
        .arg("--format")
        .arg("json")
        .arg("analyze")
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value =
        serde_json::from_slice(&output).expect("analyze --format json must emit valid JSON");
    assert_eq!(report["total_messages"], 5);
    assert_eq!(report["participants"][0], "Alice");
    assert!(report["love_score"].as_u64().unwrap() <= 100);
    assert!(report["emoji_frequency"].is_array());
}

#[test]
fn test_analyze_json_is_deterministic() {
    let (_tmp, path) = create_transcript(SAMPLE_CHAT);

    let run = || {
        lovelog_cmd()
            .arg("-f")
            .arg("json")
            .arg("analyze")
            .arg(&path)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_analyze_compact_output() {
    let (_tmp, path) = create_transcript(SAMPLE_CHAT);

    lovelog_cmd()
        .arg("-f")
        .arg("compact")
        .arg("analyze")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("score="))
        .stdout(predicate::str::contains("messages=5"));
}

#[test]
fn test_analyze_skips_noise_lines() {
    let (_tmp, path) = create_transcript(NOISY_CHAT);

    let output = lovelog_cmd()
        .arg("-f")
        .arg("json")
        .arg("analyze")
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    // System notice and the U+200E media line are dropped.
    assert_eq!(report["total_messages"], 2);
}

#[test]
fn test_analyze_missing_file() {
    lovelog_cmd()
        .arg("analyze")
        .arg("/nonexistent/chat.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transcript not found"));
}

#[test]
fn test_analyze_empty_transcript_fails() {
    let (_tmp, path) = create_transcript("no recognizable lines here\n\n");

    lovelog_cmd()
        .arg("analyze")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No messages parsed"));
}

#[test]
fn test_analyze_top_flag_limits_lists() {
    let (_tmp, path) = create_transcript(SAMPLE_CHAT);

    let output = lovelog_cmd()
        .arg("analyze")
        .arg(&path)
        .arg("--top")
        .arg("1")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let words_section: Vec<&str> = stdout
        .lines()
        .skip_while(|l| !l.contains("Top words"))
        .skip(1)
        .take_while(|l| !l.trim().is_empty())
        .collect();
    assert_eq!(words_section.len(), 1);
}

// =============================================================================
// Score Command Tests
// =============================================================================

#[test]
fn test_score_text_breakdown() {
    let (_tmp, path) = create_transcript(SAMPLE_CHAT);

    lovelog_cmd()
        .arg("score")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Love Score"))
        .stdout(predicate::str::contains("Reply speed:"))
        .stdout(predicate::str::contains("Emoji density:"))
        .stdout(predicate::str::contains("Balance:"))
        .stdout(predicate::str::contains("Consistency:"))
        .stdout(predicate::str::contains("/ 100"));
}

#[test]
fn test_score_compact_is_bare_number() {
    let (_tmp, path) = create_transcript(SAMPLE_CHAT);

    let output = lovelog_cmd()
        .arg("-f")
        .arg("compact")
        .arg("score")
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let score: u8 = String::from_utf8(output)
        .unwrap()
        .trim()
        .parse()
        .expect("compact score output must be a bare integer");
    assert!(score <= 100);
}

#[test]
fn test_score_json_has_factor_fields() {
    let (_tmp, path) = create_transcript(SAMPLE_CHAT);

    let output = lovelog_cmd()
        .arg("-f")
        .arg("json")
        .arg("score")
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    for field in [
        "love_score",
        "reply_speed",
        "emoji_density",
        "balance",
        "consistency",
    ] {
        assert!(value.get(field).is_some(), "missing field {field}");
    }
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
fn test_config_init_prints_default_toml() {
    lovelog_cmd()
        .arg("config")
        .arg("--init")
        .assert()
        .success()
        .stdout(predicate::str::contains("[output]"))
        .stdout(predicate::str::contains("[analysis]"));
}

#[test]
fn test_config_show() {
    lovelog_cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Configuration"))
        .stdout(predicate::str::contains("Top items:"));
}

// =============================================================================
// General CLI Tests
// =============================================================================

#[test]
fn test_cli_help() {
    lovelog_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("score"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_cli_version() {
    lovelog_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lovelog"));
}

#[test]
fn test_cli_rejects_unknown_subcommand() {
    lovelog_cmd().arg("frobnicate").assert().failure();
}

#[test]
fn test_cli_completions_bash() {
    lovelog_cmd()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("lovelog"));
}
