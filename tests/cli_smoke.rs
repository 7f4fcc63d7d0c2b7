#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the CLI binary starts correctly and
//! responds to basic commands without touching the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs `mentor` against an empty config and cache directory.
#[allow(deprecated)]
fn mentor(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mentor").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .env("NO_COLOR", "1")
        .env("NO_PROXY", "*")
        .env_remove("MENTOR_LOG")
        .env_remove("AZURE_REGION")
        .env_remove("AZURE_SPEECH_KEY")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    mentor(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("learning mentor"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("voices"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    mentor(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_voices_lists_table() {
    let home = TempDir::new().unwrap();
    mentor(&home)
        .arg("voices")
        .assert()
        .success()
        .stdout(predicate::str::contains("ko-KR-SunHiNeural"))
        .stdout(predicate::str::contains("ko-KR-InJoonNeural"))
        .stdout(predicate::str::contains("en-US"))
        .stdout(predicate::str::contains("zh-CN"));
}

#[test]
fn test_ask_without_question_is_usage_error() {
    let home = TempDir::new().unwrap();
    mentor(&home)
        .arg("ask")
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("question"));
}

#[test]
fn test_ask_blank_question_is_usage_error() {
    let home = TempDir::new().unwrap();
    mentor(&home)
        .args(["ask", "   "])
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("question"));
}

#[test]
fn test_ask_rejects_unsupported_image() {
    let home = TempDir::new().unwrap();
    let image = home.path().join("scan.gif");
    std::fs::write(&image, b"GIF89a").unwrap();

    mentor(&home)
        .args(["ask", "이 문제 풀어줘"])
        .arg("--image")
        .arg(&image)
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Unsupported image type"));
}

#[test]
fn test_ask_without_speech_region_is_config_error() {
    let home = TempDir::new().unwrap();
    mentor(&home)
        .env("OPENAI_API_KEY", "test-key")
        .args(["ask", "분수가 뭐예요?"])
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("region"));
}

#[test]
fn test_ask_rejects_off_grid_speed() {
    let home = TempDir::new().unwrap();
    mentor(&home)
        .args(["ask", "hi", "--speed", "25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid speed"));
}

#[test]
fn test_ask_rejects_unknown_level() {
    let home = TempDir::new().unwrap();
    mentor(&home)
        .args(["ask", "hi", "--level", "college"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("college"));
}

#[test]
fn test_configure_show_without_config() {
    let home = TempDir::new().unwrap();
    mentor(&home)
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[mentor]"))
        .stdout(predicate::str::contains("(not set)"))
        .stdout(predicate::str::contains("built-in 'openai'"));
}

#[test]
fn test_broken_config_is_config_error() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("config").join("mentor");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[mentor\nlevel = ").unwrap();

    mentor(&home)
        .args(["configure", "--show"])
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_chat_help() {
    let home = TempDir::new().unwrap();
    mentor(&home)
        .args(["chat", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--level"))
        .stdout(predicate::str::contains("--subjects"))
        .stdout(predicate::str::contains("--lang"))
        .stdout(predicate::str::contains("--speed"))
        .stdout(predicate::str::contains("--provider"));
}
