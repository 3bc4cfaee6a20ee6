//! End-to-end tests for the `tl` binary.
//!
//! Every test runs with a temporary HOME so no user configuration leaks in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn tl_binary() -> String {
    env!("CARGO_BIN_EXE_tl").to_string()
}

fn tl(home: &Path, args: &[&str]) -> Output {
    Command::new(tl_binary())
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("TL_CALENDAR")
        .env_remove("TL_WIDTH")
        .env_remove("TL_HEIGHT")
        .args(args)
        .output()
        .expect("failed to run tl")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "tl should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_convert_between_calendars() {
    let temp = TempDir::new().unwrap();
    let output = tl(
        temp.path(),
        &["convert", "2023-09-12", "--from", "gregorian", "--to", "coptic"],
    );
    assert_eq!(stdout(&output), "1740-01-01 00:00:00\n");
}

#[test]
fn test_convert_rejects_far_off_year() {
    let temp = TempDir::new().unwrap();
    let output = tl(
        temp.path(),
        &["convert", "9000000000000000000-01-01 00:00:00", "--to", "coptic"],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("can't be after year 9989"), "{stderr}");
    assert!(!stderr.contains("panicked"), "{stderr}");
}

#[test]
fn test_navigate_reports_missing_date() {
    let temp = TempDir::new().unwrap();
    let output = tl(
        temp.path(),
        &[
            "navigate",
            "forward",
            "--start",
            "1892-02-29",
            "--end",
            "1896-02-29",
        ],
    );
    assert_eq!(stdout(&output), "missing date\n");
}

#[test]
fn test_navigate_rejects_unknown_step() {
    let temp = TempDir::new().unwrap();
    let output = tl(temp.path(), &["navigate", "sideways", "--start", "0", "--end", "1"]);
    assert!(!output.status.success());
}

#[test]
fn test_config_file_sets_default_calendar() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("tl.toml");
    std::fs::write(&config, "calendar = \"numeric\"\n").unwrap();

    let output = tl(temp.path(), &["--config", config.to_str().unwrap(), "steps"]);
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("go-to-time"));
}

#[test]
fn test_env_overrides_config_calendar() {
    let temp = TempDir::new().unwrap();
    let output = Command::new(tl_binary())
        .env("HOME", temp.path())
        .env_remove("XDG_CONFIG_HOME")
        .env("TL_CALENDAR", "numeric")
        .args(["navigate", "backward", "--start", "0", "--end", "10"])
        .output()
        .unwrap();
    assert!(stdout(&output).starts_with("-10 to 0\n"));
}

#[test]
fn test_render_document() {
    let temp = TempDir::new().unwrap();
    let document = temp.path().join("timeline.json");
    std::fs::write(
        &document,
        r#"{
            "calendar": "numeric",
            "categories": [{"name": "work", "color": [10, 100, 200]}],
            "events": [
                {"start": "20", "end": "40", "text": "span", "category": "work"},
                {"start": "70", "text": "point"}
            ]
        }"#,
    )
    .unwrap();
    let path = document.to_str().unwrap();

    let summary = stdout(&tl(
        temp.path(),
        &["render", path, "--start", "0", "--end", "100"],
    ));
    assert!(summary.contains("span (period) at (200, 220) size 201x18"));

    let json = stdout(&tl(
        temp.path(),
        &["render", path, "--start", "0", "--end", "100", "--json"],
    ));
    let commands: serde_json::Value = serde_json::from_str(&json).unwrap();
    let fills = commands
        .as_array()
        .unwrap()
        .iter()
        .filter(|command| {
            command["kind"] == "fill_rect" && command["fill"] == serde_json::json!([10, 100, 200])
        })
        .count();
    assert_eq!(fills, 1);
}

#[test]
fn test_render_missing_document_fails() {
    let temp = TempDir::new().unwrap();
    let output = tl(temp.path(), &["render", "does-not-exist.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}
