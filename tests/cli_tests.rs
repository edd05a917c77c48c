#![cfg(feature = "cli_api")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_checks_summer_break() {
    run_cli("check 2025-07-15\nquit\n")
        .success()
        .stdout(str_contains("Elementary vacation: true"))
        .stdout(str_contains("Summary            : חופשת קיץ"));
}

#[test]
fn cli_friday_toggle_changes_result() {
    let assert = run_cli("check 2025-11-07\nfriday false\ncheck 2025-11-07\nquit\n").success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let (before, after) = output
        .split_once("friday set to false.")
        .expect("toggle acknowledged");
    assert!(before.contains("High vacation      : true"));
    assert!(after.contains("High vacation      : false"));
}

#[test]
fn cli_language_switch() {
    run_cli("lang en\ncheck 2025-11-08\nquit\n")
        .success()
        .stdout(str_contains("Language set to en."))
        .stdout(str_contains("Summary            : Sabbath"));
}

#[test]
fn cli_rejects_invalid_input() {
    run_cli("check 15/07/2025\nlang fr\nbogus\nquit\n")
        .success()
        .stdout(str_contains("Invalid date (YYYY-MM-DD)"))
        .stdout(str_contains("Usage: lang <he|en>"))
        .stdout(str_contains("Unknown command. Type 'help'."));
}

#[test]
fn cli_saves_and_loads_table() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().to_string();
    let script = format!("table save csv {path}\ntable load csv {path}\nholidays\nquit\n");
    run_cli(&script)
        .success()
        .stdout(str_contains("Holiday table loaded from"))
        .stdout(str_contains("(14 records)"))
        .stdout(str_contains("Coverage           : 2025-07-01 .. 2026-08-31"));
}

#[test]
fn cli_config_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().to_string();
    let script = format!("high false\nconfig save {path}\nhigh true\nconfig load {path}\nquit\n");
    run_cli(&script)
        .success()
        .stdout(str_contains("Configuration loaded from"))
        .stdout(str_contains("High school        : false"));
}
