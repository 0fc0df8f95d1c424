//! Error scenario integration tests

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn moodreel_cmd() -> Command {
    let mut cmd = Command::cargo_bin("moodreel").expect("binary should build");
    cmd.env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .env_remove("MOODREEL_ENDPOINT");
    cmd
}

#[test]
fn empty_input_is_rejected_before_submission() {
    // The endpoint would refuse connections; the request must never be attempted
    moodreel_cmd()
        .args(["-t", "   ", "-e", "http://127.0.0.1:1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least one input"))
        .stdout(predicate::str::contains("HAPPY").not());
}

#[test]
fn no_arguments_is_empty_input() {
    moodreel_cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least one input"));
}

#[test]
fn image_with_wrong_type_is_rejected() {
    let mut notes = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(notes, "not an image").unwrap();

    moodreel_cmd()
        .args(["-t", "hello", "-i"])
        .arg(notes.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("valid image"));
}

#[test]
fn audio_given_an_image_is_rejected() {
    let mut picture = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    picture.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

    moodreel_cmd()
        .args(["-a"])
        .arg(picture.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("valid audio"));
}

#[test]
fn missing_image_file() {
    moodreel_cmd()
        .args(["-i", "/nonexistent/face.png"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn open_out_of_range_card() {
    moodreel_cmd()
        .args(["-t", "fine", "-e", "http://127.0.0.1:1", "-o", "9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No recommendation #9"));
}

#[test]
fn config_get_unknown_key() {
    moodreel_cmd()
        .args(["config", "get", "api_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_invalid_duration() {
    moodreel_cmd()
        .args(["config", "set", "timeout", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn config_set_invalid_endpoint() {
    moodreel_cmd()
        .args(["config", "set", "endpoint", "ftp://files.local"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http://"));
}

#[test]
fn config_list_with_no_file() {
    moodreel_cmd()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("endpoint"))
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
#[cfg(target_os = "linux")]
fn config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();

    moodreel_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "set", "record_duration", "1m"])
        .assert()
        .success();

    moodreel_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "get", "record_duration"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1m"));

    assert!(dir.path().join("moodreel").join("config.toml").exists());
}
