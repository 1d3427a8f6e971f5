use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("farewatch")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn completion_generates_bash_script() {
    Command::cargo_bin("farewatch")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("farewatch"));
}

#[test]
fn check_fails_cleanly_on_missing_config() {
    Command::cargo_bin("farewatch")
        .unwrap()
        .args([
            "check",
            "--origin",
            "Moscow",
            "--destination",
            "Sochi",
            "--date",
            "05.11.2026",
            "--config",
            "/nonexistent/farewatch.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn check_rejects_invalid_config_before_launching() {
    let config = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(config.path(), "{ \"url\": \"not a url\" }").unwrap();

    Command::cargo_bin("farewatch")
        .unwrap()
        .args([
            "check",
            "--origin",
            "Moscow",
            "--destination",
            "Sochi",
            "--date",
            "05.11.2026",
            "--config",
        ])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
