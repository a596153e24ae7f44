// file: tests/cli_test.rs
// version: 1.0.0
// guid: 762b37e0-04f8-49a9-b84c-922ae11361ba

//! End-to-end tests for the transfer-bridge binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

fn bridge() -> Command {
    let mut cmd = Command::cargo_bin("transfer-bridge").unwrap();
    cmd.env_remove("TRANSFER_BRIDGE_CONFIG");
    cmd
}

#[test]
fn test_manifest_prints_routes() {
    bridge()
        .arg("manifest")
        .assert()
        .success()
        .stdout(predicate::str::contains("/rsync/run"))
        .stdout(predicate::str::contains("/rclone/run"))
        .stdout(predicate::str::contains("node_class_mappings"));
}

#[test]
fn test_rsync_requires_positional_paths() {
    bridge().arg("rsync").assert().failure();
}

#[test]
fn test_missing_config_file_fails() {
    bridge()
        .args(["--config", "/nonexistent/transfer-bridge.yaml", "manifest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_missing_tool_reports_error() {
    let config = config_file("rsync:\n  binary: transfer-bridge-missing-rsync\n");

    bridge()
        .args(["--quiet", "--config"])
        .arg(config.path())
        .args(["rsync", "/a", "/b"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error: rsync executable not found on PATH"));
}

#[cfg(unix)]
#[test]
fn test_rsync_dry_run_via_echo() {
    let config = config_file("rsync:\n  binary: echo\n  default_flags: [\"-avz\"]\n");

    bridge()
        .args(["--quiet", "--config"])
        .arg(config.path())
        .args(["rsync", "src/", "dst", "--dry-run"])
        .assert()
        .success()
        .stdout("--dry-run -avz src/ dst\n");
}

#[cfg(unix)]
#[test]
fn test_exit_code_propagated() {
    let config = config_file("rclone:\n  binary: \"false\"\n");

    bridge()
        .args(["--quiet", "--config"])
        .arg(config.path())
        .args(["rclone", "/local", "remote:bucket"])
        .assert()
        .code(1);
}

#[cfg(unix)]
#[test]
fn test_check_prereqs_json() {
    let config = config_file("rsync:\n  binary: sh\nrclone:\n  binary: sh\n");

    bridge()
        .args(["--quiet", "--config"])
        .arg(config.path())
        .args(["check-prereqs", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"sh\""));
}

#[cfg(unix)]
#[test]
fn test_check_prereqs_passes_with_only_rsync() {
    let config = config_file("rsync:\n  binary: sh\nrclone:\n  binary: transfer-bridge-missing-rclone\n");

    bridge()
        .args(["--quiet", "--config"])
        .arg(config.path())
        .arg("check-prereqs")
        .assert()
        .success()
        .stdout(predicate::str::contains("- transfer-bridge-missing-rclone not found (needed for /rclone/run)"));
}

#[test]
fn test_check_prereqs_fails_without_any_tool() {
    let config = config_file(
        "rsync:\n  binary: transfer-bridge-missing-rsync\nrclone:\n  binary: transfer-bridge-missing-rclone\n",
    );

    bridge()
        .args(["--quiet", "--config"])
        .arg(config.path())
        .arg("check-prereqs")
        .assert()
        .code(1);
}

#[cfg(unix)]
#[test]
fn test_env_option_reaches_tool() {
    let config = config_file("rsync:\n  binary: printenv\n");

    bridge()
        .args(["--quiet", "--config"])
        .arg(config.path())
        .args(["rsync", "SRC_MARKER", "DST_MARKER", "--flags", "RSYNC_PASSWORD"])
        .args(["-e", "RSYNC_PASSWORD=s3cret", "-e", "SRC_MARKER=1", "-e", "DST_MARKER=2"])
        .assert()
        .success()
        .stdout("s3cret\n1\n2\n");
}
