//! End-to-end CLI tests. Everything here runs without a daemon: the
//! dry-run path stops before any connection is made.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const REQUIRED_VARS: &[&str] = &[
    "IBMCLOUD_API_KEY",
    "IBMCLOUD_BUCKET",
    "IBMCLOUD_COS_INSTANCE_ID",
    "IBMCLOUD_COS_ENDPOINT",
    "ASPERA_REMOTE_HOST",
    "COS_DESTINATION",
];

fn coslift(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("coslift").unwrap();
    cmd.current_dir(dir.path());
    for var in REQUIRED_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn media_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.mp4"), vec![0u8; 1024]).unwrap();
    std::fs::write(dir.path().join("b.MOV"), vec![0u8; 2048]).unwrap();
    std::fs::write(dir.path().join("ignore.txt"), b"x").unwrap();
    dir
}

#[test]
fn dry_run_succeeds_without_credentials() {
    let dir = media_dir();
    coslift(&dir)
        .arg(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"session_initiation\""))
        .stdout(predicate::str::contains("\"direction\": \"send\""))
        .stdout(predicate::str::contains("\"destination_root\": \"/aspera-uploads/\""));
}

#[test]
fn dry_run_lists_both_videos_and_skips_non_media() {
    let dir = media_dir();
    coslift(&dir)
        .arg(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.mp4"))
        .stdout(predicate::str::contains("b.MOV"))
        .stdout(predicate::str::contains("ignore.txt").not());
}

#[test]
fn no_folder_marker_disables_create_dir() {
    let dir = media_dir();
    coslift(&dir)
        .arg(dir.path())
        .arg("--dry-run")
        .arg("--no-folder-marker")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"create_dir\": false"));
}

#[test]
fn destination_env_is_normalized_in_the_spec() {
    let dir = media_dir();
    coslift(&dir)
        .arg(dir.path())
        .arg("--dry-run")
        .env("COS_DESTINATION", "uploads")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"destination_root\": \"/uploads/\""));
}

#[test]
fn empty_directory_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    coslift(&dir).arg(dir.path()).arg("--dry-run").assert().failure();
}

#[test]
fn nonexistent_directory_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    coslift(&dir)
        .arg("/no/such/directory/at/all")
        .arg("--dry-run")
        .assert()
        .failure();
}

#[test]
fn single_matching_file_is_accepted() {
    let dir = media_dir();
    coslift(&dir)
        .arg(dir.path().join("a.mp4"))
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.mp4"));
}

#[test]
fn single_non_matching_file_exits_nonzero() {
    let dir = media_dir();
    coslift(&dir)
        .arg(dir.path().join("ignore.txt"))
        .arg("--dry-run")
        .assert()
        .failure();
}
