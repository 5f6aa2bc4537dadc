#![allow(deprecated)] // TODO: migrate Command::cargo_bin to cargo_bin_cmd!

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with an isolated config directory and an unreachable API
fn lightning(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lightning").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("LIGHTNING_CLOUD_URL", "http://127.0.0.1:9")
        .env_remove("LIGHTNING_USER_ID")
        .env_remove("LIGHTNING_API_KEY")
        .env_remove("LIGHTNING_POLL_INTERVAL")
        .env_remove("LIGHTNING_CLUSTER_WAIT_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Top level help lists the commands
#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    lightning(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("BYOC clusters"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("list"));
}

/// create cluster help shows every flag
#[test]
fn test_create_cluster_help() {
    let home = TempDir::new().unwrap();
    lightning(&home)
        .args(["create", "cluster", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<NAME>"))
        .stdout(predicate::str::contains("--role-arn"))
        .stdout(predicate::str::contains("--external-id"))
        .stdout(predicate::str::contains("--region"))
        .stdout(predicate::str::contains("--async"))
        .stdout(predicate::str::contains("--blocking"))
        .stdout(predicate::str::contains("--timeout"));
}

/// delete cluster help
#[test]
fn test_delete_cluster_help() {
    let home = TempDir::new().unwrap();
    lightning(&home)
        .args(["delete", "cluster", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[CLUSTER]"))
        .stdout(predicate::str::contains("--force"));
}

/// An invalid name fails before any API call
#[test]
fn test_create_cluster_invalid_name() {
    let home = TempDir::new().unwrap();
    lightning(&home)
        .args([
            "create",
            "cluster",
            "Bad_Name",
            "--role-arn",
            "arn:aws:iam::1234567890:role/lai-byoc",
            "--external-id",
            "dummy",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cluster name doesn't match regex pattern",
        ))
        .stdout(predicate::str::contains("triggered").not());
}

/// Missing required flags are rejected by clap
#[test]
fn test_create_cluster_requires_role_arn() {
    let home = TempDir::new().unwrap();
    lightning(&home)
        .args(["create", "cluster", "my-cluster", "--external-id", "dummy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--role-arn"));
}

/// delete without an id or a .lightning file fails
#[test]
fn test_delete_cluster_without_id() {
    let home = TempDir::new().unwrap();
    lightning(&home)
        .args(["delete", "cluster"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No cluster id given"));
}

/// list fails when the API is unreachable
#[test]
fn test_list_clusters_unreachable() {
    let home = TempDir::new().unwrap();
    lightning(&home)
        .args(["list", "clusters"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP error"));
}

/// Unknown subcommands fail
#[test]
fn test_unknown_command() {
    let home = TempDir::new().unwrap();
    lightning(&home).arg("deploy").assert().failure();
}

/// A zero poll interval is rejected before anything runs
#[test]
fn test_zero_poll_interval_is_rejected() {
    let home = TempDir::new().unwrap();
    lightning(&home)
        .args(["delete", "cluster", "c-1", "--poll-interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--poll-interval"));
}

/// A zero poll interval in the environment is a configuration error
#[test]
fn test_zero_poll_interval_env_is_rejected() {
    let home = TempDir::new().unwrap();
    lightning(&home)
        .env("LIGHTNING_POLL_INTERVAL", "0")
        .args(["list", "clusters"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LIGHTNING_POLL_INTERVAL"));
}

/// --async and --blocking may both be given; the last one wins
#[test]
fn test_async_and_blocking_are_accepted_together() {
    let home = TempDir::new().unwrap();
    lightning(&home)
        .args([
            "create",
            "cluster",
            "Bad_Name",
            "--role-arn",
            "arn",
            "--external-id",
            "dummy",
            "--async",
            "--blocking",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cluster name doesn't match regex pattern",
        ));
}
