use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn write_scenario(dir: &tempfile::TempDir, name: &str, rows: &[[&str; 4]]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut wtr = csv::Writer::from_path(&path).unwrap();
    wtr.write_record(["op", "payee", "value", "behavior"])
        .unwrap();
    for row in rows {
        wtr.write_record(row).unwrap();
    }
    wtr.flush().unwrap();
    path
}

#[test]
fn test_malformed_rows_are_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(
        &dir,
        "malformed.csv",
        &[
            ["payee", "alice", "1", "accept"],
            ["explode", "alice", "1", ""],     // unknown op
            ["payee", "bob", "not_a_number", ""], // bad weight
            ["fund", "", "10", ""],
            ["release", "alice", "", ""],
        ],
    );

    let mut cmd = Command::new(cargo_bin!("prorata"));
    cmd.arg(&path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading scenario row"))
        .stdout(predicate::str::contains("alice,1,10,0"));
}

#[test]
fn test_release_failures_do_not_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(
        &dir,
        "rejecting.csv",
        &[
            ["payee", "grumpy", "1", "reject"],
            ["payee", "alice", "1", "accept"],
            ["fund", "", "100", ""],
            ["release", "grumpy", "", ""],
            ["release", "alice", "", ""],
            ["release", "alice", "", ""], // nothing due the second time
        ],
    );

    let mut cmd = Command::new(cargo_bin!("prorata"));
    cmd.arg(&path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error processing operation"))
        // grumpy's 50 stay releasable, alice collected hers
        .stdout(predicate::str::contains("grumpy,1,0,50"))
        .stdout(predicate::str::contains("alice,1,50,0"));
}

#[test]
fn test_payee_declared_after_release_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(
        &dir,
        "late_payee.csv",
        &[
            ["payee", "alice", "1", "accept"],
            ["fund", "", "10", ""],
            ["release", "alice", "", ""],
            ["payee", "latecomer", "1", "accept"],
        ],
    );

    let mut cmd = Command::new(cargo_bin!("prorata"));
    cmd.arg(&path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("fixed at construction"))
        .stdout(predicate::str::contains("alice,1,10,0"));
}

#[test]
fn test_forwarding_behavior_from_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(
        &dir,
        "forwarding.csv",
        &[
            ["payee", "echo", "1", "forward:3"],
            ["payee", "b", "1", "accept"],
            ["payee", "c", "1", "accept"],
            ["fund", "", "3", ""],
            ["release", "echo", "", ""],
            ["release", "echo", "", ""],
        ],
    );

    let mut cmd = Command::new(cargo_bin!("prorata"));
    cmd.arg(&path);

    // First release pays 1 and 3 come back; second pays 1 more.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("echo,1,2,"));
}

#[test]
fn test_scenario_with_no_payees_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(&dir, "empty.csv", &[["fund", "", "10", ""]]);

    let mut cmd = Command::new(cargo_bin!("prorata"));
    cmd.arg(&path);

    cmd.assert().failure();
}
