use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("prorata"));
    cmd.arg("tests/fixtures/scenario.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("payee,shares,released,releasable"))
        // alice holds 1 of 4 shares of 100 units
        .stdout(predicate::str::contains("alice,1,25,0"))
        // bob holds the other 3
        .stdout(predicate::str::contains("bob,3,75,0"));

    Ok(())
}

#[test]
fn test_cli_events_flag_prints_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("prorata"));
    cmd.arg("tests/fixtures/scenario.csv").arg("--events");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"{"payee":"alice","amount":25}"#))
        .stdout(predicate::str::contains(r#"{"payee":"bob","amount":75}"#));

    Ok(())
}
