// Integration tests for the pushdown binary

use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use std::process::Command; // Run programs

fn pushdown() -> Command {
    Command::cargo_bin("pushdown").unwrap()
}

#[test]
fn prints_example_grammar_and_automaton() {
    pushdown()
        .assert()
        .success()
        .stdout(predicate::str::contains("========== C-F GRAMMAR ============"))
        .stdout(predicate::str::contains("Vh = { q, A, B, C }"))
        .stdout(predicate::str::contains("A -> xABC"))
        .stdout(predicate::str::contains("========== PD AUTOMATON ============"))
        .stdout(predicate::str::contains("Y = { q, A, B, C, Z0 }"))
        .stdout(predicate::str::contains("(a0, ε, Z0) -> (a1, qZ0)"))
        .stdout(predicate::str::contains("(a1, z, C) -> (a1, )"))
        .stdout(predicate::str::contains("start: q"))
        .stdout(predicate::str::contains("accepting: { a* }"));
}

#[test]
fn file_matches_builtin_example() {
    let builtin = pushdown().output().unwrap();
    let from_file = pushdown().arg("example_data/textbook.cfg").output().unwrap();

    assert!(from_file.status.success());
    assert_eq!(builtin.stdout, from_file.stdout);
}

#[test]
fn start_at_initializer_flag() {
    pushdown()
        .arg("--start-at-initializer")
        .assert()
        .success()
        .stdout(predicate::str::contains("start: a0"));
}

#[test]
fn epsilon_grammar_with_derivations() {
    pushdown()
        .args(["example_data/balanced.cfg", "-n", "3", "--max-steps", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("S -> openScloseS"))
        .stdout(predicate::str::contains("(a1, ε, S) -> (a1, )"))
        .stdout(predicate::str::contains("========== DERIVATIONS ============"));
}

#[test]
fn malformed_file_fails() {
    pushdown()
        .arg("example_data/malformed.cfg")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed.cfg:4"))
        .stderr(predicate::str::contains("malformed.cfg:9"));
}

#[test]
fn missing_file_fails() {
    pushdown()
        .arg("example_data/nope.cfg")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File error"));
}
