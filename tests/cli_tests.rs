// Command-line behaviour of the leak-triage binary

use assert_cmd::Command;
use predicates::prelude::*;

fn leak_triage() -> Command {
    let mut cmd = Command::cargo_bin("leak-triage").unwrap();
    cmd.env("LEAK_TRIAGE_ANALYTICS__SINK", "none");
    cmd
}

#[test]
fn test_no_subcommand_shows_guidance() {
    leak_triage()
        .assert()
        .success()
        .stdout(predicate::str::contains("leak-triage check"))
        .stdout(predicate::str::contains("leak-triage matrix"));
}

#[test]
fn test_evaluate_prints_recommendation() {
    leak_triage()
        .args(["evaluate", "--location", "under-sink", "--active", "yes", "--danger", "no"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommendation: SUBMIT"))
        .stdout(predicate::str::contains("Urgency: Medium"))
        .stdout(predicate::str::contains("under the sink"));
}

#[test]
fn test_evaluate_json() {
    let output = leak_triage()
        .args(["evaluate", "--location", "ceiling_wall", "--active", "no", "--danger", "yes", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["decision"], "escalate");
    assert_eq!(value["urgency"], "high");
}

#[test]
fn test_evaluate_rejects_unknown_location() {
    leak_triage()
        .args(["evaluate", "--location", "garage", "--active", "no", "--danger", "no"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown location"));
}

#[test]
fn test_matrix_lists_every_combination() {
    leak_triage()
        .arg("matrix")
        .assert()
        .success()
        .stdout(predicate::str::contains("DECISION"))
        .stdout(predicate::str::contains("ceiling_wall"));
}

#[test]
fn test_interactive_check_from_piped_input() {
    leak_triage()
        .arg("check")
        .write_stdin("4\n2\n2\nc\nr\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1) Where is the leak?"))
        .stdout(predicate::str::contains("Recommendation: MONITOR"))
        .stdout(predicate::str::contains("in my home (source unclear)"))
        .stdout(predicate::str::contains("📋 Message ready to paste"));
}
