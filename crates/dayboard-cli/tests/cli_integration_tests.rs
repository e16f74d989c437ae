/// CLI integration tests for dayboard
///
/// These tests run the binary as a black box against a fresh SQLite file.
use predicates::prelude::*;
use rstest::rstest;

mod helpers;
use helpers::{assertions, CliTestHarness};

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("window"))
        .stdout(predicate::str::contains("column"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("dayboard"));

    harness
        .run_failure(&["invalid-command"])
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_add_and_window() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["add", "Buy milk every week", "--date", "2024-01-03"])
        .stdout(assertions::task_created_successfully())
        .stdout(predicate::str::contains("recurring"))
        .stdout(predicate::str::contains("Buy milk"));
    harness
        .run_success(&["add", "Call mom", "--date", "2024-01-03"])
        .stdout(predicate::str::contains("position 2"));

    let out = harness.stdout_of(&["window", "--from", "2024-01-01", "--to", "2024-01-20"]);
    assert_eq!(out.matches("↻ Buy milk").count(), 3);
    assert!(out.contains("Call mom"));
    assert!(out.contains("Wed"));
    assert!(out.contains("2024-01-20"));
    assert!(harness.db_path().exists());

    let quarter = harness.stdout_of(&["window", "--from", "2024-01-01", "--to", "2024-03-31"]);
    assert_eq!(quarter.matches("↻ Buy milk").count(), 13);
    assert!(quarter.contains("2024-03-31"));
}

#[test]
fn test_users_are_isolated() {
    let harness = CliTestHarness::new();

    harness.run_success(&["--user", "9", "add", "secret", "--date", "2024-02-01"]);
    let out = harness.stdout_of(&["--user", "10", "window", "--from", "2024-02-01", "--days", "1"]);
    assert!(!out.contains("secret"));
    assert!(out.contains("Nothing planned."));

    harness
        .run_failure(&["--user", "10", "show", "1"])
        .stderr(assertions::error_code("TaskNotFound"));
}

#[test]
fn test_columns_and_move() {
    let harness = CliTestHarness::new();
    let work = harness.add_column("work");

    for body in ["first", "second", "third"] {
        harness.run_success(&["add", body, "--date", "2024-03-01"]);
    }
    harness.run_success(&["add", "daily standup every day", "--date", "2024-03-01"]);

    harness
        .run_failure(&["move", "4", "--column", &work])
        .stderr(assertions::error_code("ColumnForbidden"));

    harness
        .run_success(&["move", "3", "1", "2", "--column", &work])
        .stdout(predicate::str::contains("Moved 3 task(s)"));

    let out = harness.stdout_of(&["column", "show", &work]);
    let third = out.find("third").unwrap();
    let first = out.find("first").unwrap();
    let second = out.find("second").unwrap();
    assert!(third < first && first < second);

    harness
        .run_success(&["column", "rename", &work, "deep work"])
        .stdout(predicate::str::contains("deep work"));
    harness
        .run_success(&["column", "list"])
        .stdout(predicate::str::contains("deep work"));

    harness
        .run_failure(&["--user", "2", "column", "show", &work])
        .stderr(assertions::error_code("ColumnNotFound"));

    harness.run_success(&["column", "delete", &work, "--force"]);
    harness
        .run_failure(&["show", "1"])
        .stderr(assertions::error_code("TaskNotFound"));
}

#[test]
fn test_edit_occurrence() {
    let harness = CliTestHarness::new();
    harness.run_success(&["add", "Stretch every day", "--date", "2024-04-01"]);
    harness.run_success(&["window", "--from", "2024-04-01", "--days", "2"]);

    // occurrence 1 was created with the task, 2 by the window read
    harness
        .run_success(&["edit", "1", "--occurrence", "2", "--done"])
        .stdout(predicate::str::contains("2024-04-02"));

    harness
        .run_failure(&["edit", "1", "--occurrence", "99", "--done"])
        .stderr(assertions::error_code("RTSNotFound"));
}

#[rstest]
#[case(&["add", "x", "--date", "01/02/2024"], "InvalidDateFormat")]
#[case(&["add", "x", "--column", "not-a-uuid"], "ColumnNotFound")]
#[case(&["add", "   "], "InvalidInput")]
#[case(&["window", "--from", "2024-01-01", "--days", "4000000000"], "InvalidDateRange")]
#[case(&["window", "--from", "2024-01-05", "--to", "2024-01-01"], "InvalidDateRange")]
#[case(&["move", "1", "1", "--date", "2024-01-01"], "TaskNotFound")]
#[case(&["edit", "7", "--done"], "TaskNotFound")]
fn test_input_errors(#[case] args: &[&str], #[case] code: &'static str) {
    let harness = CliTestHarness::new();
    harness
        .run_failure(args)
        .stderr(assertions::error_code(code));
}

#[test]
fn test_move_needs_a_target() {
    let harness = CliTestHarness::new();
    harness.run_failure(&["move", "1"]).code(2);
}

#[test]
fn test_delete_preset_and_sweep() {
    let harness = CliTestHarness::new();

    harness.run_success(&["add", "old chore", "--date", "2024-05-01"]);
    harness
        .run_success(&["sweep", "--date", "2024-05-03"])
        .stdout(predicate::str::contains("Moved 1 unfinished task(s) to 2024-05-03"));
    harness
        .run_success(&["sweep", "--date", "2024-05-03"])
        .stdout(predicate::str::contains("Nothing to move."));

    harness
        .run_success(&["delete", "1", "--force"])
        .stdout(predicate::str::contains("Deleted task 'old chore'"));

    harness
        .run_success(&["preset"])
        .stdout(predicate::str::contains("Board ready"));
    harness
        .run_success(&["column", "list"])
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("*Edit*"));
}
