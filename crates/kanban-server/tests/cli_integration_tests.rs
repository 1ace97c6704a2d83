/// Black-box tests for the `kanban` command-line tools.
use chrono::NaiveDate;
use kanban_core::models::{Task, TaskPriority, TaskStatus};
use predicates::prelude::*;

mod helpers;
use helpers::{assertions, CliTestHarness};

fn task(id: &str, title: &str, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        status,
        task_type: "UNIT 3".to_string(),
        priority: TaskPriority::High,
    }
}

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("kanban board"))
        .stdout(predicate::str::contains("history"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("kanban"));

    harness
        .run_failure(&["invalid-command"])
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_current_on_fresh_database() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["current"])
        .stdout(predicate::str::contains("Tasks for"))
        .stdout(assertions::empty_result());
}

#[test]
fn test_history_shows_seeded_snapshot() {
    let harness = CliTestHarness::new();
    let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    harness.seed_snapshot(
        date,
        &[
            task("0190aaaa0001", "Write report", TaskStatus::Done),
            task("0190aaaa0002", "Review SLA", TaskStatus::Backlog),
        ],
    );

    harness
        .run_success(&["history", "2020-01-01"])
        .stdout(predicate::str::contains("Tasks for 2020-01-01 (snapshot)"))
        .stdout(assertions::has_task_table_headers())
        .stdout(predicate::str::contains("Write report"))
        .stdout(predicate::str::contains("Review SLA"))
        .stdout(predicate::str::contains("0190aaaa"));
}

#[test]
fn test_history_of_empty_marked_day() {
    let harness = CliTestHarness::new();
    harness.seed_snapshot(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(), &[]);

    harness
        .run_success(&["history", "2020-01-02"])
        .stdout(assertions::empty_result());
}

#[test]
fn test_history_errors() {
    let harness = CliTestHarness::new();

    harness
        .run_failure(&["history", "2020-01-03"])
        .stderr(assertions::has_error())
        .stderr(predicate::str::contains("No data for date 2020-01-03"));

    harness
        .run_failure(&["history", "2024-13-99"])
        .stderr(predicate::str::contains("Invalid input"));

    harness
        .run_failure(&["history", "not-a-date"])
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_dates_lists_processed_days() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["dates"])
        .stdout(predicate::str::contains("No snapshots found"));

    harness.seed_snapshot(NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(), &[]);
    harness.seed_snapshot(
        NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(),
        &[task("0190bbbb0001", "A", TaskStatus::Ongoing)],
    );

    harness
        .run_success(&["dates"])
        .stdout(predicate::str::contains("2020-01-05"))
        .stdout(predicate::str::contains("Sunday"))
        .stdout(predicate::str::contains("2020-01-06"));
}

#[test]
fn test_database_flag_overrides_environment() {
    let harness = CliTestHarness::new();
    let other = tempfile::tempdir().unwrap();
    let other_db = other.path().join("other.db");
    let other_db = other_db.to_string_lossy();

    harness
        .run_success(&["--database", &other_db, "dates"])
        .stdout(predicate::str::contains("No snapshots found"));
    assert!(other.path().join("other.db").exists());
}
