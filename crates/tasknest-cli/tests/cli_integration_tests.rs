//! Black-box tests for the `tasknest` binary.

use predicates::prelude::*;
use rstest::rstest;
use std::fs;

mod helpers;
use helpers::{assertions, CliTestHarness};

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("to-do"));
    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("tasknest"));
    harness
        .run_failure(&["invalid-command"])
        .stderr(assertions::has_error());
}

#[test]
fn test_add_and_list() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["add", "Buy milk", "--due", "2099-01-01", "-d", "Two liters"])
        .stdout(assertions::task_created_successfully());
    harness
        .run_success(&["list"])
        .stdout(assertions::has_task_table_headers())
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("Jan 01, 2099"));
    assert!(harness.db_path().exists());
}

#[test]
fn test_empty_list() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_add_rejects_blank_title_and_bad_date() {
    let harness = CliTestHarness::new();

    harness
        .run_failure(&["add", "   "])
        .stderr(predicate::str::contains("must not be empty"));
    harness
        .run_failure(&["add", "Task", "--due", "not a real date"])
        .stderr(assertions::has_error());
    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_done_filters_and_undo() {
    let harness = CliTestHarness::new();
    harness.run_success(&["add", "Buy milk", "--due", "2099-01-01"]);
    harness.run_success(&["add", "Pay rent"]);

    let rent = harness.task_id("Pay rent");
    harness
        .run_success(&["done", &rent])
        .stdout(predicate::str::contains("Completed task: 'Pay rent'"));

    harness
        .run_success(&["list", "--status", "active"])
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("Pay rent").not());
    harness
        .run_success(&["list", "--status", "completed"])
        .stdout(predicate::str::contains("Pay rent"))
        .stdout(predicate::str::contains("Buy milk").not());

    harness.run_success(&["undo", &rent]);
    harness
        .run_success(&["list", "--status", "active"])
        .stdout(predicate::str::contains("Pay rent"));
}

#[test]
fn test_search_is_case_insensitive() {
    let harness = CliTestHarness::new();
    harness.run_success(&["add", "Buy milk"]);
    harness.run_success(&["add", "Pay rent"]);

    harness
        .run_success(&["list", "--search", "MILK"])
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("Pay rent").not());
}

#[rstest]
#[case("days-asc", ["call mom", "Buy milk", "Pay rent"])]
#[case("days-desc", ["Buy milk", "call mom", "Pay rent"])]
#[case("alpha-asc", ["Buy milk", "call mom", "Pay rent"])]
#[case("alpha-desc", ["Pay rent", "call mom", "Buy milk"])]
#[case("none", ["Pay rent", "Buy milk", "call mom"])]
fn test_sorting(#[case] sort: &str, #[case] expected: [&str; 3]) {
    let harness = CliTestHarness::new();
    harness.run_success(&["add", "Pay rent"]);
    harness.run_success(&["add", "Buy milk", "--due", "2099-01-01"]);
    harness.run_success(&["add", "call mom", "--due", "2098-01-01"]);

    let listed = harness.stdout_of(&["list", "--sort", sort]);
    assert!(assertions::appears_before(&listed, expected[0], expected[1]));
    assert!(assertions::appears_before(&listed, expected[1], expected[2]));
}

#[test]
fn test_unknown_sort_is_rejected() {
    let harness = CliTestHarness::new();
    harness
        .run_failure(&["list", "--sort", "sideways"])
        .stderr(assertions::has_error());
}

#[rstest]
#[case("all", &["Buy milk", "Pay rent"], &[])]
#[case("active", &["Buy milk"], &["Pay rent"])]
#[case("completed", &["Pay rent"], &["Buy milk"])]
fn test_status_filter(#[case] status: &str, #[case] shown: &[&str], #[case] hidden: &[&str]) {
    let harness = CliTestHarness::new();
    harness.run_success(&["add", "Buy milk"]);
    harness.run_success(&["add", "Pay rent"]);
    let rent = harness.task_id("Pay rent");
    harness.run_success(&["done", &rent]);

    let listed = harness.stdout_of(&["list", "--status", status]);
    for title in shown {
        assert!(listed.contains(title), "{title} missing from {status} list");
    }
    for title in hidden {
        assert!(!listed.contains(title), "{title} shown in {status} list");
    }
}

#[test]
fn test_edit_task() {
    let harness = CliTestHarness::new();
    harness.run_success(&["add", "Buy milk", "--due", "2099-01-01"]);
    let id = harness.task_id("Buy milk");

    harness
        .run_success(&["edit", &id, "--title", "Buy oat milk", "--due-clear"])
        .stdout(predicate::str::contains("Updated task: 'Buy oat milk'"));

    let exported = harness.export_json();
    let task = &exported["tasks"][0];
    assert_eq!(task["title"], "Buy oat milk");
    assert_eq!(task["dueDate"], "");

    harness
        .run_failure(&["edit", &id])
        .stderr(predicate::str::contains("No changes given"));
    harness
        .run_failure(&["edit", &id, "--title", ""])
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_unknown_and_short_ids() {
    let harness = CliTestHarness::new();
    harness.run_success(&["add", "Buy milk"]);

    harness
        .run_failure(&["done", "zzzzzzzz"])
        .stderr(predicate::str::contains("No task found"));
    harness
        .run_failure(&["done", "a"])
        .stderr(predicate::str::contains("at least 2 characters"));
}

#[test]
fn test_delete_task_with_force() {
    let harness = CliTestHarness::new();
    harness.run_success(&["add", "Buy milk"]);
    let id = harness.task_id("Buy milk");

    harness
        .run_success(&["delete", &id, "--force"])
        .stdout(predicate::str::contains("Deleted task"));
    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_categories() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["category", "add", "Home", "--color", "teal"])
        .stdout(predicate::str::contains("Created category: 'Home'"));
    harness.run_success(&["category", "add", "Work", "--color", "blue"]);
    harness
        .run_failure(&["category", "add", "Bad", "--color", "magenta"])
        .stderr(assertions::has_error());

    harness.run_success(&["add", "Buy milk", "-c", "home"]);
    harness.run_success(&["add", "Write report", "-c", "Work"]);

    harness
        .run_success(&["list", "-c", "Home"])
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("Write report").not());
    harness
        .run_success(&["category", "list"])
        .stdout(predicate::str::contains("Home"))
        .stdout(predicate::str::contains("#"));

    harness.run_success(&["category", "edit", "Home", "--name", "House"]);
    harness
        .run_success(&["list", "-c", "House"])
        .stdout(predicate::str::contains("Buy milk"));
}

#[test]
fn test_category_delete_keeps_tasks() {
    let harness = CliTestHarness::new();
    harness.run_success(&["category", "add", "Home"]);
    harness.run_success(&["add", "Buy milk", "-c", "Home"]);

    harness.run_success(&["category", "delete", "Home", "--force"]);

    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("Buy milk"));
    let exported = harness.export_json();
    assert_eq!(exported["categories"].as_array().unwrap().len(), 0);
    assert_ne!(exported["tasks"][0]["category"], "");
}

#[test]
fn test_export_import_round_trip() {
    let source = CliTestHarness::new();
    source.run_success(&["category", "add", "Home", "--color", "green"]);
    source.run_success(&["add", "Buy milk", "-c", "Home", "--due", "2099-01-01"]);
    source.run_success(&["add", "Pay rent"]);
    let export_path = source.dir().join("backup.json");
    source.run_success(&["export", export_path.to_str().unwrap()]);
    assert!(export_path.exists());

    let target = CliTestHarness::new();
    target
        .run_success(&["import", export_path.to_str().unwrap()])
        .stdout(predicate::str::contains("Imported 2 task(s) and 1 categories"));
    target
        .run_success(&["list", "-c", "Home"])
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("Pay rent").not());

    let before = source.export_json();
    let after = target.export_json();
    assert_ne!(before["tasks"][0]["id"], after["tasks"][0]["id"]);
    assert_eq!(before["tasks"][0]["dueDate"], after["tasks"][0]["dueDate"]);
}

#[test]
fn test_import_minimal_and_malformed() {
    let harness = CliTestHarness::new();
    let good = harness.dir().join("good.json");
    fs::write(&good, r#"{"tasks":[{"title":"X"}],"categories":[]}"#).unwrap();
    harness.run_success(&["import", good.to_str().unwrap()]);
    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("X"));

    let bad = harness.dir().join("bad.json");
    fs::write(&bad, r#"{"tasks": "nope"}"#).unwrap();
    harness
        .run_failure(&["import", bad.to_str().unwrap()])
        .stderr(predicate::str::contains("Invalid import data"));
}

#[test]
fn test_config_file_defaults() {
    let harness = CliTestHarness::new();
    fs::write(
        harness.dir().join("tasknest.toml"),
        "default_status = \"active\"\ndefault_sort = \"alpha-desc\"\n",
    )
    .unwrap();
    harness.run_success(&["add", "Alpha"]);
    harness.run_success(&["add", "Beta"]);
    harness.run_success(&["add", "Gamma"]);
    let gamma = harness.task_id("Gamma");
    harness.run_success(&["done", &gamma]);

    let listed = harness.stdout_of(&["list"]);
    assert!(!listed.contains("Gamma"));
    assert!(assertions::appears_before(&listed, "Beta", "Alpha"));

    // Flags still win over the configured defaults.
    harness
        .run_success(&["list", "--status", "all"])
        .stdout(predicate::str::contains("Gamma"));
}

#[test]
fn test_db_flag_overrides_environment() {
    let harness = CliTestHarness::new();
    let other = harness.dir().join("other.db");
    harness.run_success(&["--db", other.to_str().unwrap(), "add", "Elsewhere"]);

    assert!(other.exists());
    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("Elsewhere").not());
}
