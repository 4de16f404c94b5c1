use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn splitbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("splitbook").unwrap();
    cmd.env("SPLITBOOK_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .env_remove("SPLITBOOK_LOG_JSON");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    splitbook(dir).args(args).assert().success();
}

/// A trip where A paid 300 for everyone and B paid 90 for B and C
fn setup_trip() -> TempDir {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    run(&dir, &["group", "create", "Trip", "--budget", "500"]);
    for name in ["A", "B", "C"] {
        run(&dir, &["member", "add", "Trip", name]);
    }
    run(
        &dir,
        &["expense", "add", "Trip", "Hotel", "300", "--paid-by", "A", "--date", "2025-03-01"],
    );
    run(
        &dir,
        &[
            "expense", "add", "Trip", "Taxi", "90", "--paid-by", "B", "--split", "B,C", "--date",
            "2025-03-02",
        ],
    );
    dir
}

#[test]
fn test_init_creates_settings() {
    let dir = TempDir::new().unwrap();
    splitbook(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("groups.json").exists());
}

#[test]
fn test_settle_suggest_worked_example() {
    let dir = setup_trip();

    splitbook(&dir)
        .args(["settle", "suggest", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B pays A $55.00"))
        .stdout(predicate::str::contains("C pays A $145.00"))
        .stdout(predicate::str::contains("2 of 2 transfer(s) outstanding"));
}

#[test]
fn test_settle_suggest_marks_entries() {
    let dir = setup_trip();

    splitbook(&dir)
        .args(["settle", "suggest", "Trip", "--mark", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x]"))
        .stdout(predicate::str::contains("1 of 2 transfer(s) outstanding"));
}

#[test]
fn test_balances_show_nets() {
    let dir = setup_trip();

    splitbook(&dir)
        .args(["settle", "balances", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$200.00"))
        .stdout(predicate::str::contains("-$145.00"));
}

#[test]
fn test_member_remove_cascades() {
    let dir = setup_trip();

    splitbook(&dir)
        .args(["member", "remove", "Trip", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed B from Trip"));

    // The taxi was paid by B and is gone; the hotel is now split between A and C
    splitbook(&dir)
        .args(["settle", "suggest", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("C pays A $150.00"))
        .stdout(predicate::str::contains("1 of 1 transfer(s) outstanding"));

    splitbook(&dir)
        .args(["expense", "list", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hotel"))
        .stdout(predicate::str::contains("Taxi").not());
}

#[test]
fn test_unknown_group_fails() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);

    splitbook(&dir)
        .args(["settle", "suggest", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Group not found"));
}

#[test]
fn test_expense_with_outside_member_fails() {
    let dir = setup_trip();
    run(&dir, &["group", "create", "Other"]);
    run(&dir, &["member", "add", "Other", "Z"]);

    splitbook(&dir)
        .args(["expense", "add", "Trip", "Lunch", "10", "--paid-by", "Z"])
        .assert()
        .failure();
}

#[test]
fn test_group_report_and_overview() {
    let dir = setup_trip();

    splitbook(&dir)
        .args(["report", "group", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Spent:      $390.00"))
        .stdout(predicate::str::contains("78% used"));

    splitbook(&dir)
        .args(["report", "overview", "--today", "2025-03-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trip"))
        .stdout(predicate::str::contains("$390.00"));
}

#[test]
fn test_export_json_and_log() {
    let dir = setup_trip();
    let out = dir.path().join("trip.json");

    splitbook(&dir)
        .args(["export", "Trip"])
        .arg(&out)
        .args(["--format", "json", "--pretty"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&out).unwrap();
    assert!(contents.contains("\"Trip\""));
    assert!(contents.contains("Hotel"));

    splitbook(&dir)
        .args(["log", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Expense"));
}

#[test]
fn test_group_delete_requires_force() {
    let dir = setup_trip();

    splitbook(&dir)
        .args(["group", "delete", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    splitbook(&dir)
        .args(["group", "delete", "Trip", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted group: Trip"));

    splitbook(&dir)
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No groups found."));
}
