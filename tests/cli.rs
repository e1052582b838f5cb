use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn home_with_categories() -> TempDir {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("categories.json"),
        r#"{"categories": ["BOOKS", "FOOD"]}"#,
    )
    .unwrap();
    home
}

fn fundbook(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fundbook").unwrap();
    cmd.arg("--config-dir")
        .arg(home.path())
        .arg("--sequential-ids")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn purchase_and_reversal_round_trip() {
    let home = home_with_categories();
    let script = "\
account create Ann Lee --cash 100 --card 100
txn add 0000000001 30 CARD book 1 BOOKS shop
account show 0000000001
txn reverse 0000000001 00000000000000000001
account show 0000000001
txn list 0000000001
";

    fundbook(&home)
        .arg("run")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Created account: 0000000001"))
        .stdout(contains("Recorded transaction: 00000000000000000001"))
        .stdout(contains("Card Balance: 70.00"))
        .stdout(contains("Reversed transaction: 00000000000000000001 (30.00)"))
        .stdout(contains("Card Balance: 100.00"))
        .stdout(contains("No transactions found."));
}

#[test]
fn failed_commands_report_and_continue() {
    let home = home_with_categories();
    let script = "\
account create Ann Lee --cash 100
account update 0000000001 name=Valid balance_cash=-5
account update 0000000001 nickname=Bob
account show 0000000099
account show 0000000001
";

    fundbook(&home)
        .arg("run")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("error: Validation error"))
        .stdout(contains("error: Attribute error"))
        .stdout(contains("error: Account not found: 0000000099"))
        .stdout(contains("Account: Ann Lee"))
        .stdout(contains("Cash Balance: 100.00"));
}

#[test]
fn filters_from_a_script_file() {
    let home = home_with_categories();
    let script_path = home.path().join("filters.txt");
    std::fs::write(
        &script_path,
        "# two accounts\n\
         account create Ann Lee --card 50\n\
         account create Bob Ray --card 150\n\
         account find-balance --card-under balance_card=100\n\
         account find-name --pattern name=Bo\n",
    )
    .unwrap();

    fundbook(&home)
        .arg("run")
        .arg(&script_path)
        .assert()
        .success()
        .stdout(contains("Ann Lee"))
        .stdout(contains("Bob Ray"));
}

#[test]
fn strict_mode_stops_with_failure() {
    let home = home_with_categories();

    fundbook(&home)
        .args(["run", "--strict"])
        .write_stdin("account create Ann Lee\naccount show 0000000042\naccount create Bob Lee\n")
        .assert()
        .failure()
        .stdout(contains("Created account: 0000000001"))
        .stdout(contains("0000000002").not())
        .stderr(contains("script stopped at line 2"));
}

#[test]
fn missing_categories_fail_fast() {
    let home = TempDir::new().unwrap();

    fundbook(&home)
        .arg("run")
        .write_stdin("account list\n")
        .assert()
        .failure()
        .stderr(contains("Failed to load item categories"));
}

#[test]
fn yaml_categories_via_flag() {
    let home = TempDir::new().unwrap();
    let categories = home.path().join("cats.yaml");
    std::fs::write(&categories, "categories:\n  - TRAVEL\n").unwrap();

    fundbook(&home)
        .arg("--categories")
        .arg(&categories)
        .arg("run")
        .write_stdin(
            "account create Ann Lee --cash 10\n\
             txn add 0000000001 4 cash ticket 1 TRAVEL rail\n\
             txn add 0000000001 4 cash book 1 BOOKS shop\n",
        )
        .assert()
        .success()
        .stdout(contains("Recorded transaction: 00000000000000000001"))
        .stdout(contains("Unknown item category 'BOOKS'"));
}

#[test]
fn fields_prints_directory() {
    let home = TempDir::new().unwrap();

    fundbook(&home)
        .arg("fields")
        .assert()
        .success()
        .stdout(contains("\"balance_cash\""))
        .stdout(contains("\"item_category\""))
        .stdout(contains("created_date").not());
}

#[test]
fn config_shows_paths() {
    let home = TempDir::new().unwrap();

    fundbook(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Base directory"))
        .stdout(contains("categories.json"))
        .stdout(contains("Sequential"));
}

#[test]
fn config_init_writes_settings_once() {
    let home = TempDir::new().unwrap();
    let base = home.path().join("fresh");

    let mut first = Command::cargo_bin("fundbook").unwrap();
    first
        .arg("--config-dir")
        .arg(&base)
        .args(["config", "--init"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(contains("Wrote default settings"))
        .stdout(contains("Schema:     1"));

    let written = std::fs::read_to_string(base.join("config.json")).unwrap();
    assert!(written.contains("\"id_mode\": \"random\""));

    let mut second = Command::cargo_bin("fundbook").unwrap();
    second
        .arg("--config-dir")
        .arg(&base)
        .args(["config", "--init"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(contains("already exists"));
}
