//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use lunchly_server::db::{self, CustomerRepo, ReservationRepo};
use lunchly_server::models::{CustomerDraft, GuestCount, ReservationDraft};
use tempfile::TempDir;

/// Command with an isolated config path and a throwaway database.
fn lunchly(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lunchly").unwrap();
    cmd.env("LUNCHLY_CONFIG", dir.path().join("config.toml"))
        .env_remove("DATABASE_URL")
        .env_remove("RUST_LOG")
        .arg("--database-url")
        .arg(format!("sqlite://{}", dir.path().join("test.db").display()));
    cmd
}

/// Store one customer with one reservation in the temp database.
fn seed_jane(dir: &TempDir) -> i64 {
    let url = format!("sqlite://{}", dir.path().join("test.db").display());
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let pool = db::open(&url, 1).await.unwrap();
        let jane = CustomerRepo::new(&pool)
            .save(CustomerDraft::new("Jane", "Smith", Some("555-0100"), Some("likes the patio")).unwrap())
            .await
            .unwrap();
        let draft = ReservationDraft::parse(
            jane.id(),
            "2024-05-01 19:30",
            GuestCount::new(4).unwrap(),
            Some("window"),
        )
        .unwrap();
        ReservationRepo::new(&pool).save(draft).await.unwrap();
        pool.close().await;
        jane.id().get()
    })
}

// === Help Tests ===

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("lunchly").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_customers_list_help() {
    let mut cmd = Command::cargo_bin("lunchly").unwrap();
    cmd.arg("customers").arg("list").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("full name"));
}

#[test]
fn test_customers_show_help() {
    let mut cmd = Command::cargo_bin("lunchly").unwrap();
    cmd.arg("customers").arg("show").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Customer ID"));
}

// === Customer Command Tests ===

#[test]
fn test_customers_list_empty_database() {
    let dir = TempDir::new().unwrap();

    lunchly(&dir)
        .arg("customers")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No customers found."));
}

#[test]
fn test_customers_top_empty_database() {
    let dir = TempDir::new().unwrap();

    lunchly(&dir)
        .arg("customers")
        .arg("top")
        .assert()
        .success()
        .stdout(predicate::str::contains("No reservations yet."));
}

#[test]
fn test_customers_show_missing() {
    let dir = TempDir::new().unwrap();

    lunchly(&dir)
        .arg("customers")
        .arg("show")
        .arg("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("customer '42' not found"));
}

#[test]
fn test_customers_show_rejects_bad_id() {
    let dir = TempDir::new().unwrap();

    lunchly(&dir)
        .arg("customers")
        .arg("show")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("customer id must be positive"));
}

#[test]
fn test_customers_commands_print_seeded_data() {
    let dir = TempDir::new().unwrap();
    let id = seed_jane(&dir);

    lunchly(&dir)
        .arg("customers")
        .arg("list")
        .arg("--search")
        .arg("SMITH")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{id:>4}  Jane Smith")))
        .stdout(predicate::str::contains("555-0100"));

    lunchly(&dir)
        .arg("customers")
        .arg("top")
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1."))
        .stdout(predicate::str::contains("(1 reservations)"));

    lunchly(&dir)
        .arg("customers")
        .arg("show")
        .arg(id.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("notes: likes the patio"))
        .stdout(predicate::str::contains("2024-05-01 19:30  4 guests  (window)"));
}

// === Config Command Tests ===

#[test]
fn test_config_path_honors_env() {
    let dir = TempDir::new().unwrap();

    lunchly(&dir)
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_reflects_file_and_flag() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[server]\nbind = \"127.0.0.1:4040\"\n",
    )
    .unwrap();

    lunchly(&dir)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1:4040"))
        .stdout(predicate::str::contains("test.db"));
}
