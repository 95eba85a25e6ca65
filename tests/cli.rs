//! End-to-end tests for the `ledger` binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{ "utc_offset_minutes": 0 }"#,
    )
    .unwrap();
    dir
}

fn ledger(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env("FAMILY_LEDGER_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .current_dir(dir.path());
    cmd
}

fn stored_ids(dir: &Path) -> Vec<String> {
    let raw = fs::read_to_string(dir.join("data").join("transactions_data.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn add_and_list() {
    let dir = setup();

    ledger(&dir)
        .args(["add", "expense", "250.50", "mercado", "--category", "Alimentación"])
        .args(["--date", "2024-03-10", "--method", "yape"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created transaction"));

    ledger(&dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mercado"))
        .stdout(predicate::str::contains("Yape"))
        .stdout(predicate::str::contains("Showing 1 of 1 transactions"));
}

#[test]
fn expense_without_category_is_rejected() {
    let dir = setup();

    ledger(&dir)
        .args(["add", "expense", "10", "algo", "--date", "2024-03-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("category"));

    assert!(!dir.path().join("data").join("transactions_data.json").exists());
}

#[test]
fn invalid_amount_is_rejected() {
    let dir = setup();

    ledger(&dir)
        .args(["add", "income", "0", "nada", "--date", "2024-03-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount"));
}

#[test]
fn summary_reports_budget_remaining() {
    let dir = setup();

    ledger(&dir)
        .args(["budget", "set", "food", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("S/ 300.00"));
    ledger(&dir)
        .args(["add", "income", "1000", "sueldo", "--date", "2024-03-05"])
        .assert()
        .success();
    ledger(&dir)
        .args(["add", "expense", "250.50", "mercado", "-c", "Alimentación", "-d", "2024-03-10"])
        .assert()
        .success();

    ledger(&dir)
        .args(["report", "summary", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Summary: 2024-03"))
        .stdout(predicate::str::contains("S/ 49.50"))
        .stdout(predicate::str::contains("S/ 749.50"));

    let output = ledger(&dir)
        .args(["report", "summary", "--month", "2024-03", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["totals"]["food"], 250.5);
    assert_eq!(value["budgets"][0]["remaining"], 49.5);

    ledger(&dir)
        .args(["budget", "show", "--month", "2024-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budgets for 2024-04"));
}

#[test]
fn delete_requires_confirmation() {
    let dir = setup();

    ledger(&dir)
        .args(["add", "expense", "35", "foco", "-c", "Casa", "-d", "2024-03-10"])
        .assert()
        .success();
    let id = stored_ids(dir.path()).remove(0);

    ledger(&dir)
        .args(["delete", &id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --yes to confirm deletion"));
    assert_eq!(stored_ids(dir.path()).len(), 1);

    ledger(&dir)
        .args(["delete", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction"));
    assert!(stored_ids(dir.path()).is_empty());
}

#[test]
fn edit_keeps_id() {
    let dir = setup();

    ledger(&dir)
        .args(["add", "expense", "35", "foco", "-c", "Casa", "-d", "2024-03-10"])
        .assert()
        .success();
    let id = stored_ids(dir.path()).remove(0);

    ledger(&dir)
        .args(["edit", &id, "--amount", "40", "--category", "Compras"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated transaction"))
        .stdout(predicate::str::contains("Compras"));
    assert_eq!(stored_ids(dir.path()), vec![id]);
}

#[test]
fn export_transactions_csv() {
    let dir = setup();

    ledger(&dir)
        .args(["export", "transactions", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No transactions to export"));

    ledger(&dir)
        .args(["add", "expense", "35", "foco", "-c", "Casa", "-d", "2024-03-10"])
        .assert()
        .success();
    ledger(&dir)
        .args(["export", "transactions", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 transactions"));

    let csv = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert!(csv.starts_with("Tipo,Nota,Categoría,Método de Pago,Fecha,Monto (S/)"));
    assert!(csv.contains("Gasto,foco,Casa,Transferencia,10/03/2024,35.00"));
}

#[test]
fn export_summary_json_by_extension() {
    let dir = setup();

    ledger(&dir)
        .args(["export", "summary", "march.json", "--month", "2024-03"])
        .assert()
        .success();

    let raw = fs::read_to_string(dir.path().join("march.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["month"], "2024-03");
}

#[test]
fn bad_month_is_rejected() {
    let dir = setup();

    ledger(&dir)
        .args(["report", "categories", "--month", "2024-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("month"));
}

#[test]
fn categories_listed_by_group() {
    let dir = setup();

    ledger(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("Pedidos por delivery"))
        .stdout(predicate::str::contains("Miscellaneous"));
}
