//! CLI Session Tests
//!
//! Drives the interactive menu and the JSON request loop over in-memory
//! streams against real collection files created by `init_store`.

use std::fs;
use std::io::Cursor;

use ledgerbook::cli::{init_store, serve_requests, Config, Menu, Session};
use ledgerbook::schema::EntityType;
use ledgerbook::store::{CsvBackend, RecordStore};
use serde_json::Value;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup() -> (TempDir, Config, RecordStore<CsvBackend>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        data_dir: temp_dir.path().join("data").display().to_string(),
        ..Config::default()
    };
    let store = RecordStore::new(config.backend());
    init_store(&config, &store).unwrap();
    (temp_dir, config, store)
}

fn run_menu(store: &RecordStore<CsvBackend>, input: &str) -> String {
    let mut session = Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    Menu::new(store, &mut session).run().unwrap();
    let (_, out) = session.into_parts();
    String::from_utf8(out).unwrap()
}

fn run_requests(store: &RecordStore<CsvBackend>, input: &str) -> Vec<Value> {
    let mut out = Vec::new();
    serve_requests(store, Cursor::new(input.as_bytes().to_vec()), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// =============================================================================
// Interactive Menu
// =============================================================================

/// Creating a transaction through the menu writes every prompted field.
#[test]
fn test_menu_create_transaction_writes_file() {
    let (_tmp, config, store) = setup();
    let answers = [
        "t1",
        "2024-03-01",
        "groceries",
        "A1",
        "12.50",
        "",
        "EUR",
        "receipt-17",
        "alice",
        "",
        "2024-03-02",
    ];
    let input = format!("2\n1\n{}\n5\n3\n", answers.join("\n"));

    let out = run_menu(&store, &input);
    assert!(out.contains("transaction created successfully."));

    let text = fs::read_to_string(config.collection_path(EntityType::Transaction)).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some(
            "ID,DATE,DESCRIPTION,ACCOUNT_CODE,DEBIT_AMOUNT,CREDIT_AMOUNT,\
             CURRENCY,PROOF,ISSUER,VALIDATOR,DATE_ENTRY"
        )
    );
    assert_eq!(
        lines.next(),
        Some("t1,2024-03-01,groceries,A1,12.50,,EUR,receipt-17,alice,,2024-03-02")
    );
}

/// A menu session reads back what an earlier session wrote.
#[test]
fn test_menu_sessions_share_files() {
    let (_tmp, _config, store) = setup();

    run_menu(&store, "1\n1\nA1\nasset\nCash\nwallet\n0\n20\nUSD\n5\n3\n");
    let out = run_menu(&store, "1\n2\nA1\n5\n3\n");

    assert!(out.contains("account Details: "));
    assert!(out.contains("\"NAME\": \"Cash\""));
}

/// A missing collection file is reported and the menu keeps running.
#[test]
fn test_menu_reports_missing_file() {
    let (_tmp, config, store) = setup();
    fs::remove_file(config.collection_path(EntityType::Account)).unwrap();

    let out = run_menu(&store, "1\n2\nA1\n5\n2\n5\n3\n");

    assert!(out.contains("account operation failed: LEDGER_STORAGE_NOT_FOUND"));
    assert!(out.contains("Transaction Operations"));
}

// =============================================================================
// JSON Requests
// =============================================================================

/// The full lifecycle over the request loop, one response per line.
#[test]
fn test_request_lifecycle() {
    let (_tmp, _config, store) = setup();
    let input = r#"{"op":"create","entity":"account","data":{"ID":"1","NAME":"Alice","BALANCE_CURRENT":"100"}}
{"op":"update","entity":"account","id":"1","data":{"BALANCE_CURRENT":"150"}}
{"op":"read","entity":"account","id":"1"}

{"op":"delete","entity":"account","id":"1"}
{"op":"read","entity":"account","id":"1"}
"#;

    let responses = run_requests(&store, input);
    assert_eq!(responses.len(), 5);
    assert!(responses.iter().all(|r| r["status"] == "ok"));
    assert_eq!(responses[1]["data"]["updated"], true);
    assert_eq!(responses[2]["data"]["NAME"], "Alice");
    assert_eq!(responses[2]["data"]["BALANCE_CURRENT"], "150");
    assert_eq!(responses[3]["data"]["deleted"], true);
    assert!(responses[4]["data"].is_null());
}

/// Bad requests are answered with an error and do not stop the loop.
#[test]
fn test_bad_requests_do_not_stop_loop() {
    let (_tmp, _config, store) = setup();
    let input = r#"{"op":"purge","entity":"account"}
{"op":"read","entity":"ledger","id":"1"}
{"op":"fields","entity":"transaction","mode":"create"}
"#;

    let responses = run_requests(&store, input);
    assert_eq!(responses[0]["code"], "LEDGER_UNKNOWN_OPERATION");
    assert_eq!(responses[1]["code"], "LEDGER_UNKNOWN_ENTITY");
    assert_eq!(responses[2]["status"], "ok");
    assert_eq!(responses[2]["data"].as_array().map(Vec::len), Some(11));
}
