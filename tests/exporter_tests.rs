// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeApi, record, tx_json};
use pocketlens::{cli, commands::exporter};
use serde_json::json;
use tempfile::tempdir;

fn api() -> FakeApi {
    let mut shop = tx_json(2, "expense", 12.34, "2025-01-02", Some("Groceries"));
    shop["description"] = json!("Weekly run");
    FakeApi::new()
        .get(
            "/transactions",
            json!([
                tx_json(3, "income", 100.0, "2025-01-05", None),
                shop,
                tx_json(1, "expense", 8.0, "2024-12-30", Some("Food")),
            ]),
        )
        .get("/manual-month", json!([]))
}

#[test]
fn export_transactions_streams_pretty_json() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "pocketlens",
        "export",
        "transactions",
        "--from",
        "2025-01-01",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&api(), export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(
        parsed[0],
        json!({
            "id": "2",
            "date": "2025-01-02",
            "type": "expense",
            "amount": "12.34",
            "category": "Groceries",
            "subcategory": null,
            "wallet": "w1",
            "description": "Weekly run"
        })
    );
    assert_eq!(parsed[1]["id"], "3");
}

#[test]
fn export_register_as_csv() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("register.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let matches =
        cli::build_cli().get_matches_from(["pocketlens", "export", "register", "-o", &out_str]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&api(), export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "year");
    assert_eq!(&headers[5], "final");
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    // January 2024 through at least December 2025
    assert!(rows.len() >= 24);
    assert_eq!(&rows[0][0], "2024");
    assert_eq!(&rows[0][1], "1");
    let december = &rows[11];
    assert_eq!(&december[3], "8.00");
    assert_eq!(&december[5], "-8.00");
}

#[test]
fn unknown_format_is_rejected() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let records = vec![record(1, "expense", 1.0, "2025-01-01", None)];
    assert!(exporter::write_transactions(&records, "xml", &out_path).is_err());
    assert!(!out_path.exists());
}
