// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::NaiveDate;
use common::{FakeApi, tx_json};
use pocketlens::api::HttpMethod;
use pocketlens::{cli, commands::transactions};
use serde_json::json;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
}

fn setup() -> FakeApi {
    FakeApi::new().get(
        "/transactions",
        json!([
            tx_json(1, "expense", 10.0, "2025-01-01", Some("Food")),
            tx_json(2, "expense", 10.0, "2025-01-02", Some("Rent")),
            tx_json(3, "income", 10.0, "2025-01-03T08:00:00.000Z", Some("Salary")),
        ]),
    )
}

fn tx_sub(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["pocketlens", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => tx_m.clone(),
        _ => panic!("no tx subcommand"),
    }
}

fn leaf(m: &clap::ArgMatches) -> &clap::ArgMatches {
    m.subcommand().map(|(_, sub)| sub).expect("leaf subcommand")
}

#[test]
fn list_limit_respected() {
    let api = setup();
    let tx_m = tx_sub(&["list", "--limit", "2"]);
    let rows = transactions::query_rows(&api, leaf(&tx_m), today()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
    assert_eq!(rows[0].amount, "10.00");
    assert_eq!(rows[1].amount, "-10.00");
}

#[test]
fn list_filters_by_category_name() {
    let api = setup();
    let tx_m = tx_sub(&["list", "--category", "food"]);
    let rows = transactions::query_rows(&api, leaf(&tx_m), today()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Food");
}

#[test]
fn list_sends_range_and_refilters_locally() {
    let api = setup();
    let tx_m = tx_sub(&["list", "--from", "2025-01-02", "--to", "2025-01-02", "--type", "expense"]);
    let rows = transactions::query_rows(&api, leaf(&tx_m), today()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "2");

    let calls = api.calls_to(HttpMethod::Get, "/transactions");
    let query = &calls[0].query;
    assert!(query.contains(&("from".to_string(), "2025-01-02".to_string())));
    assert!(query.contains(&("type".to_string(), "expense".to_string())));
}

#[test]
fn wrapped_list_responses_are_accepted() {
    let api = FakeApi::new().get(
        "/transactions",
        json!({ "data": [tx_json(9, "expense", 4.0, "2025-01-05", None)] }),
    );
    let tx_m = tx_sub(&["list", "--period", "month", "--anchor", "2025-01-10"]);
    let rows = transactions::query_rows(&api, leaf(&tx_m), today()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "9");
}

#[test]
fn add_posts_a_validated_draft() {
    let api = FakeApi::new();
    let tx_m = tx_sub(&[
        "add", "--type", "expense", "--amount", "12.50", "--wallet", "w1", "--category", "c-food",
        "--date", "2025-01-04", "--currency", "eur",
    ]);
    transactions::handle(&api, &tx_m).unwrap();

    let posts = api.calls_to(HttpMethod::Post, "/transactions");
    assert_eq!(posts.len(), 1);
    let body = posts[0].body.as_ref().unwrap();
    assert_eq!(body["amount"], "12.50");
    assert_eq!(body["categoryId"], "c-food");
    assert_eq!(body["currency"], "EUR");
    assert_eq!(body["date"], "2025-01-04");
}

#[test]
fn add_rejects_zero_amount_without_calling_api() {
    let api = FakeApi::new();
    let tx_m = tx_sub(&["add", "--type", "income", "--amount", "0", "--wallet", "w1"]);
    assert!(transactions::handle(&api, &tx_m).is_err());
    assert!(api.calls.borrow().is_empty());
}

#[test]
fn transfer_drafts_drop_categories() {
    let tx_m = tx_sub(&[
        "add", "--type", "transfer", "--amount", "5", "--wallet", "w1", "--to-wallet", "w2",
        "--category", "c-food",
    ]);
    let draft = transactions::draft_from_args(leaf(&tx_m), today()).unwrap();
    assert_eq!(draft.category_id, None);
    assert_eq!(draft.date, today());
    assert!(draft.validate().is_ok());
}

#[test]
fn edit_merges_flags_over_stored_record() {
    let mut stored = tx_json(42, "expense", 30.0, "2024-12-10", Some("Food"));
    stored["isRecurring"] = json!(true);
    stored["description"] = json!("Groceries");
    let api = FakeApi::new().get("/transactions/42", stored);

    let tx_m = tx_sub(&["edit", "42", "--amount", "35", "--scope", "series"]);
    let sent = transactions::apply_edit(&api, leaf(&tx_m)).unwrap();
    assert_eq!(sent.description.as_deref(), Some("Groceries"));

    let patches = api.calls_to(HttpMethod::Patch, "/transactions/42");
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].body.as_ref().unwrap()["amount"], "35");
    assert_eq!(
        patches[0].query,
        vec![("scope".to_string(), "series".to_string())]
    );
}

#[test]
fn edit_transfer_can_move_its_destination() {
    let mut stored = tx_json(9, "transfer", 200.0, "2024-12-10", None);
    stored["toWalletId"] = json!(2);
    let api = FakeApi::new().get("/transactions/9", stored);

    let tx_m = tx_sub(&["edit", "9", "--to-wallet", "w3"]);
    let sent = transactions::apply_edit(&api, leaf(&tx_m)).unwrap();
    assert_eq!(sent.to_wallet_id.as_deref(), Some("w3"));

    let patches = api.calls_to(HttpMethod::Patch, "/transactions/9");
    assert_eq!(patches[0].body.as_ref().unwrap()["toWalletId"], "w3");

    let tx_m = tx_sub(&["edit", "9", "--to-wallet", "w1"]);
    assert!(transactions::apply_edit(&api, leaf(&tx_m)).is_err());
    assert_eq!(api.calls_to(HttpMethod::Patch, "/transactions/9").len(), 1);
}

#[test]
fn edit_of_missing_record_fails() {
    let api = FakeApi::new();
    let tx_m = tx_sub(&["edit", "404", "--amount", "1"]);
    assert!(transactions::apply_edit(&api, leaf(&tx_m)).is_err());
}

#[test]
fn delete_passes_scope() {
    let api = FakeApi::new();
    let tx_m = tx_sub(&["delete", "42", "--scope", "future"]);
    transactions::handle(&api, &tx_m).unwrap();
    let deletes = api.calls_to(HttpMethod::Delete, "/transactions/42");
    assert_eq!(
        deletes[0].query,
        vec![("scope".to_string(), "future".to_string())]
    );
}
