// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::NaiveDate;
use common::{FakeApi, record, tx_json};
use pocketlens::api::{EditScope, HttpMethod};
use pocketlens::editor::{EditorMode, TransactionDraft, TransactionEditor, validate_currency};
use pocketlens::errors::{EditorError, ValidationError};
use pocketlens::models::TransactionKind;
use rust_decimal::Decimal;
use serde_json::json;

fn draft(kind: TransactionKind, amount: i64) -> TransactionDraft {
    let mut d = TransactionDraft::new(kind, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    d.amount = Decimal::from(amount);
    d.wallet_id = Some("w1".into());
    d
}

#[test]
fn validation_rules() {
    assert_eq!(draft(TransactionKind::Expense, 10).validate(), Ok(()));
    assert!(matches!(
        draft(TransactionKind::Expense, -10).validate(),
        Err(ValidationError::NegativeAmount(_))
    ));
    assert_eq!(
        draft(TransactionKind::Income, 0).validate(),
        Err(ValidationError::ZeroAmount)
    );

    let mut no_wallet = draft(TransactionKind::Income, 5);
    no_wallet.wallet_id = None;
    assert_eq!(no_wallet.validate(), Err(ValidationError::Missing("wallet")));

    let mut transfer = draft(TransactionKind::Transfer, 5);
    assert_eq!(transfer.validate(), Err(ValidationError::TransferTarget));
    transfer.to_wallet_id = Some("w1".into());
    assert_eq!(transfer.validate(), Err(ValidationError::TransferTarget));
    transfer.to_wallet_id = Some("w2".into());
    assert_eq!(transfer.validate(), Ok(()));

    let mut bad_ccy = draft(TransactionKind::Expense, 5);
    bad_ccy.currency = Some("EURO".into());
    assert!(matches!(bad_ccy.validate(), Err(ValidationError::Currency(_))));
}

#[test]
fn currency_codes_are_normalised() {
    assert_eq!(validate_currency(" usd ").unwrap(), "USD");
    assert!(validate_currency("US1").is_err());
    assert!(validate_currency("").is_err());
}

#[test]
fn closed_editor_refuses_to_submit() {
    let api = FakeApi::new();
    let mut editor = TransactionEditor::new();
    assert!(!editor.is_open());
    assert!(matches!(editor.submit(&api), Err(EditorError::Closed)));
    assert!(api.calls.borrow().is_empty());
}

#[test]
fn create_posts_the_draft_and_closes() {
    let api = FakeApi::new();
    let mut editor = TransactionEditor::new();
    let mut prefill = draft(TransactionKind::Expense, 12);
    prefill.description = Some("Coffee".into());
    editor.open_create(prefill);
    assert_eq!(editor.mode(), &EditorMode::Create);

    editor.submit(&api).unwrap();
    assert!(!editor.is_open());
    assert!(editor.draft().is_none());

    let posts = api.calls_to(HttpMethod::Post, "/transactions");
    assert_eq!(posts.len(), 1);
    let body = posts[0].body.as_ref().unwrap();
    assert_eq!(body["type"], "expense");
    assert_eq!(body["walletId"], "w1");
    assert_eq!(body["description"], "Coffee");
    assert_eq!(body["date"], "2024-03-01");
    assert!(body.get("toWalletId").is_none());
}

#[test]
fn invalid_draft_keeps_editor_open() {
    let api = FakeApi::new();
    let mut editor = TransactionEditor::new();
    editor.open_create(draft(TransactionKind::Expense, 0));
    assert!(matches!(
        editor.submit(&api),
        Err(EditorError::Validation(ValidationError::ZeroAmount))
    ));
    assert!(editor.is_open());
    assert!(api.calls.borrow().is_empty());
}

#[test]
fn edit_prefills_from_record_and_patches_with_scope() {
    let api = FakeApi::new();
    let mut rec = record(42, "expense", -30.0, "2024-02-10", Some("Food"));
    rec.is_recurring = true;

    let mut editor = TransactionEditor::new();
    editor.open_edit(&rec);
    let d = editor.draft().unwrap();
    assert_eq!(d.amount, Decimal::from(30));
    assert_eq!(d.category_id.as_deref(), Some("c-food"));

    editor.set_scope(EditScope::Future);
    editor.submit(&api).unwrap();

    let patches = api.calls_to(HttpMethod::Patch, "/transactions/42");
    assert_eq!(patches.len(), 1);
    assert_eq!(
        patches[0].query,
        vec![("scope".to_string(), "future".to_string())]
    );
}

#[test]
fn scope_stays_single_for_one_off_records() {
    let rec = record(7, "income", 10.0, "2024-02-10", None);
    let mut editor = TransactionEditor::new();
    editor.open_edit(&rec);
    editor.set_scope(EditScope::Series);
    match editor.mode() {
        EditorMode::Edit { scope, recurring, .. } => {
            assert!(!recurring);
            assert_eq!(*scope, EditScope::Single);
        }
        other => panic!("unexpected mode {:?}", other),
    }
}

#[test]
fn transfer_edit_keeps_its_destination() {
    let api = FakeApi::new();
    let mut raw = tx_json(7, "transfer", 200.0, "2024-02-10", None);
    raw["toWalletId"] = json!("w2");
    let rec: pocketlens::models::TransactionRecord = serde_json::from_value(raw).unwrap();

    let mut editor = TransactionEditor::new();
    editor.open_edit(&rec);
    assert_eq!(editor.draft().unwrap().to_wallet_id.as_deref(), Some("w2"));
    editor.draft_mut().unwrap().amount = Decimal::from(250);
    editor.submit(&api).unwrap();

    let patches = api.calls_to(HttpMethod::Patch, "/transactions/7");
    assert_eq!(patches.len(), 1);
    let body = patches[0].body.as_ref().unwrap();
    assert_eq!(body["toWalletId"], "w2");
    assert_eq!(body["amount"], "250");
}

#[test]
fn transfer_without_stored_destination_still_saves_other_edits() {
    let api = FakeApi::new();
    let rec = record(8, "transfer", 120.0, "2024-02-10", None);
    assert!(rec.to_wallet_id.is_none());

    let mut editor = TransactionEditor::new();
    editor.open_edit(&rec);
    editor.draft_mut().unwrap().description = Some("Savings move".into());
    editor.submit(&api).unwrap();
    assert_eq!(api.calls_to(HttpMethod::Patch, "/transactions/8").len(), 1);
}

#[test]
fn transfer_edit_rejects_a_destination_equal_to_the_source() {
    let api = FakeApi::new();
    let rec = record(9, "transfer", 120.0, "2024-02-10", None);

    let mut editor = TransactionEditor::new();
    editor.open_edit(&rec);
    editor.draft_mut().unwrap().to_wallet_id = Some("w1".into());
    assert!(matches!(
        editor.submit(&api),
        Err(EditorError::Validation(ValidationError::TransferTarget))
    ));
    assert!(editor.is_open());
    assert!(api.calls.borrow().is_empty());
}
