// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{date_or, fetch_transactions, kind_arg, opt_str, required, resolve_range, today};
use crate::aggregate::TransactionFilter;
use crate::api::{EditScope, Endpoints, FinanceApi};
use crate::editor::{TransactionDraft, TransactionEditor, validate_currency};
use crate::models::TransactionKind;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Serialize;

pub fn handle(api: &dyn FinanceApi, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(api, sub)?,
        Some(("add", sub)) => add(api, sub)?,
        Some(("edit", sub)) => edit(api, sub)?,
        Some(("delete", sub)) => delete(api, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(api, sub, today())?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.wallet.clone(),
                    r.description.clone(),
                    if r.recurring { "yes".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Amount", "Category", "Wallet", "Description", "Recurring"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub wallet: String,
    pub description: String,
    pub recurring: bool,
}

/// Newest first, optionally narrowed by category name and capped by `--limit`.
pub fn query_rows(
    api: &dyn FinanceApi,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Vec<TransactionRow>> {
    let (from, to) = resolve_range(sub, today)?;
    let filter = TransactionFilter {
        kind: kind_arg(sub, "type"),
        from,
        to,
        wallet_id: opt_str(sub, "wallet").cloned(),
    };
    let mut records = fetch_transactions(api, &filter)?;
    if let Some(cat) = opt_str(sub, "category") {
        records.retain(|t| {
            t.category_name()
                .is_some_and(|n| n.eq_ignore_ascii_case(cat.trim()))
        });
    }
    records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        records.truncate(*limit);
    }

    Ok(records
        .into_iter()
        .map(|t| TransactionRow {
            kind: t.kind.as_str().to_string(),
            date: t.date.to_string(),
            amount: format!("{:.2}", t.signed_amount()),
            category: match (&t.category, &t.subcategory) {
                (Some(c), Some(s)) => format!("{} / {}", c.name, s.name),
                (Some(c), None) => c.name.clone(),
                _ => String::new(),
            },
            wallet: t.wallet_id.clone().unwrap_or_default(),
            description: t.description.clone().unwrap_or_default(),
            recurring: t.is_recurring || t.parent_id.is_some(),
            id: t.id,
        })
        .collect())
}

/// Draft for `tx add`; not yet validated.
pub fn draft_from_args(sub: &clap::ArgMatches, today: NaiveDate) -> Result<TransactionDraft> {
    let kind = kind_arg(sub, "type").ok_or_else(|| anyhow!("Missing or invalid --type"))?;
    let date = date_or(sub, "date", today)?;
    let mut draft = TransactionDraft::new(kind, date);
    draft.amount = parse_decimal(required(sub, "amount")?)?;
    draft.wallet_id = opt_str(sub, "wallet").map(|s| s.trim().to_string());
    draft.to_wallet_id = opt_str(sub, "to-wallet").map(|s| s.trim().to_string());
    draft.category_id = opt_str(sub, "category").map(|s| s.trim().to_string());
    draft.subcategory_id = opt_str(sub, "subcategory").map(|s| s.trim().to_string());
    draft.description = opt_str(sub, "description").map(|s| s.trim().to_string());
    draft.currency = opt_str(sub, "currency")
        .map(|s| validate_currency(s))
        .transpose()?;
    draft.is_recurring = sub.get_flag("recurring");
    draft.exclude_from_stats = sub.get_flag("exclude-from-stats");
    if kind == TransactionKind::Transfer {
        draft.category_id = None;
        draft.subcategory_id = None;
    }
    Ok(draft)
}

fn add(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_args(sub, today())?;
    let mut editor = TransactionEditor::new();
    editor.open_create(draft.clone());
    editor.submit(api).context("Could not create transaction")?;
    println!(
        "Recorded {} {:.2} on {}",
        draft.kind.as_str(),
        draft.amount,
        draft.date
    );
    Ok(())
}

/// Loads the record, applies the given fields and submits through the editor.
pub fn apply_edit(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    let id = required(sub, "id")?;
    let record = api
        .transaction(id)
        .with_context(|| format!("Transaction '{}' not found", id))?;
    let scope = opt_str(sub, "scope")
        .and_then(|s| EditScope::parse(s))
        .unwrap_or_default();

    let mut editor = TransactionEditor::new();
    editor.open_edit(&record);
    editor.set_scope(scope);
    let draft = editor
        .draft_mut()
        .ok_or_else(|| anyhow!("Editor has no draft"))?;
    if let Some(amount) = opt_str(sub, "amount") {
        draft.amount = parse_decimal(amount)?;
    }
    if let Some(date) = opt_str(sub, "date") {
        draft.date = crate::utils::parse_date(date)?;
    }
    if let Some(wallet) = opt_str(sub, "wallet") {
        draft.wallet_id = Some(wallet.trim().to_string());
    }
    if let Some(to) = opt_str(sub, "to-wallet") {
        draft.to_wallet_id = Some(to.trim().to_string());
    }
    if let Some(cat) = opt_str(sub, "category") {
        draft.category_id = Some(cat.trim().to_string());
    }
    if let Some(desc) = opt_str(sub, "description") {
        draft.description = Some(desc.trim().to_string());
    }
    let sent = draft.clone();
    editor
        .submit(api)
        .with_context(|| format!("Could not update transaction '{}'", id))?;
    Ok(sent)
}

fn edit(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let draft = apply_edit(api, sub)?;
    println!(
        "Updated {} {:.2} on {}",
        draft.kind.as_str(),
        draft.amount,
        draft.date
    );
    Ok(())
}

fn delete(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let scope = opt_str(sub, "scope")
        .and_then(|s| EditScope::parse(s))
        .unwrap_or_default();
    api.delete_transaction(id, scope)
        .with_context(|| format!("Could not delete transaction '{}'", id))?;
    println!("Deleted transaction {} (scope: {})", id, scope.as_str());
    Ok(())
}
