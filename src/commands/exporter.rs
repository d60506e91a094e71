// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::register::load_register;
use super::{fetch_transactions, range_filter, required, today};
use crate::api::FinanceApi;
use crate::models::{MonthSummary, TransactionRecord};
use anyhow::{Result, anyhow};
use serde_json::json;
use std::path::Path;

pub fn handle(api: &dyn FinanceApi, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let fmt = required(sub, "format")?.to_lowercase();
            let out = required(sub, "out")?;
            let register = load_register(api, today())?;
            write_register(&register.months, &fmt, Path::new(out))?;
            println!("Exported register to {}", out);
        }
        Some(("transactions", sub)) => {
            let fmt = required(sub, "format")?.to_lowercase();
            let out = required(sub, "out")?;
            let mut records = fetch_transactions(api, &range_filter(sub, today())?)?;
            records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
            write_transactions(&records, &fmt, Path::new(out))?;
            println!("Exported {} transactions to {}", records.len(), out);
        }
        _ => {}
    }
    Ok(())
}

pub fn write_register(months: &[MonthSummary], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "year", "month", "income", "expense", "saving", "final", "finished", "override",
            ])?;
            for m in months {
                wtr.write_record([
                    m.year.to_string(),
                    m.month.to_string(),
                    format!("{:.2}", m.income),
                    format!("{:.2}", m.expense),
                    format!("{:.2}", m.saving),
                    format!("{:.2}", m.final_amount),
                    m.finished.to_string(),
                    m.has_override.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(months)?)?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    Ok(())
}

pub fn write_transactions(records: &[TransactionRecord], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "type", "amount", "category", "subcategory", "wallet", "description",
            ])?;
            for t in records {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    format!("{:.2}", t.magnitude()),
                    t.category_name().unwrap_or_default().to_string(),
                    t.subcategory
                        .as_ref()
                        .map(|s| s.name.clone())
                        .unwrap_or_default(),
                    t.wallet_id.clone().unwrap_or_default(),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = records
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date,
                        "type": t.kind.as_str(),
                        "amount": t.magnitude(),
                        "category": t.category_name(),
                        "subcategory": t.subcategory.as_ref().map(|s| s.name.as_str()),
                        "wallet": t.wallet_id,
                        "description": t.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    Ok(())
}
