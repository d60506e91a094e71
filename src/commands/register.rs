// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::today;
use crate::api::{Endpoints, FinanceApi, TransactionQuery};
use crate::balance::{Register, build_register};
use crate::dates::month_year_label;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;

pub fn handle(api: &dyn FinanceApi, m: &clap::ArgMatches) -> Result<()> {
    let register = load_register(api, today())?;
    if m.get_flag("years") {
        let years = &register.years;
        if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), years)? {
            return Ok(());
        }
        let rows = years
            .iter()
            .map(|y| {
                vec![
                    y.year.to_string(),
                    format!("{:.2}", y.income),
                    format!("{:.2}", y.expense),
                    format!("{:.2}", y.saving),
                    format!("{:.2}", y.final_amount),
                    if y.finished { String::new() } else { "open".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Year", "Income", "Expense", "Saving", "Final", ""], rows)
        );
        return Ok(());
    }

    let months: Vec<_> = match m.get_one::<i32>("year") {
        Some(year) => register.months_of(*year).cloned().collect(),
        None => register.months.clone(),
    };
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &months)? {
        return Ok(());
    }
    let rows = months
        .iter()
        .map(|s| {
            let mut label = month_year_label(s.year, s.month);
            if s.has_override {
                label.push_str(" *");
            }
            vec![
                label,
                format!("{:.2}", s.income),
                format!("{:.2}", s.expense),
                format!("{:.2}", s.saving),
                format!("{:.2}", s.final_amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Saving", "Final"], rows)
    );
    Ok(())
}

/// Every transaction plus the manual overrides, folded as of `today`.
pub fn load_register(api: &dyn FinanceApi, today: NaiveDate) -> Result<Register> {
    let records = api
        .transactions(&TransactionQuery::default())
        .context("Failed to fetch transactions")?;
    let overrides = api
        .manual_months()
        .context("Failed to fetch manual month overrides")?;
    Ok(build_register(&records, &overrides, today))
}
