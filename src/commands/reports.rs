// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{fetch_transactions, kind_arg, opt_str, period_anchor, range_filter, today};
use crate::aggregate::{
    CategoryBreakdown, Totals, TransactionFilter, generate_bars, group_by_category, group_by_day,
    group_by_month, totals,
};
use crate::api::FinanceApi;
use crate::dates::{Period, period_range};
use crate::models::{PeriodBucket, TransactionKind};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;

pub fn handle(api: &dyn FinanceApi, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("categories", sub)) => categories(api, sub)?,
        Some(("bars", sub)) => bars(api, sub)?,
        Some(("daily", sub)) => buckets(api, sub, false)?,
        Some(("monthly", sub)) => buckets(api, sub, true)?,
        Some(("totals", sub)) => totals_report(api, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn category_breakdown(
    api: &dyn FinanceApi,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<CategoryBreakdown> {
    let records = fetch_transactions(api, &range_filter(sub, today)?)?;
    Ok(group_by_category(&records))
}

fn categories(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let breakdown = category_breakdown(api, sub, today())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &breakdown)? {
        return Ok(());
    }
    let mut rows = Vec::new();
    for (label, items, uncategorized) in [
        ("income", &breakdown.incomes, breakdown.uncategorized_income),
        ("expense", &breakdown.expenses, breakdown.uncategorized_expense),
    ] {
        for c in items {
            rows.push(vec![
                label.to_string(),
                match &c.emoji {
                    Some(e) => format!("{} {}", e, c.name),
                    None => c.name.clone(),
                },
                format!("{:.2}", c.amount),
                c.count.to_string(),
            ]);
        }
        if !uncategorized.is_zero() {
            rows.push(vec![
                label.to_string(),
                "(uncategorized)".to_string(),
                format!("{:.2}", uncategorized),
                String::new(),
            ]);
        }
    }
    println!(
        "{}",
        pretty_table(&["Type", "Category", "Amount", "Count"], rows)
    );
    Ok(())
}

/// Buckets for `--period` around `--anchor`, counting only `--type` records.
/// `all` ignores the anchor and yields one bucket per year.
pub fn period_bars(
    api: &dyn FinanceApi,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<(Period, NaiveDate, Vec<PeriodBucket>)> {
    let period: Period = opt_str(sub, "period")
        .map(|p| p.parse::<Period>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(Period::Month);
    let kind = kind_arg(sub, "type").unwrap_or(TransactionKind::Expense);
    if kind == TransactionKind::Transfer {
        return Err(anyhow!("Transfers are not charted"));
    }
    let anchor = period_anchor(sub, period, today)?;
    let (from, to) = match period_range(period, anchor) {
        Some((f, t)) => (Some(f), Some(t)),
        None => (None, None),
    };
    let filter = TransactionFilter {
        kind: Some(kind),
        from,
        to,
        wallet_id: None,
    };
    let records = fetch_transactions(api, &filter)?;
    let buckets = generate_bars(
        &records,
        from.unwrap_or(today),
        to.unwrap_or(today),
        period,
    );
    tracing::debug!(period = %period, buckets = buckets.len(), "built period bars");
    Ok((period, from.unwrap_or(anchor), buckets))
}

fn bars(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let (_, _, buckets) = period_bars(api, sub, today())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        return Ok(());
    }
    let rows = buckets
        .iter()
        .map(|b| vec![b.period_key.clone(), format!("{:.2}", b.total)])
        .collect();
    println!("{}", pretty_table(&["Period", "Total"], rows));
    Ok(())
}

fn buckets(api: &dyn FinanceApi, sub: &clap::ArgMatches, monthly: bool) -> Result<()> {
    let records = fetch_transactions(api, &range_filter(sub, today())?)?;
    let data = if monthly {
        group_by_month(&records)
    } else {
        group_by_day(&records)
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|b| vec![b.period_key.clone(), format!("{:.2}", b.total)])
        .collect();
    let header = if monthly { "Month" } else { "Day" };
    println!("{}", pretty_table(&[header, "Net"], rows));
    Ok(())
}

pub fn range_totals(
    api: &dyn FinanceApi,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Totals> {
    let records = fetch_transactions(api, &range_filter(sub, today)?)?;
    Ok(totals(&records))
}

fn totals_report(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let t = range_totals(api, sub, today())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        return Ok(());
    }
    let rows = vec![vec![
        format!("{:.2}", t.income),
        format!("{:.2}", t.expense),
        format!("{:.2}", t.net),
        t.count.to_string(),
    ]];
    println!(
        "{}",
        pretty_table(&["Income", "Expense", "Net", "Transactions"], rows)
    );
    Ok(())
}
