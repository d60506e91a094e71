// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::TransactionFilter;
use crate::api::{Endpoints, FinanceApi, TransactionQuery};
use crate::dates::{Period, period_range, shift_anchor};
use crate::models::{TransactionKind, TransactionRecord};
use crate::utils::parse_date;
use anyhow::{Context, Result};
use chrono::NaiveDate;

pub mod categories;
pub mod charts;
pub mod exporter;
pub mod portfolio;
pub mod register;
pub mod reports;
pub mod settings;
pub mod transactions;
pub mod trips;
pub mod wallets;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Inclusive bounds from `--from/--to`, or from `--period` around
/// `--anchor` (default `today`). Unset bounds stay open.
pub fn resolve_range(
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    if let Some(p) = opt_str(sub, "period") {
        let period: Period = p.parse().map_err(anyhow::Error::msg)?;
        let anchor = period_anchor(sub, period, today)?;
        return Ok(match period_range(period, anchor) {
            Some((from, to)) => (Some(from), Some(to)),
            None => (None, None),
        });
    }
    let from = opt_str(sub, "from").map(|s| parse_date(s)).transpose()?;
    let to = opt_str(sub, "to").map(|s| parse_date(s)).transpose()?;
    Ok((from, to))
}

/// `--anchor` (default `today`) moved by `--shift` whole periods.
pub fn period_anchor(sub: &clap::ArgMatches, period: Period, today: NaiveDate) -> Result<NaiveDate> {
    let anchor = date_or(sub, "anchor", today)?;
    let steps = sub
        .try_get_one::<i32>("shift")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(0);
    Ok(shift_anchor(period, anchor, steps))
}

/// String argument that may be absent or not defined on this subcommand.
pub fn opt_str<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a String> {
    sub.try_get_one::<String>(name).ok().flatten()
}

pub fn date_or(sub: &clap::ArgMatches, name: &str, default: NaiveDate) -> Result<NaiveDate> {
    match opt_str(sub, name) {
        Some(s) => parse_date(s),
        None => Ok(default),
    }
}

pub fn kind_arg(sub: &clap::ArgMatches, name: &str) -> Option<TransactionKind> {
    opt_str(sub, name).and_then(|s| TransactionKind::parse(s))
}

pub fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    opt_str(sub, name)
        .with_context(|| format!("Missing --{}", name))
}

/// Fetches a range and re-applies the bounds locally, so a backend that
/// ignores the query parameters still yields the same aggregates.
pub fn fetch_transactions(
    api: &dyn FinanceApi,
    filter: &TransactionFilter,
) -> Result<Vec<TransactionRecord>> {
    let query = TransactionQuery {
        from: filter.from,
        to: filter.to,
        wallet_id: filter.wallet_id.clone(),
        kind: filter.kind,
    };
    let records = api
        .transactions(&query)
        .context("Failed to fetch transactions")?;
    Ok(records.into_iter().filter(|t| filter.matches(t)).collect())
}

pub fn range_filter(
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<TransactionFilter> {
    let (from, to) = resolve_range(sub, today)?;
    Ok(TransactionFilter {
        from,
        to,
        ..Default::default()
    })
}
