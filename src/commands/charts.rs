// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::reports::{category_breakdown, period_bars, range_totals};
use super::{kind_arg, required, today};
use crate::aggregate::bar_values;
use crate::api::FinanceApi;
use crate::balance::wealth_series;
use crate::chart::Canvas;
use crate::chart::pie::DEFAULT_PAD_ANGLE;
use crate::chart::svg::{
    DonutItem, EXPENSE_COLOR, INCOME_COLOR, PALETTE, render_bar_chart, render_donut,
    render_line_chart, render_savings_ring,
};
use crate::dates::{Period, date_label, day_label, month_label, month_year_label};
use crate::models::{PeriodBucket, TransactionKind};
use crate::utils::{decimal_to_f64, write_output};
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};

const DONUT_SIZE: f64 = 260.0;
const RING_SIZE: f64 = 180.0;

pub fn handle(api: &dyn FinanceApi, m: &clap::ArgMatches) -> Result<()> {
    let (sub, svg) = match m.subcommand() {
        Some(("bars", sub)) => (sub, bars_svg(api, sub, today())?),
        Some(("wealth", sub)) => (sub, wealth_svg(api, today())?),
        Some(("donut", sub)) => (sub, donut_svg(api, sub, today())?),
        Some(("savings", sub)) => (sub, savings_svg(api, sub, today())?),
        _ => return Ok(()),
    };
    let out = required(sub, "out")?;
    write_output(out, &svg)?;
    println!("Wrote {}", out);
    Ok(())
}

/// Axis labels for the buckets of `period` starting at `from`.
pub fn bar_labels(period: Period, from: NaiveDate, buckets: &[PeriodBucket]) -> Vec<String> {
    buckets
        .iter()
        .enumerate()
        .map(|(i, b)| match period {
            Period::Week => day_label(from + Duration::days(i as i64)),
            Period::Month => format!("sem {}", i + 1),
            Period::Year => month_label(i as u32 + 1).to_string(),
            Period::All => b.period_key.clone(),
        })
        .collect()
}

pub fn bars_svg(api: &dyn FinanceApi, sub: &clap::ArgMatches, today: NaiveDate) -> Result<String> {
    let (period, from, buckets) = period_bars(api, sub, today)?;
    let labels = bar_labels(period, from, &buckets);
    let color = match kind_arg(sub, "type") {
        Some(TransactionKind::Income) => INCOME_COLOR,
        _ => EXPENSE_COLOR,
    };
    Ok(render_bar_chart(
        &labels,
        &bar_values(&buckets),
        &Canvas::default(),
        color,
    )?)
}

pub fn wealth_svg(api: &dyn FinanceApi, today: NaiveDate) -> Result<String> {
    let register = super::register::load_register(api, today)?;
    let series = wealth_series(&register.months);
    let labels: Vec<String> = series
        .iter()
        .map(|p| month_year_label(p.date.year(), p.date.month()))
        .collect();
    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    Ok(render_line_chart(
        &labels,
        &values,
        &Canvas::default(),
        PALETTE[0],
    )?)
}

pub fn donut_svg(api: &dyn FinanceApi, sub: &clap::ArgMatches, today: NaiveDate) -> Result<String> {
    let breakdown = category_breakdown(api, sub, today)?;
    let items = match kind_arg(sub, "type") {
        Some(TransactionKind::Income) => &breakdown.incomes,
        _ => &breakdown.expenses,
    };
    let items: Vec<DonutItem> = items
        .iter()
        .map(|c| DonutItem {
            label: match &c.emoji {
                Some(e) => format!("{} {}", e, c.name),
                None => c.name.clone(),
            },
            value: decimal_to_f64(c.amount),
            color: c.color.clone(),
        })
        .collect();
    Ok(render_donut(&items, DONUT_SIZE, DEFAULT_PAD_ANGLE)?)
}

pub fn savings_svg(api: &dyn FinanceApi, sub: &clap::ArgMatches, today: NaiveDate) -> Result<String> {
    let t = range_totals(api, sub, today)?;
    tracing::debug!(
        income = %t.income,
        expense = %t.expense,
        as_of = %date_label(today),
        "rendering savings ring"
    );
    Ok(render_savings_ring(
        decimal_to_f64(t.income),
        decimal_to_f64(t.expense),
        RING_SIZE,
        DEFAULT_PAD_ANGLE,
    )?)
}
