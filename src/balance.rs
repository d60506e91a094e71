// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly and yearly register with a carried-forward running balance.
//!
//! Only finished periods (strictly before the current month, or before the
//! current year for year rows) contribute. Unfinished rows are reported as
//! zeros and leave the running balance untouched.

use crate::models::{ManualMonth, MonthSummary, SeriesPoint, TransactionKind, TransactionRecord, YearSummary};
use crate::utils::decimal_to_f64;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Register {
    pub months: Vec<MonthSummary>,
    pub years: Vec<YearSummary>,
}

impl Register {
    pub fn months_of(&self, year: i32) -> impl Iterator<Item = &MonthSummary> {
        self.months.iter().filter(move |m| m.year == year)
    }
}

/// One input row for [`running_balance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthInput {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
    pub finished: bool,
    pub final_balance: Option<Decimal>,
    pub has_override: bool,
}

/// Income and expense magnitudes per `(year, month)`.
pub fn month_totals<'a, I>(records: I) -> BTreeMap<(i32, u32), (Decimal, Decimal)>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut map: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for tx in records.into_iter().filter(|t| t.counts_in_stats()) {
        let entry = map
            .entry((tx.date.year(), tx.date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            TransactionKind::Income => entry.0 += tx.magnitude(),
            TransactionKind::Expense => entry.1 += tx.magnitude(),
            TransactionKind::Transfer => {}
        }
    }
    map
}

pub fn is_month_finished(year: i32, month: u32, today: NaiveDate) -> bool {
    (year, month) < (today.year(), today.month())
}

/// Folds months, oldest first, into summaries with a cumulative balance.
pub fn running_balance(months: &[MonthInput]) -> Vec<MonthSummary> {
    let mut running = Decimal::ZERO;
    months
        .iter()
        .map(|m| {
            if !m.finished {
                return MonthSummary {
                    year: m.year,
                    month: m.month,
                    income: Decimal::ZERO,
                    expense: Decimal::ZERO,
                    saving: Decimal::ZERO,
                    final_amount: Decimal::ZERO,
                    finished: false,
                    has_override: m.has_override,
                };
            }
            let saving = m.income - m.expense;
            match m.final_balance {
                Some(reset) => running = reset,
                None => running += saving,
            }
            MonthSummary {
                year: m.year,
                month: m.month,
                income: m.income,
                expense: m.expense,
                saving,
                final_amount: running,
                finished: true,
                has_override: m.has_override,
            }
        })
        .collect()
}

/// Builds the full register from January of the earliest year with data
/// through December of `today`'s year. Override values replace computed
/// income/expense, and an override `final_balance` resets the running total.
pub fn build_register(
    transactions: &[TransactionRecord],
    overrides: &[ManualMonth],
    today: NaiveDate,
) -> Register {
    let totals = month_totals(transactions);
    let by_month: HashMap<(i32, u32), &ManualMonth> =
        overrides.iter().map(|o| ((o.year, o.month), o)).collect();

    let first_year = totals
        .keys()
        .map(|(y, _)| *y)
        .chain(overrides.iter().map(|o| o.year))
        .min();
    let Some(first_year) = first_year else {
        return Register::default();
    };
    let last_year = today.year().max(first_year);

    let mut inputs = Vec::new();
    for year in first_year..=last_year {
        for month in 1..=12 {
            let (mut income, mut expense) = totals
                .get(&(year, month))
                .copied()
                .unwrap_or((Decimal::ZERO, Decimal::ZERO));
            let manual = by_month.get(&(year, month));
            if let Some(o) = manual {
                income = o.income.unwrap_or(income);
                expense = o.expense.unwrap_or(expense);
            }
            inputs.push(MonthInput {
                year,
                month,
                income,
                expense,
                finished: is_month_finished(year, month, today),
                final_balance: manual.and_then(|o| o.final_balance),
                has_override: manual.is_some(),
            });
        }
    }

    let months = running_balance(&inputs);
    let years = year_summaries(&months, today);
    tracing::debug!(
        months = months.len(),
        years = years.len(),
        overrides = overrides.len(),
        "built register"
    );
    Register { months, years }
}

/// Year rows; only years strictly before `today`'s year carry totals.
pub fn year_summaries(months: &[MonthSummary], today: NaiveDate) -> Vec<YearSummary> {
    let mut years: BTreeMap<i32, YearSummary> = BTreeMap::new();
    for m in months {
        let finished = m.year < today.year();
        let row = years.entry(m.year).or_insert(YearSummary {
            year: m.year,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            saving: Decimal::ZERO,
            final_amount: Decimal::ZERO,
            finished,
        });
        if !finished {
            continue;
        }
        row.income += m.income;
        row.expense += m.expense;
        row.saving = row.income - row.expense;
        if m.finished {
            row.final_amount = m.final_amount;
        }
    }
    years.into_values().collect()
}

/// Wealth series over finished months, dated at each month's first day.
pub fn wealth_series(months: &[MonthSummary]) -> Vec<SeriesPoint> {
    months
        .iter()
        .filter(|m| m.finished)
        .filter_map(|m| {
            Some(SeriesPoint {
                date: NaiveDate::from_ymd_opt(m.year, m.month, 1)?,
                value: decimal_to_f64(m.final_amount),
            })
        })
        .collect()
}
