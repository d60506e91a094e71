// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Folding flat transaction lists into category, day, month and chart
//! buckets. Transfers, records excluded from stats and inactive records
//! never reach any total.

use crate::dates::{Period, end_of_day};
use crate::models::{CategoryAggregate, PeriodBucket, TransactionKind, TransactionRecord};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub incomes: Vec<CategoryAggregate>,
    pub expenses: Vec<CategoryAggregate>,
    /// Income that carried no category and is therefore absent from `incomes`.
    pub uncategorized_income: Decimal,
    pub uncategorized_expense: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub count: usize,
}

/// Optional constraints applied before aggregation.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub wallet_id: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &TransactionRecord) -> bool {
        if let Some(kind) = self.kind {
            if tx.kind != kind {
                return false;
            }
        }
        if let Some(from) = self.from {
            if tx.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if !within_inclusive_end(tx.date, to) {
                return false;
            }
        }
        if let Some(wallet) = &self.wallet_id {
            if tx.wallet_id.as_deref() != Some(wallet.as_str()) {
                return false;
            }
        }
        true
    }
}

fn within_inclusive_end(date: NaiveDate, to: NaiveDate) -> bool {
    date.and_time(NaiveTime::MIN) <= end_of_day(to)
}

/// Sums magnitudes per category, split into incomes and expenses, each
/// sorted by amount descending.
pub fn group_by_category<'a, I>(records: I) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut incomes: HashMap<String, CategoryAggregate> = HashMap::new();
    let mut expenses: HashMap<String, CategoryAggregate> = HashMap::new();
    let mut out = CategoryBreakdown::default();

    for tx in records.into_iter().filter(|t| t.counts_in_stats()) {
        let Some(cat) = &tx.category else {
            match tx.kind {
                TransactionKind::Income => out.uncategorized_income += tx.magnitude(),
                TransactionKind::Expense => out.uncategorized_expense += tx.magnitude(),
                TransactionKind::Transfer => {}
            }
            continue;
        };
        let target = match tx.kind {
            TransactionKind::Income => &mut incomes,
            TransactionKind::Expense => &mut expenses,
            TransactionKind::Transfer => continue,
        };
        let entry = target
            .entry(cat.name.clone())
            .or_insert_with(|| CategoryAggregate {
                name: cat.name.clone(),
                emoji: cat.emoji.clone(),
                color: cat.color.clone(),
                amount: Decimal::ZERO,
                count: 0,
            });
        entry.amount += tx.magnitude();
        entry.count += 1;
    }

    out.incomes = sorted_desc(incomes);
    out.expenses = sorted_desc(expenses);
    tracing::debug!(
        incomes = out.incomes.len(),
        expenses = out.expenses.len(),
        "grouped transactions by category"
    );
    out
}

fn sorted_desc(map: HashMap<String, CategoryAggregate>) -> Vec<CategoryAggregate> {
    let mut items: Vec<_> = map.into_values().collect();
    items.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
    items
}

pub fn totals<'a, I>(records: I) -> Totals
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut t = Totals::default();
    for tx in records.into_iter().filter(|t| t.counts_in_stats()) {
        match tx.kind {
            TransactionKind::Income => t.income += tx.magnitude(),
            TransactionKind::Expense => t.expense += tx.magnitude(),
            TransactionKind::Transfer => continue,
        }
        t.count += 1;
    }
    t.net = t.income - t.expense;
    t
}

/// Signed daily totals (income positive, expense negative), oldest first.
pub fn group_by_day<'a, I>(records: I) -> Vec<PeriodBucket>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut days: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for tx in records.into_iter().filter(|t| t.counts_in_stats()) {
        *days.entry(tx.date).or_insert(Decimal::ZERO) += tx.signed_amount();
    }
    days.into_iter()
        .map(|(d, total)| PeriodBucket {
            period_key: d.to_string(),
            total,
        })
        .collect()
}

/// Signed monthly totals keyed `YYYY-MM`, oldest first.
pub fn group_by_month<'a, I>(records: I) -> Vec<PeriodBucket>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut months: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for tx in records.into_iter().filter(|t| t.counts_in_stats()) {
        *months
            .entry((tx.date.year(), tx.date.month()))
            .or_insert(Decimal::ZERO) += tx.signed_amount();
    }
    months
        .into_iter()
        .map(|((y, m), total)| PeriodBucket {
            period_key: format!("{:04}-{:02}", y, m),
            total,
        })
        .collect()
}

/// Chart buckets for one period, summing magnitudes.
///
/// * week: 7 daily buckets starting at `from`
/// * month: 5 seven-day buckets starting at `from`; the fifth is dropped
///   when it sums to zero, so callers get 4 or 5 buckets
/// * year: 12 monthly buckets of `from`'s year
/// * all: one bucket per year present, chronological; `from`/`to` unused
pub fn generate_bars<'a, I>(records: I, from: NaiveDate, to: NaiveDate, period: Period) -> Vec<PeriodBucket>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let counted = records.into_iter().filter(|t| t.counts_in_stats());

    if period == Period::All {
        let mut years: BTreeMap<i32, Decimal> = BTreeMap::new();
        for tx in counted {
            *years.entry(tx.date.year()).or_insert(Decimal::ZERO) += tx.magnitude();
        }
        return years
            .into_iter()
            .map(|(y, total)| PeriodBucket {
                period_key: y.to_string(),
                total,
            })
            .collect();
    }

    let keys: Vec<String> = match period {
        Period::Week => (0..7).map(|i| (from + Duration::days(i)).to_string()).collect(),
        Period::Month => (0..5)
            .map(|i| (from + Duration::days(i * 7)).to_string())
            .collect(),
        _ => (1..=12).map(|m| format!("{:04}-{:02}", from.year(), m)).collect(),
    };
    let mut sums = vec![Decimal::ZERO; keys.len()];

    for tx in counted {
        if tx.date < from || !within_inclusive_end(tx.date, to) {
            continue;
        }
        let offset = (tx.date - from).num_days();
        let idx = match period {
            Period::Week if offset < 7 => offset as usize,
            Period::Week => continue,
            Period::Month => ((offset / 7) as usize).min(4),
            _ => (tx.date.month() - 1) as usize,
        };
        sums[idx] += tx.magnitude();
    }

    if period == Period::Month && sums[4].is_zero() {
        sums.pop();
    }

    keys.into_iter()
        .zip(sums)
        .map(|(period_key, total)| PeriodBucket { period_key, total })
        .collect()
}

/// Bucket totals as chart values.
pub fn bar_values(buckets: &[PeriodBucket]) -> Vec<f64> {
    buckets.iter().map(|b| crate::utils::decimal_to_f64(b.total)).collect()
}
