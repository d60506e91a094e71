// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar helpers: ISO weeks, inclusive ranges, period anchors and the
//! Spanish labels used on chart axes and register rows.

use crate::errors::DateError;
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static ISO_WEEK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-W(\d{2})$").expect("static ISO week pattern"));

const MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];
const MONTHS_LONG: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];
const WEEKDAYS_SHORT: [&str; 7] = ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"];

/// Range granularity used by reports and bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Week,
    Month,
    Year,
    All,
}

impl Period {
    pub const NAMES: [&'static str; 4] = ["week", "month", "year", "all"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            other => Err(format!("Unknown period '{}' (use week|month|year|all)", other)),
        }
    }
}

/// `YYYY-Www` key of the ISO-8601 week containing `date`. The year part is
/// the ISO week-year, which differs from the calendar year around New Year.
pub fn to_iso_week_value(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{:04}-W{:02}", week.year(), week.week())
}

/// Monday that starts the ISO week named by `value`.
pub fn week_start_from_iso_week(value: &str) -> Result<NaiveDate, DateError> {
    let bad = || DateError::IsoWeek(value.to_string());
    let caps = ISO_WEEK_RE.captures(value.trim()).ok_or_else(bad)?;
    let year: i32 = caps[1].parse().map_err(|_| bad())?;
    let week: u32 = caps[2].parse().map_err(|_| bad())?;
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(bad)
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Last representable millisecond of `date`, for inclusive "to" bounds.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1)
}

pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| DateError::Date(s.to_string()))
}

/// Parses `YYYY-MM` into `(year, month)`.
pub fn parse_month(s: &str) -> Result<(i32, u32), DateError> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| DateError::Month(s.to_string()))?;
    Ok((d.year(), d.month()))
}

pub fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    month_start(year, month)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Inclusive calendar range of the period containing `anchor`; `None` for
/// [`Period::All`], which is unbounded.
pub fn period_range(period: Period, anchor: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    match period {
        Period::Week => {
            let from = week_start(anchor);
            Some((from, from + Duration::days(6)))
        }
        Period::Month => Some((
            month_start(anchor.year(), anchor.month())?,
            month_end(anchor.year(), anchor.month())?,
        )),
        Period::Year => Some((
            NaiveDate::from_ymd_opt(anchor.year(), 1, 1)?,
            NaiveDate::from_ymd_opt(anchor.year(), 12, 31)?,
        )),
        Period::All => None,
    }
}

/// Moves `anchor` by `steps` whole periods (negative goes back in time).
pub fn shift_anchor(period: Period, anchor: NaiveDate, steps: i32) -> NaiveDate {
    let months = |n: i32| -> NaiveDate {
        let m = Months::new(n.unsigned_abs());
        let shifted = if n >= 0 {
            anchor.checked_add_months(m)
        } else {
            anchor.checked_sub_months(m)
        };
        shifted.unwrap_or(anchor)
    };
    match period {
        Period::Week => anchor
            .checked_add_signed(Duration::weeks(steps as i64))
            .unwrap_or(anchor),
        Period::Month => months(steps),
        Period::Year => months(steps.saturating_mul(12)),
        Period::All => anchor,
    }
}

/// Short Spanish month name, `month` in 1..=12.
pub fn month_label(month: u32) -> &'static str {
    MONTHS_SHORT[(month.clamp(1, 12) - 1) as usize]
}

pub fn month_year_label(year: i32, month: u32) -> String {
    format!("{} {}", MONTHS_LONG[(month.clamp(1, 12) - 1) as usize], year)
}

/// Weekday plus day of month, e.g. `lun 4`.
pub fn day_label(date: NaiveDate) -> String {
    let wd = WEEKDAYS_SHORT[date.weekday().num_days_from_monday() as usize];
    format!("{} {}", wd, date.day())
}

/// `4 mar 2024`.
pub fn date_label(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_label(date.month()), date.year())
}
