// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketlens::dates::{
    Period, date_label, day_label, end_of_day, month_end, month_label, month_year_label,
    parse_date, parse_month, period_range, shift_anchor, to_iso_week_value, week_start,
    week_start_from_iso_week,
};
use pocketlens::errors::DateError;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn first_monday_of_2024_is_week_one() {
    assert_eq!(to_iso_week_value(d(2024, 1, 1)), "2024-W01");
}

#[test]
fn iso_week_year_differs_around_new_year() {
    assert_eq!(to_iso_week_value(d(2021, 1, 1)), "2020-W53");
    assert_eq!(to_iso_week_value(d(2024, 12, 30)), "2025-W01");
}

#[test]
fn iso_week_round_trip_lands_on_monday() {
    let mut day = d(2023, 12, 20);
    while day < d(2025, 1, 15) {
        let key = to_iso_week_value(day);
        let start = week_start_from_iso_week(&key).unwrap();
        assert_eq!(start, week_start(day), "week of {}", day);
        assert_eq!(to_iso_week_value(start), key);
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn malformed_iso_weeks_are_rejected() {
    for bad in ["2024-W1", "2024W01", "2021-W53", "2024-W00", "nope"] {
        assert_eq!(
            week_start_from_iso_week(bad),
            Err(DateError::IsoWeek(bad.to_string())),
            "{}",
            bad
        );
    }
    assert_eq!(week_start_from_iso_week("2020-W53").unwrap(), d(2020, 12, 28));
}

#[test]
fn end_of_day_is_last_millisecond() {
    let end = end_of_day(d(2024, 2, 29));
    assert_eq!(end.to_string(), "2024-02-29 23:59:59.999");
}

#[test]
fn parses_dates_and_months() {
    assert_eq!(parse_date(" 2024-03-05 ").unwrap(), d(2024, 3, 5));
    assert!(matches!(parse_date("05/03/2024"), Err(DateError::Date(_))));
    assert_eq!(parse_month("2024-11").unwrap(), (2024, 11));
    assert!(matches!(parse_month("2024-13"), Err(DateError::Month(_))));
    assert_eq!(month_end(2023, 2), Some(d(2023, 2, 28)));
    assert_eq!(month_end(2024, 12), Some(d(2024, 12, 31)));
}

#[test]
fn period_ranges_are_inclusive_calendar_spans() {
    let anchor = d(2024, 2, 14);
    assert_eq!(
        period_range(Period::Week, anchor),
        Some((d(2024, 2, 12), d(2024, 2, 18)))
    );
    assert_eq!(
        period_range(Period::Month, anchor),
        Some((d(2024, 2, 1), d(2024, 2, 29)))
    );
    assert_eq!(
        period_range(Period::Year, anchor),
        Some((d(2024, 1, 1), d(2024, 12, 31)))
    );
    assert_eq!(period_range(Period::All, anchor), None);
}

#[test]
fn shifting_anchor_clamps_month_ends() {
    assert_eq!(shift_anchor(Period::Month, d(2024, 1, 31), 1), d(2024, 2, 29));
    assert_eq!(shift_anchor(Period::Week, d(2024, 1, 3), -1), d(2023, 12, 27));
    assert_eq!(shift_anchor(Period::Year, d(2024, 2, 29), 1), d(2025, 2, 28));
    assert_eq!(shift_anchor(Period::All, d(2024, 2, 29), 5), d(2024, 2, 29));
}

#[test]
fn shifting_past_the_calendar_edge_keeps_the_anchor() {
    assert_eq!(shift_anchor(Period::Week, NaiveDate::MAX, 1), NaiveDate::MAX);
    assert_eq!(shift_anchor(Period::Week, NaiveDate::MIN, -1), NaiveDate::MIN);
    assert_eq!(shift_anchor(Period::Month, NaiveDate::MAX, 1), NaiveDate::MAX);
    assert_eq!(shift_anchor(Period::Year, NaiveDate::MIN, -1), NaiveDate::MIN);
}

#[test]
fn period_names_parse() {
    assert_eq!("Month".parse::<Period>().unwrap(), Period::Month);
    assert!("decade".parse::<Period>().is_err());
    for name in Period::NAMES {
        assert_eq!(name.parse::<Period>().unwrap().as_str(), name);
    }
}

#[test]
fn spanish_labels() {
    assert_eq!(month_label(1), "ene");
    assert_eq!(month_label(9), "sept");
    assert_eq!(month_year_label(2024, 3), "marzo 2024");
    assert_eq!(day_label(d(2024, 3, 4)), "lun 4");
    assert_eq!(date_label(d(2024, 3, 4)), "4 mar 2024");
}
