// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{opt_str, required};
use crate::api::{Endpoints, FinanceApi, TripDraft};
use crate::models::Trip;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result, anyhow};

pub fn handle(api: &dyn FinanceApi, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let trips = api.trips().context("Failed to fetch trips")?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &trips)? {
                return Ok(());
            }
            let rows = trips
                .iter()
                .map(|t| {
                    let left = match (t.budget, t.spent) {
                        (Some(b), Some(s)) => format!("{:.2}", b - s),
                        _ => String::new(),
                    };
                    vec![
                        t.id.clone(),
                        t.name.clone(),
                        t.start_date.map(|d| d.to_string()).unwrap_or_default(),
                        t.end_date.map(|d| d.to_string()).unwrap_or_default(),
                        t.budget.map(|b| format!("{:.2}", b)).unwrap_or_default(),
                        t.spent.map(|s| format!("{:.2}", s)).unwrap_or_default(),
                        left,
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["Id", "Trip", "Start", "End", "Budget", "Spent", "Left"],
                    rows
                )
            );
        }
        Some(("add", sub)) => {
            let draft = trip_draft(sub)?;
            api.create_trip(&draft)?;
            println!("Added trip '{}'", draft.name);
        }
        Some(("edit", sub)) => {
            let id = required(sub, "id")?;
            let current = api
                .trips()?
                .into_iter()
                .find(|t| &t.id == id)
                .with_context(|| format!("Trip '{}' not found", id))?;
            let draft = merge_trip(&current, sub)?;
            api.update_trip(id, &draft)?;
            println!("Updated trip '{}'", draft.name);
        }
        Some(("delete", sub)) => {
            let id = required(sub, "id")?;
            api.delete_trip(id)?;
            println!("Removed trip {}", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn trip_draft(sub: &clap::ArgMatches) -> Result<TripDraft> {
    let draft = TripDraft {
        name: required(sub, "name")?.trim().to_string(),
        start_date: opt_str(sub, "start").map(|s| parse_date(s)).transpose()?,
        end_date: opt_str(sub, "end").map(|s| parse_date(s)).transpose()?,
        budget: opt_str(sub, "budget").map(|b| parse_decimal(b)).transpose()?,
    };
    check_trip(&draft)?;
    Ok(draft)
}

/// Stored trip with any given flags laid over it.
pub fn merge_trip(current: &Trip, sub: &clap::ArgMatches) -> Result<TripDraft> {
    let draft = TripDraft {
        name: opt_str(sub, "name")
            .map(|n| n.trim().to_string())
            .unwrap_or_else(|| current.name.clone()),
        start_date: match opt_str(sub, "start") {
            Some(s) => Some(parse_date(s)?),
            None => current.start_date,
        },
        end_date: match opt_str(sub, "end") {
            Some(s) => Some(parse_date(s)?),
            None => current.end_date,
        },
        budget: match opt_str(sub, "budget") {
            Some(b) => Some(parse_decimal(b)?),
            None => current.budget,
        },
    };
    check_trip(&draft)?;
    Ok(draft)
}

fn check_trip(draft: &TripDraft) -> Result<()> {
    if draft.name.is_empty() {
        return Err(anyhow!("Trip name must not be empty"));
    }
    if let (Some(s), Some(e)) = (draft.start_date, draft.end_date) {
        if e < s {
            return Err(anyhow!("Trip ends ({}) before it starts ({})", e, s));
        }
    }
    Ok(())
}
