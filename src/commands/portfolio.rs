// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{date_or, opt_str, required, today};
use crate::api::{AssetAction, AssetActionRequest, Endpoints, FinanceApi};
use crate::chart::Canvas;
use crate::chart::svg::{PALETTE, render_line_chart};
use crate::dates::date_label;
use crate::models::{Operation, TimelinePoint};
use crate::utils::{decimal_to_f64, maybe_print_json, parse_decimal, pretty_table, write_output};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub fn handle(api: &dyn FinanceApi, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(api, sub)?,
        Some(("assets", sub)) => assets(api, sub)?,
        Some(("asset", sub)) => asset(api, sub)?,
        Some(("timeline", sub)) => timeline(api, sub)?,
        Some(("operations", sub)) => operations(api, sub)?,
        Some(("chart", sub)) => {
            let out = required(sub, "out")?;
            let svg = timeline_svg(api, opt_str(sub, "asset").map(String::as_str), &Canvas::default())?;
            write_output(out, &svg)?;
            println!("Wrote {}", out);
        }
        Some(("buy", sub)) => action(api, sub, AssetAction::Buy)?,
        Some(("sell", sub)) => action(api, sub, AssetAction::Sell)?,
        Some(("deposit", sub)) => action(api, sub, AssetAction::Deposit)?,
        Some(("withdraw", sub)) => action(api, sub, AssetAction::Withdraw)?,
        Some(("swap", sub)) => swap(api, sub)?,
        _ => {}
    }
    Ok(())
}

fn fmt_opt(d: Option<Decimal>) -> String {
    d.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

fn summary(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let s = api
        .investment_summary()
        .context("Failed to fetch investment summary")?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let rows = vec![vec![
        s.currency.clone().unwrap_or_default(),
        format!("{:.2}", s.total_invested),
        format!("{:.2}", s.current_value),
        format!("{:.2}", s.profit),
        s.profit_pct.map(|p| format!("{:.2}%", p)).unwrap_or_default(),
    ]];
    println!(
        "{}",
        pretty_table(&["CCY", "Invested", "Value", "Profit", "Return"], rows)
    );
    Ok(())
}

fn assets(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let list = api.investment_assets().context("Failed to fetch assets")?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
        return Ok(());
    }
    let rows = list
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.symbol.clone().unwrap_or_default(),
                a.name.clone(),
                a.kind.clone().unwrap_or_default(),
                fmt_opt(a.quantity),
                fmt_opt(a.invested),
                fmt_opt(a.current_value),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Symbol", "Name", "Type", "Qty", "Invested", "Value"],
            rows
        )
    );
    Ok(())
}

fn asset(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let a = api
        .investment_asset(id)
        .with_context(|| format!("Asset '{}' not found", id))?;
    println!(
        "{} ({}) value {} invested {}",
        a.name,
        a.symbol.as_deref().unwrap_or("-"),
        fmt_opt(a.current_value),
        fmt_opt(a.invested)
    );
    let ops = api.investment_operations(Some(id))?;
    print_operations(&ops);
    if let Some(path) = opt_str(sub, "sparkline") {
        let svg = timeline_svg(api, Some(id), &Canvas::sparkline())?;
        write_output(path, &svg)?;
        println!("Wrote {}", path);
    }
    Ok(())
}

fn timeline(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let points = api.investment_timeline(opt_str(sub, "asset").map(String::as_str))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        return Ok(());
    }
    let rows = points
        .iter()
        .map(|p| {
            vec![
                p.date.to_string(),
                format!("{:.2}", p.value),
                fmt_opt(p.invested),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Value", "Invested"], rows));
    Ok(())
}

fn print_operations(ops: &[Operation]) {
    let rows = ops
        .iter()
        .map(|o| {
            vec![
                o.date.to_string(),
                o.kind.clone(),
                format!("{:.2}", o.amount),
                fmt_opt(o.quantity),
                fmt_opt(o.price),
                o.asset_id.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Type", "Amount", "Qty", "Price", "Asset"], rows)
    );
}

fn operations(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let ops = api.investment_operations(opt_str(sub, "asset").map(String::as_str))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ops)? {
        return Ok(());
    }
    print_operations(&ops);
    Ok(())
}

/// Oldest-first valuation points; the server does not promise an order.
fn sorted_points(mut points: Vec<TimelinePoint>) -> Vec<TimelinePoint> {
    points.sort_by_key(|p| p.date);
    points
}

/// Line chart of the portfolio (or one asset's) value over time.
pub fn timeline_svg(api: &dyn FinanceApi, asset_id: Option<&str>, canvas: &Canvas) -> Result<String> {
    let points = match asset_id {
        Some(id) => api.investment_valuations(Some(id))?,
        None => api.investment_timeline(None)?,
    };
    let points = sorted_points(points);
    let labels: Vec<String> = points.iter().map(|p| date_label(p.date)).collect();
    let values: Vec<f64> = points.iter().map(|p| decimal_to_f64(p.value)).collect();
    Ok(render_line_chart(&labels, &values, canvas, PALETTE[0])?)
}

/// Request body for a buy/sell/deposit/withdraw on one asset.
pub fn action_request(sub: &clap::ArgMatches, today: NaiveDate) -> Result<AssetActionRequest> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    if amount <= Decimal::ZERO {
        return Err(anyhow!("Amount must be greater than zero"));
    }
    let quantity = opt_str(sub, "quantity").map(|q| parse_decimal(q)).transpose()?;
    let price = opt_str(sub, "price").map(|p| parse_decimal(p)).transpose()?;
    Ok(AssetActionRequest {
        amount,
        quantity,
        price,
        date: date_or(sub, "date", today)?,
    })
}

fn action(api: &dyn FinanceApi, sub: &clap::ArgMatches, kind: AssetAction) -> Result<()> {
    let asset = required(sub, "asset")?;
    let req = action_request(sub, today())?;
    api.asset_action(asset, kind, &req)
        .with_context(|| format!("Could not {} on asset '{}'", kind.as_str(), asset))?;
    println!(
        "Recorded {} of {:.2} on asset {} ({})",
        kind.as_str(),
        req.amount,
        asset,
        req.date
    );
    Ok(())
}

fn swap(api: &dyn FinanceApi, sub: &clap::ArgMatches) -> Result<()> {
    let from = required(sub, "from")?;
    let to = required(sub, "to")?;
    if from == to {
        return Err(anyhow!("Swap needs two different assets"));
    }
    let amount = parse_decimal(required(sub, "amount")?)?;
    if amount <= Decimal::ZERO {
        return Err(anyhow!("Amount must be greater than zero"));
    }
    let date = date_or(sub, "date", today())?;
    api.swap(from, to, amount, date)
        .with_context(|| format!("Could not swap {} to {}", from, to))?;
    println!("Swapped {:.2} from {} to {}", amount, from, to);
    Ok(())
}
