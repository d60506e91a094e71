// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{Endpoints, FinanceApi};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(api: &dyn FinanceApi, m: &clap::ArgMatches) -> Result<()> {
    let mut wallets = api.wallets().context("Failed to fetch wallets")?;
    wallets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &wallets)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = wallets
        .iter()
        .map(|w| {
            vec![
                w.id.clone(),
                w.name.clone(),
                w.balance
                    .map(|b| fmt_money(&b, w.currency.as_deref().unwrap_or("")))
                    .unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Id", "Name", "Balance"], rows));
    Ok(())
}
