// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{kind_arg, opt_str, required};
use crate::api::{Endpoints, FinanceApi};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result, anyhow};

pub fn handle(api: &dyn FinanceApi, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let mut cats = api.categories().context("Failed to fetch categories")?;
            cats.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                return Ok(());
            }
            let rows: Vec<Vec<String>> = cats
                .iter()
                .map(|c| {
                    let subs: Vec<&str> = c.subcategories.iter().map(|s| s.name.as_str()).collect();
                    vec![
                        c.id.clone(),
                        match &c.emoji {
                            Some(e) => format!("{} {}", e, c.name),
                            None => c.name.clone(),
                        },
                        c.kind.map(|k| k.as_str().to_string()).unwrap_or_default(),
                        subs.join(", "),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Id", "Category", "Type", "Subcategories"], rows)
            );
        }
        Some(("add", sub)) => {
            let name = required(sub, "name")?.trim();
            if name.is_empty() {
                return Err(anyhow!("Category name must not be empty"));
            }
            let kind = kind_arg(sub, "type").ok_or_else(|| anyhow!("Missing --type"))?;
            api.create_category(
                name,
                kind,
                opt_str(sub, "emoji").map(String::as_str),
                opt_str(sub, "color").map(String::as_str),
            )?;
            println!("Added category '{}'", name);
        }
        Some(("rename", sub)) => {
            let id = required(sub, "id")?;
            let name = required(sub, "name")?.trim();
            api.rename_category(id, name)?;
            println!("Renamed category {} to '{}'", id, name);
        }
        Some(("delete", sub)) => {
            let id = required(sub, "id")?;
            api.delete_category(id)?;
            println!("Removed category {}", id);
        }
        Some(("add-sub", sub)) => {
            let id = required(sub, "id")?;
            let name = required(sub, "name")?.trim();
            api.create_subcategory(id, name)?;
            println!("Added subcategory '{}' to {}", name, id);
        }
        _ => {}
    }
    Ok(())
}
