// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::EditScope;
use crate::config::KEYS;
use crate::dates::Period;
use clap::{Arg, ArgAction, Command, value_parser};

const KINDS: [&str; 3] = ["income", "expense", "transfer"];
const FLOW_KINDS: [&str; 2] = ["income", "expense"];
const FORMATS: [&str; 2] = ["csv", "json"];

fn json_flags() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

/// `--from/--to` or `--period` (+ optional `--anchor`).
fn range_args() -> [Arg; 5] {
    [
        Arg::new("from").long("from").help("Start date YYYY-MM-DD"),
        Arg::new("to").long("to").help("End date YYYY-MM-DD (inclusive)"),
        Arg::new("period")
            .long("period")
            .value_parser(Period::NAMES)
            .conflicts_with_all(["from", "to"])
            .help("Calendar period containing --anchor"),
        Arg::new("anchor")
            .long("anchor")
            .requires("period")
            .help("Any date inside the period (default today)"),
        shift_arg().requires("period"),
    ]
}

fn shift_arg() -> Arg {
    Arg::new("shift")
        .long("shift")
        .value_parser(value_parser!(i32))
        .allow_negative_numbers(true)
        .help("Whole periods to move from --anchor (-1 is the previous one)")
}

fn out_arg() -> Arg {
    Arg::new("out")
        .long("out")
        .short('o')
        .required(true)
        .help("Output file")
}

fn scope_arg() -> Arg {
    Arg::new("scope")
        .long("scope")
        .value_parser(EditScope::NAMES)
        .default_value("single")
        .help("Occurrences affected for recurring transactions")
}

fn id_arg() -> Arg {
    Arg::new("id").required(true)
}

fn asset_action(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(Arg::new("asset").required(true).help("Asset id"))
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(Arg::new("quantity").long("quantity"))
        .arg(Arg::new("price").long("price"))
        .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default today)"))
}

pub fn build_cli() -> Command {
    Command::new("pocketlens")
        .about("Personal-finance API client: register, reports and SVG charts")
        .version(clap::crate_version!())
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Override the configured API base URL"),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change client settings")
                .subcommand(Command::new("show").about("Print the effective settings"))
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(
                    Command::new("set")
                        .about("Set one setting")
                        .arg(Arg::new("key").required(true).value_parser(KEYS))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("list")
                        .about("List transactions")
                        .args(range_args())
                        .arg(Arg::new("wallet").long("wallet").help("Wallet id"))
                        .arg(Arg::new("type").long("type").value_parser(KINDS))
                        .arg(Arg::new("category").long("category").help("Category name"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("add")
                        .about("Create a transaction")
                        .arg(Arg::new("type").long("type").required(true).value_parser(KINDS))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default today)"))
                        .arg(Arg::new("wallet").long("wallet").required(true))
                        .arg(Arg::new("to-wallet").long("to-wallet").help("Destination for transfers"))
                        .arg(Arg::new("category").long("category").help("Category id"))
                        .arg(Arg::new("subcategory").long("subcategory").help("Subcategory id"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(
                            Arg::new("exclude-from-stats")
                                .long("exclude-from-stats")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("wallet").long("wallet"))
                        .arg(Arg::new("to-wallet").long("to-wallet").help("Destination for transfers"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(scope_arg()),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a transaction")
                        .arg(id_arg())
                        .arg(scope_arg()),
                ),
        )
        .subcommand(
            Command::new("wallets")
                .about("List wallets")
                .args(json_flags()),
        )
        .subcommand(
            Command::new("categories")
                .about("Categories and subcategories")
                .subcommand(Command::new("list").args(json_flags()))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(FLOW_KINDS),
                        )
                        .arg(Arg::new("emoji").long("emoji"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(
                    Command::new("rename")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("delete").arg(id_arg()))
                .subcommand(
                    Command::new("add-sub")
                        .about("Add a subcategory")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Client-side aggregates")
                .subcommand(
                    Command::new("categories")
                        .about("Income and expense by category")
                        .args(range_args())
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("bars")
                        .about("Period buckets (week/month/year/all)")
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .value_parser(Period::NAMES)
                                .default_value("month"),
                        )
                        .arg(Arg::new("anchor").long("anchor"))
                        .arg(shift_arg())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(FLOW_KINDS)
                                .default_value("expense"),
                        )
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("daily")
                        .about("Signed totals per day")
                        .args(range_args())
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("monthly")
                        .about("Signed totals per month")
                        .args(range_args())
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("totals")
                        .about("Income, expense and net")
                        .args(range_args())
                        .args(json_flags()),
                ),
        )
        .subcommand(
            Command::new("register")
                .about("Monthly running balance with manual overrides")
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32))
                        .help("Only months of this year"),
                )
                .arg(
                    Arg::new("years")
                        .long("years")
                        .action(ArgAction::SetTrue)
                        .help("Show year rows instead of months"),
                )
                .args(json_flags()),
        )
        .subcommand(
            Command::new("chart")
                .about("Render SVG charts")
                .subcommand(
                    Command::new("bars")
                        .about("Period bar chart")
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .value_parser(Period::NAMES)
                                .default_value("month"),
                        )
                        .arg(Arg::new("anchor").long("anchor"))
                        .arg(shift_arg())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(FLOW_KINDS)
                                .default_value("expense"),
                        )
                        .arg(out_arg()),
                )
                .subcommand(
                    Command::new("wealth")
                        .about("Running balance line chart")
                        .arg(out_arg()),
                )
                .subcommand(
                    Command::new("donut")
                        .about("Category donut")
                        .args(range_args())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(FLOW_KINDS)
                                .default_value("expense"),
                        )
                        .arg(out_arg()),
                )
                .subcommand(
                    Command::new("savings")
                        .about("Income versus expense ring")
                        .args(range_args())
                        .arg(out_arg()),
                ),
        )
        .subcommand(
            Command::new("portfolio")
                .about("Investments (valued server-side)")
                .subcommand(Command::new("summary").args(json_flags()))
                .subcommand(Command::new("assets").args(json_flags()))
                .subcommand(
                    Command::new("asset")
                        .about("One asset with its operations")
                        .arg(id_arg())
                        .arg(
                            Arg::new("sparkline")
                                .long("sparkline")
                                .help("Write the asset's valuation sparkline SVG here"),
                        ),
                )
                .subcommand(
                    Command::new("timeline")
                        .arg(Arg::new("asset").long("asset"))
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("operations")
                        .arg(Arg::new("asset").long("asset"))
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("chart")
                        .about("Portfolio value line chart")
                        .arg(Arg::new("asset").long("asset"))
                        .arg(out_arg()),
                )
                .subcommand(asset_action("buy", "Buy units of an asset"))
                .subcommand(asset_action("sell", "Sell units of an asset"))
                .subcommand(asset_action("deposit", "Add cash to an asset"))
                .subcommand(asset_action("withdraw", "Take cash out of an asset"))
                .subcommand(
                    Command::new("swap")
                        .about("Move value from one asset to another")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date")),
                ),
        )
        .subcommand(
            Command::new("trips")
                .about("Trip budgets")
                .subcommand(Command::new("list").args(json_flags()))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("start").long("start"))
                        .arg(Arg::new("end").long("end"))
                        .arg(Arg::new("budget").long("budget")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("start").long("start"))
                        .arg(Arg::new("end").long("end"))
                        .arg(Arg::new("budget").long("budget")),
                )
                .subcommand(Command::new("delete").arg(id_arg())),
        )
        .subcommand(
            Command::new("export")
                .about("Write register or transactions to a file")
                .subcommand(
                    Command::new("register")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(FORMATS)
                                .default_value("csv"),
                        )
                        .arg(out_arg()),
                )
                .subcommand(
                    Command::new("transactions")
                        .args(range_args())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(FORMATS)
                                .default_value("csv"),
                        )
                        .arg(out_arg()),
                ),
        )
}
