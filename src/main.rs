// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketlens::api::ApiClient;
use pocketlens::{cli, commands, config, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init_tracing(matches.get_flag("verbose"));

    let api_url = matches.get_one::<String>("api-url").map(String::as_str);
    if let Some(("config", sub)) = matches.subcommand() {
        return commands::settings::handle(sub, api_url);
    }

    let cfg = config::load()?.with_api_url(api_url)?;
    let api = ApiClient::from_config(&cfg)?;
    tracing::debug!(base_url = api.base_url(), "api client ready");

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&api, sub)?,
        Some(("wallets", sub)) => commands::wallets::handle(&api, sub)?,
        Some(("categories", sub)) => commands::categories::handle(&api, sub)?,
        Some(("report", sub)) => commands::reports::handle(&api, sub)?,
        Some(("register", sub)) => commands::register::handle(&api, sub)?,
        Some(("chart", sub)) => commands::charts::handle(&api, sub)?,
        Some(("portfolio", sub)) => commands::portfolio::handle(&api, sub)?,
        Some(("trips", sub)) => commands::trips::handle(&api, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&api, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
