// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fundledger::{cli, commands, config};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fundledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = cli::build_cli().get_matches();
    let settings = config::load_settings(matches.get_one::<String>("config").map(String::as_str))?;

    match matches.subcommand() {
        Some(("split", sub)) => commands::split::handle(sub, &settings)?,
        Some(("accrue", sub)) => commands::accrue::handle(sub, &settings)?,
        Some(("ledger", sub)) => commands::ledger::handle(sub, &settings)?,
        Some(("fund", sub)) => commands::fund::handle(sub, &settings)?,
        Some(("validate", sub)) => commands::validate::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
