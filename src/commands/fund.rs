// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::today_from;
use crate::config::Settings;
use crate::fund::{
    CreationPolicy, PreviousPeriodScope, UpdateScope, apply_due_additions, apply_update,
    create_fund,
};
use crate::models::FundState;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_optional_date, pretty_table,
};
use anyhow::{Result, bail};

pub fn handle(m: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let (state, sub) = match m.subcommand() {
        Some(("create", sub)) => (create(sub)?, sub),
        Some(("update", sub)) => (update(sub)?, sub),
        Some(("catch-up", sub)) => (catch_up(sub)?, sub),
        _ => return Ok(()),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &state)? {
        print_state(&state, &settings.currency);
    }
    Ok(())
}

pub fn create(sub: &clap::ArgMatches) -> Result<FundState> {
    let monthly = parse_decimal(sub.get_one::<String>("monthly").unwrap())?;
    let initial = parse_decimal(sub.get_one::<String>("initial").unwrap())?;
    let contract_start = parse_date(sub.get_one::<String>("contract-start").unwrap())?;
    let today = today_from(sub)?;
    let period_end = parse_optional_date(sub.get_one::<String>("period-end"))?;

    let policy = match (period_end, sub.get_one::<String>("scope")) {
        (None, _) => CreationPolicy::Current,
        (Some(end), _) if end >= today => CreationPolicy::Current,
        (Some(period_end), Some(scope)) => CreationPolicy::PreviousPeriod {
            period_end,
            scope: scope.parse::<PreviousPeriodScope>()?,
        },
        (Some(_), None) => {
            bail!("--period-end is in the past: choose --scope through-period-end or through-today")
        }
    };
    Ok(create_fund(monthly, initial, contract_start, today, policy))
}

fn current_state(sub: &clap::ArgMatches) -> Result<FundState> {
    Ok(FundState {
        current_balance: parse_decimal(sub.get_one::<String>("balance").unwrap())?,
        monthly_amount: parse_decimal(sub.get_one::<String>("monthly").unwrap())?,
        initial_balance: parse_decimal(sub.get_one::<String>("initial").unwrap())?,
        last_monthly_addition: parse_optional_date(sub.get_one::<String>("last"))?,
    })
}

pub fn update(sub: &clap::ArgMatches) -> Result<FundState> {
    // Unknown scopes fail here, before anything is computed
    let scope: UpdateScope = sub.get_one::<String>("scope").unwrap().parse()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let state = current_state(sub)?;
    let contract_start = parse_date(sub.get_one::<String>("contract-start").unwrap())?;
    Ok(apply_update(
        &state,
        scope,
        amount,
        contract_start,
        today_from(sub)?,
    ))
}

pub fn catch_up(sub: &clap::ArgMatches) -> Result<FundState> {
    let state = current_state(sub)?;
    let contract_start = parse_date(sub.get_one::<String>("contract-start").unwrap())?;
    Ok(apply_due_additions(&state, contract_start, today_from(sub)?))
}

fn print_state(state: &FundState, ccy: &str) {
    let rows = vec![
        vec!["Current balance".into(), fmt_money(&state.current_balance, ccy)],
        vec!["Monthly amount".into(), fmt_money(&state.monthly_amount, ccy)],
        vec!["Initial balance".into(), fmt_money(&state.initial_balance, ccy)],
        vec![
            "Last monthly addition".into(),
            state
                .last_monthly_addition
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ],
    ];
    println!("{}", pretty_table(&["Fund", "Value"], rows));
}
