// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::models::{MonthSplit, Transaction, TransactionKind};
use crate::proration;
use crate::utils::{maybe_print_json, parse_decimal, parse_optional_date, pretty_table};
use anyhow::{Result, bail};

pub fn handle(sub: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let splits = compute(sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &splits)? {
        let rows = splits
            .iter()
            .map(|s| {
                vec![
                    s.month_key(),
                    format!("{}/{}", s.days_in_month, s.total_days_in_period),
                    format!("{:.2}", s.proportional_amount.round_dp(2)),
                    format!("{:.2}", s.full_amount.round_dp(2)),
                ]
            })
            .collect();
        let hdr = format!("Amount ({})", settings.currency);
        println!(
            "{}",
            pretty_table(&["Month", "Days", &hdr, "Of total"], rows)
        );
    }
    Ok(())
}

pub fn compute(sub: &clap::ArgMatches) -> Result<Vec<MonthSplit>> {
    let id = *sub.get_one::<i64>("id").unwrap_or(&1);
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?.abs();
    let date = parse_optional_date(sub.get_one::<String>("date"))?;
    let period_start = parse_optional_date(sub.get_one::<String>("period-start"))?;
    let period_end = parse_optional_date(sub.get_one::<String>("period-end"))?;
    if date.is_none() && (period_start.is_none() || period_end.is_none()) {
        bail!("Either --date or both --period-start and --period-end are required");
    }
    let tx = Transaction {
        id,
        transaction_date: date.or(period_start),
        kind: TransactionKind::Expense,
        amount,
        category: None,
        supplier_id: None,
        period_start,
        period_end,
        from_fund: false,
    };
    tx.validate()?;
    let ws = parse_optional_date(sub.get_one::<String>("window-start"))?;
    let we = parse_optional_date(sub.get_one::<String>("window-end"))?;
    Ok(proration::split(&tx, ws, we))
}
