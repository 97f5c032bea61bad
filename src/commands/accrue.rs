// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::accrual::{accrue, occurrence_count};
use crate::config::Settings;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AccrualReport {
    pub monthly_amount: Decimal,
    pub start: chrono::NaiveDate,
    pub as_of: chrono::NaiveDate,
    pub occurrences: u32,
    pub total: Decimal,
}

pub fn handle(sub: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let report = compute(sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        println!(
            "{} occurrence(s) from {} through {}: {}",
            report.occurrences,
            report.start,
            report.as_of,
            fmt_money(&report.total, &settings.currency)
        );
    }
    Ok(())
}

pub fn compute(sub: &clap::ArgMatches) -> Result<AccrualReport> {
    let monthly_amount = parse_decimal(sub.get_one::<String>("monthly").unwrap())?;
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let as_of = parse_date(sub.get_one::<String>("as-of").unwrap())?;
    let total = accrue(monthly_amount, start, as_of);
    let occurrences = if total.is_zero() {
        0
    } else {
        occurrence_count(start, as_of)
    };
    Ok(AccrualReport {
        monthly_amount,
        start,
        as_of,
        occurrences,
        total,
    })
}
