// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spreads a transaction's amount over the calendar months its period covers,
//! proportionally to days.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{MonthSplit, Transaction};
use crate::utils::inclusive_days;
use crate::window::YearMonth;

/// Split `tx` into per-month shares, optionally restricted to
/// `[window_start, window_end]`.
///
/// Amounts for a given month are the same with or without a window; the
/// window only removes months (or parts of months) outside it.
pub fn split(
    tx: &Transaction,
    window_start: Option<NaiveDate>,
    window_end: Option<NaiveDate>,
) -> Vec<MonthSplit> {
    let Some((start, end)) = tx.period() else {
        if tx.period_start.is_some() || tx.period_end.is_some() {
            debug!(id = tx.id, "malformed period, using transaction date");
        }
        return point_split(tx, window_start, window_end);
    };

    let total_days = inclusive_days(start, end);
    if total_days <= 0 {
        return point_split(tx, window_start, window_end);
    }

    let lo = window_start.map_or(start, |w| w.max(start));
    let hi = window_end.map_or(end, |w| w.min(end));
    if lo > hi {
        return Vec::new();
    }

    let total = Decimal::from(total_days);
    let mut out = Vec::new();
    let mut month = YearMonth::from_date(lo);
    let last = YearMonth::from_date(hi);
    while month <= last {
        let (Some(first_day), Some(last_day)) = (month.first_day(), month.last_day()) else {
            break;
        };
        let overlap_start = lo.max(first_day);
        let overlap_end = hi.min(last_day);
        if overlap_start <= overlap_end {
            let days = inclusive_days(overlap_start, overlap_end);
            out.push(MonthSplit {
                source_transaction_id: tx.id,
                month,
                proportional_amount: tx.amount * Decimal::from(days) / total,
                full_amount: tx.amount,
                days_in_month: days,
                total_days_in_period: total_days,
            });
        }
        month = month.succ();
    }
    out
}

fn point_split(
    tx: &Transaction,
    window_start: Option<NaiveDate>,
    window_end: Option<NaiveDate>,
) -> Vec<MonthSplit> {
    let Some(date) = tx.transaction_date else {
        debug!(id = tx.id, "no usable date, transaction contributes nothing");
        return Vec::new();
    };
    if window_start.is_some_and(|w| date < w) || window_end.is_some_and(|w| date > w) {
        return Vec::new();
    }
    vec![MonthSplit {
        source_transaction_id: tx.id,
        month: YearMonth::from_date(date),
        proportional_amount: tx.amount,
        full_amount: tx.amount,
        days_in_month: 1,
        total_days_in_period: 1,
    }]
}

pub fn split_all(
    transactions: &[Transaction],
    window_start: Option<NaiveDate>,
    window_end: Option<NaiveDate>,
) -> Vec<MonthSplit> {
    transactions
        .iter()
        .flat_map(|tx| split(tx, window_start, window_end))
        .collect()
}

/// The share of `tx` falling into `month`, if any.
pub fn split_for_month(tx: &Transaction, month: YearMonth) -> Option<MonthSplit> {
    split(tx, month.first_day(), month.last_day()).into_iter().next()
}
