// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurring monthly accruals anchored on a start date.
//!
//! Occurrence `k` falls `k` months after the start on the start's
//! day-of-month, clamped to the length of that month. The anchor day is
//! always taken from the start date, so a clamp in February does not pull
//! March's occurrence back to the 28th.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::utils::clamped_date;
use crate::window::YearMonth;

/// Total accrued by `monthly_amount` from `start` through `as_of`, both inclusive.
pub fn accrue(monthly_amount: Decimal, start: NaiveDate, as_of: NaiveDate) -> Decimal {
    if monthly_amount <= Decimal::ZERO || start > as_of {
        return Decimal::ZERO;
    }
    monthly_amount * Decimal::from(occurrence_count(start, as_of))
}

pub fn nth_occurrence(start: NaiveDate, k: u32) -> Option<NaiveDate> {
    let ym = YearMonth::from_date(start).add_months(i32::try_from(k).ok()?);
    clamped_date(ym.year, ym.month, start.day())
}

/// Number of occurrences on or before `as_of`.
pub fn occurrence_count(start: NaiveDate, as_of: NaiveDate) -> u32 {
    if start > as_of {
        return 0;
    }
    let months = YearMonth::from_date(start).months_until(&YearMonth::from_date(as_of));
    let Ok(months) = u32::try_from(months) else {
        return 0;
    };
    match nth_occurrence(start, months) {
        Some(d) if d <= as_of => months + 1,
        _ => months,
    }
}

pub fn last_occurrence_on_or_before(start: NaiveDate, date: NaiveDate) -> Option<NaiveDate> {
    match occurrence_count(start, date) {
        0 => None,
        n => nth_occurrence(start, n - 1),
    }
}

/// Iterator over occurrence dates, starting with `start` itself.
#[derive(Debug, Clone)]
pub struct Occurrences {
    start: NaiveDate,
    next: u32,
}

impl Occurrences {
    pub fn new(start: NaiveDate) -> Self {
        Self { start, next: 0 }
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let d = nth_occurrence(self.start, self.next)?;
        self.next += 1;
        Some(d)
    }
}
