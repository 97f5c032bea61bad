// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use fundledger::accrual::{accrue, nth_occurrence, occurrence_count};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn clamp_does_not_shift_anchor() {
    // Jan 31, Feb 29 (leap), Mar 31, Apr 30
    assert_eq!(
        accrue(Decimal::new(100, 0), d(2024, 1, 31), d(2024, 4, 30)),
        Decimal::new(400, 0)
    );
    assert_eq!(nth_occurrence(d(2024, 1, 31), 2), Some(d(2024, 3, 31)));
}

#[test]
fn accrual_across_a_clamp() {
    // Jan 31 and Feb 28; Mar 31 not reached by Mar 1
    assert_eq!(
        accrue(Decimal::new(1000, 0), d(2023, 1, 31), d(2023, 3, 1)),
        Decimal::new(2000, 0)
    );
}

#[test]
fn same_day_is_one_occurrence() {
    let amount = Decimal::from_str_exact("812.40").unwrap();
    assert_eq!(accrue(amount, d(2024, 7, 9), d(2024, 7, 9)), amount);
}

#[test]
fn nothing_accrues_for_zero_amount_or_future_start() {
    assert!(accrue(Decimal::ZERO, d(2024, 1, 1), d(2024, 12, 31)).is_zero());
    assert!(accrue(Decimal::new(-5, 0), d(2024, 1, 1), d(2024, 12, 31)).is_zero());
    assert!(accrue(Decimal::new(100, 0), d(2024, 2, 1), d(2024, 1, 31)).is_zero());
}

#[test]
fn accrual_is_monotonic_in_as_of() {
    let start = d(2023, 1, 31);
    let amount = Decimal::new(250, 0);
    let mut prev = Decimal::ZERO;
    let mut as_of = start - Duration::days(3);
    while as_of <= d(2025, 3, 31) {
        let v = accrue(amount, start, as_of);
        assert!(v >= prev, "accrual dropped at {}", as_of);
        prev = v;
        as_of += Duration::days(1);
    }
    // 27 monthly occurrences from Jan 2023 through Mar 2025
    assert_eq!(prev, amount * Decimal::from(27));
}

#[test]
fn leap_day_anchor_clamps_in_common_years() {
    let start = d(2024, 2, 29);
    assert_eq!(nth_occurrence(start, 12), Some(d(2025, 2, 28)));
    assert_eq!(occurrence_count(start, d(2025, 2, 27)), 12);
    assert_eq!(occurrence_count(start, d(2025, 2, 28)), 13);
    assert_eq!(
        accrue(Decimal::new(10, 0), start, d(2025, 2, 28)),
        Decimal::new(130, 0)
    );
}

#[test]
fn decimal_amounts_do_not_drift() {
    let amount = Decimal::from_str_exact("0.10").unwrap();
    let v = accrue(amount, d(2020, 1, 1), d(2024, 12, 1));
    assert_eq!(v, Decimal::from_str_exact("6.00").unwrap());
}
