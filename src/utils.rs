// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::window::YearMonth;

// Date part of a plain date or an ISO-8601 timestamp; any time or zone suffix is ignored.
static DATE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ].*)?$").expect("static date pattern")
});

/// The single date-normalization boundary.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff][Z|±HH:MM]` and
/// `YYYY-MM-DD HH:MM:SS`. The calendar date is taken as written: a zone
/// suffix never shifts the day. Returns `None` for anything else.
pub fn normalize_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let caps = DATE_PREFIX.captures(s)?;
    let y: i32 = caps.get(1)?.as_str().parse().ok()?;
    let m: u32 = caps.get(2)?.as_str().parse().ok()?;
    let d: u32 = caps.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    normalize_date(s).with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s.trim()))
}

pub fn parse_optional_date(s: Option<&String>) -> Result<Option<NaiveDate>> {
    s.map(|v| parse_date(v)).transpose()
}

pub fn parse_month(s: &str) -> Result<YearMonth> {
    s.trim()
        .parse::<YearMonth>()
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s.trim()))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s.trim()))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// `day` of the given month, clamped to the month's last day.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month);
    if last == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last))
}

pub fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    clamped_date(date.year(), date.month(), 31)
}

/// Inclusive day count of `[start, end]`; zero or negative for empty ranges.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn fmt_cell(d: Option<Decimal>) -> String {
    match d {
        Some(v) => format!("{:.2}", v.round_dp(2)),
        None => String::new(),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn normalize_strips_time_and_zone() {
        assert_eq!(normalize_date("2024-01-16"), Some(d(2024, 1, 16)));
        assert_eq!(normalize_date("2024-01-16T00:00:00.000Z"), Some(d(2024, 1, 16)));
        assert_eq!(normalize_date("2024-01-31T23:30:00+03:00"), Some(d(2024, 1, 31)));
        assert_eq!(normalize_date(" 2024-02-01 08:15:00 "), Some(d(2024, 2, 1)));
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("16/01/2024"), None);
        assert_eq!(normalize_date("2023-02-29"), None);
        assert_eq!(normalize_date("2024-13-01"), None);
    }

    #[test]
    fn clamping_and_month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(clamped_date(2023, 4, 31), Some(d(2023, 4, 30)));
        assert_eq!(clamped_date(2023, 13, 1), None);
        assert_eq!(month_end(d(2024, 2, 10)), Some(d(2024, 2, 29)));
    }

    #[test]
    fn inclusive_days_counts_both_ends() {
        assert_eq!(inclusive_days(d(2024, 1, 16), d(2024, 2, 14)), 30);
        assert_eq!(inclusive_days(d(2024, 1, 1), d(2024, 1, 1)), 1);
        assert_eq!(inclusive_days(d(2024, 1, 2), d(2024, 1, 1)), 0);
    }
}
