// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::utils::{clamped_date, days_in_month};

pub const WINDOW_MONTHS: usize = 12;

/// A calendar month. Orders chronologically and renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth(format!("{}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        clamped_date(self.year, self.month, 31)
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Shift by `n` months (negative goes back).
    pub fn add_months(&self, n: i32) -> Self {
        let idx = self.year * 12 + (self.month as i32 - 1) + n;
        Self {
            year: idx.div_euclid(12),
            month: idx.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn succ(&self) -> Self {
        self.add_months(1)
    }

    /// Whole months from `self` to `other`; negative when `other` is earlier.
    pub fn months_until(&self, other: &YearMonth) -> i32 {
        (other.year - self.year) * 12 + (other.month as i32 - self.month as i32)
    }

    /// `today`'s month is at or past this month.
    pub fn has_reached(&self, today: NaiveDate) -> bool {
        YearMonth::from_date(today) >= *self
    }

    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| EngineError::InvalidMonth(s.to_string()))?;
        let year: i32 = y
            .parse()
            .map_err(|_| EngineError::InvalidMonth(s.to_string()))?;
        let month: u32 = m
            .parse()
            .map_err(|_| EngineError::InvalidMonth(s.to_string()))?;
        YearMonth::new(year, month).map_err(|_| EngineError::InvalidMonth(s.to_string()))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Twelve consecutive months: the columns of a ledger table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthWindow {
    months: Vec<YearMonth>,
}

impl MonthWindow {
    pub fn starting_at(first: YearMonth) -> Self {
        let months = (0..WINDOW_MONTHS as i32)
            .map(|i| first.add_months(i))
            .collect();
        Self { months }
    }

    /// The contract year that contains `today`: the contract's first month
    /// advanced by whole years. Before the contract starts this is the first
    /// contract year.
    pub fn contract_year(contract_start: NaiveDate, today: NaiveDate) -> Self {
        let first = YearMonth::from_date(contract_start);
        let elapsed = first.months_until(&YearMonth::from_date(today)).max(0);
        let years = elapsed / WINDOW_MONTHS as i32;
        Self::starting_at(first.add_months(years * WINDOW_MONTHS as i32))
    }

    /// Contract year number `index` (zero-based) counted from the contract start.
    pub fn contract_period(contract_start: NaiveDate, index: u32) -> Self {
        let first = YearMonth::from_date(contract_start);
        Self::starting_at(first.add_months(index as i32 * WINDOW_MONTHS as i32))
    }

    pub fn fiscal_year(year: i32, anchor_month: u32) -> EngineResult<Self> {
        Ok(Self::starting_at(YearMonth::new(year, anchor_month)?))
    }

    /// A historical period given by its explicit first day.
    pub fn for_period(period_start: NaiveDate) -> Self {
        Self::starting_at(YearMonth::from_date(period_start))
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn first(&self) -> YearMonth {
        self.months[0]
    }

    pub fn last(&self) -> YearMonth {
        self.months[WINDOW_MONTHS - 1]
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.first().first_day()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.last().last_day()
    }

    pub fn contains(&self, month: &YearMonth) -> bool {
        self.first() <= *month && *month <= self.last()
    }

    pub fn index_of(&self, month: &YearMonth) -> Option<usize> {
        if !self.contains(month) {
            return None;
        }
        usize::try_from(self.first().months_until(month)).ok()
    }

    /// The window lies entirely before `today`'s month.
    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.last() < YearMonth::from_date(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_months_wraps_years() {
        let ym = YearMonth::new(2024, 11).unwrap();
        assert_eq!(ym.add_months(3), YearMonth::new(2025, 2).unwrap());
        assert_eq!(ym.add_months(-11), YearMonth::new(2023, 12).unwrap());
        assert_eq!(ym.add_months(0), ym);
    }

    #[test]
    fn parse_and_display() {
        let ym: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(ym.to_string(), "2024-03");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024".parse::<YearMonth>().is_err());
    }

    #[test]
    fn index_of_inside_and_outside() {
        let w = MonthWindow::starting_at(YearMonth::new(2024, 7).unwrap());
        assert_eq!(w.index_of(&YearMonth::new(2024, 7).unwrap()), Some(0));
        assert_eq!(w.index_of(&YearMonth::new(2025, 6).unwrap()), Some(11));
        assert_eq!(w.index_of(&YearMonth::new(2025, 7).unwrap()), None);
        assert_eq!(w.index_of(&YearMonth::new(2024, 6).unwrap()), None);
    }
}
