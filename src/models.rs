// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::window::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub transaction_date: Option<NaiveDate>,
    pub kind: TransactionKind,
    pub amount: Decimal, // always positive, sign carried by kind
    pub category: Option<String>,
    pub supplier_id: Option<i64>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub from_fund: bool,
}

impl Transaction {
    pub fn income(id: i64, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            id,
            transaction_date: Some(date),
            kind: TransactionKind::Income,
            amount,
            category: None,
            supplier_id: None,
            period_start: None,
            period_end: None,
            from_fund: false,
        }
    }

    pub fn expense(id: i64, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            kind: TransactionKind::Expense,
            ..Self::income(id, date, amount)
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_supplier(mut self, supplier_id: i64) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    pub fn with_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.period_start = Some(start);
        self.period_end = Some(end);
        self
    }

    pub fn from_fund(mut self) -> Self {
        self.from_fund = true;
        self
    }

    /// The well-formed period, if any. Half-set or inverted ranges yield `None`.
    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.period_start, self.period_end) {
            (Some(s), Some(e)) if s <= e => Some((s, e)),
            _ => None,
        }
    }

    /// Boundary check for the period precondition. The engine itself never
    /// calls this; it degrades malformed periods to single-date behaviour.
    pub fn validate(&self) -> EngineResult<()> {
        match (self.period_start, self.period_end) {
            (None, None) => Ok(()),
            (Some(s), Some(e)) if s <= e => Ok(()),
            (start, end) => Err(EngineError::InvalidPeriod {
                id: self.id,
                start,
                end,
            }),
        }
    }
}

/// One transaction's share of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSplit {
    pub source_transaction_id: i64,
    pub month: YearMonth,
    pub proportional_amount: Decimal,
    pub full_amount: Decimal,
    pub days_in_month: i64,
    pub total_days_in_period: i64,
}

impl MonthSplit {
    pub fn month_key(&self) -> String {
        self.month.key()
    }
}

/// A project's cash reserve. Operations in [`crate::fund`] return new states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundState {
    pub current_balance: Decimal,
    pub monthly_amount: Decimal,
    pub initial_balance: Decimal,
    pub last_monthly_addition: Option<NaiveDate>,
}
