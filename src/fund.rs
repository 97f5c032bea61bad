// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reserve fund policies: creation, scoped balance updates and monthly catch-up.
//! Every operation takes a [`FundState`] by reference and returns a new one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::accrual::{accrue, last_occurrence_on_or_before, occurrence_count};
use crate::error::EngineError;
use crate::models::FundState;

/// How far back a fund edit applies. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateScope {
    /// Recompute the whole accrual from the contract's first day to today.
    FromStart,
    /// New monthly contribution from now on; accrued balance untouched.
    FromThisMonth,
    /// One-time delta to the balance; contribution untouched.
    OnlyThisMonth,
}

impl FromStr for UpdateScope {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "from_start" | "from-start" => Ok(Self::FromStart),
            "from_this_month" | "from-this-month" => Ok(Self::FromThisMonth),
            "only_this_month" | "only-this-month" => Ok(Self::OnlyThisMonth),
            other => Err(EngineError::UnknownScope(other.to_string())),
        }
    }
}

impl fmt::Display for UpdateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FromStart => "from_start",
            Self::FromThisMonth => "from_this_month",
            Self::OnlyThisMonth => "only_this_month",
        };
        f.write_str(s)
    }
}

/// Apply a fund edit.
///
/// `amount` is the new monthly contribution for `FromStart` and
/// `FromThisMonth`, and the one-time balance delta for `OnlyThisMonth`.
pub fn apply_update(
    state: &FundState,
    scope: UpdateScope,
    amount: Decimal,
    contract_start: NaiveDate,
    today: NaiveDate,
) -> FundState {
    info!(%scope, %amount, "applying fund update");
    match scope {
        UpdateScope::FromStart => FundState {
            current_balance: state.initial_balance + accrue(amount, contract_start, today),
            monthly_amount: amount,
            initial_balance: state.initial_balance,
            last_monthly_addition: last_occurrence_on_or_before(contract_start, today),
        },
        UpdateScope::FromThisMonth => FundState {
            monthly_amount: amount,
            ..state.clone()
        },
        UpdateScope::OnlyThisMonth => FundState {
            current_balance: state.current_balance + amount,
            ..state.clone()
        },
    }
}

/// Which accrual horizon a fund created while viewing a past period gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviousPeriodScope {
    /// Accrue through the end of the viewed period, then stop contributing.
    ThroughPeriodEnd,
    /// Accrue through today and keep contributing.
    ThroughToday,
}

impl FromStr for PreviousPeriodScope {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "through-period-end" | "through_period_end" => Ok(Self::ThroughPeriodEnd),
            "through-today" | "through_today" => Ok(Self::ThroughToday),
            other => Err(EngineError::UnknownPreviousPeriodScope(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationPolicy {
    /// The viewed period is current: backfill contributions to today.
    Current,
    /// The viewed period ended at `period_end`; the caller picks the horizon.
    PreviousPeriod {
        period_end: NaiveDate,
        scope: PreviousPeriodScope,
    },
}

pub fn create_fund(
    monthly_amount: Decimal,
    initial_balance: Decimal,
    contract_start: NaiveDate,
    today: NaiveDate,
    policy: CreationPolicy,
) -> FundState {
    let (horizon, monthly_going_forward) = match policy {
        CreationPolicy::Current
        | CreationPolicy::PreviousPeriod {
            scope: PreviousPeriodScope::ThroughToday,
            ..
        } => (today, monthly_amount),
        CreationPolicy::PreviousPeriod {
            period_end,
            scope: PreviousPeriodScope::ThroughPeriodEnd,
        } => (period_end, Decimal::ZERO),
    };
    let accrued = accrue(monthly_amount, contract_start, horizon);
    debug!(%accrued, %horizon, "seeding fund opening balance");
    FundState {
        current_balance: initial_balance + accrued,
        monthly_amount: monthly_going_forward,
        initial_balance,
        last_monthly_addition: if accrued.is_zero() {
            None
        } else {
            last_occurrence_on_or_before(contract_start, horizon)
        },
    }
}

/// Add every contribution that fell due after `last_monthly_addition` and on
/// or before `today`. Calling it twice with the same `today` changes nothing.
pub fn apply_due_additions(
    state: &FundState,
    contract_start: NaiveDate,
    today: NaiveDate,
) -> FundState {
    if state.monthly_amount <= Decimal::ZERO {
        return state.clone();
    }
    let already = state
        .last_monthly_addition
        .map_or(0, |last| occurrence_count(contract_start, last));
    let due = occurrence_count(contract_start, today).saturating_sub(already);
    if due == 0 {
        return state.clone();
    }
    debug!(due, "applying missed monthly contributions");
    FundState {
        current_balance: state.current_balance + state.monthly_amount * Decimal::from(due),
        last_monthly_addition: last_occurrence_on_or_before(contract_start, today),
        ..state.clone()
    }
}
