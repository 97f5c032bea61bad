// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the allocation engine.
///
/// Data problems (bad dates, malformed periods) degrade silently inside the
/// engine; these variants cover boundary validation and programmer errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown fund update scope '{0}' (expected from_start, from_this_month or only_this_month)")]
    UnknownScope(String),

    #[error("Unknown previous-period scope '{0}' (expected through-period-end or through-today)")]
    UnknownPreviousPeriodScope(String),

    #[error("Transaction {id}: period must set both start and end with start <= end (got {start:?}..{end:?})")]
    InvalidPeriod {
        id: i64,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}
