// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accrue;
pub mod fund;
pub mod importer;
pub mod ledger;
pub mod split;
pub mod validate;

use anyhow::Result;
use chrono::{NaiveDate, Utc};

/// `--today` if given, otherwise the current UTC date.
pub fn today_from(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("today") {
        Some(s) => crate::utils::parse_date(s),
        None => Ok(Utc::now().date_naive()),
    }
}
