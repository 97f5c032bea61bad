// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::importer::load_transactions;
use crate::models::Transaction;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let transactions = load_transactions(sub.get_one::<String>("path").unwrap())?;
    let rows = problems(&transactions);
    if rows.is_empty() {
        println!("validate: {} transaction(s), no issues found", transactions.len());
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn problems(transactions: &[Transaction]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for tx in transactions {
        if let Err(e) = tx.validate() {
            rows.push(vec!["invalid_period".into(), e.to_string()]);
        }
        if tx.transaction_date.is_none() && tx.period().is_none() {
            rows.push(vec!["missing_date".into(), format!("transaction {}", tx.id)]);
        }
    }
    rows
}
