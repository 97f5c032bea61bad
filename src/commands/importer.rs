// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionKind};
use crate::utils::{normalize_date, parse_decimal};
use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use tracing::warn;

/// Read `id,date,type,amount,category,supplier_id,period_start,period_end,from_fund`.
///
/// Unparseable dates are kept as missing so the row contributes nothing
/// instead of aborting the whole import; amounts and types must be valid.
pub fn load_transactions(path: &str) -> Result<Vec<Transaction>> {
    let path = path.trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut out = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let tx = parse_row(&rec).with_context(|| format!("{}: row {}", path, line + 2))?;
        out.push(tx);
    }
    Ok(out)
}

fn field<'a>(rec: &'a StringRecord, idx: usize) -> Option<&'a str> {
    rec.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn date_field(rec: &StringRecord, idx: usize, id: i64, name: &str) -> Option<chrono::NaiveDate> {
    let raw = field(rec, idx)?;
    let parsed = normalize_date(raw);
    if parsed.is_none() {
        warn!(id, column = name, value = raw, "unparseable date ignored");
    }
    parsed
}

fn parse_row(rec: &StringRecord) -> Result<Transaction> {
    let id: i64 = field(rec, 0)
        .context("id missing")?
        .parse()
        .context("id must be an integer")?;
    let kind: TransactionKind = field(rec, 2)
        .context("type missing")?
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let amount_raw = field(rec, 3).context("amount missing")?;
    let amount = parse_decimal(amount_raw)?.abs();
    let supplier_id = field(rec, 5)
        .map(|s| s.parse::<i64>())
        .transpose()
        .with_context(|| format!("Invalid supplier id for transaction {}", id))?;
    let from_fund = matches!(
        field(rec, 8).map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true" | "yes")
    );

    Ok(Transaction {
        id,
        transaction_date: date_field(rec, 1, id, "date"),
        kind,
        amount,
        category: field(rec, 4).map(str::to_string),
        supplier_id,
        period_start: date_field(rec, 6, id, "period_start"),
        period_end: date_field(rec, 7, id, "period_end"),
        from_fund,
    })
}

/// Read `id,name` supplier rows.
pub fn load_suppliers(path: &str) -> Result<HashMap<i64, String>> {
    let path = path.trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;
    let mut out = HashMap::new();
    for result in rdr.records() {
        let rec = result?;
        let id: i64 = field(&rec, 0)
            .context("supplier id missing")?
            .parse()
            .context("supplier id must be an integer")?;
        let name = field(&rec, 1).context("supplier name missing")?;
        out.insert(id, name.to_string());
    }
    Ok(out)
}
