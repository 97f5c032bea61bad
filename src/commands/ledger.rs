// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::importer::{load_suppliers, load_transactions};
use crate::commands::today_from;
use crate::config::Settings;
use crate::ledger::{
    BudgetParams, FundParams, LedgerParams, LedgerTable, MonthSummary, build_monthly_ledger,
    month_summary,
};
use crate::utils::{
    fmt_cell, maybe_print_json, parse_date, parse_decimal, parse_month, parse_optional_date,
    pretty_table,
};
use crate::window::MonthWindow;
use anyhow::{Result, bail};
use rust_decimal::Decimal;

pub fn handle(sub: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (params, budget) = build_params(sub, settings)?;
    let transactions = load_transactions(sub.get_one::<String>("path").unwrap())?;

    if let Some(month) = sub.get_one::<String>("month") {
        let summary = month_summary(&transactions, parse_month(month)?, budget.as_ref(), &params);
        if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
            print_summary(&summary);
        }
        return Ok(());
    }

    let window = resolve_window(sub, settings, params.today)?;
    let fund = fund_params(sub)?;
    let table = build_monthly_ledger(
        &transactions,
        &window,
        fund.as_ref(),
        budget.as_ref(),
        &params,
    );
    if !maybe_print_json(json_flag, jsonl_flag, &table)? {
        println!("{}", render(&table));
    }
    Ok(())
}

fn build_params(
    sub: &clap::ArgMatches,
    settings: &Settings,
) -> Result<(LedgerParams, Option<BudgetParams>)> {
    let mut params = LedgerParams::new(today_from(sub)?);
    params.labels = settings.labels.clone();
    if let Some(path) = sub.get_one::<String>("suppliers") {
        params.suppliers = load_suppliers(path)?;
    }
    let budget = sub
        .get_one::<String>("budget")
        .map(|b| parse_decimal(b))
        .transpose()?
        .map(|recurring_amount| BudgetParams {
            recurring_amount,
            rule: settings.recurring_rule,
        });
    Ok((params, budget))
}

pub fn resolve_window(
    sub: &clap::ArgMatches,
    settings: &Settings,
    today: chrono::NaiveDate,
) -> Result<MonthWindow> {
    if let Some(m) = sub.get_one::<String>("start-month") {
        return Ok(MonthWindow::starting_at(parse_month(m)?));
    }
    if let Some(year) = sub.get_one::<i32>("fiscal-year") {
        return Ok(MonthWindow::fiscal_year(
            *year,
            settings.fiscal_year_start_month,
        )?);
    }
    if let Some(start) = sub.get_one::<String>("contract-start") {
        return Ok(MonthWindow::contract_year(parse_date(start)?, today));
    }
    bail!("One of --start-month, --fiscal-year or --contract-start is required")
}

fn fund_params(sub: &clap::ArgMatches) -> Result<Option<FundParams>> {
    let Some(monthly) = sub.get_one::<String>("fund-monthly") else {
        return Ok(None);
    };
    let Some(contract_start) = parse_optional_date(
        sub.get_one::<String>("fund-start")
            .or_else(|| sub.get_one::<String>("contract-start")),
    )?
    else {
        bail!("--fund-monthly needs --fund-start or --contract-start");
    };
    let initial_balance = match sub.get_one::<String>("fund-initial") {
        Some(v) => parse_decimal(v)?,
        None => Decimal::ZERO,
    };
    Ok(Some(FundParams {
        monthly_amount: parse_decimal(monthly)?,
        initial_balance,
        contract_start,
    }))
}

pub fn render(table: &LedgerTable) -> comfy_table::Table {
    let mut headers: Vec<String> = vec!["Category".into(), "Supplier".into()];
    headers.extend(table.columns.iter().map(|c| c.month.key()));
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

    let mut rows = Vec::new();
    for (category, suppliers) in &table.expenses {
        for (supplier, cells) in suppliers {
            let mut row = vec![category.clone(), supplier.clone()];
            row.extend(cells.iter().map(|c| fmt_cell(*c)));
            rows.push(row);
        }
    }
    let mut total_row = |label: &str, cells: Vec<Option<Decimal>>| {
        let mut row = vec![label.to_string(), String::new()];
        row.extend(cells.into_iter().map(fmt_cell));
        rows.push(row);
    };
    total_row("Expenses", table.expense_total.clone());
    total_row("Income", table.income.clone());
    total_row("Surplus", table.surplus.clone());
    total_row("Running", table.running.iter().map(|v| Some(*v)).collect());
    if let Some(fund) = &table.fund {
        total_row("Fund", fund.clone());
    }
    pretty_table(&header_refs, rows)
}

fn print_summary(summary: &MonthSummary) {
    let mut rows = Vec::new();
    for (category, suppliers) in &summary.expenses {
        for (supplier, amount) in suppliers {
            rows.push(vec![
                category.clone(),
                supplier.clone(),
                format!("{:.2}", amount.round_dp(2)),
            ]);
        }
    }
    rows.push(vec![
        "Expenses".into(),
        String::new(),
        format!("{:.2}", summary.expense_total.round_dp(2)),
    ]);
    rows.push(vec![
        "Income".into(),
        String::new(),
        format!("{:.2}", summary.income.round_dp(2)),
    ]);
    rows.push(vec![
        "Surplus".into(),
        String::new(),
        format!("{:.2}", summary.surplus.round_dp(2)),
    ]);
    let month = summary.month.key();
    println!(
        "{}",
        pretty_table(&["Category", "Supplier", month.as_str()], rows)
    );
}
