// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Twelve-column monthly ledger: expenses by category and supplier, income,
//! surplus and a running reserve, built from prorated transaction splits.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::accrual::accrue;
use crate::models::{MonthSplit, Transaction, TransactionKind};
use crate::proration::split;
use crate::window::{MonthWindow, WINDOW_MONTHS, YearMonth};

/// Which views add the recurring budget amount to monthly income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecurringIncomeRule {
    /// Twelve-month ledger only; the single-month summary shows transaction income alone.
    #[default]
    YearViewOnly,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerView {
    Year,
    Month,
}

impl RecurringIncomeRule {
    pub fn admits(&self, view: LedgerView) -> bool {
        match self {
            Self::YearViewOnly => view == LedgerView::Year,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetParams {
    pub recurring_amount: Decimal,
    pub rule: RecurringIncomeRule,
}

impl BudgetParams {
    fn recurring_for(&self, view: LedgerView) -> Decimal {
        if self.rule.admits(view) && self.recurring_amount > Decimal::ZERO {
            self.recurring_amount
        } else {
            Decimal::ZERO
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundParams {
    pub monthly_amount: Decimal,
    pub initial_balance: Decimal,
    pub contract_start: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub uncategorized: String,
    pub no_supplier: String,
    pub unknown_supplier: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            uncategorized: "Uncategorized".into(),
            no_supplier: "General".into(),
            unknown_supplier: "Unknown supplier".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LedgerParams {
    pub today: NaiveDate,
    pub suppliers: HashMap<i64, String>,
    pub labels: Labels,
}

impl LedgerParams {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            suppliers: HashMap::new(),
            labels: Labels::default(),
        }
    }

    fn bucket(&self, tx: &Transaction) -> (String, String) {
        let category = tx
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map_or_else(|| self.labels.uncategorized.clone(), str::to_string);
        let supplier = match tx.supplier_id {
            None => self.labels.no_supplier.clone(),
            Some(id) => self
                .suppliers
                .get(&id)
                .cloned()
                .unwrap_or_else(|| self.labels.unknown_supplier.clone()),
        };
        (category, supplier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerColumn {
    pub month: YearMonth,
    pub reached: bool,
    pub active: bool,
}

/// Cells are `None` for inactive columns (not reached and no data), which
/// is distinct from `Some(0)` for a reached month with no activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerTable {
    pub columns: Vec<LedgerColumn>,
    pub expenses: BTreeMap<String, BTreeMap<String, Vec<Option<Decimal>>>>,
    pub income: Vec<Option<Decimal>>,
    pub expense_total: Vec<Option<Decimal>>,
    pub surplus: Vec<Option<Decimal>>,
    pub running: Vec<Decimal>,
    pub fund: Option<Vec<Option<Decimal>>>,
}

impl LedgerTable {
    pub fn is_active(&self, idx: usize) -> bool {
        self.columns.get(idx).is_some_and(|c| c.active)
    }

    pub fn expense_cell(&self, category: &str, supplier: &str, idx: usize) -> Option<Decimal> {
        self.expenses
            .get(category)?
            .get(supplier)?
            .get(idx)
            .copied()
            .flatten()
    }
}

pub fn build_monthly_ledger(
    transactions: &[Transaction],
    window: &MonthWindow,
    fund: Option<&FundParams>,
    budget: Option<&BudgetParams>,
    params: &LedgerParams,
) -> LedgerTable {
    let (ws, we) = (window.start_date(), window.end_date());

    let mut income_raw = [Decimal::ZERO; WINDOW_MONTHS];
    let mut expense_raw = [Decimal::ZERO; WINDOW_MONTHS];
    let mut buckets: BTreeMap<String, BTreeMap<String, [Decimal; WINDOW_MONTHS]>> =
        BTreeMap::new();

    for tx in transactions.iter().filter(|t| !t.from_fund) {
        for s in split(tx, ws, we) {
            let Some(idx) = window.index_of(&s.month) else {
                continue;
            };
            match tx.kind {
                TransactionKind::Income => income_raw[idx] += s.proportional_amount,
                TransactionKind::Expense => {
                    expense_raw[idx] += s.proportional_amount;
                    let (category, supplier) = params.bucket(tx);
                    buckets
                        .entry(category)
                        .or_default()
                        .entry(supplier)
                        .or_insert([Decimal::ZERO; WINDOW_MONTHS])[idx] += s.proportional_amount;
                }
            }
        }
    }

    let columns: Vec<LedgerColumn> = window
        .months()
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let reached = month.has_reached(params.today);
            let has_data = !income_raw[i].is_zero() || !expense_raw[i].is_zero();
            LedgerColumn {
                month: *month,
                reached,
                active: i == 0 || reached || has_data,
            }
        })
        .collect();

    let recurring = budget.map_or(Decimal::ZERO, |b| b.recurring_for(LedgerView::Year));
    let gate = |i: usize, v: Decimal| columns[i].active.then_some(v);

    let income: Vec<Option<Decimal>> = (0..WINDOW_MONTHS)
        .map(|i| gate(i, income_raw[i] + recurring))
        .collect();
    let expense_total: Vec<Option<Decimal>> =
        (0..WINDOW_MONTHS).map(|i| gate(i, expense_raw[i])).collect();
    let surplus: Vec<Option<Decimal>> = income
        .iter()
        .zip(&expense_total)
        .map(|(inc, exp)| Some((*inc)? - (*exp)?))
        .collect();

    let mut running = Vec::with_capacity(WINDOW_MONTHS);
    let mut acc = Decimal::ZERO;
    for s in &surplus {
        // inactive columns carry the previous value forward
        acc += s.unwrap_or(Decimal::ZERO);
        running.push(acc);
    }

    let expenses = buckets
        .into_iter()
        .map(|(category, by_supplier)| {
            let rows: BTreeMap<String, Vec<Option<Decimal>>> = by_supplier
                .into_iter()
                .map(|(supplier, cells)| {
                    let gated: Vec<Option<Decimal>> =
                        cells.iter().enumerate().map(|(i, v)| gate(i, *v)).collect();
                    (supplier, gated)
                })
                .collect();
            (category, rows)
        })
        .collect();

    let fund_row = fund.map(|f| fund_balances(transactions, &columns, f, params.today));

    debug!(
        first = %window.first(),
        active = columns.iter().filter(|c| c.active).count(),
        "built monthly ledger"
    );

    LedgerTable {
        columns,
        expenses,
        income,
        expense_total,
        surplus,
        running,
        fund: fund_row,
    }
}

// Reserve balance at the end of each active column, never past today.
fn fund_balances(
    transactions: &[Transaction],
    columns: &[LedgerColumn],
    fund: &FundParams,
    today: NaiveDate,
) -> Vec<Option<Decimal>> {
    let movements: Vec<(MonthSplit, TransactionKind)> = transactions
        .iter()
        .filter(|t| t.from_fund)
        .flat_map(|t| split(t, None, None).into_iter().map(move |s| (s, t.kind)))
        .collect();

    columns
        .iter()
        .map(|col| {
            if !col.active {
                return None;
            }
            let cutoff = col.month.last_day().map(|end| end.min(today))?;
            let accrued = accrue(fund.monthly_amount, fund.contract_start, cutoff);
            let moved: Decimal = movements
                .iter()
                .filter(|(s, _)| s.month <= col.month)
                .map(|(s, kind)| match kind {
                    TransactionKind::Income => s.proportional_amount,
                    TransactionKind::Expense => -s.proportional_amount,
                })
                .sum();
            Some(fund.initial_balance + accrued + moved)
        })
        .collect()
}

/// Single-month view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: YearMonth,
    pub income: Decimal,
    pub expenses: BTreeMap<String, BTreeMap<String, Decimal>>,
    pub expense_total: Decimal,
    pub surplus: Decimal,
    pub splits: Vec<MonthSplit>,
}

pub fn month_summary(
    transactions: &[Transaction],
    month: YearMonth,
    budget: Option<&BudgetParams>,
    params: &LedgerParams,
) -> MonthSummary {
    let (first, last) = (month.first_day(), month.last_day());
    let mut income = budget.map_or(Decimal::ZERO, |b| b.recurring_for(LedgerView::Month));
    let mut expense_total = Decimal::ZERO;
    let mut expenses: BTreeMap<String, BTreeMap<String, Decimal>> = BTreeMap::new();
    let mut splits = Vec::new();

    for tx in transactions.iter().filter(|t| !t.from_fund) {
        for s in split(tx, first, last) {
            if s.month != month {
                continue;
            }
            match tx.kind {
                TransactionKind::Income => income += s.proportional_amount,
                TransactionKind::Expense => {
                    expense_total += s.proportional_amount;
                    let (category, supplier) = params.bucket(tx);
                    *expenses
                        .entry(category)
                        .or_default()
                        .entry(supplier)
                        .or_insert(Decimal::ZERO) += s.proportional_amount;
                }
            }
            splits.push(s);
        }
    }

    MonthSummary {
        month,
        income,
        expenses,
        expense_total,
        surplus: income - expense_total,
        splits,
    }
}
