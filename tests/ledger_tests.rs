// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fundledger::ledger::{
    BudgetParams, FundParams, LedgerParams, RecurringIncomeRule, build_monthly_ledger,
    month_summary,
};
use fundledger::models::Transaction;
use fundledger::window::{MonthWindow, YearMonth};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(v: i64) -> Decimal {
    Decimal::new(v, 0)
}

fn year_2024() -> MonthWindow {
    MonthWindow::starting_at(YearMonth::new(2024, 1).unwrap())
}

#[test]
fn inactive_column_carries_running_total_forward() {
    // Jan and Feb reached; March has nothing; April has a booked future expense
    let txs = vec![
        Transaction::income(1, d(2024, 1, 5), dec(1000)),
        Transaction::expense(2, d(2024, 1, 20), dec(200)).with_category("Repairs"),
        Transaction::income(3, d(2024, 2, 5), dec(500)),
        Transaction::expense(4, d(2024, 4, 1), dec(300)).with_category("Insurance"),
    ];
    let params = LedgerParams::new(d(2024, 2, 10));
    let t = build_monthly_ledger(&txs, &year_2024(), None, None, &params);

    assert!(t.is_active(0) && t.is_active(1) && t.is_active(3));
    assert!(!t.is_active(2));
    assert_eq!(t.running[0], dec(800));
    assert_eq!(t.running[1], dec(1300));
    assert_eq!(t.running[2], t.running[1]);
    assert_eq!(t.running[3], dec(1000));
    assert_eq!(t.running[11], dec(1000));

    assert_eq!(t.income[2], None);
    assert_eq!(t.expense_total[2], None);
    assert_eq!(t.surplus[2], None);
    assert_eq!(t.income[3], Some(Decimal::ZERO));
    assert_eq!(t.surplus[3], Some(dec(-300)));
}

#[test]
fn reached_month_without_activity_is_zero_not_empty() {
    let txs = vec![Transaction::income(1, d(2024, 1, 5), dec(100))];
    let params = LedgerParams::new(d(2024, 3, 1));
    let t = build_monthly_ledger(&txs, &year_2024(), None, None, &params);

    assert_eq!(t.income[1], Some(Decimal::ZERO));
    assert_eq!(t.expense_total[1], Some(Decimal::ZERO));
    assert_eq!(t.surplus[2], Some(Decimal::ZERO));
    assert_eq!(t.income[3], None);
    assert!(t.columns[2].reached);
    assert!(!t.columns[3].reached);
}

#[test]
fn future_window_keeps_only_first_column() {
    let window = MonthWindow::starting_at(YearMonth::new(2025, 1).unwrap());
    let budget = BudgetParams {
        recurring_amount: dec(1000),
        rule: RecurringIncomeRule::YearViewOnly,
    };
    let params = LedgerParams::new(d(2024, 6, 15));
    let t = build_monthly_ledger(&[], &window, None, Some(&budget), &params);

    assert!(t.is_active(0));
    assert!((1..12).all(|i| !t.is_active(i)));
    assert_eq!(t.income[0], Some(dec(1000)));
    assert_eq!(t.income[1], None);
    assert_eq!(t.running[11], dec(1000));
}

#[test]
fn recurring_budget_added_once_per_active_column() {
    let budget = BudgetParams {
        recurring_amount: dec(1000),
        rule: RecurringIncomeRule::YearViewOnly,
    };
    let txs = vec![Transaction::income(1, d(2024, 2, 1), dec(50))];
    let params = LedgerParams::new(d(2024, 6, 15));
    let t = build_monthly_ledger(&txs, &year_2024(), None, Some(&budget), &params);

    assert_eq!(t.income[0], Some(dec(1000)));
    assert_eq!(t.income[1], Some(dec(1050)));
    assert_eq!(t.income[5], Some(dec(1000)));
    assert_eq!(t.income[6], None);
    assert_eq!(t.running[11], dec(6050));

    let never = BudgetParams {
        rule: RecurringIncomeRule::Never,
        ..budget
    };
    let t = build_monthly_ledger(&txs, &year_2024(), None, Some(&never), &params);
    assert_eq!(t.income[0], Some(Decimal::ZERO));
    assert_eq!(t.running[11], dec(50));
}

#[test]
fn expenses_grouped_by_category_and_supplier() {
    let txs = vec![
        Transaction::expense(1, d(2024, 1, 3), dec(120))
            .with_category("Maintenance")
            .with_supplier(7),
        Transaction::expense(2, d(2024, 1, 9), dec(80))
            .with_category("Maintenance")
            .with_supplier(7),
        Transaction::expense(3, d(2024, 1, 12), dec(45))
            .with_category("Maintenance")
            .with_supplier(99),
        Transaction::expense(4, d(2024, 2, 2), dec(30)),
        Transaction::expense(5, d(2024, 2, 2), dec(999))
            .with_category("Maintenance")
            .from_fund(),
    ];
    let mut params = LedgerParams::new(d(2024, 2, 28));
    params.suppliers.insert(7, "Acme Plumbing".into());
    let t = build_monthly_ledger(&txs, &year_2024(), None, None, &params);

    assert_eq!(t.expense_cell("Maintenance", "Acme Plumbing", 0), Some(dec(200)));
    assert_eq!(t.expense_cell("Maintenance", "Unknown supplier", 0), Some(dec(45)));
    assert_eq!(t.expense_cell("Uncategorized", "General", 1), Some(dec(30)));
    assert_eq!(t.expense_cell("Maintenance", "Acme Plumbing", 1), Some(Decimal::ZERO));
    assert_eq!(t.expense_cell("Maintenance", "Acme Plumbing", 2), None);
    assert_eq!(t.expense_total[0], Some(dec(245)));
    // fund withdrawals stay out of ordinary expenses
    assert_eq!(t.expense_total[1], Some(dec(30)));
}

#[test]
fn prorated_expense_lands_in_both_months() {
    let txs = vec![
        Transaction::expense(1, d(2024, 1, 16), dec(300))
            .with_category("Cleaning")
            .with_period(d(2024, 1, 16), d(2024, 2, 14)),
    ];
    let params = LedgerParams::new(d(2024, 12, 31));
    let t = build_monthly_ledger(&txs, &year_2024(), None, None, &params);

    assert_eq!(t.expense_cell("Cleaning", "General", 0), Some(dec(160)));
    assert_eq!(t.expense_cell("Cleaning", "General", 1), Some(dec(140)));
    assert_eq!(t.running[11], dec(-300));
}

#[test]
fn period_crossing_window_start_only_counts_inside() {
    let txs = vec![
        Transaction::income(1, d(2023, 12, 17), dec(310))
            .with_period(d(2023, 12, 17), d(2024, 1, 16)),
    ];
    let params = LedgerParams::new(d(2024, 1, 31));
    let t = build_monthly_ledger(&txs, &year_2024(), None, None, &params);

    // 31 days at 10/day, 16 of them in January
    assert_eq!(t.income[0], Some(dec(160)));
    assert_eq!(t.running[11], dec(160));
}

#[test]
fn fund_row_accrues_and_subtracts_withdrawals() {
    let fund = FundParams {
        monthly_amount: dec(100),
        initial_balance: dec(1000),
        contract_start: d(2023, 6, 10),
    };
    let txs = vec![Transaction::expense(1, d(2024, 2, 5), dec(250)).from_fund()];
    let params = LedgerParams::new(d(2024, 3, 20));
    let t = build_monthly_ledger(&txs, &year_2024(), Some(&fund), None, &params);

    let row = t.fund.as_ref().unwrap();
    assert_eq!(row[0], Some(dec(1800)));
    assert_eq!(row[1], Some(dec(1650)));
    assert_eq!(row[2], Some(dec(1750)));
    assert_eq!(row[3], None);
    assert_eq!(t.expense_total[1], Some(Decimal::ZERO));
}

#[test]
fn month_view_skips_recurring_unless_configured() {
    let txs = vec![
        Transaction::income(1, d(2024, 3, 1), dec(700)),
        Transaction::expense(2, d(2024, 2, 20), dec(290))
            .with_category("Utilities")
            .with_period(d(2024, 2, 1), d(2024, 3, 31)),
    ];
    let month = YearMonth::new(2024, 3).unwrap();
    let params = LedgerParams::new(d(2024, 3, 31));
    let mut budget = BudgetParams {
        recurring_amount: dec(1000),
        rule: RecurringIncomeRule::YearViewOnly,
    };

    let s = month_summary(&txs, month, Some(&budget), &params);
    assert_eq!(s.income, dec(700));
    // 60 days, 31 of them in March
    assert_eq!(s.expense_total, dec(290) * dec(31) / dec(60));
    assert_eq!(s.splits.len(), 2);

    budget.rule = RecurringIncomeRule::Always;
    let s = month_summary(&txs, month, Some(&budget), &params);
    assert_eq!(s.income, dec(1700));
    assert_eq!(s.surplus, s.income - s.expense_total);
}
