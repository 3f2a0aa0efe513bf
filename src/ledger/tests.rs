#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, Transaction};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_ledger() -> Ledger {
    let mut ledger = Ledger::default();
    ledger
        .add_expense(date(2024, 3, 1), "March rent", dec!(950), Category::Housing)
        .unwrap();
    ledger
        .add_expense(date(2024, 3, 5), "Grocery run", dec!(82.40), Category::Food)
        .unwrap();
    ledger
        .add_expense(date(2024, 3, 5), "Uber home", dec!(18.25), Category::Transportation)
        .unwrap();
    ledger
        .add_expense(date(2024, 3, 20), "Restaurant", dec!(64.00), Category::Food)
        .unwrap();
    ledger
        .add_expense(date(2024, 2, 14), "Concert", dec!(120), Category::Entertainment)
        .unwrap();
    ledger
}

// ── add_expense ───────────────────────────────────────────────

#[test]
fn test_add_expense_stores_trimmed_description() {
    let mut ledger = Ledger::default();
    let txn = ledger
        .add_expense(date(2024, 1, 2), "  Coffee  ", dec!(4.50), Category::Food)
        .unwrap()
        .clone();
    assert_eq!(txn.description, "Coffee");
    assert_eq!(ledger.transaction_count(), 1);
}

#[test]
fn test_add_expense_rejects_blank_description() {
    let mut ledger = Ledger::default();
    assert_eq!(
        ledger
            .add_expense(date(2024, 1, 2), "   ", dec!(4.50), Category::Food)
            .unwrap_err(),
        LedgerError::EmptyDescription
    );
    assert_eq!(ledger.transaction_count(), 0);
}

#[test]
fn test_add_expense_rejects_non_positive_amount() {
    let mut ledger = Ledger::default();
    assert_eq!(
        ledger
            .add_expense(date(2024, 1, 2), "Free sample", Decimal::ZERO, Category::Food)
            .unwrap_err(),
        LedgerError::NonPositiveAmount(Decimal::ZERO)
    );
    assert!(ledger
        .add_expense(date(2024, 1, 2), "Refund", dec!(-3), Category::Food)
        .is_err());
    assert_eq!(ledger.transaction_count(), 0);
}

#[test]
fn test_extend_is_all_or_nothing() {
    let mut ledger = Ledger::default();
    let txns = vec![
        Transaction::new(date(2024, 1, 1), Category::Food, "Bread".into(), dec!(3)),
        Transaction::new(date(2024, 1, 2), Category::Food, "".into(), dec!(3)),
        Transaction::new(date(2024, 1, 3), Category::Food, "Milk".into(), dec!(2)),
    ];
    assert_eq!(ledger.extend(txns).unwrap_err(), LedgerError::EmptyDescription);
    assert_eq!(ledger.transaction_count(), 0);
}

#[test]
fn test_extend_adds_valid_batch() {
    let mut ledger = Ledger::default();
    let txns = vec![
        Transaction::new(date(2024, 1, 1), Category::Food, "Bread".into(), dec!(3)),
        Transaction::new(date(2024, 1, 3), Category::Food, "Milk".into(), dec!(2)),
    ];
    assert_eq!(ledger.extend(txns).unwrap(), 2);
    assert_eq!(ledger.transaction_count(), 2);
}

// ── filter ────────────────────────────────────────────────────

#[test]
fn test_filter_date_range_inclusive() {
    let ledger = setup_ledger();
    let filter = ExpenseFilter {
        start: date(2024, 3, 1),
        end: date(2024, 3, 5),
        category: None,
        search: None,
    };
    let result = ledger.filter(&filter);
    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|t| t.date >= filter.start && t.date <= filter.end));
}

#[test]
fn test_filter_sorted_newest_first() {
    let ledger = setup_ledger();
    let filter = ExpenseFilter {
        start: date(2024, 1, 1),
        end: date(2024, 12, 31),
        category: None,
        search: None,
    };
    let descs: Vec<String> = ledger
        .filter(&filter)
        .into_iter()
        .map(|t| t.description)
        .collect();
    // Same-day entries: latest added first
    assert_eq!(
        descs,
        vec!["Restaurant", "Uber home", "Grocery run", "March rent", "Concert"]
    );
}

#[test]
fn test_filter_by_category() {
    let ledger = setup_ledger();
    let filter = ExpenseFilter {
        start: date(2024, 1, 1),
        end: date(2024, 12, 31),
        category: Some(Category::Food),
        search: None,
    };
    let result = ledger.filter(&filter);
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|t| t.category == Category::Food));
}

#[test]
fn test_filter_search_case_insensitive() {
    let ledger = setup_ledger();
    let mut filter = ExpenseFilter::month_to_date(date(2024, 3, 31));
    filter.search = Some("GROCERY".into());
    let result = ledger.filter(&filter);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].description, "Grocery run");
}

#[test]
fn test_filter_month_to_date_defaults() {
    let filter = ExpenseFilter::month_to_date(date(2024, 3, 17));
    assert_eq!(filter.start, date(2024, 3, 1));
    assert_eq!(filter.end, date(2024, 3, 17));
    assert_eq!(filter.category, None);

    let ledger = setup_ledger();
    assert_eq!(ledger.filter(&filter).len(), 3);
}

#[test]
fn test_filter_empty_result() {
    let ledger = setup_ledger();
    let filter = ExpenseFilter::month_to_date(date(2025, 6, 30));
    assert!(ledger.filter(&filter).is_empty());
}

// ── Budgets & analytics ───────────────────────────────────────

#[test]
fn test_spending_by_category_zero_filled() {
    let ledger = setup_ledger();
    let spending = ledger.spending_by_category(date(2024, 3, 1));
    assert_eq!(spending.len(), Category::ALL.len());
    let get = |c: Category| spending.iter().find(|(k, _)| *k == c).unwrap().1;
    assert_eq!(get(Category::Housing), dec!(950));
    assert_eq!(get(Category::Food), dec!(146.40));
    assert_eq!(get(Category::Transportation), dec!(18.25));
    assert_eq!(get(Category::Entertainment), Decimal::ZERO);
    assert_eq!(get(Category::Travel), Decimal::ZERO);
}

#[test]
fn test_month_total() {
    let ledger = setup_ledger();
    assert_eq!(ledger.month_total(date(2024, 3, 1)), dec!(1114.65));
    assert_eq!(ledger.month_total(date(2024, 2, 29)), dec!(120));
    assert_eq!(ledger.month_total(date(2023, 3, 1)), Decimal::ZERO);
}

#[test]
fn test_budget_report_against_limits() {
    let mut ledger = setup_ledger();
    ledger.set_budget(Category::Transportation, dec!(10)).unwrap();
    let report = ledger.budget_report(date(2024, 3, 1));
    let line = |c: Category| report.iter().find(|l| l.category == c).unwrap().clone();

    let housing = line(Category::Housing);
    assert_eq!(housing.limit, dec!(1000));
    assert_eq!(housing.remaining(), dec!(50));
    assert!(!housing.is_over());
    assert_eq!(housing.ratio(), dec!(0.95));

    let transport = line(Category::Transportation);
    assert!(transport.is_over());
    assert_eq!(transport.remaining(), dec!(-8.25));
}

#[test]
fn test_budget_line_zero_limit_ratio() {
    let unused = BudgetLine {
        category: Category::Other,
        limit: Decimal::ZERO,
        spent: Decimal::ZERO,
    };
    assert_eq!(unused.ratio(), Decimal::ZERO);
    let spent = BudgetLine {
        spent: dec!(5),
        ..unused
    };
    assert_eq!(spent.ratio(), Decimal::ONE);
    assert!(spent.is_over());
}

#[test]
fn test_set_budget_rejects_negative() {
    let mut ledger = Ledger::default();
    assert!(matches!(
        ledger.set_budget(Category::Food, dec!(-50)),
        Err(LedgerError::Budget(_))
    ));
    assert_eq!(ledger.budgets().limit(Category::Food), dec!(400));
}

// ── Profile ───────────────────────────────────────────────────

#[test]
fn test_profile_updates() {
    let mut ledger = Ledger::default();
    ledger.set_income(dec!(5200)).unwrap();
    ledger.set_goal("  buy a house ");
    assert!(ledger.toggle_crypto_tracking());
    assert!(ledger.toggle_sustainability_tracking());
    assert!(!ledger.toggle_crypto_tracking());

    let profile = ledger.profile();
    assert_eq!(profile.income, dec!(5200));
    assert_eq!(profile.goal, "buy a house");
    assert!(!profile.crypto_tracking);
    assert!(profile.sustainability_tracking);

    assert_eq!(
        ledger.set_income(dec!(-1)).unwrap_err(),
        LedgerError::NegativeIncome(dec!(-1))
    );
}

// ── Forecast ──────────────────────────────────────────────────

#[test]
fn test_forecast_delegates_to_projector() {
    let ledger = setup_ledger();
    let mut rng = StdRng::seed_from_u64(3);
    let series = ledger.forecast(12, date(2024, 3, 20), &mut rng).unwrap();
    assert_eq!(series.len(), 12);
    // March holds 1114.65 of history
    assert!(series[11].amount > dec!(1114.65));
}

#[test]
fn test_forecast_bad_horizon() {
    let ledger = setup_ledger();
    let mut rng = StdRng::seed_from_u64(3);
    assert!(matches!(
        ledger.forecast(0, date(2024, 3, 20), &mut rng),
        Err(LedgerError::Forecast(ForecastError::HorizonOutOfRange(0)))
    ));
}
