#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_set_has_twelve_distinct_names() {
    let mut names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 12);
}

#[test]
fn test_category_parse() {
    assert_eq!(Category::parse("housing"), Some(Category::Housing));
    assert_eq!(Category::parse("FOOD"), Some(Category::Food));
    assert_eq!(
        Category::parse("Crypto Investment"),
        Some(Category::CryptoInvestment)
    );
    assert_eq!(
        Category::parse("sustainable-spending"),
        Some(Category::SustainableSpending)
    );
    assert_eq!(
        Category::parse("crypto_investment"),
        Some(Category::CryptoInvestment)
    );
    assert_eq!(Category::parse("  travel "), Some(Category::Travel));
    assert_eq!(Category::parse("Groceries"), None);
    assert_eq!(Category::parse(""), None);
}

#[test]
fn test_category_parse_roundtrips_display_names() {
    for cat in Category::ALL {
        assert_eq!(Category::parse(&cat.to_string()), Some(cat));
    }
}

#[test]
fn test_category_random_is_member() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        assert!(Category::ALL.contains(&Category::random(&mut rng)));
    }
}

#[test]
fn test_category_random_reaches_every_category() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..2000 {
        seen.insert(Category::random(&mut rng));
    }
    assert_eq!(seen.len(), Category::ALL.len());
}

// ── BudgetTable ───────────────────────────────────────────────

#[test]
fn test_default_budget_covers_every_category() {
    let table = BudgetTable::default();
    let keys: Vec<Category> = table.iter().map(|(c, _)| c).collect();
    assert_eq!(keys, Category::ALL.to_vec());
    assert_eq!(table.limit(Category::Housing), dec!(1000));
    assert_eq!(table.limit(Category::SustainableSpending), dec!(60));
}

#[test]
fn test_default_budget_total() {
    assert_eq!(BudgetTable::default().total(), dec!(2770));
}

#[test]
fn test_budget_overwrite() {
    let mut table = BudgetTable::default();
    table.set(Category::Food, dec!(525.50)).unwrap();
    assert_eq!(table.limit(Category::Food), dec!(525.50));
    table.set(Category::Food, Decimal::ZERO).unwrap();
    assert_eq!(table.limit(Category::Food), Decimal::ZERO);
}

#[test]
fn test_budget_rejects_negative() {
    let mut table = BudgetTable::default();
    let err = table.set(Category::Travel, dec!(-1)).unwrap_err();
    assert_eq!(
        err,
        BudgetError::NegativeLimit {
            category: Category::Travel,
            amount: dec!(-1)
        }
    );
    assert_eq!(table.limit(Category::Travel), dec!(120));
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_transaction_in_month() {
    let txn = Transaction::new(date(2024, 3, 31), Category::Food, "Lunch".into(), dec!(12));
    assert!(txn.in_month(date(2024, 3, 1)));
    assert!(txn.in_month(date(2024, 3, 15)));
    assert!(!txn.in_month(date(2024, 4, 1)));
    assert!(!txn.in_month(date(2023, 3, 1)));
}

// ── Profile ───────────────────────────────────────────────────

#[test]
fn test_profile_defaults() {
    let profile = Profile::default();
    assert_eq!(profile.income, dec!(4000));
    assert!(profile.goal.is_empty());
    assert!(!profile.crypto_tracking);
    assert!(!profile.sustainability_tracking);
}
