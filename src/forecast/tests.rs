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

fn txn(d: NaiveDate, amount: Decimal) -> Transaction {
    Transaction::new(d, Category::Food, "Groceries".into(), amount)
}

fn sample_log() -> Vec<Transaction> {
    vec![
        txn(date(2024, 3, 2), dec!(120.00)),
        txn(date(2024, 3, 20), dec!(30.50)),
        txn(date(2024, 1, 5), dec!(999.99)),
        txn(date(2023, 3, 9), dec!(45.00)),
        txn(date(2022, 3, 9), dec!(5000.00)),
    ]
}

// ── month_window ──────────────────────────────────────────────

#[test]
fn test_window_ends_at_current_month() {
    let window = month_window(date(2024, 3, 15), 12).unwrap();
    assert_eq!(window.len(), 12);
    assert_eq!(window[0], date(2023, 4, 1));
    assert_eq!(window[11], date(2024, 3, 1));
}

#[test]
fn test_window_crosses_year_boundary() {
    let window = month_window(date(2024, 1, 31), 3).unwrap();
    assert_eq!(window, vec![date(2023, 11, 1), date(2023, 12, 1), date(2024, 1, 1)]);
}

#[test]
fn test_window_rejects_bad_horizons() {
    assert_eq!(
        month_window(date(2024, 1, 1), 0),
        Err(ForecastError::HorizonOutOfRange(0))
    );
    assert_eq!(
        month_window(date(2024, 1, 1), MAX_HORIZON + 1),
        Err(ForecastError::HorizonOutOfRange(MAX_HORIZON + 1))
    );
    assert_eq!(month_window(date(2024, 1, 1), MAX_HORIZON).unwrap().len(), MAX_HORIZON);
}

// ── monthly_total ─────────────────────────────────────────────

#[test]
fn test_monthly_total_matches_month_and_year() {
    let log = sample_log();
    assert_eq!(monthly_total(&log, date(2024, 3, 1)), dec!(150.50));
    assert_eq!(monthly_total(&log, date(2023, 3, 1)), dec!(45.00));
    assert_eq!(monthly_total(&log, date(2024, 2, 1)), Decimal::ZERO);
}

// ── project ───────────────────────────────────────────────────

#[test]
fn test_project_length_and_non_negative() {
    let mut rng = StdRng::seed_from_u64(1);
    let series = project(&sample_log(), DEFAULT_HORIZON, date(2024, 3, 15), &mut rng).unwrap();
    assert_eq!(series.len(), 12);
    assert!(series.iter().all(|p| p.amount >= Decimal::ZERO));
}

#[test]
fn test_project_any_horizon_length() {
    let mut rng = StdRng::seed_from_u64(2);
    for horizon in [1, 6, 24, 60] {
        let series = project(&[], horizon, date(2024, 3, 15), &mut rng).unwrap();
        assert_eq!(series.len(), horizon);
    }
}

#[test]
fn test_project_empty_log_is_noise_only() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let series = project(&[], 12, date(2024, 3, 15), &mut rng).unwrap();
        for (i, p) in series.iter().enumerate() {
            let upper = dec!(100) * (dec!(1.02) + dec!(0.02) * Decimal::from(i as u32));
            assert!(p.amount > Decimal::ZERO);
            assert!(p.amount >= dec!(9.9), "month {i}: {}", p.amount);
            assert!(p.amount <= upper, "month {i}: {} > {upper}", p.amount);
        }
    }
}

#[test]
fn test_project_oldest_first_with_labels() {
    let mut rng = StdRng::seed_from_u64(3);
    let series = project(&[], 12, date(2024, 3, 15), &mut rng).unwrap();
    assert_eq!(series[0].label(), "Apr 23");
    assert_eq!(series[11].label(), "Mar 24");
    assert!(series.windows(2).all(|w| w[0].month < w[1].month));
}

#[test]
fn test_project_reflects_history() {
    let log = vec![txn(date(2024, 3, 1), dec!(10000))];
    let mut rng = StdRng::seed_from_u64(4);
    let series = project(&log, 12, date(2024, 3, 15), &mut rng).unwrap();
    // Latest month: (10000 + noise) * (1.22 + jitter), jitter >= -0.01
    assert!(series[11].amount >= dec!(12100));
    // Oldest month has no history: noise * (1 + jitter)
    assert!(series[0].amount <= dec!(102));
}

#[test]
fn test_project_ignores_transactions_outside_window() {
    let log = vec![txn(date(2020, 1, 1), dec!(100000))];
    let mut rng = StdRng::seed_from_u64(5);
    let series = project(&log, 12, date(2024, 3, 15), &mut rng).unwrap();
    assert!(series.iter().all(|p| p.amount < dec!(125)));
}

#[test]
fn test_project_reproducible_under_seed() {
    let log = sample_log();
    let mut a = StdRng::seed_from_u64(77);
    let mut b = StdRng::seed_from_u64(77);
    assert_eq!(
        project(&log, 12, date(2024, 3, 15), &mut a).unwrap(),
        project(&log, 12, date(2024, 3, 15), &mut b).unwrap()
    );
}

#[test]
fn test_project_amounts_rounded_to_cents() {
    let mut rng = StdRng::seed_from_u64(6);
    let series = project(&sample_log(), 12, date(2024, 3, 15), &mut rng).unwrap();
    assert!(series.iter().all(|p| p.amount.scale() <= 2));
}

#[test]
fn test_project_rejects_zero_horizon() {
    let mut rng = StdRng::seed_from_u64(8);
    assert_eq!(
        project(&sample_log(), 0, date(2024, 3, 15), &mut rng),
        Err(ForecastError::HorizonOutOfRange(0))
    );
}
