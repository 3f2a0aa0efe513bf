use chrono::{Datelike, Months, NaiveDate};
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Transaction;

pub(crate) const DEFAULT_HORIZON: usize = 12;
pub(crate) const MAX_HORIZON: usize = 120;

const NOISE_MIN: f64 = 10.0;
const NOISE_MAX: f64 = 100.0;
const GROWTH_PER_MONTH: f64 = 0.02;
const JITTER_MIN: f64 = -0.01;
const JITTER_MAX: f64 = 0.02;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ForecastError {
    #[error("horizon must be between 1 and {max} months, got {0}", max = MAX_HORIZON)]
    HorizonOutOfRange(usize),
    #[error("month window of {horizon} months before {today} is out of calendar range")]
    OutOfCalendar { horizon: usize, today: NaiveDate },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProjectedMonth {
    /// First day of the month.
    pub(crate) month: NaiveDate,
    pub(crate) amount: Decimal,
}

impl ProjectedMonth {
    /// Short chart label, e.g. `Mar 26`.
    pub(crate) fn label(&self) -> String {
        self.month.format("%b %y").to_string()
    }
}

pub(crate) fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// The `horizon` calendar months ending with the month of `today`, oldest first.
pub(crate) fn month_window(
    today: NaiveDate,
    horizon: usize,
) -> Result<Vec<NaiveDate>, ForecastError> {
    if horizon == 0 || horizon > MAX_HORIZON {
        return Err(ForecastError::HorizonOutOfRange(horizon));
    }
    let current = month_start(today);
    (0..horizon)
        .rev()
        .map(|back| {
            current
                .checked_sub_months(Months::new(back as u32))
                .ok_or(ForecastError::OutOfCalendar { horizon, today })
        })
        .collect()
}

/// Sum of all amounts dated in the month containing `month`.
pub(crate) fn monthly_total(transactions: &[Transaction], month: NaiveDate) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.in_month(month))
        .map(|t| t.amount)
        .sum()
}

/// Naive spending trend: each month's historical total plus uniform noise in
/// [10, 100], scaled by `1 + 0.02 * i + U(-0.01, 0.02)` where `i` is the
/// month's position in the window, and clamped at zero. Not a model; the only
/// guarantees are the output length and non-negative amounts.
pub(crate) fn project<R: Rng + ?Sized>(
    transactions: &[Transaction],
    horizon: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<ProjectedMonth>, ForecastError> {
    let window = month_window(today, horizon)?;

    let projected = window
        .into_iter()
        .enumerate()
        .map(|(i, month)| {
            let total = monthly_total(transactions, month).to_f64().unwrap_or(0.0);
            let noisy = total + rng.gen_range(NOISE_MIN..=NOISE_MAX);
            let multiplier =
                1.0 + GROWTH_PER_MONTH * i as f64 + rng.gen_range(JITTER_MIN..=JITTER_MAX);
            let value = (noisy * multiplier).max(0.0);
            ProjectedMonth {
                month,
                amount: Decimal::from_f64(value)
                    .unwrap_or(Decimal::ZERO)
                    .round_dp(2)
                    .max(Decimal::ZERO),
            }
        })
        .collect();

    Ok(projected)
}

#[cfg(test)]
mod tests;
