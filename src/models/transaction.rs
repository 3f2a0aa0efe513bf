use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::Category;

/// One recorded expense. Amounts are non-negative; validation happens in the
/// ledger before a transaction is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, category: Category, description: String, amount: Decimal) -> Self {
        Self {
            date,
            category,
            description,
            amount,
        }
    }

    /// True when the transaction falls in the calendar month containing `month`.
    pub fn in_month(&self, month: NaiveDate) -> bool {
        self.date.year() == month.year() && self.date.month() == month.month()
    }
}
