use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::forecast::{self, ForecastError, ProjectedMonth};
use crate::models::{BudgetError, BudgetTable, Category, Profile, Transaction};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LedgerError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("income cannot be negative (got {0})")]
    NegativeIncome(Decimal),
    #[error(transparent)]
    Budget(#[from] BudgetError),
    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

/// Which expenses a listing or export should include.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExpenseFilter {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
    pub(crate) category: Option<Category>,
    pub(crate) search: Option<String>,
}

impl ExpenseFilter {
    /// First of the month containing `today` through `today`, all categories.
    pub(crate) fn month_to_date(today: NaiveDate) -> Self {
        Self {
            start: forecast::month_start(today),
            end: today,
            category: None,
            search: None,
        }
    }

    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        if txn.date < self.start || txn.date > self.end {
            return false;
        }
        if self.category.is_some_and(|c| c != txn.category) {
            return false;
        }
        match &self.search {
            Some(s) if !s.is_empty() => txn.description.to_lowercase().contains(&s.to_lowercase()),
            _ => true,
        }
    }
}

/// Budget versus actual spending for one category in one month.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetLine {
    pub(crate) category: Category,
    pub(crate) limit: Decimal,
    pub(crate) spent: Decimal,
}

impl BudgetLine {
    pub(crate) fn remaining(&self) -> Decimal {
        self.limit - self.spent
    }

    pub(crate) fn is_over(&self) -> bool {
        self.spent > self.limit
    }

    /// Spent as a fraction of the limit. Zero limits report 0 unless something
    /// was spent, which counts as fully used.
    pub(crate) fn ratio(&self) -> Decimal {
        if self.limit > Decimal::ZERO {
            self.spent / self.limit
        } else if self.spent > Decimal::ZERO {
            Decimal::ONE
        } else {
            Decimal::ZERO
        }
    }
}

/// The session: transaction log, budget table and profile. Lives only as
/// long as the process.
#[derive(Debug, Clone, Default)]
pub(crate) struct Ledger {
    transactions: Vec<Transaction>,
    budgets: BudgetTable,
    profile: Profile,
}

impl Ledger {
    pub(crate) fn new(budgets: BudgetTable, profile: Profile) -> Self {
        Self {
            transactions: Vec::new(),
            budgets,
            profile,
        }
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn add_expense(
        &mut self,
        date: NaiveDate,
        description: &str,
        amount: Decimal,
        category: Category,
    ) -> Result<&Transaction, LedgerError> {
        Self::validate(description, amount)?;
        let description = description.trim();

        tracing::debug!(%date, %category, %amount, "adding expense");
        self.transactions.push(Transaction::new(
            date,
            category,
            description.to_string(),
            amount,
        ));
        let idx = self.transactions.len() - 1;
        Ok(&self.transactions[idx])
    }

    /// Checks applied to every new expense.
    pub(crate) fn validate(description: &str, amount: Decimal) -> Result<(), LedgerError> {
        if description.trim().is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        Ok(())
    }

    /// Add every transaction, or none of them if any is invalid. Returns how
    /// many were added.
    pub(crate) fn extend(&mut self, txns: Vec<Transaction>) -> Result<usize, LedgerError> {
        for t in &txns {
            Self::validate(&t.description, t.amount)?;
        }
        let added = txns.len();
        for t in txns {
            self.add_expense(t.date, &t.description, t.amount, t.category)?;
        }
        Ok(added)
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Matching expenses, newest date first; among equal dates the most
    /// recently added comes first.
    pub(crate) fn filter(&self, filter: &ExpenseFilter) -> Vec<Transaction> {
        let mut out: Vec<Transaction> = self
            .transactions
            .iter()
            .rev()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn budgets(&self) -> &BudgetTable {
        &self.budgets
    }

    pub(crate) fn set_budget(&mut self, category: Category, limit: Decimal) -> Result<(), LedgerError> {
        self.budgets.set(category, limit)?;
        tracing::debug!(%category, %limit, "budget updated");
        Ok(())
    }

    // ── Profile ───────────────────────────────────────────────

    pub(crate) fn profile(&self) -> &Profile {
        &self.profile
    }

    pub(crate) fn set_income(&mut self, income: Decimal) -> Result<(), LedgerError> {
        if income < Decimal::ZERO {
            return Err(LedgerError::NegativeIncome(income));
        }
        self.profile.income = income;
        Ok(())
    }

    pub(crate) fn set_goal(&mut self, goal: &str) {
        self.profile.goal = goal.trim().to_string();
    }

    pub(crate) fn toggle_crypto_tracking(&mut self) -> bool {
        self.profile.crypto_tracking = !self.profile.crypto_tracking;
        self.profile.crypto_tracking
    }

    pub(crate) fn toggle_sustainability_tracking(&mut self) -> bool {
        self.profile.sustainability_tracking = !self.profile.sustainability_tracking;
        self.profile.sustainability_tracking
    }

    // ── Analytics ─────────────────────────────────────────────

    pub(crate) fn month_total(&self, month: NaiveDate) -> Decimal {
        forecast::monthly_total(&self.transactions, month)
    }

    pub(crate) fn category_total(&self, category: Category, month: NaiveDate) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.category == category && t.in_month(month))
            .map(|t| t.amount)
            .sum()
    }

    /// Spending per category for the month, zero-filled for every category.
    pub(crate) fn spending_by_category(&self, month: NaiveDate) -> Vec<(Category, Decimal)> {
        Category::ALL
            .iter()
            .map(|c| (*c, self.category_total(*c, month)))
            .collect()
    }

    pub(crate) fn budget_report(&self, month: NaiveDate) -> Vec<BudgetLine> {
        self.spending_by_category(month)
            .into_iter()
            .map(|(category, spent)| BudgetLine {
                category,
                limit: self.budgets.limit(category),
                spent,
            })
            .collect()
    }

    pub(crate) fn forecast<R: Rng + ?Sized>(
        &self,
        horizon: usize,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Vec<ProjectedMonth>, LedgerError> {
        Ok(forecast::project(&self.transactions, horizon, today, rng)?)
    }
}

#[cfg(test)]
mod tests;
