use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;

use super::Category;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    #[error("budget for {category} cannot be negative (got {amount})")]
    NegativeLimit { category: Category, amount: Decimal },
}

/// Monthly limit per category. Every category always has an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTable {
    limits: BTreeMap<Category, Decimal>,
}

impl Default for BudgetTable {
    fn default() -> Self {
        Self {
            limits: Category::ALL
                .iter()
                .map(|c| (*c, c.default_limit()))
                .collect(),
        }
    }
}

impl BudgetTable {
    pub fn limit(&self, category: Category) -> Decimal {
        self.limits.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, category: Category, amount: Decimal) -> Result<(), BudgetError> {
        if amount < Decimal::ZERO {
            return Err(BudgetError::NegativeLimit { category, amount });
        }
        self.limits.insert(category, amount);
        Ok(())
    }

    /// Entries in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.limits.iter().map(|(c, a)| (*c, *a))
    }

    pub fn total(&self) -> Decimal {
        self.iter().map(|(_, limit)| limit).sum()
    }
}
