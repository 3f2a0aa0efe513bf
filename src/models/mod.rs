mod budget;
mod category;
mod keyword_rule;
mod profile;
mod transaction;

pub use budget::{BudgetError, BudgetTable};
pub use category::Category;
pub use keyword_rule::KeywordRule;
pub use profile::Profile;
pub use transaction::Transaction;

#[cfg(test)]
mod tests;
