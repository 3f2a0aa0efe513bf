use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

pub(crate) const HEADER: [&str; 4] = ["Date", "Category", "Description", "Amount"];

/// Write expenses as CSV with a header row. Returns the number of rows written.
pub(crate) fn write_expenses<W: Write>(writer: W, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for txn in transactions {
        wtr.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            txn.category.to_string(),
            txn.description.clone(),
            format!("{:.2}", txn.amount),
        ])?;
    }
    wtr.flush()?;
    Ok(transactions.len())
}

pub(crate) fn export_to_path(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_expenses(file, transactions)?;
    tracing::info!(path = %path.display(), rows = count, "exported expenses");
    Ok(count)
}

/// Default export location: `~/expensetui-export-<YYYY-MM>.csv`.
pub(crate) fn default_export_path(month_label: &str) -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    format!("{home}/expensetui-export-{month_label}.csv")
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
