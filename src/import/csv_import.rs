use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::categorize::Categorizer;
use crate::models::{Category, Transaction};

// Two-digit years go first; %Y would read "24" as the year 24.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%m-%d-%Y", "%d/%m/%Y"];

/// Column positions located from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CsvLayout {
    pub(crate) date_column: usize,
    pub(crate) description_column: usize,
    pub(crate) amount_column: usize,
    pub(crate) category_column: Option<usize>,
}

impl CsvLayout {
    pub(crate) fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Ok(Self {
            date_column: find("date").context("CSV has no 'Date' column")?,
            description_column: find("description")
                .context("CSV has no 'Description' column")?,
            amount_column: find("amount").context("CSV has no 'Amount' column")?,
            category_column: find("category"),
        })
    }
}

#[derive(Debug)]
pub(crate) struct ImportResult {
    pub(crate) transactions: Vec<Transaction>,
    /// Rows with a zero amount.
    pub(crate) skipped: usize,
    /// Rows whose category came from the categorizer rather than the file.
    pub(crate) auto_categorized: usize,
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    pub(crate) fn from_path<R: Rng + ?Sized>(
        path: &Path,
        categorizer: &Categorizer,
        rng: &mut R,
    ) -> Result<ImportResult> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        let result = Self::read(file, categorizer, rng)?;
        tracing::info!(
            path = %path.display(),
            rows = result.transactions.len(),
            skipped = result.skipped,
            "imported expenses"
        );
        Ok(result)
    }

    /// Parse an expense CSV. Blank or unrecognised category cells are filled
    /// by the categorizer.
    pub(crate) fn read<R: Rng + ?Sized, In: Read>(
        input: In,
        categorizer: &Categorizer,
        rng: &mut R,
    ) -> Result<ImportResult> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(input);

        let headers: Vec<String> = rdr
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|s| s.to_string())
            .collect();
        let layout = CsvLayout::from_headers(&headers)?;

        let mut result = ImportResult {
            transactions: Vec::new(),
            skipped: 0,
            auto_categorized: 0,
        };

        for (i, record) in rdr.records().enumerate() {
            // Header is line 1
            let line = i + 2;
            let record = record.with_context(|| format!("Row {line}: failed to read record"))?;
            let field = |col: usize| record.get(col).map(str::trim).unwrap_or("");

            let date_str = field(layout.date_column);
            if date_str.is_empty() {
                continue;
            }
            let date = parse_date(date_str)
                .with_context(|| format!("Row {line}: failed to parse date '{date_str}'"))?;

            let amount = parse_decimal(field(layout.amount_column))
                .with_context(|| format!("Row {line}: failed to parse amount"))?
                .abs();
            if amount.is_zero() {
                tracing::warn!(line, "skipping zero-amount row");
                result.skipped += 1;
                continue;
            }

            let description = field(layout.description_column).to_string();
            if description.is_empty() {
                anyhow::bail!("Row {line}: description is empty");
            }
            let category = match layout
                .category_column
                .and_then(|c| Category::parse(field(c)))
            {
                Some(c) => c,
                None => {
                    result.auto_categorized += 1;
                    categorizer.categorize(&description, rng)
                }
            };

            result
                .transactions
                .push(Transaction::new(date, category, description, amount));
        }

        Ok(result)
    }
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

pub(crate) fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_str(&cleaned.replace('"', "")))
        .context(format!("Failed to parse '{}' as decimal", s))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
