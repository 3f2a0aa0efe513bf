use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::forecast::{DEFAULT_HORIZON, MAX_HORIZON};
use crate::models::{BudgetTable, Category, KeywordRule, Profile};

const CONFIG_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "EXPENSETUI";

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("unknown category '{0}' in configuration")]
    UnknownCategory(String),
    #[error("forecast_months must be between 1 and {max}, got {0}", max = MAX_HORIZON)]
    ForecastMonths(usize),
    #[error("invalid budget for {category}: {source}")]
    Budget {
        category: Category,
        source: crate::models::BudgetError,
    },
}

#[derive(Debug, Deserialize)]
pub(crate) struct Settings {
    #[serde(default = "default_income")]
    pub(crate) income: Decimal,
    #[serde(default)]
    pub(crate) goal: String,
    #[serde(default)]
    pub(crate) crypto_tracking: bool,
    #[serde(default)]
    pub(crate) sustainability_tracking: bool,
    #[serde(default = "default_forecast_months")]
    pub(crate) forecast_months: usize,
    /// Fixed RNG seed; entropy when absent.
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Category name -> monthly limit, overriding the defaults.
    #[serde(default)]
    pub(crate) budgets: HashMap<String, Decimal>,
    #[serde(default)]
    pub(crate) rules: Vec<RuleSetting>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RuleSetting {
    pub(crate) pattern: String,
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) regex: bool,
}

fn default_income() -> Decimal {
    Profile::default().income
}

fn default_forecast_months() -> usize {
    DEFAULT_HORIZON
}

impl Settings {
    /// Layer an optional TOML file under `EXPENSETUI_*` environment variables.
    pub(crate) fn new(config_path: Option<&Path>) -> Result<Self, SettingsError> {
        let path = config_path.map(Path::to_path_buf).or_else(default_config_path);

        let mut s = Config::builder();
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "loading configuration");
            s = s.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(false));
        }
        s = s.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let settings: Self = s.build()?.try_deserialize()?;
        if !(1..=MAX_HORIZON).contains(&settings.forecast_months) {
            return Err(SettingsError::ForecastMonths(settings.forecast_months));
        }
        Ok(settings)
    }

    pub(crate) fn budget_table(&self) -> Result<BudgetTable, SettingsError> {
        let mut table = BudgetTable::default();
        for (name, limit) in &self.budgets {
            let category = parse_category(name)?;
            table
                .set(category, *limit)
                .map_err(|source| SettingsError::Budget { category, source })?;
        }
        Ok(table)
    }

    pub(crate) fn profile(&self) -> Profile {
        Profile {
            income: self.income.max(Decimal::ZERO),
            goal: self.goal.clone(),
            crypto_tracking: self.crypto_tracking,
            sustainability_tracking: self.sustainability_tracking,
        }
    }

    pub(crate) fn keyword_rules(&self) -> Result<Vec<KeywordRule>, SettingsError> {
        self.rules
            .iter()
            .map(|r| {
                let category = parse_category(&r.category)?;
                Ok(if r.regex {
                    KeywordRule::new_regex(r.pattern.clone(), category)
                } else {
                    KeywordRule::new_contains(r.pattern.clone(), category)
                })
            })
            .collect()
    }
}

fn parse_category(name: &str) -> Result<Category, SettingsError> {
    Category::parse(name).ok_or_else(|| SettingsError::UnknownCategory(name.to_string()))
}

/// `$EXPENSETUI_CONFIG`, else `config.toml` in the platform config directory.
pub(crate) fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(format!("{ENV_PREFIX}_CONFIG")) {
        return Some(PathBuf::from(path));
    }
    directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .map(|dirs| dirs.config_dir().join(CONFIG_NAME))
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
