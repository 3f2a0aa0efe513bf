use anyhow::Result;
use chrono::{Local, Months, NaiveDate};
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use crate::categorize::{Categorizer, Source};
use crate::forecast::{self, ProjectedMonth};
use crate::ledger::{BudgetLine, ExpenseFilter, Ledger};
use crate::models::{Category, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Budgets,
    Forecast,
    Profile,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Expenses,
            Self::Budgets,
            Self::Forecast,
            Self::Profile,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Forecast => write!(f, "Forecast"),
            Self::Profile => write!(f, "Profile"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,
    /// First day of the month the dashboard and budgets describe.
    pub(crate) current_month: NaiveDate,

    // Session
    pub(crate) ledger: Ledger,
    pub(crate) categorizer: Categorizer,
    pub(crate) rng: StdRng,

    // Expenses
    pub(crate) filter: ExpenseFilter,
    pub(crate) expenses: Vec<Transaction>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Budgets / dashboard
    pub(crate) budget_report: Vec<BudgetLine>,
    pub(crate) budget_index: usize,
    pub(crate) month_spent: Decimal,

    // Forecast
    pub(crate) forecast_months: usize,
    pub(crate) forecast: Vec<ProjectedMonth>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(
        ledger: Ledger,
        categorizer: Categorizer,
        rng: StdRng,
        forecast_months: usize,
    ) -> Self {
        Self::with_today(ledger, categorizer, rng, forecast_months, Local::now().date_naive())
    }

    pub(crate) fn with_today(
        ledger: Ledger,
        categorizer: Categorizer,
        rng: StdRng,
        forecast_months: usize,
        today: NaiveDate,
    ) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today,
            current_month: forecast::month_start(today),

            ledger,
            categorizer,
            rng,

            filter: ExpenseFilter::month_to_date(today),
            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,

            budget_report: Vec::new(),
            budget_index: 0,
            month_spent: Decimal::ZERO,

            forecast_months,
            forecast: Vec::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn month_label(&self) -> String {
        self.current_month.format("%Y-%m").to_string()
    }

    pub(crate) fn refresh_expenses(&mut self) {
        let mut filter = self.filter.clone();
        if !self.search_input.is_empty() {
            filter.search = Some(self.search_input.clone());
        }
        self.expenses = self.ledger.filter(&filter);
        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
    }

    pub(crate) fn refresh_budgets(&mut self) {
        self.budget_report = self.ledger.budget_report(self.current_month);
        self.month_spent = self.ledger.month_total(self.current_month);
    }

    /// Draws a fresh projection; the series is never reused between requests.
    pub(crate) fn refresh_forecast(&mut self) -> Result<()> {
        self.forecast = self
            .ledger
            .forecast(self.forecast_months, self.today, &mut self.rng)?;
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self) -> Result<()> {
        self.refresh_expenses();
        self.refresh_budgets();
        self.refresh_forecast()
    }

    /// Record an expense, categorizing it when no category is given. Returns
    /// a status line describing what was stored.
    pub(crate) fn add_expense(
        &mut self,
        date: NaiveDate,
        description: &str,
        amount: Decimal,
        category: Option<Category>,
    ) -> Result<String> {
        // Invalid input must not consume from the seeded rng
        Ledger::validate(description, amount)?;
        let (category, source) = match category {
            Some(c) => (c, None),
            None => {
                let (c, s) = self.categorizer.categorize_with_source(description, &mut self.rng);
                (c, Some(s))
            }
        };
        let txn = self.ledger.add_expense(date, description, amount, category)?;
        let how = match source {
            Some(Source::Keyword) => " (keyword match)",
            Some(Source::Random) => " (no keyword, picked at random)",
            None => "",
        };
        let msg = format!("Added '{}' under {}{how}", txn.description, txn.category);
        self.refresh_all()?;
        Ok(msg)
    }

    pub(crate) fn shift_month(&mut self, delta: i32) {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.current_month.checked_add_months(months)
        } else {
            self.current_month.checked_sub_months(months)
        };
        if let Some(m) = shifted {
            self.current_month = m;
            self.refresh_budgets();
        }
    }

    /// Table rows that fit under the header and borders.
    pub(crate) fn expense_page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
