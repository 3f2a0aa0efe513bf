use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::app::{App, Screen};
use crate::export;
use crate::forecast::MAX_HORIZON;
use crate::import::{parse_date, parse_decimal, CsvImporter};
use crate::ledger::ExpenseFilter;
use crate::models::Category;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("f", "Go to Forecast", cmd_forecast, r);
    register_command!("forecast", "Go to Forecast", cmd_forecast, r);
    register_command!("p", "Go to Profile", cmd_profile, r);
    register_command!("profile", "Go to Profile", cmd_profile, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 2024-03-05 12.50 Lunch @Food)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a 12.50 Uber home)", cmd_add, r);
    register_command!(
        "guess",
        "Preview the category for a description",
        cmd_guess,
        r
    );
    register_command!(
        "budget",
        "Set budget (e.g. :budget Crypto Investment 200)",
        cmd_budget,
        r
    );
    register_command!(
        "filter",
        "Filter expenses (e.g. :filter 2024-01-01 2024-03-31 Food)",
        cmd_filter,
        r
    );
    register_command!(
        "cat",
        "Filter expenses by category (e.g. :cat Travel, :cat all)",
        cmd_category_filter,
        r
    );
    register_command!("clear", "Reset filter to month-to-date", cmd_clear_filter, r);
    register_command!(
        "search",
        "Search descriptions (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search descriptions (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "export",
        "Export filtered expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );
    register_command!(
        "load",
        "Load expenses from CSV (e.g. :load ~/expenses.csv)",
        cmd_load,
        r
    );
    register_command!("income", "Set monthly income (e.g. :income 4200)", cmd_income, r);
    register_command!("goal", "Set your goal (e.g. :goal buy a house)", cmd_goal, r);
    register_command!("crypto", "Toggle crypto tracking", cmd_crypto, r);
    register_command!("eco", "Toggle sustainability tracking", cmd_eco, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "predict",
        "Regenerate the forecast (e.g. :predict 24)",
        cmd_predict,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Argument parsing ─────────────────────────────────────────

/// A parsed `:add` command.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewExpense {
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
    pub(crate) description: String,
    pub(crate) category: Option<Category>,
}

const ADD_USAGE: &str = "Usage: :add [YYYY-MM-DD] <amount> <description> [@Category]";

/// `[date] <amount> <description> [@Category]`; the date defaults to `today`.
pub(crate) fn parse_add_args(args: &str, today: NaiveDate) -> Result<NewExpense, String> {
    let (body, category) = match args.rsplit_once(" @") {
        Some((body, cat)) => match Category::parse(cat) {
            Some(c) => (body, Some(c)),
            None => return Err(format!("Unknown category: {}", cat.trim())),
        },
        None => (args, None),
    };

    let mut tokens = body.split_whitespace();
    let first = tokens.next().ok_or(ADD_USAGE)?;
    let (date, amount_tok) = match parse_date(first) {
        Ok(d) => (d, tokens.next().ok_or(ADD_USAGE)?),
        Err(_) => (today, first),
    };
    let amount =
        parse_decimal(amount_tok).map_err(|_| format!("Invalid amount: {amount_tok}"))?;

    let description = tokens.collect::<Vec<_>>().join(" ");
    if description.is_empty() {
        return Err(ADD_USAGE.to_string());
    }

    Ok(NewExpense {
        date,
        amount,
        description,
        category,
    })
}

/// Accepts `YYYY-MM`, or a bare month number within the current year.
pub(crate) fn parse_month(args: &str, current: NaiveDate) -> Option<NaiveDate> {
    let month = if args.len() <= 2 {
        format!("{}-{args:0>2}", current.format("%Y"))
    } else {
        args.to_string()
    };
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_budgets();
    app.refresh_forecast()
}

fn cmd_expenses(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh_expenses();
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh_budgets();
    Ok(())
}

fn cmd_forecast(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Forecast;
    app.refresh_forecast()
}

fn cmd_profile(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Profile;
    app.refresh_budgets();
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App) -> anyhow::Result<()> {
    let new = match parse_add_args(args, app.today) {
        Ok(n) => n,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };

    match app.add_expense(new.date, &new.description, new.amount, new.category) {
        Ok(msg) => app.set_status(msg),
        Err(e) => app.set_status(format!("Could not add expense: {e}")),
    }
    Ok(())
}

fn cmd_guess(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :guess <description>");
        return Ok(());
    }
    match app.categorizer.match_rule(args) {
        Some(cat) => app.set_status(format!("'{args}' -> {cat}")),
        None => app.set_status(format!(
            "'{args}' matches no keyword; a random category would be used"
        )),
    }
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :budget <category> <amount>. Example: :budget Food 500");
        return Ok(());
    }

    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :budget <category> <amount>");
        return Ok(());
    }

    let amount_str = parts[0];
    let category_name = parts[1];

    let amount = match parse_decimal(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    let Some(category) = Category::parse(category_name) else {
        app.set_status(format!("Category '{category_name}' not found"));
        return Ok(());
    };

    match app.ledger.set_budget(category, amount) {
        Ok(()) => {
            app.refresh_budgets();
            app.set_status(format!("Budget for {category} set to ${amount:.2}"));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.splitn(3, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :filter <from> <to> [category]");
        return Ok(());
    }

    let (start, end) = match (parse_date(parts[0]), parse_date(parts[1])) {
        (Ok(s), Ok(e)) => (s, e),
        _ => {
            app.set_status("Invalid date. Use YYYY-MM-DD");
            return Ok(());
        }
    };
    if start > end {
        app.set_status("Start date must not be after end date");
        return Ok(());
    }

    let category = match parts.get(2).map(|s| s.trim()) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => match Category::parse(s) {
            Some(c) => Some(c),
            None => {
                app.set_status(format!("Category '{s}' not found"));
                return Ok(());
            }
        },
    };

    app.filter.start = start;
    app.filter.end = end;
    app.filter.category = category;
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.screen = Screen::Expenses;
    app.refresh_expenses();
    app.set_status(format!("{} expenses from {start} to {end}", app.expenses.len()));
    Ok(())
}

fn cmd_category_filter(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() || args.eq_ignore_ascii_case("all") {
        app.filter.category = None;
        app.set_status("Showing all categories");
    } else if let Some(c) = Category::parse(args) {
        app.filter.category = Some(c);
        app.set_status(format!("Showing {c}"));
    } else {
        app.set_status(format!("Category '{args}' not found"));
        return Ok(());
    }
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.screen = Screen::Expenses;
    app.refresh_expenses();
    Ok(())
}

fn cmd_clear_filter(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.filter = ExpenseFilter::month_to_date(app.today);
    app.search_input.clear();
    app.refresh_expenses();
    app.set_status("Filter reset to month-to-date");
    Ok(())
}

fn cmd_search(args: &str, app: &mut App) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Expenses;
    app.refresh_expenses();

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args}"));
    }

    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.expenses.is_empty() {
        app.set_status("No expenses found for the selected filters");
        return Ok(());
    }
    let path = if args.is_empty() {
        export::default_export_path(&app.month_label())
    } else {
        export::shellexpand(args)
    };
    match export::export_to_path(Path::new(&path), &app.expenses) {
        Ok(count) => app.set_status(format!("Exported {count} expenses to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}

fn cmd_load(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :load <file.csv>");
        return Ok(());
    }
    let path = export::shellexpand(args);
    let result = match CsvImporter::from_path(Path::new(&path), &app.categorizer, &mut app.rng) {
        Ok(r) => r,
        Err(e) => {
            app.set_status(format!("Load failed: {e:#}"));
            return Ok(());
        }
    };
    let auto = result.auto_categorized;
    let skipped = result.skipped;
    match app.ledger.extend(result.transactions) {
        Ok(count) => {
            app.refresh_all()?;
            app.set_status(format!(
                "Loaded {count} expenses ({auto} auto-categorized, {skipped} skipped)"
            ));
        }
        Err(e) => {
            app.refresh_all()?;
            app.set_status(format!("Load stopped: {e}"));
        }
    }
    Ok(())
}

fn cmd_income(args: &str, app: &mut App) -> anyhow::Result<()> {
    let income = match parse_decimal(args) {
        Ok(v) if !args.is_empty() => v,
        _ => {
            app.set_status("Usage: :income <amount>");
            return Ok(());
        }
    };
    match app.ledger.set_income(income) {
        Ok(()) => app.set_status(format!("Monthly income set to ${income:.2}")),
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App) -> anyhow::Result<()> {
    app.ledger.set_goal(args);
    if args.is_empty() {
        app.set_status("Goal cleared");
    } else {
        app.set_status(format!("Goal: {args}"));
    }
    Ok(())
}

fn cmd_crypto(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let on = app.ledger.toggle_crypto_tracking();
    app.set_status(format!("Crypto tracking {}", if on { "on" } else { "off" }));
    Ok(())
}

fn cmd_eco(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let on = app.ledger.toggle_sustainability_tracking();
    app.set_status(format!(
        "Sustainability tracking {}",
        if on { "on" } else { "off" }
    ));
    Ok(())
}

fn cmd_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.current_month = crate::forecast::month_start(app.today);
        app.refresh_budgets();
        app.set_status(format!("Switched to month: {}", app.month_label()));
        return Ok(());
    }

    match parse_month(args, app.current_month) {
        Some(m) => {
            app.current_month = m;
            app.refresh_budgets();
            app.set_status(format!("Switched to month: {}", app.month_label()));
        }
        None => app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-01)"),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.shift_month(1);
    app.set_status(format!("Month: {}", app.month_label()));
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.shift_month(-1);
    app.set_status(format!("Month: {}", app.month_label()));
    Ok(())
}

fn cmd_predict(args: &str, app: &mut App) -> anyhow::Result<()> {
    if !args.is_empty() {
        match args.parse::<usize>() {
            Ok(n) if (1..=MAX_HORIZON).contains(&n) => app.forecast_months = n,
            _ => {
                app.set_status(format!("Months must be a whole number from 1 to {MAX_HORIZON}"));
                return Ok(());
            }
        }
    }
    app.screen = Screen::Forecast;
    app.refresh_forecast()?;
    app.set_status(format!("Regenerated {}-month forecast", app.forecast_months));
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
