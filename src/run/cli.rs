use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

use super::Session;
use crate::categorize::Source;
use crate::export;
use crate::forecast;
use crate::import::{parse_date, CsvImporter};
use crate::ledger::ExpenseFilter;
use crate::models::Category;

pub(crate) fn as_cli(args: &[String], mut session: Session) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "open" | "o" => cli_open(rest, session),
        "categorize" | "c" => cli_categorize(rest, &mut session),
        "forecast" | "f" => cli_forecast(rest, &mut session),
        "summary" | "s" => cli_summary(rest, &mut session),
        "filter" => cli_filter(rest, &mut session),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensetui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ExpenseTUI: expense tracker with budgets and spending forecasts");
    println!();
    println!("Usage: expensetui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  open <file.csv>               Launch TUI with expenses loaded from CSV");
    println!("  categorize <description>      Show the category a description gets");
    println!("  forecast <file.csv>           Print the projected monthly spending");
    println!("    --months <N>                Months to project (default: from config, 12)");
    println!("    --seed <S>                  Seed the random noise");
    println!("  summary <file.csv> [YYYY-MM]  Budget vs spent for a month (default: current)");
    println!("  filter <file.csv>             List expenses in a date range");
    println!("    --from <YYYY-MM-DD>         Start date (inclusive)");
    println!("    --to <YYYY-MM-DD>           End date (inclusive)");
    println!("    --category <name>           Only this category");
    println!("    --out <path>                Write CSV instead of printing");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Configuration: $EXPENSETUI_CONFIG or the platform config directory");
    println!("(config.toml), overridden by EXPENSETUI_* environment variables.");
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn load(args: &[String], session: &mut Session, usage: &str) -> Result<()> {
    let file_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    let path = export::shellexpand(file_path);
    let path = Path::new(&path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let result = CsvImporter::from_path(path, &session.categorizer, &mut session.rng)?;
    let count = session
        .ledger
        .extend(result.transactions)
        .with_context(|| format!("Invalid expense in {file_path}"))?;
    tracing::info!(
        count,
        skipped = result.skipped,
        auto_categorized = result.auto_categorized,
        "loaded expenses"
    );
    Ok(())
}

fn cli_open(args: &[String], mut session: Session) -> Result<()> {
    load(args, &mut session, "expensetui open <file.csv>")?;
    super::as_tui(session.into_app())
}

fn cli_categorize(args: &[String], session: &mut Session) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: expensetui categorize <description>");
    }
    let description = args.join(" ");
    let (category, source) = session
        .categorizer
        .categorize_with_source(&description, &mut session.rng);
    match source {
        Source::Keyword => println!("{category}"),
        Source::Random => println!("{category} (no keyword matched, picked at random)"),
    }
    Ok(())
}

fn cli_forecast(args: &[String], session: &mut Session) -> Result<()> {
    load(args, session, "expensetui forecast <file.csv> [--months N] [--seed S]")?;

    let months = match flag(args, "--months") {
        Some(m) => m
            .parse::<usize>()
            .with_context(|| format!("Invalid --months value: {m}"))?,
        None => session.forecast_months,
    };
    if let Some(seed) = flag(args, "--seed") {
        let seed = seed
            .parse::<u64>()
            .with_context(|| format!("Invalid --seed value: {seed}"))?;
        session.rng = StdRng::seed_from_u64(seed);
    }

    let today = Local::now().date_naive();
    let projection = session.ledger.forecast(months, today, &mut session.rng)?;

    println!("Spending forecast ({months} months)");
    println!("{}", "─".repeat(30));
    for month in &projection {
        println!("  {:<8} {:>14}", month.label(), format!("${:.2}", month.amount));
    }
    Ok(())
}

fn cli_summary(args: &[String], session: &mut Session) -> Result<()> {
    load(args, session, "expensetui summary <file.csv> [YYYY-MM]")?;

    let month = match args.get(1).filter(|a| !a.starts_with('-')) {
        Some(m) => NaiveDate::parse_from_str(&format!("{m}-01"), "%Y-%m-%d")
            .with_context(|| format!("Invalid month: {m} (expected YYYY-MM)"))?,
        None => forecast::month_start(Local::now().date_naive()),
    };

    let ledger = &session.ledger;
    let profile = ledger.profile();
    let spent = ledger.month_total(month);

    println!("ExpenseTUI {}", month.format("%Y-%m"));
    println!("{}", "─".repeat(60));
    println!("  Income:     ${:.2}", profile.income);
    println!("  Spent:      ${:.2}", spent);
    println!("  Remaining:  ${:.2}", profile.income - spent);
    println!("  Budget:     ${:.2}", ledger.budgets().total());
    if !profile.goal.is_empty() {
        println!("  Goal:       {}", profile.goal);
    }

    println!();
    println!(
        "  {:<22} {:>12} {:>12} {:>12}",
        "Category", "Budget", "Spent", "Remaining"
    );
    for line in ledger.budget_report(month) {
        println!(
            "  {:<22} {:>12} {:>12} {:>12}{}",
            line.category.as_str(),
            format!("${:.2}", line.limit),
            format!("${:.2}", line.spent),
            format!("${:.2}", line.remaining()),
            if line.is_over() { "  OVER" } else { "" }
        );
    }

    Ok(())
}

fn cli_filter(args: &[String], session: &mut Session) -> Result<()> {
    load(
        args,
        session,
        "expensetui filter <file.csv> [--from D] [--to D] [--category C] [--out PATH]",
    )?;

    let filter = ExpenseFilter {
        start: match flag(args, "--from") {
            Some(d) => parse_date(d)?,
            None => NaiveDate::MIN,
        },
        end: match flag(args, "--to") {
            Some(d) => parse_date(d)?,
            None => NaiveDate::MAX,
        },
        category: flag(args, "--category")
            .map(|c| Category::parse(c).ok_or_else(|| anyhow::anyhow!("Unknown category: {c}")))
            .transpose()?,
        search: None,
    };
    if filter.start > filter.end {
        anyhow::bail!("--from must not be after --to");
    }

    let expenses = session.ledger.filter(&filter);

    if let Some(out) = flag(args, "--out") {
        let path = export::shellexpand(out);
        let count = export::export_to_path(Path::new(&path), &expenses)?;
        println!("Exported {count} expenses to {path}");
        return Ok(());
    }

    if expenses.is_empty() {
        println!("No expenses match");
        return Ok(());
    }
    println!(
        "{:<12} {:<22} {:<32} {:>12}",
        "Date", "Category", "Description", "Amount"
    );
    println!("{}", "─".repeat(80));
    for txn in &expenses {
        println!(
            "{:<12} {:<22} {:<32} {:>12}",
            txn.date.to_string(),
            txn.category.as_str(),
            txn.description,
            format!("${:.2}", txn.amount)
        );
    }
    Ok(())
}
