mod categorize;
mod export;
mod forecast;
mod import;
mod ledger;
mod models;
mod run;
mod settings;
mod ui;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::categorize::Categorizer;
use crate::ledger::Ledger;
use crate::settings::Settings;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // The TUI owns the terminal, so only plain CLI commands log
    let is_tui = args.len() == 1 || matches!(args[1].as_str(), "open" | "o");
    if !is_tui {
        init_tracing();
    }

    let session = build_session().context("Failed to load configuration")?;

    if is_tui && args.len() == 1 {
        run::as_tui(session.into_app())
    } else {
        run::as_cli(&args, session)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_session() -> Result<run::Session> {
    let settings = Settings::new(None)?;
    let ledger = Ledger::new(settings.budget_table()?, settings.profile());
    let categorizer = Categorizer::new(&settings.keyword_rules()?);
    tracing::debug!(rules = categorizer.rule_count(), "categorizer ready");

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    Ok(run::Session {
        ledger,
        categorizer,
        rng,
        forecast_months: settings.forecast_months,
    })
}
