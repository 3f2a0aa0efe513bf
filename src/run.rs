mod cli;
mod tui;

use rand::rngs::StdRng;

use crate::categorize::Categorizer;
use crate::ledger::Ledger;
use crate::ui::app::App;

pub(crate) use cli::as_cli;
pub(crate) use tui::as_tui;

/// Everything a surface needs: the session state plus the random source
/// and projection horizon taken from configuration.
pub(crate) struct Session {
    pub(crate) ledger: Ledger,
    pub(crate) categorizer: Categorizer,
    pub(crate) rng: StdRng,
    pub(crate) forecast_months: usize,
}

impl Session {
    pub(crate) fn into_app(self) -> App {
        App::new(
            self.ledger,
            self.categorizer,
            self.rng,
            self.forecast_months,
        )
    }
}
