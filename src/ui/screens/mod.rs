pub(crate) mod budgets;
pub(crate) mod dashboard;
pub(crate) mod expenses;
pub(crate) mod forecast;
pub(crate) mod profile;

use ratatui::{
    text::Span,
    widgets::{Block, Borders},
};

use super::theme;

/// Bordered block with the dim bold title every screen panel uses.
pub(crate) fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(ratatui::style::Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {} ", title.into()), theme::title_style()))
}
