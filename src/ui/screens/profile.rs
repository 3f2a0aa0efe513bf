use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let profile = app.ledger.profile();
    let budget_total = app.ledger.budgets().total();
    let unbudgeted = profile.income - budget_total;

    let goal = if profile.goal.is_empty() {
        Span::styled("not set (:goal <text>)", theme::dim_style())
    } else {
        Span::styled(profile.goal.as_str(), theme::normal_style())
    };

    let latest = match app.ledger.transactions().last() {
        Some(txn) => Span::styled(
            format!(
                "{} {} ({}, {})",
                txn.date,
                txn.description,
                txn.category,
                format_amount(txn.amount)
            ),
            theme::normal_style(),
        ),
        None => Span::styled("none yet", theme::dim_style()),
    };

    let lines = vec![
        Line::from(""),
        row(
            "Monthly income",
            Span::styled(
                format_amount(profile.income),
                Style::default()
                    .fg(theme::GREEN)
                    .add_modifier(Modifier::BOLD),
            ),
        ),
        row("Goal", goal),
        row("Crypto tracking", toggle(profile.crypto_tracking)),
        row("Sustainability", toggle(profile.sustainability_tracking)),
        Line::from(""),
        row(
            "Total budget",
            Span::styled(format_amount(budget_total), theme::normal_style()),
        ),
        row(
            "Unbudgeted income",
            Span::styled(
                format_amount(unbudgeted),
                Style::default().fg(if unbudgeted >= Decimal::ZERO {
                    theme::GREEN
                } else {
                    theme::RED
                }),
            ),
        ),
        row(
            "Expenses recorded",
            Span::styled(app.ledger.transaction_count().to_string(), theme::normal_style()),
        ),
        row("Latest expense", latest),
        row(
            "Keyword rules",
            Span::styled(app.categorizer.rule_count().to_string(), theme::normal_style()),
        ),
    ];

    f.render_widget(Paragraph::new(lines).block(panel("Profile")), area);
}

fn row<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {label:<20}"), theme::dim_style()),
        value,
    ])
}

fn toggle(on: bool) -> Span<'static> {
    if on {
        Span::styled("on", Style::default().fg(theme::GREEN))
    } else {
        Span::styled("off", theme::dim_style())
    }
}
