use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::models::Category;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, to_u64, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Min(10),   // Budget vs spent
            Constraint::Length(4), // Forecast sparkline
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_budget_chart(f, chunks[1], app);
    render_forecast_sparkline(f, chunks[2], app);
}

struct Card {
    title: &'static str,
    value: String,
    color: Color,
    subtitle: String,
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let profile = app.ledger.profile();
    let budget_total = app.ledger.budgets().total();
    let remaining = profile.income - app.month_spent;

    let mut cards = vec![
        Card {
            title: "Income",
            value: format_amount(profile.income),
            color: theme::GREEN,
            subtitle: "monthly".into(),
        },
        Card {
            title: "Spent",
            value: format_amount(app.month_spent),
            color: theme::RED,
            subtitle: app.month_label(),
        },
        Card {
            title: "Remaining",
            value: format_amount(remaining),
            color: if remaining >= Decimal::ZERO {
                theme::GREEN
            } else {
                theme::RED
            },
            subtitle: "income - spent".into(),
        },
        Card {
            title: "Total Budget",
            value: format_amount(budget_total),
            color: theme::ACCENT,
            subtitle: format!("{} categories", Category::ALL.len()),
        },
    ];

    if profile.crypto_tracking {
        let spent = app
            .ledger
            .category_total(Category::CryptoInvestment, app.current_month);
        cards.push(Card {
            title: "Crypto",
            value: format_amount(spent),
            color: theme::PEACH,
            subtitle: "invested this month".into(),
        });
    }
    if profile.sustainability_tracking {
        let spent = app
            .ledger
            .category_total(Category::SustainableSpending, app.current_month);
        cards.push(Card {
            title: "Eco",
            value: format_amount(spent),
            color: theme::TEAL,
            subtitle: "sustainable spending".into(),
        });
    }

    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, slot) in cards.into_iter().zip(slots.iter()) {
        render_card(f, *slot, card);
    }
}

fn render_card(f: &mut Frame, area: Rect, card: Card) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            card.value,
            Style::default().fg(card.color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.subtitle, theme::dim_style())),
    ])
    .centered()
    .block(panel(card.title));

    f.render_widget(text, area);
}

fn render_budget_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = panel(format!(
        "Budget vs Spent, {} (blue: budget, green/red: spent)",
        app.month_label()
    ));

    if app.budget_report.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No budget data. Add an expense with :add",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let groups: Vec<BarGroup> = app
        .budget_report
        .iter()
        .map(|line| {
            let spent_color = if line.is_over() {
                theme::RED
            } else {
                theme::GREEN
            };
            BarGroup::default()
                .label(Line::from(truncate(line.category.as_str(), 7)))
                .bars(&[
                    Bar::default()
                        .value(to_u64(line.limit))
                        .style(Style::default().fg(theme::ACCENT))
                        .text_value(String::new()),
                    Bar::default()
                        .value(to_u64(line.spent))
                        .style(Style::default().fg(spent_color))
                        .text_value(String::new()),
                ])
        })
        .collect();

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(3)
        .bar_gap(0)
        .group_gap(1);
    for group in groups {
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}

fn render_forecast_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<u64> = app.forecast.iter().map(|m| to_u64(m.amount)).collect();
    let title = match (app.forecast.first(), app.forecast.last()) {
        (Some(first), Some(last)) => format!(
            "Forecast {} to {}",
            first.label(),
            last.label()
        ),
        _ => "Forecast".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(panel(title))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}
