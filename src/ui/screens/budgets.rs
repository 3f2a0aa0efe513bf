use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, to_f64, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = app
        .budget_report
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let ratio = to_f64(line.ratio());
            let color = theme::usage_color(ratio);

            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let flag = if line.is_over() {
                format!("  over by {}", format_amount(-line.remaining()))
            } else {
                format!("  {} left", format_amount(line.remaining()))
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<22}", truncate(line.category.as_str(), 21)), style),
                Span::styled(
                    format!(
                        "{:>11} / {:<11}",
                        format_amount(line.spent),
                        format_amount(line.limit)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>4.0}%", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(flag, theme::dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(panel(format!("Budgets for {}", app.month_label())));
    f.render_widget(list, chunks[0]);

    render_totals(f, chunks[1], app);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let limit: Decimal = app.budget_report.iter().map(|l| l.limit).sum();
    let over = app.budget_report.iter().filter(|l| l.is_over()).count();
    let color = if app.month_spent > limit {
        theme::RED
    } else {
        theme::GREEN
    };

    let line = Line::from(vec![
        Span::styled(" Spent ", theme::dim_style()),
        Span::styled(
            format_amount(app.month_spent),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" of ", theme::dim_style()),
        Span::styled(format_amount(limit), theme::normal_style()),
        Span::styled(
            format!("   {over} categories over budget"),
            if over > 0 {
                Style::default().fg(theme::RED)
            } else {
                theme::dim_style()
            },
        ),
    ]);
    f.render_widget(Paragraph::new(line).block(panel("Total")), area);
}
