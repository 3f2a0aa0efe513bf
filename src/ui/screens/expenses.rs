use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = title(app);

    if app.expenses.is_empty() {
        let hint = if app.search_input.is_empty() {
            "Add one with :add <amount> <description>, or :load a CSV"
        } else {
            "Press Esc in search mode or :clear to reset"
        };
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No expenses match the current filter",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim_style())),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(panel(title)), area);
        return;
    }

    let header = Row::new(
        ["Date", "Description", "Category", "Amount"]
            .into_iter()
            .map(|h| Cell::from(h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", txn.date)),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(Span::styled(
                    txn.category.as_str(),
                    Style::default().fg(theme::category_color(txn.category)),
                )),
                Cell::from(Span::styled(format_amount(txn.amount), theme::amount_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(22),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(panel(title));
    f.render_widget(table, area);
}

fn title(app: &App) -> String {
    let total: Decimal = app.expenses.iter().map(|t| t.amount).sum();
    let mut title = format!(
        "Expenses ({}) {} to {}, total {}",
        app.expenses.len(),
        app.filter.start,
        app.filter.end,
        format_amount(total)
    );
    if let Some(cat) = app.filter.category {
        title.push_str(&format!(" [{cat}]"));
    }
    if !app.search_input.is_empty() {
        title.push_str(&format!(" search: '{}'", app.search_input));
    }
    title
}
