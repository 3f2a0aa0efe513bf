use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, List, ListItem, Paragraph},
    Frame,
};

use super::panel;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, to_f64};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.forecast.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No forecast yet. Press r or run :predict",
            theme::dim_style(),
        )))
        .centered()
        .block(panel("Forecast"));
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(24)])
        .split(area);

    render_chart(f, chunks[0], app);
    render_table(f, chunks[1], app);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let points: Vec<(f64, f64)> = app
        .forecast
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, to_f64(m.amount)))
        .collect();

    let max_y = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);
    let top = (max_y * 1.1).max(1.0);
    let last_x = points.len().saturating_sub(1).max(1) as f64;

    let first = app.forecast.first().map(|m| m.label()).unwrap_or_default();
    let middle = app
        .forecast
        .get(app.forecast.len() / 2)
        .map(|m| m.label())
        .unwrap_or_default();
    let last = app.forecast.last().map(|m| m.label()).unwrap_or_default();

    let dataset = Dataset::default()
        .name("Projected spend")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::YELLOW))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(panel(format!("Spending forecast, {} months", app.forecast.len())))
        .x_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, last_x])
                .labels(vec![first, middle, last]),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, top])
                .labels(vec!["0".to_string(), format!("{:.0}", top / 2.0), format!("{top:.0}")]),
        );

    f.render_widget(chart, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .forecast
        .iter()
        .map(|m| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<8}", m.label()), theme::dim_style()),
                Span::styled(
                    format!("{:>12}", format_amount(m.amount)),
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel("By month")), area);
}
