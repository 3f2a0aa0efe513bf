use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(mut app: App) -> Result<()> {
    app.refresh_all()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
                InputMode::Search => handle_search_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(screen) = Screen::all().get(idx) {
                switch_screen(app, *screen)?;
            }
        }
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, screens[(idx + 1) % screens.len()])?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev])?;
        }
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('r') if app.screen == Screen::Forecast => {
            commands::handle_command("predict", app)?;
        }
        KeyCode::Char('H') => commands::handle_command("prev-month", app)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app)?,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        _ => {}
    }
    Ok(())
}

enum Edit {
    Submit,
    Cancel,
    Changed,
    Ignored,
}

/// Shared line editing for the command and search prompts.
fn edit_line(buf: &mut String, key: event::KeyEvent) -> Edit {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => Edit::Submit,
        KeyCode::Esc => Edit::Cancel,
        KeyCode::Backspace => {
            buf.pop();
            Edit::Changed
        }
        KeyCode::Char('u') if ctrl => {
            buf.clear();
            Edit::Changed
        }
        KeyCode::Char('w') if ctrl => {
            let keep = buf.trim_end().rfind(' ').map_or(0, |pos| pos + 1);
            buf.truncate(keep);
            Edit::Changed
        }
        KeyCode::Char(c) if !ctrl => {
            buf.push(c);
            Edit::Changed
        }
        _ => Edit::Ignored,
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match edit_line(&mut app.command_input, key) {
        Edit::Submit => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app)?;
        }
        Edit::Cancel => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        // Erasing the whole prompt leaves command mode
        Edit::Changed if app.command_input.is_empty() => app.input_mode = InputMode::Normal,
        Edit::Changed | Edit::Ignored => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App) {
    match edit_line(&mut app.search_input, key) {
        Edit::Submit => {
            app.input_mode = InputMode::Normal;
            app.screen = Screen::Expenses;
            app.refresh_expenses();
        }
        Edit::Cancel => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            app.refresh_expenses();
        }
        Edit::Changed => live_search(app),
        Edit::Ignored => {}
    }
}

fn live_search(app: &mut App) {
    app.screen = Screen::Expenses;
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.refresh_expenses();
}

fn switch_screen(app: &mut App, screen: Screen) -> Result<()> {
    app.screen = screen;
    match screen {
        Screen::Dashboard | Screen::Budgets | Screen::Profile => app.refresh_budgets(),
        Screen::Expenses => app.refresh_expenses(),
        // Forecasts are regenerated on request only
        Screen::Forecast if app.forecast.is_empty() => app.refresh_forecast()?,
        Screen::Forecast => {}
    }
    app.set_status(screen.to_string());
    Ok(())
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Expenses => {
            let page = app.expense_page();
            scroll_down(
                &mut app.expense_index,
                &mut app.expense_scroll,
                app.expenses.len(),
                page,
            );
        }
        Screen::Budgets => {
            if app.budget_index + 1 < app.budget_report.len() {
                app.budget_index += 1;
            }
        }
        _ => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_up(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Budgets => app.budget_index = app.budget_index.saturating_sub(1),
        _ => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Budgets => app.budget_index = 0,
        _ => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Expenses => {
            let page = app.expense_page();
            scroll_to_bottom(
                &mut app.expense_index,
                &mut app.expense_scroll,
                app.expenses.len(),
                page,
            );
        }
        Screen::Budgets => app.budget_index = app.budget_report.len().saturating_sub(1),
        _ => {}
    }
}
