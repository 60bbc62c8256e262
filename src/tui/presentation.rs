use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use workday_calendar::{
    app::{AppState, Mode, StatusKind},
    document::MenuTab,
};
use crate::tui::{calendar_views, dialogs, settings_view};

pub fn ui(f: &mut Frame, app: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_title(f, app, main_chunks[0]);

    match app.active_tab() {
        MenuTab::Calendar => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Min(80),
                    Constraint::Length(36),
                ])
                .split(main_chunks[1]);
            calendar_views::year::render(f, app, content_chunks[0]);
            calendar_views::day_panel::render(f, app, content_chunks[1]);
        }
        MenuTab::Settings => settings_view::render(f, app, main_chunks[1]),
    }

    render_status(f, app, main_chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.person_form.is_some() {
        dialogs::person_form::render(f, app);
    }

    if app.delete_confirmation.is_some() {
        dialogs::delete_confirmation::render(f, app);
    }
}

fn render_title(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let tab_style = |tab: MenuTab| {
        if app.active_tab() == tab {
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(app.theme.inactive_day)
        }
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled("workday-calendar", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled("Calendar", tab_style(MenuTab::Calendar)),
        Span::raw(" | "),
        Span::styled("Settings", tab_style(MenuTab::Settings)),
        Span::raw(format!("  - {} - {:?} Mode", app.year, app.mode)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_status(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let (status_text, status_color) = if matches!(app.mode, Mode::Command) {
        (app.command_buffer.to_string(), app.theme.command_mode)
    } else if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => app.theme.success,
            StatusKind::Error => app.theme.error,
        };
        (status.text.clone(), color)
    } else {
        (
            format!(
                "People: {} | Workdays: {} | Press 'q' to quit, '?' for help",
                app.document.persons().len(),
                app.document.workdays().len()
            ),
            app.theme.status_bar,
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if matches!(app.mode, Mode::Command) { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
