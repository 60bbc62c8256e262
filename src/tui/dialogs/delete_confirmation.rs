use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use workday_calendar::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(index) = app.delete_confirmation else {
        return;
    };

    let person_name = app
        .document
        .persons()
        .get(index)
        .map(|p| p.name.as_str())
        .unwrap_or("this person");

    let area = f.size();
    let dialog_width = 60.min(area.width);
    let dialog_height = 10.min(area.height);
    let x = (area.width.saturating_sub(dialog_width)) / 2;
    let y = (area.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = ratatui::layout::Rect {
        x,
        y,
        width: dialog_width,
        height: dialog_height,
    };

    f.render_widget(Clear, dialog_area);

    let dialog_text = vec![
        Line::from(vec![Span::styled("Delete Person?", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Are you sure you want to delete "),
            Span::styled(person_name, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("?"),
        ]),
        Line::from(""),
        Line::from("Their workdays stay in the calendar."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Y", Style::default().fg(Color::Green)),
            Span::raw(" = Yes, delete | "),
            Span::styled("N", Style::default().fg(Color::Red)),
            Span::raw(" = No, cancel"),
        ]),
    ];

    let dialog_paragraph = Paragraph::new(dialog_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Confirm Delete ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Center);

    f.render_widget(dialog_paragraph, dialog_area);
}
