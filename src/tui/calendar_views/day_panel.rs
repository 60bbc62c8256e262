use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use workday_calendar::{
    app::AppState,
    calendar::{dates, holidays},
    ui::theme::{text_on, token_color},
};

/// Details of the selected date, the active brush and the person legend.
pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let date = app.selected_date;
    let heading = Style::default().fg(app.theme.help_section).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            date.format("%A, %d %B %Y").to_string(),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("KW {}", dates::iso_week_number(date)),
            Style::default().fg(app.theme.week_number),
        )),
        Line::from(""),
    ];

    if let Some(holiday) = holidays::holiday_on(date) {
        lines.push(Line::from(vec![
            Span::styled("Holiday: ", Style::default().fg(token_color(app.document.colors.holiday_border))),
            Span::raw(holiday.name.clone()),
        ]));
    }
    if let Some(vacation) = holidays::vacation_on(date) {
        lines.push(Line::from(vec![
            Span::styled("Vacation: ", Style::default().fg(token_color(app.document.colors.vacation_border))),
            Span::raw(vacation.name.clone()),
        ]));
    }

    match app.document.assignment_on(date) {
        Some(assignment) => {
            if assignment.has_owner() {
                let mut style = Style::default();
                if let Some(color) = assignment.color {
                    style = style.bg(token_color(color)).fg(text_on(color));
                }
                lines.push(Line::from(vec![
                    Span::raw("Working: "),
                    Span::styled(format!(" {} ", assignment.name), style),
                ]));
            }
            if assignment.special {
                lines.push(Line::from(Span::styled(
                    "! Marked for attention",
                    Style::default()
                        .fg(token_color(app.document.colors.attention_border))
                        .add_modifier(Modifier::BOLD),
                )));
            }
        }
        None => lines.push(Line::from(Span::styled("Unassigned", Style::default().fg(app.theme.inactive_day)))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Brush", heading)));
    let brush = app
        .selected_person
        .and_then(|idx| app.document.persons().get(idx));
    match brush {
        Some(person) => lines.push(Line::from(Span::styled(
            format!(" {} ", person.name),
            Style::default().bg(token_color(person.color)).fg(text_on(person.color)),
        ))),
        None => lines.push(Line::from(" Eraser ")),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("People", heading)));
    if app.document.persons().is_empty() {
        lines.push(Line::from("  No people yet. Add some in Settings (Tab)."));
    }
    for (idx, person) in app.document.persons().iter().enumerate() {
        let selected = app.selected_person == Some(idx);
        let marker = if selected { ">" } else { " " };
        lines.push(Line::from(vec![
            Span::raw(format!("{}{} ", marker, idx + 1)),
            Span::styled("  ", Style::default().bg(token_color(person.color))),
            Span::raw(format!(" {}", person.name)),
        ]));
    }
    lines.push(Line::from("  0 Eraser"));

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Day "));
    f.render_widget(panel, area);
}
