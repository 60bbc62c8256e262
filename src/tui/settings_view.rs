use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use workday_calendar::{
    app::AppState,
    document::{Role, Slot},
    ui::theme::{text_on, token_color},
};

const ROLES: [(Role, &str); 3] = [
    (Role::Holiday, "holiday"),
    (Role::Vacation, "vacation"),
    (Role::Attention, "attention"),
];
const SLOTS: [(Slot, &str); 3] = [(Slot::Background, "bg"), (Slot::Border, "border"), (Slot::Text, "text")];

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_people(f, app, chunks[0]);
    render_colors(f, app, chunks[1]);
}

fn render_people(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();

    if app.document.persons().is_empty() {
        lines.push(Line::from(Span::styled(
            "No people yet. Press 'a' to add one.",
            Style::default().fg(app.theme.inactive_day),
        )));
    }

    for (idx, person) in app.document.persons().iter().enumerate() {
        let selected = idx == app.settings_cursor;
        let name_style = if selected {
            Style::default()
                .bg(app.theme.selected_bg)
                .fg(app.theme.selected_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let assigned = app
            .document
            .workdays()
            .iter()
            .filter(|w| w.name == person.name)
            .count();

        lines.push(Line::from(vec![
            Span::raw(format!("{:>2} ", idx + 1)),
            Span::styled(
                format!(" {:<12} ", person.color.to_string()),
                Style::default().bg(token_color(person.color)).fg(text_on(person.color)),
            ),
            Span::raw(" "),
            Span::styled(person.name.clone(), name_style),
            Span::styled(format!("  ({} days)", assigned), Style::default().fg(app.theme.inactive_day)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "a add | Enter edit | d delete | j/k move",
        Style::default().fg(app.theme.inactive_day),
    )));

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" People "));
    f.render_widget(panel, area);
}

fn render_colors(f: &mut Frame, app: &AppState, area: Rect) {
    let heading = Style::default().fg(app.theme.help_section).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled("Annotation colors", heading))];

    for (role, role_name) in ROLES {
        let mut spans = vec![Span::raw(format!("{:<10}", role_name))];
        for (slot, slot_name) in SLOTS {
            let token = app.document.colors.get(role, slot);
            spans.push(Span::raw(format!(" {}:", slot_name)));
            spans.push(Span::styled(
                format!(" {} ", token),
                Style::default().bg(token_color(token)).fg(text_on(token)),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        "Change with :color ROLE SLOT COLOR",
        Style::default().fg(app.theme.inactive_day),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Data file", heading)));
    lines.push(Line::from(app.data_file.display().to_string()));
    lines.push(Line::from(Span::styled(
        "Change with :file PATH",
        Style::default().fg(app.theme.inactive_day),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Theme", heading)));
    lines.push(Line::from(app.theme.name.clone()));

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Settings "));
    f.render_widget(panel, area);
}
