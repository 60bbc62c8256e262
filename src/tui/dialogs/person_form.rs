use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use workday_calendar::{
    app::{AppState, FormField},
    ui::theme::{text_on, token_color},
};

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.person_form else {
        return;
    };

    let area = f.size();
    let form_width = 60.min(area.width);
    let form_height = 13.min(area.height);
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width,
        height: form_height,
    };

    f.render_widget(Clear, form_area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;
    let label_color = |field: FormField| if form.active_field == field { active_color } else { inactive_color };

    let form_title = if form.is_editing() { "Edit Person" } else { "Add Person" };

    let swatch = match form.color {
        Some(token) => Span::styled(
            format!(" {} ", token),
            Style::default().bg(token_color(token)).fg(text_on(token)),
        ),
        None => Span::styled(" no color ", Style::default().fg(app.theme.error)),
    };

    let form_text = vec![
        Line::from(vec![Span::styled(form_title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Name:  ", Style::default().fg(label_color(FormField::Name))),
            Span::raw(&form.name),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Color: ", Style::default().fg(label_color(FormField::Color))),
            Span::raw(&form.color_input),
        ]),
        Line::from(vec![Span::raw("       "), swatch]),
        Line::from(""),
        Line::from(Span::styled(
            "←/→ hue  ↑/↓ shade  or type e.g. blue-300",
            Style::default().fg(inactive_color),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" next field | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" save | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" cancel"),
        ]),
    ];

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", form_title))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
