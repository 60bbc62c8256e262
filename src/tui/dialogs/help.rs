use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use workday_calendar::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = 64.min(area.width);
    let help_height = 24.min(area.height);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let section = |title: &'static str| Line::from(vec![Span::styled(title, Style::default().fg(app.theme.help_section))]);

    let help_text = vec![
        Line::from(vec![Span::styled("workday-calendar Help", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        section("Navigation:"),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Next/previous week"),
        Line::from("  { / }    - Previous/next month"),
        Line::from("  [ / ]    - Previous/next year"),
        Line::from("  t        - Jump to today"),
        Line::from("  Tab      - Switch Calendar/Settings"),
        Line::from(""),
        section("Assigning:"),
        Line::from("  1-9      - Pick person as brush"),
        Line::from("  0        - Eraser"),
        Line::from("  Enter    - Paint selected day with brush"),
        Line::from("  x        - Clear selected day"),
        Line::from("  s        - Toggle attention mark"),
        Line::from(""),
        section("Export:"),
        Line::from("  e        - Export the year as PNG"),
        Line::from("  E        - Export the selected month"),
        Line::from(""),
        section("Settings tab:"),
        Line::from("  j/k      - Move through people"),
        Line::from("  a        - Add person"),
        Line::from("  Enter/e  - Edit person"),
        Line::from("  d        - Delete person"),
        Line::from(""),
        section("Commands:"),
        Line::from("  :q / :w / :wq      - Quit / save now / both"),
        Line::from("  :year 2026         - Show another year"),
        Line::from("  :goto 2025-12-24   - Jump to date"),
        Line::from("  :person Anna rose-200"),
        Line::from("  :color holiday border red-500"),
        Line::from("  :export [month]    - Export year or month"),
        Line::from("  :file PATH         - Use another data file"),
        Line::from("  :theme nord        - Change theme"),
        Line::from("  :help              - Show this help"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help (j/k to scroll, any key to close) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
