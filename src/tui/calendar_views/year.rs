use chrono::{Datelike, Local};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use workday_calendar::{
    app::AppState,
    calendar::dates::WEEKDAY_NAMES,
    ui::{
        theme::{text_on, token_color},
        year_view::{self, BorderAccent, DayCell, MonthGrid},
    },
};

const MONTH_WIDTH: usize = 24;
const SEPARATOR: &str = " │ ";

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let layout = year_view::calculate_layout(&app.document, app.year);
    let columns = if area.width as usize >= 4 * MONTH_WIDTH + 3 * SEPARATOR.chars().count() + 2 {
        4
    } else {
        3
    };

    let mut lines = Vec::new();
    if let Some(notice) = layout.notice {
        lines.push(Line::from(Span::styled(notice, Style::default().fg(app.theme.error))));
        lines.push(Line::from(""));
    }

    for row in layout.months.chunks(columns) {
        lines.push(month_headers(app, row));
        lines.push(weekday_headers(app, row));

        let weeks = row.iter().map(|m| m.weeks.len()).max().unwrap_or(0);
        for week in 0..weeks {
            let mut spans = Vec::new();
            for (col, month) in row.iter().enumerate() {
                if col > 0 {
                    spans.push(separator(app));
                }
                match month.weeks.get(week) {
                    Some(week_row) => {
                        spans.push(week_number(app, week_row.iso_week));
                        spans.extend(week_row.days.iter().flat_map(|cell| day_spans(app, cell, &layout)));
                    }
                    None => spans.push(Span::raw(" ".repeat(MONTH_WIDTH))),
                }
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    let content = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", app.year))
            .title_style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
    );
    f.render_widget(content, area);
}

fn separator(app: &AppState) -> Span<'static> {
    Span::styled(SEPARATOR, Style::default().fg(app.theme.inactive_day))
}

fn month_headers(app: &AppState, row: &[MonthGrid]) -> Line<'static> {
    let mut spans = Vec::new();
    for (col, month) in row.iter().enumerate() {
        if col > 0 {
            spans.push(Span::raw(" ".repeat(SEPARATOR.chars().count())));
        }
        let style = Style::default().fg(app.theme.month_header).add_modifier(Modifier::BOLD);
        spans.push(Span::styled(format!("{:^width$}", month.name, width = MONTH_WIDTH), style));
    }
    Line::from(spans)
}

fn weekday_headers(app: &AppState, row: &[MonthGrid]) -> Line<'static> {
    let style = Style::default().fg(app.theme.weekday_header);
    let mut spans = Vec::new();
    for col in 0..row.len() {
        if col > 0 {
            spans.push(separator(app));
        }
        let label = if app.show_week_numbers { "KW " } else { "   " };
        spans.push(Span::styled(label, Style::default().fg(app.theme.week_number)));
        for name in WEEKDAY_NAMES {
            spans.push(Span::styled(format!("{} ", name), style));
        }
    }
    Line::from(spans)
}

fn week_number(app: &AppState, iso_week: u32) -> Span<'static> {
    if app.show_week_numbers {
        Span::styled(format!("{:>2} ", iso_week), Style::default().fg(app.theme.week_number))
    } else {
        Span::raw("   ")
    }
}

/// Two digits plus a marker column for the attention flag.
fn day_spans(app: &AppState, cell: &DayCell, layout: &year_view::YearLayout) -> [Span<'static>; 2] {
    if !cell.in_month {
        return [Span::raw("  "), Span::raw(" ")];
    }

    let mut style = Style::default();
    if let Some(fill) = cell.fill_color {
        style = style.bg(token_color(fill)).fg(text_on(fill));
    }
    match cell.border {
        Some(BorderAccent::Holiday(token)) | Some(BorderAccent::Vacation(token)) => {
            style = style.add_modifier(Modifier::UNDERLINED);
            if cell.fill_color.is_none() {
                style = style.fg(token_color(token));
            }
        }
        Some(BorderAccent::Assignment) => style = style.add_modifier(Modifier::BOLD),
        None => {}
    }
    if cell.date == Local::now().date_naive() {
        style = style.add_modifier(Modifier::BOLD);
        if cell.fill_color.is_none() && cell.border.is_none() {
            style = style.fg(app.theme.today);
        }
    }
    if cell.date == app.selected_date {
        style = style
            .bg(app.theme.selected_bg)
            .fg(app.theme.selected_fg)
            .add_modifier(Modifier::BOLD);
    }

    let marker = if cell.is_special {
        Span::styled(
            "!",
            Style::default().fg(token_color(layout.attention_color)).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(" ")
    };

    [Span::styled(format!("{:>2}", cell.date.day()), style), marker]
}
