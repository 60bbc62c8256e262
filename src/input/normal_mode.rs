use chrono::{Datelike, Days, Months, NaiveDate};
use crossterm::event::KeyCode;

use crate::app::{AppState, Mode, Request};
use crate::export::ExportTarget;

/// Keys shared by both tabs.
pub fn handle_global_key(key: KeyCode, state: &mut AppState) -> bool {
    match key {
        KeyCode::Tab => state.toggle_tab(),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('?') => show_help(state),
        KeyCode::Char('q') => state.request(Request::Quit),
        _ => return false,
    }
    true
}

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    if handle_global_key(key, state) {
        return;
    }

    match key {
        KeyCode::Char('h') | KeyCode::Left => move_by_days(state, -1),
        KeyCode::Char('l') | KeyCode::Right => move_by_days(state, 1),
        KeyCode::Char('j') | KeyCode::Down => move_by_days(state, 7),
        KeyCode::Char('k') | KeyCode::Up => move_by_days(state, -7),
        KeyCode::Char('{') => move_by_months(state, -1),
        KeyCode::Char('}') => move_by_months(state, 1),
        KeyCode::Char('[') => state.set_year(state.year.saturating_sub(1)),
        KeyCode::Char(']') => state.set_year(state.year.saturating_add(1)),
        KeyCode::Char('t') => jump_to_today(state),
        KeyCode::Char('0') => state.select_person(None),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10).map(|d| d as usize - 1).unwrap_or(0);
            state.select_person(Some(index));
        }
        KeyCode::Enter | KeyCode::Char(' ') => state.assign_selected(),
        KeyCode::Char('x') => state.clear_selected(),
        KeyCode::Char('s') => state.toggle_special_selected(),
        KeyCode::Char('e') => state.request(Request::Export(ExportTarget::Year)),
        KeyCode::Char('E') => {
            let month = state.selected_date.month();
            state.request(Request::Export(ExportTarget::Month(month)));
        }
        _ => {}
    }
}

fn move_by_days(state: &mut AppState, delta: i64) {
    let moved = if delta >= 0 {
        state.selected_date.checked_add_days(Days::new(delta as u64))
    } else {
        state.selected_date.checked_sub_days(Days::new(delta.unsigned_abs()))
    };
    if let Some(date) = moved {
        state.select_date(date);
    }
}

/// Month steps clamp the day to the target month's length.
fn move_by_months(state: &mut AppState, delta: i32) {
    let moved = if delta >= 0 {
        state.selected_date.checked_add_months(Months::new(delta as u32))
    } else {
        state.selected_date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    if let Some(date) = moved {
        state.select_date(date);
    }
}

fn jump_to_today(state: &mut AppState) {
    let today: NaiveDate = chrono::Local::now().date_naive();
    state.select_date(today);
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}

fn show_help(state: &mut AppState) {
    state.show_help = true;
    state.help_scroll = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ColorToken, Document, Hue, MenuTab, PersonDraft, Shade};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn state_on(d: NaiveDate) -> AppState {
        let mut doc = Document::default();
        doc.upsert_person(PersonDraft::new("Dennis", Some(ColorToken::new(Hue::Blue, Shade::S300))), None)
            .unwrap();
        doc.upsert_person(PersonDraft::new("Christian", Some(ColorToken::new(Hue::Green, Shade::S300))), None)
            .unwrap();
        let mut state = AppState::new(doc);
        state.select_date(d);
        state
    }

    #[test]
    fn h_key_moves_to_previous_day() {
        let mut state = state_on(date(2025, 1, 15));
        handle_key(KeyCode::Char('h'), &mut state);
        assert_eq!(state.selected_date, date(2025, 1, 14));
    }

    #[test]
    fn l_key_moves_to_next_day() {
        let mut state = state_on(date(2025, 1, 15));
        handle_key(KeyCode::Char('l'), &mut state);
        assert_eq!(state.selected_date, date(2025, 1, 16));
    }

    #[test]
    fn j_and_k_move_by_week() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('j'), &mut state);
        assert_eq!(state.selected_date, date(2025, 1, 22));

        handle_key(KeyCode::Char('k'), &mut state);
        handle_key(KeyCode::Char('k'), &mut state);
        assert_eq!(state.selected_date, date(2025, 1, 8));
    }

    #[test]
    fn crossing_new_year_changes_displayed_year() {
        let mut state = state_on(date(2025, 12, 31));

        handle_key(KeyCode::Char('l'), &mut state);

        assert_eq!(state.selected_date, date(2026, 1, 1));
        assert_eq!(state.year, 2026);
    }

    #[test]
    fn t_key_jumps_to_today() {
        let mut state = state_on(date(2025, 1, 1));
        handle_key(KeyCode::Char('t'), &mut state);
        assert_eq!(state.selected_date, chrono::Local::now().date_naive());
    }

    #[test]
    fn braces_move_by_month_and_clamp() {
        let mut state = state_on(date(2025, 1, 31));

        handle_key(KeyCode::Char('}'), &mut state);
        assert_eq!(state.selected_date, date(2025, 2, 28));

        handle_key(KeyCode::Char('{'), &mut state);
        assert_eq!(state.selected_date, date(2025, 1, 28));
    }

    #[test]
    fn brackets_move_by_year() {
        let mut state = state_on(date(2025, 6, 10));

        handle_key(KeyCode::Char(']'), &mut state);
        assert_eq!(state.year, 2026);
        assert_eq!(state.selected_date, date(2026, 6, 10));

        handle_key(KeyCode::Char('['), &mut state);
        handle_key(KeyCode::Char('['), &mut state);
        assert_eq!(state.year, 2024);
    }

    #[test]
    fn year_keys_stop_at_the_last_supported_year() {
        let mut state = state_on(date(2025, 6, 10));
        state.set_year(i32::MAX);

        handle_key(KeyCode::Char(']'), &mut state);
        assert_eq!(state.year, 9999);

        state.year = i32::MIN;
        handle_key(KeyCode::Char('['), &mut state);
        assert_eq!(state.year, 1);
    }

    #[test]
    fn digit_selects_person_and_zero_selects_eraser() {
        let mut state = state_on(date(2025, 1, 15));

        handle_key(KeyCode::Char('2'), &mut state);
        assert_eq!(state.selected_person, Some(1));

        handle_key(KeyCode::Char('0'), &mut state);
        assert_eq!(state.selected_person, None);
    }

    #[test]
    fn enter_assigns_and_x_removes() {
        let mut state = state_on(date(2025, 3, 4));

        handle_key(KeyCode::Char('2'), &mut state);
        handle_key(KeyCode::Enter, &mut state);
        assert_eq!(state.document.assignment_on(date(2025, 3, 4)).unwrap().name, "Christian");

        handle_key(KeyCode::Char('x'), &mut state);
        assert!(state.document.assignment_on(date(2025, 3, 4)).is_none());
    }

    #[test]
    fn s_toggles_special_flag() {
        let mut state = state_on(date(2025, 3, 4));

        handle_key(KeyCode::Char('s'), &mut state);
        assert!(state.document.assignment_on(date(2025, 3, 4)).unwrap().special);

        handle_key(KeyCode::Char('s'), &mut state);
        assert!(!state.document.assignment_on(date(2025, 3, 4)).unwrap().special);
    }

    #[test]
    fn export_keys_queue_requests() {
        let mut state = state_on(date(2025, 4, 2));

        handle_key(KeyCode::Char('e'), &mut state);
        handle_key(KeyCode::Char('E'), &mut state);

        assert_eq!(
            state.take_requests(),
            vec![
                Request::Export(ExportTarget::Year),
                Request::Export(ExportTarget::Month(4)),
            ]
        );
    }

    #[test]
    fn colon_enters_command_mode() {
        let mut state = state_on(date(2025, 1, 1));

        handle_key(KeyCode::Char(':'), &mut state);

        assert_eq!(state.mode, Mode::Command);
        assert_eq!(state.command_buffer, ":");
    }

    #[test]
    fn tab_switches_to_settings() {
        let mut state = state_on(date(2025, 1, 1));

        handle_key(KeyCode::Tab, &mut state);

        assert_eq!(state.active_tab(), MenuTab::Settings);
    }

    #[test]
    fn q_requests_quit() {
        let mut state = state_on(date(2025, 1, 1));
        handle_key(KeyCode::Char('q'), &mut state);
        assert_eq!(state.take_requests(), vec![Request::Quit]);
    }
}
