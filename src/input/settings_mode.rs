use crossterm::event::KeyCode;

use crate::app::AppState;
use crate::input::normal_mode;

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    if normal_mode::handle_global_key(key, state) {
        return;
    }

    let count = state.document.persons().len();
    match key {
        KeyCode::Char('j') | KeyCode::Down => {
            if state.settings_cursor + 1 < count {
                state.settings_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.settings_cursor = state.settings_cursor.saturating_sub(1);
        }
        KeyCode::Char('a') => state.open_new_person_form(),
        KeyCode::Enter | KeyCode::Char('e') => {
            if state.settings_cursor < count {
                state.open_edit_person_form(state.settings_cursor);
            }
        }
        KeyCode::Char('d') | KeyCode::Char('x') => state.request_delete_person(state.settings_cursor),
        _ => {}
    }
}

pub fn handle_confirm_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => state.confirm_delete(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.confirm_delete(false),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Mode;
    use crate::document::{ColorToken, Document, Hue, PersonDraft, Shade};

    fn settings_state() -> AppState {
        let mut doc = Document::default();
        for (name, hue) in [("Dennis", Hue::Blue), ("Christian", Hue::Green)] {
            doc.upsert_person(PersonDraft::new(name, Some(ColorToken::new(hue, Shade::S300))), None)
                .unwrap();
        }
        let mut state = AppState::new(doc);
        state.toggle_tab();
        state
    }

    #[test]
    fn cursor_stays_within_person_list() {
        let mut state = settings_state();

        handle_key(KeyCode::Char('j'), &mut state);
        handle_key(KeyCode::Char('j'), &mut state);
        assert_eq!(state.settings_cursor, 1);

        handle_key(KeyCode::Char('k'), &mut state);
        handle_key(KeyCode::Char('k'), &mut state);
        assert_eq!(state.settings_cursor, 0);
    }

    #[test]
    fn a_opens_empty_form() {
        let mut state = settings_state();

        handle_key(KeyCode::Char('a'), &mut state);

        assert_eq!(state.mode, Mode::Insert);
        assert!(!state.person_form.as_ref().unwrap().is_editing());
    }

    #[test]
    fn enter_opens_form_for_person_under_cursor() {
        let mut state = settings_state();
        handle_key(KeyCode::Char('j'), &mut state);

        handle_key(KeyCode::Enter, &mut state);

        let form = state.person_form.as_ref().unwrap();
        assert_eq!(form.edit_index, Some(1));
        assert_eq!(form.name, "Christian");
        assert_eq!(form.color_input, "green-300");
    }

    #[test]
    fn delete_asks_before_removing() {
        let mut state = settings_state();

        handle_key(KeyCode::Char('d'), &mut state);
        assert_eq!(state.mode, Mode::Confirm);
        assert_eq!(state.document.persons().len(), 2);

        handle_confirm_key(KeyCode::Char('y'), &mut state);
        assert_eq!(state.document.persons().len(), 1);
        assert_eq!(state.document.persons()[0].name, "Christian");
    }

    #[test]
    fn escape_cancels_delete() {
        let mut state = settings_state();

        handle_key(KeyCode::Char('d'), &mut state);
        handle_confirm_key(KeyCode::Esc, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.document.persons().len(), 2);
    }

    #[test]
    fn delete_on_empty_list_does_nothing() {
        let mut state = AppState::new(Document::default());

        handle_key(KeyCode::Char('d'), &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.delete_confirmation.is_none());
    }
}
